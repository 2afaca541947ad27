//! Label-to-address linearization.
//!
//! The final pass walks the inlined instruction stream, assigns each
//! instruction a BASIC line address (`start + index * step`), and patches
//! every symbolic jump target to the address of its label marker. Marker
//! instructions keep their address so that jumps into them stay stable,
//! but they render no output line.

use std::collections::HashMap;

use crate::{
    codegen::ir::{Instruction, Target},
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Output address numbering. The defaults match classic BASIC listings.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    pub start: u32,
    pub step: u32,
}

impl Default for Layout {
    fn default() -> Self {
        Layout { start: 10, step: 10 }
    }
}

/// A fully addressed program, ready to render as BASIC source.
#[derive(Debug)]
pub struct BasicProgram {
    /// Every instruction with its address, label markers included.
    pub lines: Vec<(u32, Instruction)>,
    labels: HashMap<String, u32>,
}

impl BasicProgram {
    /// The address a label marker was placed at.
    pub fn address_of(&self, label: &str) -> Option<u32> {
        self.labels.get(label).copied()
    }

    /// Renders the program as numbered BASIC lines. Label markers are
    /// addressed but never rendered.
    pub fn to_source(&self) -> String {
        self.lines
            .iter()
            .filter(|(_, instruction)| !matches!(instruction, Instruction::Label(_)))
            .map(|(address, instruction)| format!("{} {}", address, instruction))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Assigns addresses and resolves every jump target.
///
/// Jumps to a label no marker binds are rejected outright; silently
/// emitting an unresolved name would produce a BASIC program that fails
/// at load time instead.
pub fn linearize(stream: &[Instruction], layout: Layout) -> Result<BasicProgram, Error> {
    if layout.step == 0 {
        return Err(fault("address layout step must be positive"));
    }

    let mut labels = HashMap::new();
    for (index, instruction) in stream.iter().enumerate() {
        if let Instruction::Label(label) = instruction {
            labels.insert(label.0.clone(), address_at(layout, index));
        }
    }

    let mut lines = Vec::with_capacity(stream.len());
    for (index, instruction) in stream.iter().enumerate() {
        let address = address_at(layout, index);
        let patched = match instruction {
            Instruction::Goto(target) => Instruction::Goto(resolve(target, &labels)?),
            Instruction::IfGoto {
                left,
                cmp,
                right,
                target,
            } => Instruction::IfGoto {
                left: left.clone(),
                cmp: *cmp,
                right: right.clone(),
                target: resolve(target, &labels)?,
            },
            Instruction::Call { .. } | Instruction::CallAssign { .. } => {
                return Err(fault("a call instruction survived inlining"));
            }
            other => other.clone(),
        };
        lines.push((address, patched));
    }

    Ok(BasicProgram { lines, labels })
}

fn address_at(layout: Layout, index: usize) -> u32 {
    layout.start + index as u32 * layout.step
}

fn resolve(target: &Target, labels: &HashMap<String, u32>) -> Result<Target, Error> {
    match target {
        Target::Address(address) => Ok(Target::Address(*address)),
        Target::Label(label) => match labels.get(&label.0) {
            Some(address) => Ok(Target::Address(*address)),
            None => Err(Error::new(
                ErrorImpl::UnresolvedLabel {
                    label: label.0.clone(),
                },
                Position::null(),
            )),
        },
    }
}

fn fault(message: &str) -> Error {
    Error::new(
        ErrorImpl::InternalFault {
            message: String::from(message),
        },
        Position::null(),
    )
}
