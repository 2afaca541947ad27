//! Call inlining over the intermediate instruction stream.
//!
//! SPL has no runtime call mechanism; every call site is replaced by a
//! copy of the callee's body. An expansion consists of:
//!
//! 1. One assignment per parameter, binding the argument atoms to fresh
//!    parameter names in call order
//! 2. The callee body, lowered with every parameter and local renamed to
//!    its fresh name
//! 3. For function calls, a final assignment of the renamed return atom
//!    into the call's target variable
//!
//! Fresh names combine an uppercase prefix with a per-expansion id and
//! the original name (`P3x`, `L3tmp`); source names are lowercase-first,
//! so captures cannot occur. Global names are never renamed. Expansion
//! recurses through nested calls and is depth-capped so that recursive
//! programs fail with a diagnostic instead of diverging.

use std::{collections::HashMap, mem, rc::Rc};

use crate::{
    ast::program::{FuncDef, ProcDef, Program},
    codegen::{
        generator::Generator,
        ir::{Atom, Counters, Expr, Instruction},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Nested expansions beyond this depth abort compilation. SPL forbids
/// recursion, so any program hitting the cap is recursive.
pub const MAX_INLINE_DEPTH: usize = 64;

pub struct Inliner<'a> {
    procs: HashMap<&'a str, &'a ProcDef>,
    funcs: HashMap<&'a str, &'a FuncDef>,
    counters: Counters,
    file: Rc<String>,
}

impl<'a> Inliner<'a> {
    pub fn new(program: &'a Program, counters: Counters, file: Rc<String>) -> Self {
        Inliner {
            procs: program
                .procs
                .iter()
                .map(|p| (p.name.as_str(), p))
                .collect(),
            funcs: program
                .funcs
                .iter()
                .map(|f| (f.name.as_str(), f))
                .collect(),
            counters,
            file,
        }
    }

    /// Expands every call in `stream` until none remain.
    pub fn inline(mut self, stream: Vec<Instruction>) -> Result<Vec<Instruction>, Error> {
        self.expand_stream(stream, 0)
    }

    fn expand_stream(
        &mut self,
        stream: Vec<Instruction>,
        depth: usize,
    ) -> Result<Vec<Instruction>, Error> {
        let mut out = vec![];
        for instruction in stream {
            match instruction {
                Instruction::Call { name, args } => {
                    out.extend(self.expand_call(&name, &args, None, depth)?);
                }
                Instruction::CallAssign { target, name, args } => {
                    out.extend(self.expand_call(&name, &args, Some(&target), depth)?);
                }
                other => out.push(other),
            }
        }
        Ok(out)
    }

    fn expand_call(
        &mut self,
        name: &str,
        args: &[Atom],
        result_target: Option<&str>,
        depth: usize,
    ) -> Result<Vec<Instruction>, Error> {
        if depth >= MAX_INLINE_DEPTH {
            return Err(Error::new(
                ErrorImpl::RecursionLimitExceeded {
                    name: String::from(name),
                    limit: MAX_INLINE_DEPTH,
                },
                Position(0, Rc::clone(&self.file)),
            ));
        }

        // Earlier phases guarantee the callee exists in the right group;
        // a miss here is a compiler fault, not a user error.
        let (params, locals, body, ret) = match result_target {
            None => match self.procs.get(name).copied() {
                Some(pdef) => (&pdef.params, &pdef.locals, &pdef.body, None),
                None => return Err(self.fault(name)),
            },
            Some(_) => match self.funcs.get(name).copied() {
                Some(fdef) => (&fdef.params, &fdef.locals, &fdef.body, Some(&fdef.ret)),
                None => return Err(self.fault(name)),
            },
        };

        let id = self.counters.next_name_id();
        let mut rename = HashMap::new();
        for param in params.iter() {
            rename.insert(param.name.clone(), fresh_name('P', id, &param.name));
        }
        for local in locals.iter() {
            rename.insert(local.name.clone(), fresh_name('L', id, &local.name));
        }

        let mut out: Vec<Instruction> = params
            .iter()
            .zip(args)
            .map(|(param, arg)| Instruction::Assign {
                target: rename[&param.name].clone(),
                value: Expr::Atom(arg.clone()),
            })
            .collect();

        let mut generator = Generator::new(mem::take(&mut self.counters), rename);
        generator.emit_body(body)?;
        let ret_assign = ret.map(|atom| Instruction::Assign {
            target: String::from(result_target.unwrap_or_default()),
            value: Expr::Atom(generator.lower_atom(atom)),
        });
        let (body_stream, counters) = generator.finish();
        self.counters = counters;

        out.extend(self.expand_stream(body_stream, depth + 1)?);
        out.extend(ret_assign);
        Ok(out)
    }

    fn fault(&self, name: &str) -> Error {
        Error::new(
            ErrorImpl::InternalFault {
                message: format!("call to unknown definition `{}` survived checking", name),
            },
            Position(0, Rc::clone(&self.file)),
        )
    }
}

fn fresh_name(prefix: char, id: usize, base: &str) -> String {
    format!("{}{}{}", prefix, id, base)
}
