//! Lowering from the SPL AST to the intermediate instruction stream.
//!
//! Structured instructions become label-and-goto sequences:
//!
//! - `if` and `if`/`else` branch through a then-label and an exit label
//! - `while` tests at a head label and jumps back after the body
//! - `do .. until` falls through the body and re-enters until the
//!   condition holds
//!
//! Boolean conditions never materialise as values. They are compiled as
//! jump cascades with short-circuit order: the right operand of `and` and
//! `or` is only reached when the left operand has not already decided the
//! outcome.
//!
//! The generator also runs over procedure and function bodies during
//! inlining, with a rename map substituting fresh names for the callee's
//! parameters and locals.

use std::collections::HashMap;

use crate::{
    ast::{
        instructions::{Instr, Output},
        program::Program,
        terms::{self, BinOp, Term, UnOp},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::ir::{ArithOp, Atom, CmpOp, Counters, Expr, Instruction, Label, PrintArg, Target};

pub struct Generator {
    counters: Counters,
    /// Substitutions applied to every variable occurrence; empty outside
    /// inline expansion.
    rename: HashMap<String, String>,
    out: Vec<Instruction>,
}

impl Generator {
    /// Lowers the main body of `program`. Procedure and function bodies
    /// are lowered on demand when the inliner expands their call sites.
    pub fn generate(program: &Program) -> Result<(Vec<Instruction>, Counters), Error> {
        let mut generator = Generator::new(Counters::default(), HashMap::new());
        generator.emit_body(&program.main.body)?;
        Ok(generator.finish())
    }

    pub fn new(counters: Counters, rename: HashMap<String, String>) -> Self {
        Generator {
            counters,
            rename,
            out: vec![],
        }
    }

    pub fn finish(self) -> (Vec<Instruction>, Counters) {
        (self.out, self.counters)
    }

    pub fn emit_body(&mut self, body: &[Instr]) -> Result<(), Error> {
        for instr in body {
            self.emit_instr(instr)?;
        }
        Ok(())
    }

    fn emit(&mut self, instruction: Instruction) {
        self.out.push(instruction);
    }

    fn fault(message: &str) -> Error {
        Error::new(
            ErrorImpl::InternalFault {
                message: String::from(message),
            },
            Position::null(),
        )
    }

    fn substitute(&self, name: &str) -> String {
        match self.rename.get(name) {
            Some(renamed) => renamed.clone(),
            None => String::from(name),
        }
    }

    pub fn lower_atom(&self, atom: &terms::Atom) -> Atom {
        match atom {
            terms::Atom::Var { name, .. } => Atom::Var(self.substitute(name)),
            terms::Atom::Number { value, .. } => Atom::Number(*value),
        }
    }

    /// Lowers a numeric term to an expression. Boolean operators cannot
    /// occur here once type checking has passed.
    fn lower_term(&self, term: &Term) -> Result<Expr, Error> {
        match term {
            Term::Atom(atom) => Ok(Expr::Atom(self.lower_atom(atom))),
            Term::Unary {
                op: UnOp::Neg,
                operand,
            } => Ok(Expr::Neg(Box::new(self.lower_term(operand)?))),
            Term::Binary { op, left, right } => {
                let op = match op {
                    BinOp::Plus => ArithOp::Add,
                    BinOp::Minus => ArithOp::Sub,
                    BinOp::Mult => ArithOp::Mul,
                    BinOp::Div => ArithOp::Div,
                    _ => return Err(Self::fault("boolean operator in a numeric position")),
                };
                Ok(Expr::Binary {
                    op,
                    left: Box::new(self.lower_term(left)?),
                    right: Box::new(self.lower_term(right)?),
                })
            }
            Term::Unary { op: UnOp::Not, .. } => {
                Err(Self::fault("boolean operator in a numeric position"))
            }
        }
    }

    fn emit_instr(&mut self, instr: &Instr) -> Result<(), Error> {
        match instr {
            Instr::Halt => self.emit(Instruction::Halt),
            Instr::Print(Output::Atom(atom)) => {
                let atom = self.lower_atom(atom);
                self.emit(Instruction::Print(PrintArg::Atom(atom)));
            }
            Instr::Print(Output::Text { value, .. }) => {
                self.emit(Instruction::Print(PrintArg::Text(value.clone())));
            }
            Instr::Assign { target, value, .. } => {
                let value = self.lower_term(value)?;
                self.emit(Instruction::Assign {
                    target: self.substitute(target),
                    value,
                });
            }
            Instr::Call { name, args, .. } => {
                let args = args.iter().map(|a| self.lower_atom(a)).collect();
                self.emit(Instruction::Call {
                    name: name.clone(),
                    args,
                });
            }
            Instr::AssignCall {
                target, name, args, ..
            } => {
                let args = args.iter().map(|a| self.lower_atom(a)).collect();
                self.emit(Instruction::CallAssign {
                    target: self.substitute(target),
                    name: name.clone(),
                    args,
                });
            }
            Instr::If { cond, then_branch } => {
                let then_label = self.counters.next_label("T");
                let exit = self.counters.next_label("X");
                self.jump_on_true(cond, &then_label)?;
                self.emit(Instruction::Goto(Target::Label(exit.clone())));
                self.emit(Instruction::Label(then_label));
                self.emit_body(then_branch)?;
                self.emit(Instruction::Label(exit));
            }
            Instr::IfElse {
                cond,
                then_branch,
                else_branch,
            } => {
                let then_label = self.counters.next_label("T");
                let exit = self.counters.next_label("X");
                self.jump_on_true(cond, &then_label)?;
                self.emit_body(else_branch)?;
                self.emit(Instruction::Goto(Target::Label(exit.clone())));
                self.emit(Instruction::Label(then_label));
                self.emit_body(then_branch)?;
                self.emit(Instruction::Label(exit));
            }
            Instr::While { cond, body } => {
                let head = self.counters.next_label("W");
                let body_label = self.counters.next_label("WB");
                let exit = self.counters.next_label("WX");
                self.emit(Instruction::Label(head.clone()));
                self.jump_on_true(cond, &body_label)?;
                self.emit(Instruction::Goto(Target::Label(exit.clone())));
                self.emit(Instruction::Label(body_label));
                self.emit_body(body)?;
                self.emit(Instruction::Goto(Target::Label(head)));
                self.emit(Instruction::Label(exit));
            }
            Instr::DoUntil { body, cond } => {
                let head = self.counters.next_label("D");
                let exit = self.counters.next_label("DX");
                self.emit(Instruction::Label(head.clone()));
                self.emit_body(body)?;
                self.jump_on_true(cond, &exit)?;
                self.emit(Instruction::Goto(Target::Label(head)));
                self.emit(Instruction::Label(exit));
            }
        }
        Ok(())
    }

    /// Emits a cascade that jumps to `target` exactly when `cond` is true.
    fn jump_on_true(&mut self, cond: &Term, target: &Label) -> Result<(), Error> {
        match cond {
            Term::Binary { op, left, right } if is_comparison(op) => {
                let instruction = self.comparison(op, left, right, target)?;
                self.emit(instruction);
            }
            Term::Binary {
                op: BinOp::Or,
                left,
                right,
            } => {
                // Either side jumping decides it; the right side is only
                // reached when the left fell through.
                self.jump_on_true(left, target)?;
                self.jump_on_true(right, target)?;
            }
            Term::Binary {
                op: BinOp::And,
                left,
                right,
            } => {
                let mid = self.counters.next_label("M");
                let after = self.counters.next_label("A");
                self.jump_on_true(left, &mid)?;
                self.emit(Instruction::Goto(Target::Label(after.clone())));
                self.emit(Instruction::Label(mid));
                self.jump_on_true(right, target)?;
                self.emit(Instruction::Label(after));
            }
            Term::Unary {
                op: UnOp::Not,
                operand,
            } => self.jump_on_false(operand, target)?,
            _ => return Err(Self::fault("numeric term in a condition position")),
        }
        Ok(())
    }

    /// Emits a cascade that jumps to `target` exactly when `cond` is false.
    fn jump_on_false(&mut self, cond: &Term, target: &Label) -> Result<(), Error> {
        match cond {
            Term::Binary { op, left, right } if is_comparison(op) => {
                // The jump is skipped over when the comparison holds.
                let mid = self.counters.next_label("M");
                let instruction = self.comparison(op, left, right, &mid)?;
                self.emit(instruction);
                self.emit(Instruction::Goto(Target::Label(target.clone())));
                self.emit(Instruction::Label(mid));
            }
            Term::Binary {
                op: BinOp::And,
                left,
                right,
            } => {
                self.jump_on_false(left, target)?;
                self.jump_on_false(right, target)?;
            }
            Term::Binary {
                op: BinOp::Or,
                left,
                right,
            } => {
                let mid = self.counters.next_label("M");
                self.jump_on_true(left, &mid)?;
                self.jump_on_true(right, &mid)?;
                self.emit(Instruction::Goto(Target::Label(target.clone())));
                self.emit(Instruction::Label(mid));
            }
            Term::Unary {
                op: UnOp::Not,
                operand,
            } => self.jump_on_true(operand, target)?,
            _ => return Err(Self::fault("numeric term in a condition position")),
        }
        Ok(())
    }

    fn comparison(
        &self,
        op: &BinOp,
        left: &Term,
        right: &Term,
        target: &Label,
    ) -> Result<Instruction, Error> {
        let cmp = match op {
            BinOp::Eq => CmpOp::Eq,
            _ => CmpOp::Gt,
        };
        Ok(Instruction::IfGoto {
            left: self.lower_term(left)?,
            cmp,
            right: self.lower_term(right)?,
            target: Target::Label(target.clone()),
        })
    }
}

fn is_comparison(op: &BinOp) -> bool {
    matches!(op, BinOp::Eq | BinOp::Gt)
}
