//! Type checking for SPL programs.
//!
//! Runs after scope resolution and before code generation. Checks:
//!
//! - Operator typing: `neg`, `plus`, `minus`, `mult` and `div` work on
//!   numerics; `not`, `and` and `or` on booleans; `eq` and `>` compare
//!   numerics and yield booleans
//! - Contextual rules: assignment right-hand sides, print atoms, call
//!   arguments and return atoms are numeric; loop and branch conditions
//!   are boolean
//! - Call well-formedness: the callee kind matches the call position, and
//!   the argument count matches the declared parameter count
//!
//! All type errors in the program are collected and reported together.

use std::rc::Rc;

use crate::{
    ast::{
        instructions::{Instr, Output},
        program::Program,
        terms::{Atom, BinOp, Term, UnOp},
    },
    errors::errors::{Error, ErrorImpl},
    scope::symbols::{ScopeId, SymbolTable},
    Position,
};

use super::types::Type;

/// Type checks `program` against its resolved symbol table.
pub fn check(program: &Program, symbols: &SymbolTable, file: Rc<String>) -> Result<(), Vec<Error>> {
    let mut checker = Checker {
        symbols,
        errors: vec![],
        file,
    };

    for pdef in &program.procs {
        if let Some(scope) = symbols.local_scope_of(&pdef.name) {
            checker.check_body(scope, &pdef.body);
        }
    }
    for fdef in &program.funcs {
        if let Some(scope) = symbols.local_scope_of(&fdef.name) {
            checker.check_body(scope, &fdef.body);
            let ret = checker.type_of_atom(&fdef.ret);
            if !ret.unifies_with(Type::Numeric) {
                checker.error(
                    ErrorImpl::InvalidReturnType {
                        received: ret.to_string(),
                    },
                    fdef.ret.line(),
                );
            }
        }
    }
    checker.check_body(symbols.main, &program.main.body);

    if checker.errors.is_empty() {
        Ok(())
    } else {
        Err(checker.errors)
    }
}

struct Checker<'a> {
    symbols: &'a SymbolTable,
    errors: Vec<Error>,
    file: Rc<String>,
}

impl Checker<'_> {
    fn error(&mut self, error: ErrorImpl, line: u32) {
        self.errors
            .push(Error::new(error, Position(line, Rc::clone(&self.file))));
    }

    fn check_body(&mut self, scope: ScopeId, body: &[Instr]) {
        for instr in body {
            self.check_instr(scope, instr);
        }
    }

    fn check_instr(&mut self, scope: ScopeId, instr: &Instr) {
        match instr {
            Instr::Halt => {}
            Instr::Print(Output::Text { .. }) => {}
            Instr::Print(Output::Atom(atom)) => {
                let ty = self.type_of_atom(atom);
                if !ty.unifies_with(Type::Numeric) {
                    self.error(
                        ErrorImpl::TypeMismatch {
                            expected: Type::Numeric.to_string(),
                            received: ty.to_string(),
                        },
                        atom.line(),
                    );
                }
            }
            Instr::Call { name, line, args } => {
                self.check_call(name, *line, args, CallPosition::Statement);
            }
            Instr::AssignCall {
                name, line, args, ..
            } => {
                // The target is a declared variable, hence numeric, and a
                // function result is numeric; only the call itself needs
                // checking.
                self.check_call(name, *line, args, CallPosition::Assignment);
            }
            Instr::Assign { value, .. } => {
                let ty = self.type_of_term(value);
                if !ty.unifies_with(Type::Numeric) {
                    self.error(
                        ErrorImpl::TypeMismatch {
                            expected: Type::Numeric.to_string(),
                            received: ty.to_string(),
                        },
                        value.line(),
                    );
                }
            }
            Instr::While { cond, body } => {
                self.check_condition(cond);
                self.check_body(scope, body);
            }
            Instr::DoUntil { body, cond } => {
                self.check_body(scope, body);
                self.check_condition(cond);
            }
            Instr::If { cond, then_branch } => {
                self.check_condition(cond);
                self.check_body(scope, then_branch);
            }
            Instr::IfElse {
                cond,
                then_branch,
                else_branch,
            } => {
                self.check_condition(cond);
                self.check_body(scope, then_branch);
                self.check_body(scope, else_branch);
            }
        }
    }

    fn check_condition(&mut self, cond: &Term) {
        let ty = self.type_of_term(cond);
        if !ty.unifies_with(Type::Boolean) {
            self.error(
                ErrorImpl::InvalidConditionType {
                    received: ty.to_string(),
                },
                cond.line(),
            );
        }
    }

    fn check_call(&mut self, name: &str, line: u32, args: &[Atom], position: CallPosition) {
        let (callee, wrong_kind) = match position {
            CallPosition::Statement => (
                self.symbols.resolve_procedure(name),
                self.symbols.resolve_function(name),
            ),
            CallPosition::Assignment => (
                self.symbols.resolve_function(name),
                self.symbols.resolve_procedure(name),
            ),
        };

        let callee = match callee {
            Some(symbol) => symbol,
            None => {
                if wrong_kind.is_some() {
                    let (expected, found) = match position {
                        CallPosition::Statement => ("procedure", "function"),
                        CallPosition::Assignment => ("function", "procedure"),
                    };
                    self.error(
                        ErrorImpl::CalleeKindMismatch {
                            name: String::from(name),
                            expected: String::from(expected),
                            found: String::from(found),
                        },
                        line,
                    );
                }
                // Fully unknown names were reported during resolution.
                return;
            }
        };

        if callee.params.len() != args.len() {
            self.error(
                ErrorImpl::ArityMismatch {
                    name: String::from(name),
                    expected: callee.params.len(),
                    received: args.len(),
                },
                line,
            );
        }
    }

    /// Atoms are numbers or declared variables, both numeric.
    fn type_of_atom(&mut self, _atom: &Atom) -> Type {
        Type::Numeric
    }

    fn type_of_term(&mut self, term: &Term) -> Type {
        match term {
            Term::Atom(atom) => self.type_of_atom(atom),
            Term::Unary { op, operand } => {
                let expected = match op {
                    UnOp::Neg => Type::Numeric,
                    UnOp::Not => Type::Boolean,
                };
                let ty = self.type_of_term(operand);
                if !ty.unifies_with(expected) {
                    self.error(
                        ErrorImpl::TypeMismatch {
                            expected: expected.to_string(),
                            received: ty.to_string(),
                        },
                        operand.line(),
                    );
                    return Type::Unknown;
                }
                expected
            }
            Term::Binary { op, left, right } => {
                let (operand_ty, result_ty) = match op {
                    BinOp::Plus | BinOp::Minus | BinOp::Mult | BinOp::Div => {
                        (Type::Numeric, Type::Numeric)
                    }
                    BinOp::And | BinOp::Or => (Type::Boolean, Type::Boolean),
                    BinOp::Eq | BinOp::Gt => (Type::Numeric, Type::Boolean),
                };
                let lt = self.type_of_term(left);
                let rt = self.type_of_term(right);
                if !lt.unifies_with(operand_ty) || !rt.unifies_with(operand_ty) {
                    self.error(
                        ErrorImpl::OperandTypeMismatch {
                            operator: op.to_string(),
                            left: lt.to_string(),
                            right: rt.to_string(),
                        },
                        left.line(),
                    );
                    return Type::Unknown;
                }
                result_ty
            }
        }
    }
}

enum CallPosition {
    Statement,
    Assignment,
}
