//! Scope resolution over the SPL AST.
//!
//! Resolution runs in two passes:
//!
//! 1. Registration: every declared name is entered into its scope, with
//!    duplicate and shadowing checks, followed by the cross-category name
//!    rules (no name may be both a variable and a procedure/function, or
//!    both a procedure and a function).
//! 2. Reference resolution: every variable use and call name in every body
//!    is resolved against the scope tree.
//!
//! Errors are accumulated, never short-circuited, so a single run reports
//! every name problem in the program.

use std::{collections::BTreeMap, rc::Rc};

use crate::{
    ast::{
        instructions::{Instr, Output},
        program::{Program, VarDecl},
        terms::{Atom, Term},
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::symbols::{ScopeId, ScopeKind, Symbol, SymbolCategory, SymbolTable};

/// Builds the symbol table for `program` and resolves every reference.
///
/// All name errors found in the program are returned together.
pub fn resolve(program: &Program, file: Rc<String>) -> Result<SymbolTable, Vec<Error>> {
    let mut resolver = Resolver {
        table: SymbolTable::new(),
        errors: vec![],
        file,
    };

    resolver.register(program);
    resolver.check_category_clashes();
    resolver.resolve_references(program);

    if resolver.errors.is_empty() {
        Ok(resolver.table)
    } else {
        Err(resolver.errors)
    }
}

struct Resolver {
    table: SymbolTable,
    errors: Vec<Error>,
    file: Rc<String>,
}

impl Resolver {
    fn position(&self, line: u32) -> Position {
        Position(line, Rc::clone(&self.file))
    }

    fn error(&mut self, error: ErrorImpl, line: u32) {
        self.errors.push(Error::new(error, self.position(line)));
    }

    fn declare_variable(&mut self, scope: ScopeId, decl: &VarDecl) {
        let symbol = Symbol {
            name: decl.name.clone(),
            category: SymbolCategory::Variable,
            line: decl.line,
            params: vec![],
        };
        if self.table.declare(scope, symbol).is_err() {
            let scope_label = self.table.scope(scope).label.clone();
            self.error(
                ErrorImpl::DuplicateName {
                    name: decl.name.clone(),
                    scope: scope_label,
                },
                decl.line,
            );
        }
    }

    fn register(&mut self, program: &Program) {
        for decl in &program.globals {
            let global = self.table.global;
            self.declare_variable(global, decl);
        }

        for pdef in &program.procs {
            self.register_definition(
                SymbolCategory::Procedure,
                &pdef.name,
                pdef.line,
                &pdef.params,
                &pdef.locals,
            );
        }

        for fdef in &program.funcs {
            self.register_definition(
                SymbolCategory::Function,
                &fdef.name,
                fdef.line,
                &fdef.params,
                &fdef.locals,
            );
        }

        for decl in &program.main.locals {
            let main = self.table.main;
            self.declare_variable(main, decl);
        }
    }

    /// Registers one procedure or function: its name in the group scope,
    /// and its parameters and locals in a fresh Local scope.
    fn register_definition(
        &mut self,
        category: SymbolCategory,
        name: &str,
        line: u32,
        params: &[VarDecl],
        locals: &[VarDecl],
    ) {
        let group = match category {
            SymbolCategory::Procedure => self.table.proc_group,
            _ => self.table.func_group,
        };
        let symbol = Symbol {
            name: String::from(name),
            category,
            line,
            params: params.iter().map(|p| p.name.clone()).collect(),
        };
        if self.table.declare(group, symbol).is_err() {
            let scope_label = self.table.scope(group).label.clone();
            self.error(
                ErrorImpl::DuplicateName {
                    name: String::from(name),
                    scope: scope_label,
                },
                line,
            );
        }

        let local = self
            .table
            .add_local_scope(name, format!("{} '{}'", category, name));

        for param in params {
            self.declare_variable(local, param);
        }
        for decl in locals {
            // A local repeating a parameter name is shadowing, which SPL
            // forbids; it gets its own diagnostic.
            if params.iter().any(|p| p.name == decl.name) {
                self.error(
                    ErrorImpl::LocalShadowsParameter {
                        name: decl.name.clone(),
                        owner: String::from(name),
                    },
                    decl.line,
                );
                continue;
            }
            self.declare_variable(local, decl);
        }
    }

    /// Enforces the everywhere rules: a name may not denote both a variable
    /// and a callable, nor both a procedure and a function.
    fn check_category_clashes(&mut self) {
        // BTreeMap keeps the report order stable across runs.
        let mut variables: BTreeMap<String, u32> = BTreeMap::new();
        let mut procedures: BTreeMap<String, u32> = BTreeMap::new();
        let mut functions: BTreeMap<String, u32> = BTreeMap::new();

        for scope in self.table.scopes() {
            let bucket = match scope.kind {
                ScopeKind::ProcGroup => &mut procedures,
                ScopeKind::FuncGroup => &mut functions,
                _ => &mut variables,
            };
            for symbol in scope.symbols() {
                let line = bucket.entry(symbol.name.clone()).or_insert(symbol.line);
                *line = (*line).min(symbol.line);
            }
        }

        let mut clashes = vec![];
        for (name, line) in &variables {
            if procedures.contains_key(name) {
                clashes.push((name.clone(), "variable", "procedure", *line));
            }
            if functions.contains_key(name) {
                clashes.push((name.clone(), "variable", "function", *line));
            }
        }
        for (name, line) in &procedures {
            if functions.contains_key(name) {
                clashes.push((name.clone(), "procedure", "function", *line));
            }
        }

        for (name, first, second, line) in clashes {
            self.error(
                ErrorImpl::NameCategoryClash {
                    name,
                    first: String::from(first),
                    second: String::from(second),
                },
                line,
            );
        }
    }

    fn resolve_references(&mut self, program: &Program) {
        for pdef in &program.procs {
            if let Some(scope) = self.table.local_scope_of(&pdef.name) {
                self.resolve_body(scope, &pdef.body);
            }
        }
        for fdef in &program.funcs {
            if let Some(scope) = self.table.local_scope_of(&fdef.name) {
                self.resolve_body(scope, &fdef.body);
                self.resolve_atom(scope, &fdef.ret);
            }
        }
        let main = self.table.main;
        self.resolve_body(main, &program.main.body);
    }

    fn resolve_body(&mut self, scope: ScopeId, body: &[Instr]) {
        for instr in body {
            self.resolve_instr(scope, instr);
        }
    }

    fn resolve_instr(&mut self, scope: ScopeId, instr: &Instr) {
        match instr {
            Instr::Halt => {}
            Instr::Print(Output::Text { .. }) => {}
            Instr::Print(Output::Atom(atom)) => self.resolve_atom(scope, atom),
            Instr::Call { name, line, args } => {
                // A known function in call-statement position is a kind
                // error, reported by the type checker, not an unknown name.
                if self.table.resolve_procedure(name).is_none()
                    && self.table.resolve_function(name).is_none()
                {
                    self.error(
                        ErrorImpl::UndeclaredCallee {
                            name: name.clone(),
                            category: String::from("procedure"),
                        },
                        *line,
                    );
                }
                for arg in args {
                    self.resolve_atom(scope, arg);
                }
            }
            Instr::AssignCall {
                target,
                target_line,
                name,
                line,
                args,
            } => {
                self.resolve_var(scope, target, *target_line);
                if self.table.resolve_function(name).is_none()
                    && self.table.resolve_procedure(name).is_none()
                {
                    self.error(
                        ErrorImpl::UndeclaredCallee {
                            name: name.clone(),
                            category: String::from("function"),
                        },
                        *line,
                    );
                }
                for arg in args {
                    self.resolve_atom(scope, arg);
                }
            }
            Instr::Assign {
                target,
                target_line,
                value,
            } => {
                self.resolve_var(scope, target, *target_line);
                self.resolve_term(scope, value);
            }
            Instr::While { cond, body } => {
                self.resolve_term(scope, cond);
                self.resolve_body(scope, body);
            }
            Instr::DoUntil { body, cond } => {
                self.resolve_body(scope, body);
                self.resolve_term(scope, cond);
            }
            Instr::If { cond, then_branch } => {
                self.resolve_term(scope, cond);
                self.resolve_body(scope, then_branch);
            }
            Instr::IfElse {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_term(scope, cond);
                self.resolve_body(scope, then_branch);
                self.resolve_body(scope, else_branch);
            }
        }
    }

    fn resolve_term(&mut self, scope: ScopeId, term: &Term) {
        match term {
            Term::Atom(atom) => self.resolve_atom(scope, atom),
            Term::Unary { operand, .. } => self.resolve_term(scope, operand),
            Term::Binary { left, right, .. } => {
                self.resolve_term(scope, left);
                self.resolve_term(scope, right);
            }
        }
    }

    fn resolve_atom(&mut self, scope: ScopeId, atom: &Atom) {
        if let Atom::Var { name, line } = atom {
            self.resolve_var(scope, name, *line);
        }
    }

    fn resolve_var(&mut self, scope: ScopeId, name: &str, line: u32) {
        if self.table.resolve_variable(scope, name).is_none() {
            self.error(
                ErrorImpl::UndeclaredVariable {
                    variable: String::from(name),
                },
                line,
            );
        }
    }
}
