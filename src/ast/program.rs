use super::{instructions::Instr, terms::Atom};

/// A declared variable name with its source line.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub line: u32,
}

/// A procedure definition: `name ( params ) { local { locals } body }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcDef {
    pub name: String,
    pub line: u32,
    pub params: Vec<VarDecl>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Instr>,
}

/// A function definition; unlike a procedure it ends in `return atom`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub name: String,
    pub line: u32,
    pub params: Vec<VarDecl>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Instr>,
    pub ret: Atom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MainProg {
    pub locals: Vec<VarDecl>,
    pub body: Vec<Instr>,
}

/// The root of a parsed SPL program:
/// `glob { .. } proc { .. } func { .. } main { .. }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub globals: Vec<VarDecl>,
    pub procs: Vec<ProcDef>,
    pub funcs: Vec<FuncDef>,
    pub main: MainProg,
}
