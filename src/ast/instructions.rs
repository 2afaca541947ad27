use super::terms::{Atom, Term};

/// What a `print` instruction emits: an atom or a string literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Atom(Atom),
    Text { value: String, line: u32 },
}

/// A single SPL instruction. An algorithm is an ordered `Vec<Instr>`.
#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    Halt,
    Print(Output),
    /// Statement call of a procedure: `name ( atoms )`.
    Call {
        name: String,
        line: u32,
        args: Vec<Atom>,
    },
    /// Assignment of a function call result: `target = name ( atoms )`.
    AssignCall {
        target: String,
        target_line: u32,
        name: String,
        line: u32,
        args: Vec<Atom>,
    },
    /// Plain assignment: `target = term`.
    Assign {
        target: String,
        target_line: u32,
        value: Term,
    },
    While {
        cond: Term,
        body: Vec<Instr>,
    },
    DoUntil {
        body: Vec<Instr>,
        cond: Term,
    },
    If {
        cond: Term,
        then_branch: Vec<Instr>,
    },
    IfElse {
        cond: Term,
        then_branch: Vec<Instr>,
        else_branch: Vec<Instr>,
    },
}
