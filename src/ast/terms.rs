use std::fmt::Display;

/// The terminal of a term: a variable reference or a numeric literal.
///
/// Name leaves carry their 1-based source line for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    Var { name: String, line: u32 },
    Number { value: i64, line: u32 },
}

impl Atom {
    pub fn line(&self) -> u32 {
        match self {
            Atom::Var { line, .. } => *line,
            Atom::Number { line, .. } => *line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
}

impl Display for UnOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnOp::Neg => write!(f, "neg"),
            UnOp::Not => write!(f, "not"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    Gt,
    Or,
    And,
    Plus,
    Minus,
    Mult,
    Div,
}

impl Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            BinOp::Eq => "eq",
            BinOp::Gt => ">",
            BinOp::Or => "or",
            BinOp::And => "and",
            BinOp::Plus => "plus",
            BinOp::Minus => "minus",
            BinOp::Mult => "mult",
            BinOp::Div => "div",
        };
        write!(f, "{}", text)
    }
}

/// An expression built from atoms via unary and binary operators.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Atom(Atom),
    Unary {
        op: UnOp,
        operand: Box<Term>,
    },
    Binary {
        op: BinOp,
        left: Box<Term>,
        right: Box<Term>,
    },
}

impl Term {
    pub fn line(&self) -> u32 {
        match self {
            Term::Atom(atom) => atom.line(),
            Term::Unary { operand, .. } => operand.line(),
            Term::Binary { left, .. } => left.line(),
        }
    }
}
