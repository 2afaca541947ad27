//! The intermediate instruction stream.
//!
//! Structured control flow is lowered into a flat list of [`Instruction`]s
//! with symbolic labels. Calls survive lowering as explicit call
//! instructions until the inliner expands them; labels survive until the
//! linearizer assigns addresses. Rendering to BASIC text happens only
//! through the [`Display`] impls here.

use std::fmt::Display;

/// A variable reference or literal in the instruction stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    Var(String),
    Number(i64),
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Var(name) => write!(f, "{}", name),
            Atom::Number(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Gt,
}

impl Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CmpOp::Eq => write!(f, "="),
            CmpOp::Gt => write!(f, ">"),
        }
    }
}

/// A numeric expression on the right of an assignment or beside a
/// comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Atom(Atom),
    Neg(Box<Expr>),
    Binary {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Atom(atom) => write!(f, "{}", atom),
            Expr::Neg(operand) => write!(f, "-({})", operand),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

/// A symbolic jump label, e.g. `T0003`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(pub String);

impl Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A jump destination: symbolic before linearization, a line address after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Label(Label),
    Address(u32),
}

impl Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Label(label) => write!(f, "{}", label),
            Target::Address(address) => write!(f, "{}", address),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintArg {
    Atom(Atom),
    Text(String),
}

impl Display for PrintArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintArg::Atom(atom) => write!(f, "{}", atom),
            PrintArg::Text(text) => write!(f, "{:?}", text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    Assign {
        target: String,
        value: Expr,
    },
    Print(PrintArg),
    Halt,
    /// A procedure call, pending inline expansion.
    Call {
        name: String,
        args: Vec<Atom>,
    },
    /// A function call assignment, pending inline expansion.
    CallAssign {
        target: String,
        name: String,
        args: Vec<Atom>,
    },
    IfGoto {
        left: Expr,
        cmp: CmpOp,
        right: Expr,
        target: Target,
    },
    Goto(Target),
    /// A label marker. Occupies an address but renders no output line.
    Label(Label),
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Instruction::Assign { target, value } => write!(f, "{} = {}", target, value),
            Instruction::Print(arg) => write!(f, "PRINT {}", arg),
            Instruction::Halt => write!(f, "STOP"),
            Instruction::Call { name, args } => {
                write!(f, "CALL {}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Instruction::CallAssign { target, name, args } => {
                write!(f, "{} = CALL {}(", target, name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            Instruction::IfGoto {
                left,
                cmp,
                right,
                target,
            } => write!(f, "IF {} {} {} THEN {}", left, cmp, right, target),
            Instruction::Goto(target) => write!(f, "GOTO {}", target),
            Instruction::Label(label) => write!(f, "LABEL {}", label),
        }
    }
}

/// Monotonic counters for labels and inliner-fresh names.
///
/// Threaded explicitly from the generator through the inliner so that
/// every expansion draws from the same sequence and no label or fresh
/// name is ever issued twice in one compilation.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    labels: usize,
    names: usize,
}

impl Counters {
    pub fn next_label(&mut self, prefix: &str) -> Label {
        self.labels += 1;
        Label(format!("{}{:04}", prefix, self.labels))
    }

    /// A fresh identifier for one inline expansion. Source names are all
    /// lowercase, so the returned id can never collide with them once
    /// combined with an uppercase prefix.
    pub fn next_name_id(&mut self) -> usize {
        self.names += 1;
        self.names
    }
}
