use std::fmt::Display;

/// The SPL value types.
///
/// Every declared variable is numeric; booleans only arise inside terms
/// and never cross an assignment. `Unknown` marks a subterm that already
/// failed to check, so one fault is never reported twice up the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Numeric,
    Boolean,
    Unknown,
}

impl Type {
    /// Whether a value of this type is acceptable where `expected` is
    /// required. `Unknown` unifies with everything.
    pub fn unifies_with(&self, expected: Type) -> bool {
        matches!(
            (self, expected),
            (Type::Unknown, _) | (_, Type::Unknown)
        ) || *self == expected
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Numeric => write!(f, "numeric"),
            Type::Boolean => write!(f, "boolean"),
            Type::Unknown => write!(f, "unknown"),
        }
    }
}
