use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateName { .. } => "NameRuleViolation",
            ErrorImpl::LocalShadowsParameter { .. } => "NameRuleViolation",
            ErrorImpl::NameCategoryClash { .. } => "NameRuleViolation",
            ErrorImpl::UndeclaredVariable { .. } => "UndeclaredReference",
            ErrorImpl::UndeclaredCallee { .. } => "UndeclaredReference",
            ErrorImpl::CalleeKindMismatch { .. } => "CalleeKindMismatch",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::OperandTypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::InvalidConditionType { .. } => "InvalidConditionType",
            ErrorImpl::InvalidReturnType { .. } => "InvalidReturnType",
            ErrorImpl::ArityMismatch { .. } => "ArityMismatch",
            ErrorImpl::RecursionLimitExceeded { .. } => "RecursionLimitExceeded",
            ErrorImpl::UnresolvedLabel { .. } => "UnresolvedLabel",
            ErrorImpl::InternalFault { .. } => "InternalFault",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::DuplicateName { name, scope } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in {}", name, scope))
            }
            ErrorImpl::LocalShadowsParameter { name, owner } => ErrorTip::Suggestion(format!(
                "Local variable `{}` repeats a parameter name of `{}`; shadowing is not allowed",
                name, owner
            )),
            ErrorImpl::NameCategoryClash {
                name,
                first,
                second,
            } => ErrorTip::Suggestion(format!(
                "`{}` is used as both a {} and a {} name",
                name, first, second
            )),
            ErrorImpl::UndeclaredVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UndeclaredCallee { name, category } => {
                ErrorTip::Suggestion(format!("No {} named `{}` is declared", category, name))
            }
            ErrorImpl::CalleeKindMismatch {
                name,
                expected,
                found,
            } => ErrorTip::Suggestion(format!(
                "`{}` is a {}, but is called as a {}",
                name, found, expected
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::OperandTypeMismatch {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidConditionType { received } => ErrorTip::Suggestion(format!(
                "Conditions must be boolean, this one is `{}`",
                received
            )),
            ErrorImpl::InvalidReturnType { received } => ErrorTip::Suggestion(format!(
                "Function return atoms must be numeric, received `{}`",
                received
            )),
            ErrorImpl::ArityMismatch {
                name,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} argument(s), got {}",
                name, expected, received
            )),
            ErrorImpl::RecursionLimitExceeded { name, limit } => ErrorTip::Suggestion(format!(
                "Inlining `{}` exceeded {} nested expansions; recursive SPL cannot be inlined",
                name, limit
            )),
            ErrorImpl::UnresolvedLabel { label } => ErrorTip::Suggestion(format!(
                "Jump targets label `{}` but no marker binds it",
                label
            )),
            ErrorImpl::InternalFault { .. } => ErrorTip::Suggestion(String::from(
                "This indicates a compiler bug, not an error in the input program",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("duplicate name {name:?} in {scope}")]
    DuplicateName { name: String, scope: String },
    #[error("local {name:?} shadows a parameter of {owner:?}")]
    LocalShadowsParameter { name: String, owner: String },
    #[error("{name:?} declared as both {first} and {second}")]
    NameCategoryClash {
        name: String,
        first: String,
        second: String,
    },
    #[error("variable {variable:?} not declared")]
    UndeclaredVariable { variable: String },
    #[error("undeclared {category} {name:?}")]
    UndeclaredCallee { name: String, category: String },
    #[error("{name:?} called as a {expected} but declared as a {found}")]
    CalleeKindMismatch {
        name: String,
        expected: String,
        found: String,
    },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMismatch { expected: String, received: String },
    #[error("operator {operator} cannot take {left} and {right}")]
    OperandTypeMismatch {
        operator: String,
        left: String,
        right: String,
    },
    #[error("condition must be boolean, received {received}")]
    InvalidConditionType { received: String },
    #[error("return atom must be numeric, received {received}")]
    InvalidReturnType { received: String },
    #[error("{name:?} expects {expected} argument(s), received {received}")]
    ArityMismatch {
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("inline expansion of {name:?} exceeded depth {limit}")]
    RecursionLimitExceeded { name: String, limit: usize },
    #[error("unresolved jump label {label:?}")]
    UnresolvedLabel { label: String },
    #[error("internal consistency fault: {message}")]
    InternalFault { message: String },
}
