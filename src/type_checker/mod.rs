//! Type checking module.
//!
//! SPL has two value types, numeric and boolean, with every declared
//! variable numeric. This module checks operator and contextual typing
//! rules over the resolved AST and validates call kinds and arities. It
//! accumulates every type error in the program before reporting.

pub mod type_checker;
pub mod types;

#[cfg(test)]
mod tests;
