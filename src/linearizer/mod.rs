//! Linearization module.
//!
//! Turns the label-based instruction stream into numbered BASIC lines,
//! resolving every symbolic jump to a concrete line address.

pub mod linearizer;

#[cfg(test)]
mod tests;
