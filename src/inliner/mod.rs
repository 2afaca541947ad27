//! Call inlining module.
//!
//! Replaces every procedure and function call in the instruction stream
//! with a renamed copy of the callee's body, recursively, with a depth
//! cap that turns recursion into a diagnostic.

pub mod inliner;
