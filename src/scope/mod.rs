//! Scope resolution and the symbol table.
//!
//! This module builds the scope tree for an SPL program and resolves every
//! name reference in it. It handles:
//!
//! - The fixed scope layout (Global, ProcGroup, FuncGroup, Main) plus one
//!   Local scope per procedure/function definition
//! - Duplicate declarations and the no-shadowing rule for locals
//! - The cross-category name rules between variables, procedures and
//!   functions
//! - Resolution of variable uses and call names, with call names looked up
//!   strictly in their own group scope

pub mod resolver;
pub mod symbols;

#[cfg(test)]
mod tests;
