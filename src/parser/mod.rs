//! Parser module for building an Abstract Syntax Tree.
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into the SPL AST. It handles:
//!
//! - The four program sections (glob, proc, func, main)
//! - Instruction parsing (assignments, calls, loops, branches)
//! - Fully parenthesised term parsing
//! - The three-name cap on parameter, local and argument lists

pub mod instr;
pub mod parser;
pub mod term;
