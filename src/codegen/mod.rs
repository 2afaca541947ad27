//! Code generation module.
//!
//! Lowers the type-checked AST to a flat intermediate instruction stream
//! with symbolic labels. Contains:
//!
//! - The instruction stream types and their BASIC text rendering
//! - The generator, which flattens loops and branches into labelled jump
//!   sequences and compiles boolean conditions as short-circuit cascades

pub mod generator;
pub mod ir;
