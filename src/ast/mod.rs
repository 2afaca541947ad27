/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - program: The program root, procedure/function definitions and main
/// - instructions: The instruction variants making up an algorithm
/// - terms: Expression terms, atoms and operators
pub mod instructions;
pub mod program;
pub mod terms;
