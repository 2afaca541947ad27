#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    codegen::generator::Generator,
    errors::errors::{Error, ErrorTip},
    inliner::inliner::Inliner,
    linearizer::linearizer::{linearize, BasicProgram, Layout},
};

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod inliner;
pub mod lexer;
pub mod linearizer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A 1-based source line paired with the file it belongs to.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Runs the whole pipeline with the default 10/10 address layout.
///
/// Stages run in strict sequence with hard phase gates: scope resolution
/// errors stop the pipeline before type checking, and type errors stop it
/// before code generation. The front end (lexer/parser) is fail-fast, so a
/// syntax error comes back as a one-element list.
pub fn compile(source: String, file: Option<String>) -> Result<BasicProgram, Vec<Error>> {
    compile_with_layout(source, file, Layout::default())
}

pub fn compile_with_layout(
    source: String,
    file: Option<String>,
    layout: Layout,
) -> Result<BasicProgram, Vec<Error>> {
    let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));

    let tokens = lexer::lexer::tokenize(source, Rc::clone(&file_name)).map_err(|e| vec![e])?;
    let program = parser::parser::parse(tokens, Rc::clone(&file_name)).map_err(|e| vec![e])?;

    let symbols = scope::resolver::resolve(&program, Rc::clone(&file_name))?;
    type_checker::type_checker::check(&program, &symbols, Rc::clone(&file_name))?;

    let (stream, counters) = Generator::generate(&program).map_err(|e| vec![e])?;
    let stream = Inliner::new(&program, counters, Rc::clone(&file_name))
        .inline(stream)
        .map_err(|e| vec![e])?;

    linearize(&stream, layout).map_err(|e| vec![e])
}

/// Prints a diagnostic against the source text it was produced from.
///
/// ```text
/// Error: NameRuleViolation (`x` is already declared in Global scope)
/// -> sample.spl:2
///   |
/// 2 | glob { x x }
///   |
/// ```
pub fn display_error(error: &Error, source: &str) {
    let position = error.get_position();
    let line_number = position.0 as usize;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}:{}", position.1, line_number);

    let line_text = match source.lines().nth(line_number.saturating_sub(1)) {
        Some(text) => text,
        None => return,
    };

    let line_string = line_number.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");
    println!("{} | {}", line_string, line_text.trim());
    println!("{:>padding$}", "|");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_minimal_program() {
        let source = "glob { x } proc { } func { } main { var { } x = 5; halt }".to_string();
        let program = compile(source, Some(String::from("test.spl"))).unwrap();
        assert_eq!(program.to_source(), "10 x = 5\n20 STOP");
    }

    #[test]
    fn test_scope_errors_gate_type_checking() {
        // The boolean assignment would be a type error, but the duplicate
        // global must stop the pipeline before type checking runs.
        let source =
            "glob { x x } proc { } func { } main { var { } x = ( 1 eq 1 ); halt }".to_string();
        let errors = compile(source, None).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
    }
}
