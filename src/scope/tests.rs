//! Unit tests for scope resolution.
//!
//! This module contains tests for the symbol table and the resolver:
//! - Declaration registration and duplicate detection
//! - The no-shadowing rule
//! - The cross-category name rules
//! - Reference resolution through the scope chain
//! - Error accumulation

use std::rc::Rc;

use crate::{ast::program::Program, errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse};

use super::{resolver::resolve, symbols::SymbolTable};

fn program(source: &str) -> Program {
    let file = Rc::new("test.spl".to_string());
    let tokens = tokenize(source.to_string(), Rc::clone(&file)).unwrap();
    parse(tokens, file).unwrap()
}

fn resolve_source(source: &str) -> Result<SymbolTable, Vec<Error>> {
    let program = program(source);
    resolve(&program, Rc::new("test.spl".to_string()))
}

#[test]
fn test_resolve_valid_program() {
    let source = "glob { total } \
                  proc { show ( a ) { local { t } t = a; print t } } \
                  func { double ( n ) { local { r } r = ( n plus n ); return r } } \
                  main { var { count } count = 3; show ( count ); total = double ( count ); halt }";
    let symbols = resolve_source(source).unwrap();

    assert!(symbols.resolve_procedure("show").is_some());
    assert!(symbols.resolve_function("double").is_some());
    assert!(symbols.local_scope_of("show").is_some());
}

#[test]
fn test_duplicate_global() {
    let errors =
        resolve_source("glob { x x } proc { } func { } main { var { } halt }").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
    assert_eq!(errors[0].get_position().0, 1);
}

#[test]
fn test_duplicate_procedure() {
    let source = "glob { } proc { p ( ) { local { } halt } p ( ) { local { } halt } } \
                  func { } main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
}

#[test]
fn test_local_shadows_parameter() {
    let source = "glob { } proc { p ( a ) { local { a } halt } } func { } \
                  main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
}

#[test]
fn test_variable_and_procedure_clash() {
    let source = "glob { p } proc { p ( ) { local { } halt } } func { } \
                  main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
}

#[test]
fn test_procedure_and_function_clash() {
    let source = "glob { } proc { f ( ) { local { } halt } } \
                  func { f ( ) { local { } return 0 } } main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "NameRuleViolation");
}

#[test]
fn test_undeclared_variable() {
    let errors =
        resolve_source("glob { } proc { } func { } main { var { } x = 1; halt }").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredReference");
}

#[test]
fn test_undeclared_procedure() {
    let errors =
        resolve_source("glob { } proc { } func { } main { var { } show ( ); halt }").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredReference");
}

#[test]
fn test_wrong_kind_call_is_not_undeclared() {
    // A function name in statement-call position resolves; the kind
    // mismatch is the type checker's to report.
    let source = "glob { } proc { } func { f ( ) { local { } return 0 } } \
                  main { var { } f ( ); halt }";

    assert!(resolve_source(source).is_ok());
}

#[test]
fn test_proc_body_sees_globals_but_not_main_locals() {
    let source = "glob { g } proc { p ( ) { local { } g = 1; m = 2 } } func { } \
                  main { var { m } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredReference");
}

#[test]
fn test_sibling_locals_are_invisible() {
    let source = "glob { } \
                  proc { p ( ) { local { t } t = 1 } q ( ) { local { } t = 2 } } \
                  func { } main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredReference");
}

#[test]
fn test_errors_accumulate() {
    let source = "glob { x x } proc { } func { } main { var { } y = 1; z = 2; halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 3);
}

#[test]
fn test_function_return_atom_is_resolved() {
    let source = "glob { } proc { } \
                  func { f ( ) { local { } return missing } } \
                  main { var { } halt }";
    let errors = resolve_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "UndeclaredReference");
}
