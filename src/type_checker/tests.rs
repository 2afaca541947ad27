//! Unit tests for the type checker.
//!
//! This module contains tests for the SPL typing rules:
//! - Operator typing over numerics and booleans
//! - Contextual rules for assignments and conditions
//! - Call kind and arity validation
//! - Error accumulation without cascades

use std::rc::Rc;

use crate::{errors::errors::Error, lexer::lexer::tokenize, parser::parser::parse, scope::resolver::resolve};

use super::type_checker::check;

fn check_source(source: &str) -> Result<(), Vec<Error>> {
    let file = Rc::new("test.spl".to_string());
    let tokens = tokenize(source.to_string(), Rc::clone(&file)).unwrap();
    let program = parse(tokens, Rc::clone(&file)).unwrap();
    let symbols = resolve(&program, Rc::clone(&file)).unwrap();
    check(&program, &symbols, file)
}

fn wrap_main(algo: &str) -> String {
    format!("glob {{ x y }} proc {{ }} func {{ }} main {{ var {{ }} {} }}", algo)
}

#[test]
fn test_valid_program_checks() {
    let source = "glob { total } \
                  proc { show ( a ) { local { } print a } } \
                  func { add ( a b ) { local { r } r = ( a plus b ); return r } } \
                  main { var { n } n = 2; show ( n ); \
                  total = add ( n 5 ); \
                  while ( total > 0 ) { total = ( total minus 1 ) }; halt }";

    assert!(check_source(source).is_ok());
}

#[test]
fn test_boolean_assignment_is_rejected() {
    let errors = check_source(&wrap_main("x = ( 1 eq 1 ); halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TypeMismatch");
}

#[test]
fn test_numeric_condition_is_rejected() {
    let errors = check_source(&wrap_main("while ( x plus 1 ) { halt }; halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidConditionType");
}

#[test]
fn test_bare_variable_condition_is_rejected() {
    let errors = check_source(&wrap_main("if x { halt }; halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "InvalidConditionType");
}

#[test]
fn test_not_requires_boolean_operand() {
    let errors = check_source(&wrap_main("if ( not x ) { halt }; halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TypeMismatch");
}

#[test]
fn test_neg_requires_numeric_operand() {
    let errors = check_source(&wrap_main("x = ( neg ( 1 eq 1 ) ); halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TypeMismatch");
}

#[test]
fn test_and_requires_boolean_operands() {
    let errors = check_source(&wrap_main("if ( x and y ) { halt }; halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TypeMismatch");
}

#[test]
fn test_arithmetic_rejects_boolean_operand() {
    let errors = check_source(&wrap_main("x = ( 1 plus ( x eq y ) ); halt")).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "TypeMismatch");
}

#[test]
fn test_failed_subterm_does_not_cascade() {
    // The bad `not` operand is one fault; the enclosing condition must
    // not pile a second error on top of it.
    let errors = check_source(&wrap_main("if ( ( not 1 ) and ( x eq y ) ) { halt }; halt"))
        .unwrap_err();

    assert_eq!(errors.len(), 1);
}

#[test]
fn test_function_called_as_statement() {
    let source = "glob { } proc { } func { f ( ) { local { } return 0 } } \
                  main { var { } f ( ); halt }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "CalleeKindMismatch");
}

#[test]
fn test_procedure_called_in_assignment() {
    let source = "glob { x } proc { p ( ) { local { } halt } } func { } \
                  main { var { } x = p ( ); halt }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "CalleeKindMismatch");
}

#[test]
fn test_arity_mismatch() {
    let source = "glob { x } proc { } \
                  func { add ( a b ) { local { } return a } } \
                  main { var { } x = add ( 1 ); halt }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error_name(), "ArityMismatch");
    match errors[0].get_error() {
        crate::errors::errors::ErrorImpl::ArityMismatch {
            expected, received, ..
        } => {
            assert_eq!(*expected, 2);
            assert_eq!(*received, 1);
        }
        other => panic!("expected an arity mismatch, got {:?}", other),
    }
}

#[test]
fn test_errors_accumulate_across_bodies() {
    let source = "glob { x } \
                  proc { p ( ) { local { } x = ( 1 eq 1 ) } } func { } \
                  main { var { } while ( x mult 2 ) { halt }; halt }";
    let errors = check_source(source).unwrap_err();

    assert_eq!(errors.len(), 2);
}
