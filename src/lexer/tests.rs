//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and names
//! - Numeric and string literals
//! - Punctuation
//! - Comments and line tracking
//! - Error cases

use std::rc::Rc;

use super::{lexer::tokenize, tokens::TokenKind};

fn file() -> Rc<String> {
    Rc::new("test.spl".to_string())
}

#[test]
fn test_tokenize_keywords() {
    let source = "glob proc func main var local halt print while do until if else return".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Glob);
    assert_eq!(tokens[1].kind, TokenKind::Proc);
    assert_eq!(tokens[2].kind, TokenKind::Func);
    assert_eq!(tokens[3].kind, TokenKind::Main);
    assert_eq!(tokens[4].kind, TokenKind::Var);
    assert_eq!(tokens[5].kind, TokenKind::Local);
    assert_eq!(tokens[6].kind, TokenKind::Halt);
    assert_eq!(tokens[7].kind, TokenKind::Print);
    assert_eq!(tokens[8].kind, TokenKind::While);
    assert_eq!(tokens[9].kind, TokenKind::Do);
    assert_eq!(tokens[10].kind, TokenKind::Until);
    assert_eq!(tokens[11].kind, TokenKind::If);
    assert_eq!(tokens[12].kind, TokenKind::Else);
    assert_eq!(tokens[13].kind, TokenKind::Return);
    assert_eq!(tokens[14].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_operator_keywords() {
    let source = "eq or and plus minus mult div neg not".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Eq);
    assert_eq!(tokens[1].kind, TokenKind::Or);
    assert_eq!(tokens[2].kind, TokenKind::And);
    assert_eq!(tokens[3].kind, TokenKind::Plus);
    assert_eq!(tokens[4].kind, TokenKind::Minus);
    assert_eq!(tokens[5].kind, TokenKind::Mult);
    assert_eq!(tokens[6].kind, TokenKind::Div);
    assert_eq!(tokens[7].kind, TokenKind::Neg);
    assert_eq!(tokens[8].kind, TokenKind::Not);
}

#[test]
fn test_tokenize_names() {
    let source = "x foo counter1 abc123".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].kind, TokenKind::Name);
    assert_eq!(tokens[1].value, "foo");
    assert_eq!(tokens[2].kind, TokenKind::Name);
    assert_eq!(tokens[2].value, "counter1");
    assert_eq!(tokens[3].kind, TokenKind::Name);
    assert_eq!(tokens[3].value, "abc123");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_name_with_trailing_keyword_prefix() {
    // `whilex` is a name, not the keyword `while` followed by `x`.
    let source = "whilex".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].value, "whilex");
}

#[test]
fn test_tokenize_numbers() {
    let source = "0 7 120".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].kind, TokenKind::Number);
    assert_eq!(tokens[1].value, "7");
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "120");
}

#[test]
fn test_leading_zero_splits() {
    // Numbers have no leading zeros, so `01` lexes as `0` then `1`.
    let source = "01".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].value, "0");
    assert_eq!(tokens[1].value, "1");
}

#[test]
fn test_tokenize_strings() {
    let source = "\"hello\" \"\"".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, "");
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } ; = >".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::OpenParen);
    assert_eq!(tokens[1].kind, TokenKind::CloseParen);
    assert_eq!(tokens[2].kind, TokenKind::OpenCurly);
    assert_eq!(tokens[3].kind, TokenKind::CloseCurly);
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::Assignment);
    assert_eq!(tokens[6].kind, TokenKind::Greater);
}

#[test]
fn test_tokenize_comments() {
    let source = "x // a comment\ny".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].value, "x");
    assert_eq!(tokens[1].value, "y");
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_line_tracking() {
    let source = "x\ny\n\nz".to_string();
    let tokens = tokenize(source, file()).unwrap();

    assert_eq!(tokens[0].line(), 1);
    assert_eq!(tokens[1].line(), 2);
    assert_eq!(tokens[2].line(), 4);
}

#[test]
fn test_unrecognised_token() {
    let source = "x @ y".to_string();
    let error = tokenize(source, file()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_uppercase_is_unrecognised() {
    let source = "Foo".to_string();
    let error = tokenize(source, file()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}
