use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("glob", TokenKind::Glob);
        map.insert("proc", TokenKind::Proc);
        map.insert("func", TokenKind::Func);
        map.insert("main", TokenKind::Main);
        map.insert("var", TokenKind::Var);
        map.insert("local", TokenKind::Local);
        map.insert("halt", TokenKind::Halt);
        map.insert("print", TokenKind::Print);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("until", TokenKind::Until);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("eq", TokenKind::Eq);
        map.insert("or", TokenKind::Or);
        map.insert("and", TokenKind::And);
        map.insert("plus", TokenKind::Plus);
        map.insert("minus", TokenKind::Minus);
        map.insert("mult", TokenKind::Mult);
        map.insert("div", TokenKind::Div);
        map.insert("neg", TokenKind::Neg);
        map.insert("not", TokenKind::Not);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Name,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,
    Semicolon,
    Assignment, // =
    Greater,    // >

    // Reserved
    Glob,
    Proc,
    Func,
    Main,
    Var,
    Local,
    Halt,
    Print,
    While,
    Do,
    Until,
    If,
    Else,
    Return,
    Eq,
    Or,
    And,
    Plus,
    Minus,
    Mult,
    Div,
    Neg,
    Not,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    /// The 1-based source line the token starts on.
    pub fn line(&self) -> u32 {
        self.span.start.0
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}
