use std::rc::Rc;

use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, Regex);

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

#[derive(Clone)]
pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    pub line: u32,
    pub file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Rc<String>) -> Lexer {
        Lexer {
            pos: 0,
            line: 1,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: Regex::new(r"\s+").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"//.*").unwrap(), handler: skip_handler },
                RegexPattern { regex: Regex::new(r"[a-z][a-z]*[0-9]*").unwrap(), handler: symbol_handler },
                RegexPattern { regex: Regex::new(r"0|[1-9][0-9]*").unwrap(), handler: number_handler },
                RegexPattern { regex: Regex::new("\"[a-zA-Z0-9]{0,15}\"").unwrap(), handler: string_handler },
                RegexPattern { regex: Regex::new(r"\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
                RegexPattern { regex: Regex::new(r"\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
                RegexPattern { regex: Regex::new(r"\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
                RegexPattern { regex: Regex::new(r"\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
                RegexPattern { regex: Regex::new(";").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
                RegexPattern { regex: Regex::new("=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=") },
                RegexPattern { regex: Regex::new(">").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
            ],
            source,
            file,
        }
    }

    /// Consumes `n` bytes, counting newlines so token lines stay accurate.
    pub fn advance_n(&mut self, n: usize) {
        let consumed = &self.source[self.pos..self.pos + n];
        self.line += consumed.matches('\n').count() as u32;
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source.as_bytes()[self.pos] as char
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn number_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    lexer.push(MK_TOKEN!(
        TokenKind::Number,
        matched.clone(),
        Span {
            start: Position(lexer.line, Rc::clone(&lexer.file)),
            end: Position(lexer.line, Rc::clone(&lexer.file)),
        }
    ));
    lexer.advance_n(matched.len());
}

fn skip_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap().end();
    lexer.advance_n(matched);
}

fn string_handler(lexer: &mut Lexer, regex: Regex) {
    let matched = regex.find(lexer.remainder()).unwrap();
    // SPL strings are plain alphanumerics, no escapes to process.
    let string_literal = matched.as_str()[1..matched.end() - 1].to_string();

    lexer.push(MK_TOKEN!(
        TokenKind::String,
        string_literal.clone(),
        Span {
            start: Position(lexer.line, Rc::clone(&lexer.file)),
            end: Position(lexer.line, Rc::clone(&lexer.file)),
        }
    ));
    lexer.advance_n(string_literal.len() + 2);
}

fn symbol_handler(lexer: &mut Lexer, regex: Regex) {
    let value = regex.find(lexer.remainder()).unwrap().as_str().to_string();

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(
            *kind,
            value.clone(),
            Span {
                start: Position(lexer.line, Rc::clone(&lexer.file)),
                end: Position(lexer.line, Rc::clone(&lexer.file)),
            }
        ));
    } else {
        lexer.push(MK_TOKEN!(
            TokenKind::Name,
            value.clone(),
            Span {
                start: Position(lexer.line, Rc::clone(&lexer.file)),
                end: Position(lexer.line, Rc::clone(&lexer.file)),
            }
        ));
    }

    lexer.advance_n(value.len());
}

pub fn tokenize(source: String, file: Rc<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let mut matched = false;

        for i in 0..lex.patterns.len() {
            let pattern = lex.patterns[i].clone();
            let match_here = pattern.regex.find(lex.remainder());

            if match_here.is_some() && match_here.unwrap().start() == 0 {
                (pattern.handler)(&mut lex, pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            return Err(Error::new(
                ErrorImpl::UnrecognisedToken {
                    token: lex.at().to_string(),
                },
                Position(lex.line, Rc::clone(&lex.file)),
            ));
        }
    }

    lex.push(MK_TOKEN!(
        TokenKind::EOF,
        String::from("EOF"),
        Span {
            start: Position(lex.line, Rc::clone(&lex.file)),
            end: Position(lex.line, Rc::clone(&lex.file)),
        }
    ));
    Ok(lex.tokens)
}
