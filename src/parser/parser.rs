//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program-level
//! parsing functions. SPL's grammar is small and fully parenthesised, so a
//! plain recursive-descent parser with one token of lookahead (two for
//! distinguishing calls from assignments) is all that is needed.

use std::rc::Rc;

use crate::{
    ast::program::{FuncDef, MainProg, ProcDef, Program, VarDecl},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    instr::parse_algo,
    term::parse_atom,
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token `n` positions ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        self.tokens[index].kind
    }

    /// Advances to the next token and returns the consumed token.
    pub fn advance(&mut self) -> Token {
        let token = self.current_token().clone();
        self.pos += 1;
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() == expected_kind {
            return Ok(self.advance());
        }

        match error {
            Some(error) => Err(error),
            None => Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: self.current_token().value.clone(),
                },
                self.get_position(),
            )),
        }
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// The position of the current token, for error reporting.
    pub fn get_position(&self) -> Position {
        Position(self.current_token().line(), Rc::clone(&self.file))
    }
}

/// Parses a token stream into an SPL [`Program`].
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Program, Error> {
    let mut parser = Parser::new(tokens, file);

    parser.expect(TokenKind::Glob)?;
    parser.expect(TokenKind::OpenCurly)?;
    let globals = parse_name_list(&mut parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::Proc)?;
    parser.expect(TokenKind::OpenCurly)?;
    let mut procs = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        procs.push(parse_pdef(&mut parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::Func)?;
    parser.expect(TokenKind::OpenCurly)?;
    let mut funcs = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        funcs.push(parse_fdef(&mut parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    parser.expect(TokenKind::Main)?;
    parser.expect(TokenKind::OpenCurly)?;
    parser.expect(TokenKind::Var)?;
    parser.expect(TokenKind::OpenCurly)?;
    let locals = parse_name_list(&mut parser)?;
    parser.expect(TokenKind::CloseCurly)?;
    let body = parse_algo(&mut parser)?;
    parser.expect(TokenKind::CloseCurly)?;
    parser.expect(TokenKind::EOF)?;

    Ok(Program {
        globals,
        procs,
        funcs,
        main: MainProg { locals, body },
    })
}

/// Parses zero or more declared names (global or main variable lists).
fn parse_name_list(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    let mut names = vec![];
    while parser.current_token_kind() == TokenKind::Name {
        let token = parser.advance();
        names.push(VarDecl {
            name: token.value,
            line: token.span.start.0,
        });
    }
    Ok(names)
}

/// Parses zero to three declared names (parameter and local lists).
fn parse_maxthree(parser: &mut Parser, what: &str) -> Result<Vec<VarDecl>, Error> {
    let names = parse_name_list(parser)?;
    if names.len() > 3 {
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: names[3].name.clone(),
                message: format!("at most three {} are allowed", what),
            },
            parser.get_position(),
        ));
    }
    Ok(names)
}

fn parse_local_block(parser: &mut Parser) -> Result<Vec<VarDecl>, Error> {
    parser.expect(TokenKind::Local)?;
    parser.expect(TokenKind::OpenCurly)?;
    let locals = parse_maxthree(parser, "local variables")?;
    parser.expect(TokenKind::CloseCurly)?;
    Ok(locals)
}

fn parse_pdef(parser: &mut Parser) -> Result<ProcDef, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a procedure name"),
        },
        parser.get_position(),
    );
    let name_token = parser.expect_error(TokenKind::Name, Some(error))?;

    parser.expect(TokenKind::OpenParen)?;
    let params = parse_maxthree(parser, "parameters")?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    let locals = parse_local_block(parser)?;
    let body = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(ProcDef {
        name: name_token.value,
        line: name_token.span.start.0,
        params,
        locals,
        body,
    })
}

fn parse_fdef(parser: &mut Parser) -> Result<FuncDef, Error> {
    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected a function name"),
        },
        parser.get_position(),
    );
    let name_token = parser.expect_error(TokenKind::Name, Some(error))?;

    parser.expect(TokenKind::OpenParen)?;
    let params = parse_maxthree(parser, "parameters")?;
    parser.expect(TokenKind::CloseParen)?;

    parser.expect(TokenKind::OpenCurly)?;
    let locals = parse_local_block(parser)?;

    // Instructions, each terminated by `;`, until the mandatory return.
    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::Return {
        body.push(super::instr::parse_instr(parser)?);
        parser.expect(TokenKind::Semicolon)?;
    }
    parser.expect(TokenKind::Return)?;
    let ret = parse_atom(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    Ok(FuncDef {
        name: name_token.value,
        line: name_token.span.start.0,
        params,
        locals,
        body,
        ret,
    })
}
