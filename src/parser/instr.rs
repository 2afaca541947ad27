use crate::{
    ast::{
        instructions::{Instr, Output},
        terms::Atom,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    parser::Parser,
    term::{parse_atom, parse_term},
};

/// Parses a non-empty `;`-separated instruction sequence.
///
/// The separator never trails: the sequence ends at the first instruction
/// not followed by a semicolon.
pub fn parse_algo(parser: &mut Parser) -> Result<Vec<Instr>, Error> {
    let mut instrs = vec![parse_instr(parser)?];
    while parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        instrs.push(parse_instr(parser)?);
    }
    Ok(instrs)
}

pub fn parse_instr(parser: &mut Parser) -> Result<Instr, Error> {
    match parser.current_token_kind() {
        TokenKind::Halt => {
            parser.advance();
            Ok(Instr::Halt)
        }
        TokenKind::Print => {
            parser.advance();
            Ok(Instr::Print(parse_output(parser)?))
        }
        TokenKind::While => parse_while(parser),
        TokenKind::Do => parse_do_until(parser),
        TokenKind::If => parse_branch(parser),
        TokenKind::Name => {
            if parser.peek_kind(1) == TokenKind::OpenParen {
                parse_call(parser)
            } else {
                parse_assign(parser)
            }
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected an instruction"),
            },
            parser.get_position(),
        )),
    }
}

fn parse_output(parser: &mut Parser) -> Result<Output, Error> {
    if parser.current_token_kind() == TokenKind::String {
        let token = parser.advance();
        return Ok(Output::Text {
            value: token.value,
            line: token.span.start.0,
        });
    }
    Ok(Output::Atom(parse_atom(parser)?))
}

/// `name ( atoms )` — up to three argument atoms, not comma separated.
fn parse_args(parser: &mut Parser) -> Result<Vec<Atom>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let mut args = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if args.len() == 3 {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("at most three arguments are allowed"),
                },
                parser.get_position(),
            ));
        }
        args.push(parse_atom(parser)?);
    }
    parser.expect(TokenKind::CloseParen)?;
    Ok(args)
}

fn parse_call(parser: &mut Parser) -> Result<Instr, Error> {
    let name_token = parser.expect(TokenKind::Name)?;
    let args = parse_args(parser)?;
    Ok(Instr::Call {
        name: name_token.value,
        line: name_token.span.start.0,
        args,
    })
}

fn parse_assign(parser: &mut Parser) -> Result<Instr, Error> {
    let target_token = parser.expect(TokenKind::Name)?;
    parser.expect(TokenKind::Assignment)?;

    // `v = name ( .. )` is a function call assignment; anything else is a term.
    if parser.current_token_kind() == TokenKind::Name
        && parser.peek_kind(1) == TokenKind::OpenParen
    {
        let name_token = parser.advance();
        let args = parse_args(parser)?;
        return Ok(Instr::AssignCall {
            target: target_token.value,
            target_line: target_token.span.start.0,
            name: name_token.value,
            line: name_token.span.start.0,
            args,
        });
    }

    Ok(Instr::Assign {
        target: target_token.value,
        target_line: target_token.span.start.0,
        value: parse_term(parser)?,
    })
}

fn parse_while(parser: &mut Parser) -> Result<Instr, Error> {
    parser.expect(TokenKind::While)?;
    let cond = parse_term(parser)?;
    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;
    Ok(Instr::While { cond, body })
}

fn parse_do_until(parser: &mut Parser) -> Result<Instr, Error> {
    parser.expect(TokenKind::Do)?;
    parser.expect(TokenKind::OpenCurly)?;
    let body = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;
    parser.expect(TokenKind::Until)?;
    let cond = parse_term(parser)?;
    Ok(Instr::DoUntil { body, cond })
}

fn parse_branch(parser: &mut Parser) -> Result<Instr, Error> {
    parser.expect(TokenKind::If)?;
    let cond = parse_term(parser)?;
    parser.expect(TokenKind::OpenCurly)?;
    let then_branch = parse_algo(parser)?;
    parser.expect(TokenKind::CloseCurly)?;

    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect(TokenKind::OpenCurly)?;
        let else_branch = parse_algo(parser)?;
        parser.expect(TokenKind::CloseCurly)?;
        return Ok(Instr::IfElse {
            cond,
            then_branch,
            else_branch,
        });
    }

    Ok(Instr::If { cond, then_branch })
}
