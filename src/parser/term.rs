use crate::{
    ast::terms::{Atom, BinOp, Term, UnOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

pub fn parse_atom(parser: &mut Parser) -> Result<Atom, Error> {
    match parser.current_token_kind() {
        TokenKind::Name => {
            let token = parser.advance();
            Ok(Atom::Var {
                name: token.value,
                line: token.span.start.0,
            })
        }
        TokenKind::Number => {
            let token = parser.advance();
            let value = token.value.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.value.clone(),
                    },
                    parser.get_position(),
                )
            })?;
            Ok(Atom::Number {
                value,
                line: token.span.start.0,
            })
        }
        _ => Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: parser.current_token().value.clone(),
                message: String::from("expected a variable or a number"),
            },
            parser.get_position(),
        )),
    }
}

/// Terms are fully parenthesised: `atom`, `( unop term )` or
/// `( term binop term )`, so one token decides the production.
pub fn parse_term(parser: &mut Parser) -> Result<Term, Error> {
    if parser.current_token_kind() != TokenKind::OpenParen {
        return Ok(Term::Atom(parse_atom(parser)?));
    }

    parser.expect(TokenKind::OpenParen)?;

    if let Some(op) = parse_unop(parser) {
        let operand = parse_term(parser)?;
        parser.expect(TokenKind::CloseParen)?;
        return Ok(Term::Unary {
            op,
            operand: Box::new(operand),
        });
    }

    let left = parse_term(parser)?;
    let op = parse_binop(parser)?;
    let right = parse_term(parser)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(Term::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn parse_unop(parser: &mut Parser) -> Option<UnOp> {
    let op = match parser.current_token_kind() {
        TokenKind::Neg => UnOp::Neg,
        TokenKind::Not => UnOp::Not,
        _ => return None,
    };
    parser.advance();
    Some(op)
}

fn parse_binop(parser: &mut Parser) -> Result<BinOp, Error> {
    let op = match parser.current_token_kind() {
        TokenKind::Eq => BinOp::Eq,
        TokenKind::Greater => BinOp::Gt,
        TokenKind::Or => BinOp::Or,
        TokenKind::And => BinOp::And,
        TokenKind::Plus => BinOp::Plus,
        TokenKind::Minus => BinOp::Minus,
        TokenKind::Mult => BinOp::Mult,
        TokenKind::Div => BinOp::Div,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: parser.current_token().value.clone(),
                    message: String::from("expected a binary operator"),
                },
                parser.get_position(),
            ))
        }
    };
    parser.advance();
    Ok(op)
}
