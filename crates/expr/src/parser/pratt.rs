use crate::{BinaryOp, Builtin, Expr, ParseError, Token, UnaryOp};

use super::TokenStream;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
    /// Two operators of the same level may not follow one another.
    None,
}

/// Operand precedence of `not`: comparisons and arithmetic bind inside it.
const NOT_PREC: u8 = 25;

/// Operand precedence of unary `-` and `+`: only `**` binds inside it.
const SIGN_PREC: u8 = 60;

/// Returns (precedence, associativity, op) for a binary operator token.
///
/// Higher precedence binds tighter.
fn binary_op_info(token: Token<'_>) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Or => Some((10, Assoc::Left, BinaryOp::Or)),
        Token::And => Some((20, Assoc::Left, BinaryOp::And)),
        Token::Lt => Some((30, Assoc::None, BinaryOp::Lt)),
        Token::LtEq => Some((30, Assoc::None, BinaryOp::Le)),
        Token::Gt => Some((30, Assoc::None, BinaryOp::Gt)),
        Token::GtEq => Some((30, Assoc::None, BinaryOp::Ge)),
        Token::EqEq => Some((30, Assoc::None, BinaryOp::Eq)),
        Token::BangEq => Some((30, Assoc::None, BinaryOp::Ne)),
        Token::Plus => Some((40, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((40, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((50, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((50, Assoc::Left, BinaryOp::Div)),
        Token::StarStar => Some((70, Assoc::Right, BinaryOp::Pow)),
        _ => None,
    }
}

pub(super) fn parse_expr(stream: &mut TokenStream<'_, '_>) -> Result<Expr, ParseError> {
    parse_pratt(stream, 0)
}

/// Every parenthesis, prefix operand, and call argument passes through here,
/// so together with the per-operator levels taken in [`parse_binary`] the
/// depth counted by the stream bounds the height of the tree.
fn parse_pratt(stream: &mut TokenStream<'_, '_>, min_prec: u8) -> Result<Expr, ParseError> {
    let depth = stream.enter()?;
    let expr = parse_binary(stream, min_prec);
    stream.leave(depth);
    expr
}

fn parse_binary(stream: &mut TokenStream<'_, '_>, min_prec: u8) -> Result<Expr, ParseError> {
    let mut left = parse_prefix(stream)?;

    while let Some((prec, assoc, op)) = stream.peek().and_then(binary_op_info) {
        if prec < min_prec {
            break;
        }
        stream.advance();
        stream.descend()?;

        let next_prec = if assoc == Assoc::Right { prec } else { prec + 1 };
        let right = parse_pratt(stream, next_prec)?;
        left = Expr::binary(op, left, right);

        if assoc == Assoc::None {
            if let Some((following, ..)) = stream.peek().and_then(binary_op_info) {
                if following == prec {
                    return Err(ParseError::ChainedComparison {
                        span: stream.current_span(),
                    });
                }
            }
        }
    }

    Ok(left)
}

fn parse_prefix(stream: &mut TokenStream<'_, '_>) -> Result<Expr, ParseError> {
    let (op, operand_prec) = match stream.peek() {
        Some(Token::Not) => (UnaryOp::Not, NOT_PREC),
        Some(Token::Minus) => (UnaryOp::Neg, SIGN_PREC),
        Some(Token::Plus) => (UnaryOp::Plus, SIGN_PREC),
        _ => return parse_atom(stream),
    };
    stream.advance();

    let operand = parse_pratt(stream, operand_prec)?;
    Ok(Expr::unary(op, operand))
}

fn parse_atom(stream: &mut TokenStream<'_, '_>) -> Result<Expr, ParseError> {
    let Some(token) = stream.peek() else {
        return Err(stream.unexpected("where an operand was expected"));
    };

    match token {
        Token::Number(value) => {
            stream.advance();
            Ok(Expr::Number(value))
        }
        Token::True => {
            stream.advance();
            Ok(Expr::Bool(true))
        }
        Token::False => {
            stream.advance();
            Ok(Expr::Bool(false))
        }
        Token::LParen => {
            stream.advance();
            let inner = parse_expr(stream)?;
            stream.expect(Token::RParen, "where `)` was expected")?;
            Ok(inner)
        }
        Token::Ident(name) => {
            stream.advance();
            if stream.peek() == Some(Token::LParen) {
                parse_call(stream, name)
            } else {
                Ok(Expr::Name(name.to_string()))
            }
        }
        _ => Err(stream.unexpected("where an operand was expected")),
    }
}

/// Parses `name(arg, ...)` once the name has been consumed.
fn parse_call(stream: &mut TokenStream<'_, '_>, name: &str) -> Result<Expr, ParseError> {
    let function = Builtin::from_name(name).ok_or_else(|| ParseError::UnknownFunction {
        name: name.to_string(),
        span: stream.previous_span(),
    })?;

    stream.expect(Token::LParen, "where `(` was expected")?;

    let mut args = Vec::new();
    if !stream.eat(Token::RParen) {
        loop {
            args.push(parse_expr(stream)?);
            if stream.eat(Token::Comma) {
                continue;
            }
            stream.expect(Token::RParen, "where `,` or `)` was expected")?;
            break;
        }
    }

    if !function.accepts(args.len()) {
        return Err(ParseError::Arity {
            function: function.name(),
            count: args.len(),
        });
    }

    Ok(Expr::Call { function, args })
}
