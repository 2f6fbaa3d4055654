//! Hand-written Pratt parser for formulas.
//!
//! ## Precedence (lowest to highest)
//!
//! 1. `or` - left associative
//! 2. `and` - left associative
//! 3. `not` - prefix
//! 4. `<`, `<=`, `>`, `>=`, `==`, `!=` - non-associative
//! 5. `+`, `-` - left associative
//! 6. `*`, `/` - left associative
//! 7. Unary `-`, `+` - prefix
//! 8. `**` - right associative, binds tighter than a unary minus on its left
//!
//! So `-v**2` is `-(v**2)` and `2**-1` is `2**(-1)`.

mod pratt;
mod stream;

use logos::Logos;

use crate::{Expr, ParseError, Token};

use stream::TokenStream;

/// Deepest nesting a formula may use.
///
/// Parentheses, prefix operators, binary operators, and call arguments each
/// add a level along the path down to an operand, so `a + b + c` takes three.
pub const MAX_DEPTH: usize = 256;

/// Parses formula source into an expression tree.
///
/// # Errors
///
/// Returns a [`ParseError`] if the source is empty, contains characters that
/// are not part of the formula language, is not a well-formed expression, or
/// nests deeper than [`MAX_DEPTH`].
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    let mut tokens = Vec::new();
    for (token, span) in Token::lexer(source).spanned() {
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(ParseError::InvalidToken {
                    text: source[span.clone()].to_string(),
                    span,
                });
            }
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut stream = TokenStream::new(&tokens);
    let expr = pratt::parse_expr(&mut stream)?;

    match stream.peek() {
        None => Ok(expr),
        Some(token) => Err(ParseError::UnexpectedToken {
            found: token.to_string(),
            context: "after complete expression",
            span: stream.current_span(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinaryOp, Builtin, UnaryOp};

    fn name(n: &str) -> Expr {
        Expr::Name(n.to_string())
    }

    fn num(v: f64) -> Expr {
        Expr::Number(v)
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let expr = parse("a + b * 2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Add,
                name("a"),
                Expr::binary(BinaryOp::Mul, name("b"), num(2.0)),
            )
        );
    }

    #[test]
    fn subtraction_is_left_associative() {
        let expr = parse("Fm-Froll-Flw").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Sub,
                Expr::binary(BinaryOp::Sub, name("Fm"), name("Froll")),
                name("Flw"),
            )
        );
    }

    #[test]
    fn power_is_right_associative() {
        let expr = parse("2 ** 3 ** 2").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Pow,
                num(2.0),
                Expr::binary(BinaryOp::Pow, num(3.0), num(2.0)),
            )
        );
    }

    #[test]
    fn unary_minus_applies_after_power() {
        let expr = parse("-v**2").unwrap();
        assert_eq!(
            expr,
            Expr::unary(
                UnaryOp::Neg,
                Expr::binary(BinaryOp::Pow, name("v"), num(2.0)),
            )
        );
    }

    #[test]
    fn power_accepts_negative_exponent() {
        let expr = parse("2**-1").unwrap();
        assert_eq!(
            expr,
            Expr::binary(BinaryOp::Pow, num(2.0), Expr::unary(UnaryOp::Neg, num(1.0)))
        );
    }

    #[test]
    fn unary_minus_binds_tighter_than_multiplication() {
        let expr = parse("-a*b").unwrap();
        assert_eq!(
            expr,
            Expr::binary(BinaryOp::Mul, Expr::unary(UnaryOp::Neg, name("a")), name("b"))
        );
    }

    #[test]
    fn not_covers_comparison_but_not_and() {
        let expr = parse("not x <= 0 and y").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::And,
                Expr::unary(
                    UnaryOp::Not,
                    Expr::binary(BinaryOp::Le, name("x"), num(0.0)),
                ),
                name("y"),
            )
        );
    }

    #[test]
    fn parentheses_override_precedence() {
        let expr = parse("(a + b) * c").unwrap();
        assert_eq!(
            expr,
            Expr::binary(
                BinaryOp::Mul,
                Expr::binary(BinaryOp::Add, name("a"), name("b")),
                name("c"),
            )
        );
    }

    #[test]
    fn builtin_calls() {
        let expr = parse("max(0, abs(x))").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                function: Builtin::Max,
                args: vec![
                    num(0.0),
                    Expr::Call {
                        function: Builtin::Abs,
                        args: vec![name("x")],
                    },
                ],
            }
        );
    }

    #[test]
    fn rejects_empty_formula() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_assignment() {
        assert!(matches!(
            parse("x = 1"),
            Err(ParseError::InvalidToken { .. })
        ));
    }

    #[test]
    fn rejects_trailing_tokens() {
        assert!(matches!(
            parse("a b"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn rejects_dangling_operator() {
        assert!(matches!(
            parse("a +"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn rejects_unclosed_parenthesis() {
        assert!(matches!(
            parse("(a + b"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn rejects_chained_comparison() {
        assert!(matches!(
            parse("0 < x < 1"),
            Err(ParseError::ChainedComparison { .. })
        ));
    }

    #[test]
    fn accepts_nesting_up_to_the_limit() {
        let depth = MAX_DEPTH - 1;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&source), Ok(name("x")));
    }

    #[test]
    fn rejects_deeply_nested_parentheses() {
        let depth = 200_000;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(
            parse(&source),
            Err(ParseError::TooDeep { limit: MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn rejects_long_runs_of_unary_minus() {
        let source = format!("{}1", "-".repeat(200_000));
        assert!(matches!(
            parse(&source),
            Err(ParseError::TooDeep { limit: MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn long_operator_chains_count_toward_the_limit() {
        assert!(parse(&vec!["1"; 100].join(" + ")).is_ok());
        assert!(matches!(
            parse(&vec!["1"; 100_000].join(" + ")),
            Err(ParseError::TooDeep { limit: MAX_DEPTH, .. })
        ));
    }

    #[test]
    fn rejects_unknown_function() {
        assert!(matches!(
            parse("exec(x)"),
            Err(ParseError::UnknownFunction { name, .. }) if name == "exec"
        ));
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(
            parse("abs(1, 2)"),
            Err(ParseError::Arity {
                function: "abs",
                count: 2
            })
        );
    }
}
