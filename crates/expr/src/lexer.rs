use logos::Logos;

/// A formula token.
///
/// Whitespace is skipped. Keywords take priority over identifiers, so `and`
/// never lexes as a name.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token<'src> {
    /// Numeric literal, including exponent forms like `46e6` and `.5`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice())]
    Ident(&'src str),

    #[token("true")]
    #[token("True")]
    True,
    #[token("false")]
    #[token("False")]
    False,

    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("**")]
    StarStar,
    #[token("/")]
    Slash,

    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(value) => write!(f, "number `{value}`"),
            Token::Ident(name) => write!(f, "name `{name}`"),
            Token::True => f.write_str("`true`"),
            Token::False => f.write_str("`false`"),
            Token::And => f.write_str("`and`"),
            Token::Or => f.write_str("`or`"),
            Token::Not => f.write_str("`not`"),
            Token::Plus => f.write_str("`+`"),
            Token::Minus => f.write_str("`-`"),
            Token::Star => f.write_str("`*`"),
            Token::StarStar => f.write_str("`**`"),
            Token::Slash => f.write_str("`/`"),
            Token::Lt => f.write_str("`<`"),
            Token::LtEq => f.write_str("`<=`"),
            Token::Gt => f.write_str("`>`"),
            Token::GtEq => f.write_str("`>=`"),
            Token::EqEq => f.write_str("`==`"),
            Token::BangEq => f.write_str("`!=`"),
            Token::LParen => f.write_str("`(`"),
            Token::RParen => f.write_str("`)`"),
            Token::Comma => f.write_str("`,`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token<'_>> {
        Token::lexer(source)
            .collect::<Result<Vec<_>, _>>()
            .expect("should lex")
    }

    #[test]
    fn numbers_in_all_forms() {
        assert_eq!(
            lex("2 0.5 .25 46e6 1.5E-3"),
            vec![
                Token::Number(2.0),
                Token::Number(0.5),
                Token::Number(0.25),
                Token::Number(46e6),
                Token::Number(1.5e-3),
            ]
        );
    }

    #[test]
    fn double_star_is_one_token() {
        assert_eq!(
            lex("v**2"),
            vec![Token::Ident("v"), Token::StarStar, Token::Number(2.0)]
        );
    }

    #[test]
    fn keywords_win_over_identifiers() {
        assert_eq!(
            lex("and android not nothing"),
            vec![
                Token::And,
                Token::Ident("android"),
                Token::Not,
                Token::Ident("nothing"),
            ]
        );
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(
            lex("< <= > >= == !="),
            vec![
                Token::Lt,
                Token::LtEq,
                Token::Gt,
                Token::GtEq,
                Token::EqEq,
                Token::BangEq,
            ]
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        let results: Vec<_> = Token::lexer("x = 1").collect();
        assert!(results.iter().any(Result::is_err));
    }
}
