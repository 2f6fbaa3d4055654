use std::ops::Range;

use thiserror::Error;

use crate::eval::ValueKind;

/// Errors raised while turning formula text into an expression tree.
///
/// Spans are byte ranges into the formula source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("formula is empty")]
    Empty,

    #[error("unrecognized input {text:?} at {span:?}")]
    InvalidToken { text: String, span: Range<usize> },

    #[error("unexpected {found} {context} at {span:?}")]
    UnexpectedToken {
        found: String,
        context: &'static str,
        span: Range<usize>,
    },

    #[error("unexpected end of formula {context}")]
    UnexpectedEnd { context: &'static str },

    #[error("comparisons cannot be chained at {span:?}")]
    ChainedComparison { span: Range<usize> },

    #[error("formula nests deeper than {limit} levels at {span:?}")]
    TooDeep { limit: usize, span: Range<usize> },

    #[error("unknown function `{name}` at {span:?}")]
    UnknownFunction { name: String, span: Range<usize> },

    #[error("`{function}` does not accept {count} argument(s)")]
    Arity { function: &'static str, count: usize },
}

/// Errors raised while evaluating an expression against a scope.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown name `{name}`")]
    UnknownName { name: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("division by zero")]
    DivisionByZero,

    /// A builtin call with the wrong number of arguments. Parsed formulas
    /// are checked for this already, so only a hand-built [`Expr::Call`]
    /// can fail this way.
    ///
    /// [`Expr::Call`]: crate::Expr::Call
    #[error("`{function}` does not accept {count} argument(s)")]
    Arity { function: &'static str, count: usize },
}
