use std::{fmt, str::FromStr};

use crate::{EvalError, Expr, ParseError, Scope, Value, parse};

/// A parsed formula that remembers the text it was written as.
///
/// Parsing happens once, when the formula is declared; evaluation walks the
/// stored [`Expr`] against a [`Scope`] every time it is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parses `source` into a formula.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if `source` is not a well-formed expression.
    pub fn parse(source: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();
        let expr = parse(&source)?;
        Ok(Self { source, expr })
    }

    /// The text the formula was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Evaluates the formula to a value of either kind.
    ///
    /// # Errors
    ///
    /// See [`Expr::evaluate`].
    pub fn evaluate<S: Scope + ?Sized>(&self, scope: &S) -> Result<Value, EvalError> {
        self.expr.evaluate(scope)
    }

    /// Evaluates the formula and requires a numeric result.
    ///
    /// # Errors
    ///
    /// Fails as [`Expr::evaluate`] does, or with [`EvalError::TypeMismatch`]
    /// if the result is a boolean.
    pub fn evaluate_number<S: Scope + ?Sized>(&self, scope: &S) -> Result<f64, EvalError> {
        self.evaluate(scope)?.into_number()
    }

    /// Evaluates the formula and requires a boolean result.
    ///
    /// # Errors
    ///
    /// Fails as [`Expr::evaluate`] does, or with [`EvalError::TypeMismatch`]
    /// if the result is a number.
    pub fn evaluate_bool<S: Scope + ?Sized>(&self, scope: &S) -> Result<bool, EvalError> {
        self.evaluate(scope)?.into_bool()
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
