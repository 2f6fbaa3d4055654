use std::fmt;

use stockflow_expr::Formula;

use crate::{Environment, Error, error::parse_formula};

/// Whether a stream adds to or subtracts from its variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// The multiplier applied to the stream's formula result.
    #[must_use]
    pub fn factor(self) -> f64 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }
}

/// A signed rate-of-change contribution to a single variable.
///
/// A stream is created detached with a positive sign; attaching it to a
/// [`Variable`](crate::Variable) through `add_increasing_stream` or
/// `add_decreasing_stream` fixes its sign.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    name: String,
    formula: Formula,
    sign: Sign,
}

impl Stream {
    /// Creates an unnamed stream from formula text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormulaSyntax`] if `formula` is not well formed.
    pub fn new(formula: &str) -> Result<Self, Error> {
        Ok(Self {
            name: String::new(),
            formula: parse_formula(formula)?,
            sign: Sign::Positive,
        })
    }

    /// Sets the stream's name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    #[must_use]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub(crate) fn with_sign(mut self, sign: Sign) -> Self {
        self.sign = sign;
        self
    }

    /// Evaluates the formula and applies the sign.
    ///
    /// # Errors
    ///
    /// Returns an error if the formula references a name missing from the
    /// environment, evaluates to a boolean, or divides by zero.
    pub fn value(&self, environment: &Environment) -> Result<f64, Error> {
        let result = self
            .formula
            .evaluate_number(environment)
            .map_err(|err| Error::evaluation(&self.formula, err))?;
        Ok(self.sign.factor() * result)
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stream")?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        match self.sign {
            Sign::Positive => write!(f, " with formula: {}", self.formula),
            Sign::Negative => write!(f, " with formula: -({})", self.formula),
        }
    }
}
