use stockflow_expr::{EvalError, Formula, ParseError, ValueKind};
use thiserror::Error;

use crate::model::Phase;

/// Errors raised while declaring or running a model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("name `{name}` is already registered")]
    DuplicateName { name: String },

    #[error("formula `{formula}` references unknown name `{name}`")]
    UnknownName { formula: String, name: String },

    #[error("malformed formula `{formula}`: {source}")]
    FormulaSyntax {
        formula: String,
        #[source]
        source: ParseError,
    },

    #[error("formula `{formula}` must evaluate to {expected}, found {found}")]
    TypeMismatch {
        formula: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("division by zero in formula `{formula}`")]
    DivisionByZero { formula: String },

    #[error("no history recorded for `{name}`")]
    NotRecorded { name: String },

    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no entity named `{name}`")]
    UnknownEntity { name: String },

    #[error("`{name}` is a constant, not a variable")]
    NotAVariable { name: String },

    #[error("model is {phase}, expected configuring")]
    NotConfiguring { phase: Phase },
}

impl Error {
    pub(crate) fn syntax(formula: &str, source: ParseError) -> Self {
        Self::FormulaSyntax {
            formula: formula.to_string(),
            source,
        }
    }

    /// Attaches the failing formula's text to an evaluation error.
    pub(crate) fn evaluation(formula: &Formula, source: EvalError) -> Self {
        let formula = formula.source().to_string();
        match source {
            EvalError::UnknownName { name } => Self::UnknownName { formula, name },
            EvalError::TypeMismatch { expected, found } => Self::TypeMismatch {
                formula,
                expected,
                found,
            },
            EvalError::DivisionByZero => Self::DivisionByZero { formula },
            EvalError::Arity { function, count } => Self::FormulaSyntax {
                formula,
                source: ParseError::Arity { function, count },
            },
        }
    }

    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// Parses formula text, reporting failures as [`Error::FormulaSyntax`].
pub(crate) fn parse_formula(source: &str) -> Result<Formula, Error> {
    Formula::parse(source).map_err(|err| Error::syntax(source, err))
}
