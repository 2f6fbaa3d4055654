//! A restricted formula language for system-dynamics models.
//!
//! Formulas are small side-effect-free expressions over named quantities:
//!
//! - numeric literals (`2`, `0.5`, `46e6`) and `true`/`false`
//! - identifiers resolved against a caller-supplied [`Scope`]
//! - arithmetic `+ - * / **`, comparisons `< <= > >= == !=`
//! - logical `and`, `or`, `not`
//! - the builtins `abs`, `min`, `max`, `pow`
//!
//! A [`Formula`] is parsed once into an [`Expr`] tree and evaluated any number
//! of times. Evaluation reads nothing but the supplied scope, so a formula can
//! never reach or mutate state outside of it.
//!
//! ```
//! use std::collections::HashMap;
//! use stockflow_expr::Formula;
//!
//! let formula: Formula = "k * v ** 2".parse().unwrap();
//! let scope = HashMap::from([("k".to_string(), 0.1), ("v".to_string(), 10.0)]);
//!
//! assert_eq!(formula.evaluate_number(&scope).unwrap(), 10.0);
//! ```

mod ast;
mod error;
mod eval;
mod formula;
mod lexer;
mod parser;

pub use ast::{BinaryOp, Builtin, Expr, UnaryOp};
pub use error::{EvalError, ParseError};
pub use eval::{Scope, Value, ValueKind};
pub use formula::Formula;
pub use lexer::Token;
pub use parser::{MAX_DEPTH, parse};
