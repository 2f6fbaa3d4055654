//! A small system-dynamics kernel.
//!
//! A [`Model`] holds named quantities and advances them in fixed steps:
//!
//! - [`Constant`] — a named value that never changes
//! - [`Variable`] — a named value updated every tick by an optional
//!   definition and any number of signed [`Stream`]s
//! - [`Environment`] — the name→value snapshot every formula reads, rebuilt
//!   at the start of each tick
//! - [`Observer`] — receives run events and may stop a run early
//!
//! Formulas are parsed once, when they are attached, by `stockflow-expr`.
//!
//! ```
//! use stockflow_core::{Config, Constant, Model, Variable};
//!
//! let mut model = Model::new(Config::new("drain").dt(1.0))?;
//! model.register(Constant::new("rate", 2.0))?;
//! model.register(Variable::new("x", 10.0))?;
//! model.add_decreasing_stream("x", "rate")?;
//! model.add_stop_condition("x <= 0")?;
//!
//! let outcome = model.run(true)?;
//! assert_eq!(outcome.ticks, 5);
//! assert_eq!(model.series_for("x")?, [10.0, 8.0, 6.0, 4.0, 2.0]);
//! # Ok::<(), stockflow_core::Error>(())
//! ```

mod config;
mod constant;
#[cfg(feature = "serde")]
mod definition;
mod entity;
mod environment;
mod error;
mod history;
mod model;
mod observer;
mod stream;
mod variable;

pub use config::Config;
pub use constant::Constant;
#[cfg(feature = "serde")]
pub use definition::{ConstantDefinition, Definition, VariableDefinition};
pub use entity::Entity;
pub use environment::{Environment, STEP, TIME};
pub use error::Error;
pub use history::History;
pub use model::{Action, Event, Model, ModelBuilder, Outcome, Phase, Status};
pub use observer::Observer;
pub use stream::{Sign, Stream};
pub use variable::Variable;

pub use stockflow_expr::{Formula, ValueKind};
