//! Example stockflow models and helpers for the `stockflow` binary.
//!
//! - [`car`] — the car acceleration model
//! - [`report`] — plain-text tables of recorded runs

pub mod car;
pub mod report;
