//! Reusable observers for stockflow model runs.
//!
//! Each type here implements [`Observer`] for the run [`Event`] emitted by
//! [`Model::run_observed`]:
//!
//! - [`TraceObserver`] — logs selected values through `tracing`
//! - [`TickLimit`] — stops a run after a fixed number of ticks
//!
//! # Features
//!
//! - `plot` — Enables `PlotObserver` and `plot_history` for viewing series in
//!   an egui window. This feature adds dependencies on `eframe` and `egui_plot`.
//!
//! [`Observer`]: stockflow_core::Observer
//! [`Event`]: stockflow_core::Event
//! [`Model::run_observed`]: stockflow_core::Model::run_observed

mod limit;
mod trace;

#[cfg(feature = "plot")]
mod plot;

pub use limit::TickLimit;
pub use trace::TraceObserver;

#[cfg(feature = "plot")]
pub use plot::{PlotObserver, ShowConfig, Trace, history_traces, plot_history};
