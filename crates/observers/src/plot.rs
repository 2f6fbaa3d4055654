//! Plotting of model runs.
//!
//! Series can be collected live with [`PlotObserver`] or taken from a
//! recorded [`History`] with [`plot_history`]. Either way they are shown in a
//! blocking egui window.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use stockflow_core::{Action, Event, History, Observer};

/// Configuration for rendering plotted series.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// plot_history(model.history().unwrap(), &["v", "s"], ShowConfig::new().title("Car").legend())?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    log_y: bool,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, no legend, linear scale.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            log_y: false,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each series by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    /// Enables a logarithmic y-axis (base 10).
    ///
    /// Non-positive values are skipped.
    #[must_use]
    pub fn log_y(mut self) -> Self {
        self.log_y = true;
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A named series of `[t, value]` points.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

/// Collects entity values against simulated time while a model runs.
///
/// Pass `&mut PlotObserver` to [`Model::run_observed`] and call
/// [`show`][PlotObserver::show] once the run returns. Names missing from the
/// model are skipped.
///
/// ```ignore
/// let mut plot = PlotObserver::new(["v", "a"]);
/// model.run_observed(false, &mut plot)?;
/// plot.show(ShowConfig::new().title("Car").legend())?;
/// ```
///
/// [`Model::run_observed`]: stockflow_core::Model::run_observed
#[derive(Debug, Clone)]
pub struct PlotObserver {
    traces: Vec<Trace>,
}

impl PlotObserver {
    /// Creates an observer collecting one trace per name.
    pub fn new<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self {
            traces: names
                .into_iter()
                .map(|name| Trace {
                    name: name.into(),
                    points: Vec::new(),
                })
                .collect(),
        }
    }

    /// Records one point per trace at `t`.
    ///
    /// A `None` value skips that trace while leaving others unaffected.
    pub fn record(&mut self, t: f64, values: impl IntoIterator<Item = Option<f64>>) {
        for (trace, value) in self.traces.iter_mut().zip(values) {
            if let Some(value) = value {
                trace.points.push([t, value]);
            }
        }
    }

    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        show_traces(self.traces, config)
    }
}

impl<'a> Observer<Event<'a>, Action> for PlotObserver {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        let values: Vec<_> = self
            .traces
            .iter()
            .map(|trace| event.value(&trace.name))
            .collect();
        self.record(event.time(), values);
        None
    }
}

/// Allows `&mut PlotObserver` to be passed to runs that take an observer by
/// value, so [`PlotObserver::show`] can be called after the run completes.
impl<'a> Observer<Event<'a>, Action> for &mut PlotObserver {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        (*self).observe(event)
    }
}

/// Builds traces for `names` from a recorded history.
///
/// Names that were not recorded are skipped.
#[must_use]
pub fn history_traces(history: &History, names: &[&str]) -> Vec<Trace> {
    names
        .iter()
        .filter_map(|&name| {
            let series = history.series(name)?;
            Some(Trace {
                name: name.to_string(),
                points: history
                    .times()
                    .iter()
                    .zip(series)
                    .map(|(&t, &value)| [t, value])
                    .collect(),
            })
        })
        .collect()
}

/// Plots recorded series for `names` in a blocking egui window.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn plot_history(history: &History, names: &[&str], config: ShowConfig) -> Result<(), eframe::Error> {
    show_traces(history_traces(history, names), config)
}

fn show_traces(traces: Vec<Trace>, config: ShowConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    let title = config.title.unwrap_or_default();

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(PlotApp {
                traces,
                legend: config.legend,
                log_y: config.log_y,
            }))
        }),
    )
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<Trace>,
    legend: bool,
    log_y: bool,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("stockflow_plot").x_axis_label("t [s]");
            if self.legend {
                plot = plot.legend(Legend::default());
            }
            if self.log_y {
                plot = plot.y_axis_label("log₁₀");
            }
            let log_y = self.log_y;
            plot.show(ui, |plot_ui| {
                for trace in &self.traces {
                    let plot_points: PlotPoints = if log_y {
                        trace
                            .points
                            .iter()
                            .filter(|p| p[1] > 0.0)
                            .map(|p| [p[0], p[1].log10()])
                            .collect()
                    } else {
                        trace.points.iter().copied().collect()
                    };
                    plot_ui.line(Line::new(plot_points).name(&trace.name));
                }
            });
        });
    }
}
