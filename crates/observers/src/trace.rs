use std::fmt::Write as _;

use stockflow_core::{Action, Event, Observer};
use tracing::info;

/// Logs selected entity values through `tracing` every `every` ticks.
///
/// Values are emitted at `info` level as a single `name=value` list, so the
/// output is controlled by whatever subscriber the host installs.
///
/// ```
/// use stockflow_observers::TraceObserver;
///
/// let trace = TraceObserver::new(["v", "m_fuel"]).every(100);
/// # let _ = trace;
/// ```
#[derive(Debug, Clone)]
pub struct TraceObserver {
    names: Vec<String>,
    every: usize,
}

impl TraceObserver {
    /// Logs `names` on every tick.
    pub fn new<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            every: 1,
        }
    }

    /// Logs only on ticks whose step is a multiple of `every`.
    ///
    /// A value of zero is treated as one.
    #[must_use]
    pub fn every(mut self, every: usize) -> Self {
        self.every = every.max(1);
        self
    }

    /// Whether the tick at `step` is logged.
    #[must_use]
    pub fn is_due(&self, step: usize) -> bool {
        step % self.every == 0
    }

    /// Formats the tracked values as `name=value` pairs.
    ///
    /// Names missing from the event are shown as `?`.
    #[must_use]
    pub fn summarize(&self, event: &Event<'_>) -> String {
        let mut summary = String::new();
        for name in &self.names {
            if !summary.is_empty() {
                summary.push(' ');
            }
            let _ = match event.value(name) {
                Some(value) => write!(summary, "{name}={value}"),
                None => write!(summary, "{name}=?"),
            };
        }
        summary
    }
}

impl<'a> Observer<Event<'a>, Action> for TraceObserver {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        if self.is_due(event.step) {
            info!(step = event.step, t = event.time(), values = %self.summarize(event), "tick");
        }
        None
    }
}

/// Allows `&mut TraceObserver` to be passed to runs that take an observer by
/// value.
impl<'a> Observer<Event<'a>, Action> for &mut TraceObserver {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        (**self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use stockflow_core::Environment;

    use super::*;

    #[test]
    fn every_zero_logs_every_tick() {
        let trace = TraceObserver::new(["x"]).every(0);
        assert!(trace.is_due(0));
        assert!(trace.is_due(7));
    }

    #[test]
    fn logs_on_multiples_only() {
        let trace = TraceObserver::new(["x"]).every(10);
        assert!(trace.is_due(0));
        assert!(!trace.is_due(5));
        assert!(trace.is_due(20));
    }

    #[test]
    fn summary_marks_missing_names() {
        let environment = Environment::from_values([("x", 1.5)], 0.0, 0.1);
        let event = Event {
            step: 0,
            environment: &environment,
        };

        let trace = TraceObserver::new(["x", "y"]);
        assert_eq!(trace.summarize(&event), "x=1.5 y=?");
    }

    #[test]
    fn never_stops_a_run() {
        let environment = Environment::from_values([("x", 1.0)], 0.0, 0.1);
        let event = Event {
            step: 3,
            environment: &environment,
        };
        assert_eq!(TraceObserver::new(["x"]).observe(&event), None);
    }
}
