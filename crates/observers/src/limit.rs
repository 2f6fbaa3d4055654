use stockflow_core::{Action, Event, Observer};
use tracing::warn;

/// Stops a run once a fixed number of ticks has been applied.
///
/// Useful as a safety net for models with an unbounded horizon whose stop
/// conditions might never hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickLimit {
    max_ticks: usize,
}

impl TickLimit {
    #[must_use]
    pub fn new(max_ticks: usize) -> Self {
        Self { max_ticks }
    }

    #[must_use]
    pub fn max_ticks(&self) -> usize {
        self.max_ticks
    }
}

impl<'a> Observer<Event<'a>, Action> for TickLimit {
    fn observe(&mut self, event: &Event<'a>) -> Option<Action> {
        if event.step < self.max_ticks {
            return None;
        }
        warn!(
            max_ticks = self.max_ticks,
            t = event.time(),
            "tick limit reached, stopping run"
        );
        Some(Action::StopEarly)
    }
}
