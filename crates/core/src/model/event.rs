use crate::Environment;

/// The state of a run at the start of a tick, after stop conditions pass.
///
/// Observers see the same environment the tick's formulas are evaluated
/// against.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    /// Number of ticks completed so far.
    pub step: usize,
    pub environment: &'a Environment,
}

impl Event<'_> {
    /// Simulated time at the start of this tick.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.environment.time()
    }

    /// Current value of a named entity.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.environment.get(name)
    }
}
