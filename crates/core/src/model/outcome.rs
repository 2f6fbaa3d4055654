use std::fmt;

/// Why a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The clock reached `max_t`.
    HorizonReached,
    /// A stop condition evaluated to `true`.
    StopCondition { index: usize, formula: String },
    /// An observer returned [`Action::StopEarly`](super::Action::StopEarly).
    StoppedByObserver,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::HorizonReached => f.write_str("horizon reached"),
            Status::StopCondition { formula, .. } => write!(f, "stop condition `{formula}` met"),
            Status::StoppedByObserver => f.write_str("stopped by observer"),
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: Status,
    /// Ticks applied before the run ended.
    pub ticks: usize,
    /// Simulated time when the run ended.
    pub time: f64,
}
