/// Actions an observer can request during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Ends the run before the next tick is applied.
    StopEarly,
}
