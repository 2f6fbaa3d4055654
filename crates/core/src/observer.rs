/// Watches a model run tick by tick and may end it early.
///
/// [`Model::run_observed`](crate::Model::run_observed) calls `observe` once
/// per tick with an [`Event`](crate::Event). Returning `Some(action)` asks the
/// run to act on it, currently only [`Action::StopEarly`](crate::Action);
/// `None` lets the tick proceed.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never intervenes:
///
/// ```
/// use stockflow_core::{Action, Config, Event, Model, Variable};
///
/// let mut model = Model::new(Config::new("grow").dt(1.0))?;
/// model.register(Variable::new("x", 1.0))?;
/// model.add_increasing_stream("x", "x")?;
///
/// let outcome = model.run_observed(false, |event: &Event<'_>| {
///     (event.value("x") > Some(100.0)).then_some(Action::StopEarly)
/// })?;
/// assert_eq!(outcome.ticks, 7);
/// # Ok::<(), stockflow_core::Error>(())
/// ```
pub trait Observer<E, A> {
    /// Inspects one event, optionally requesting an action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
