//! The fixed-step explicit Euler loop.
//!
//! Each tick:
//!
//! ```text
//! environment = compose(entities, t, dt)
//! if any stop(environment): end
//! for variable: next = definition(environment) + Σ streams(environment)
//! commit every next; t = (ticks + 1) * dt
//! ```

use tracing::{debug, error, info, trace};

use crate::{Environment, Error, History, Observer};

use super::{Action, Event, Model, Outcome, Phase, Status};

impl Model {
    /// Recomputes every defined variable from its definition, once.
    ///
    /// Algebraic variables such as `m = m_base + m_fuel` can then start the
    /// run consistent with their inputs instead of at a hand-copied start
    /// value. Streams are not applied and the clock does not move. All
    /// definitions read the same snapshot, so a definition that depends on
    /// another defined variable sees that variable's start value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfiguring`] once the model has started running,
    /// or the first evaluation error. On error no variable changes.
    pub fn initialize_definitions(&mut self) -> Result<(), Error> {
        self.ensure_configuring()?;
        let environment = self.environment();

        let defined = self
            .entities
            .values()
            .map(|entity| {
                entity
                    .as_variable()
                    .and_then(|variable| variable.defined_value(&environment))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (entity, value) in self.entities.values_mut().zip(defined) {
            if let (Some(variable), Some(value)) = (entity.as_variable_mut(), value) {
                variable.set_value(value);
            }
        }

        debug!(model = %self.config.name, "initialized definitions");
        Ok(())
    }

    /// Runs the model until the horizon or a stop condition is reached.
    ///
    /// With `record` set, every tracked entity's value at the start of each
    /// applied tick is kept and available through [`Model::series_for`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] if the horizon is not finite and no
    ///   stop condition is registered, since the run could never end.
    /// - [`Error::NotConfiguring`] if the model has already run.
    /// - Any formula evaluation error, which aborts the run. The failing
    ///   tick is never partially applied.
    pub fn run(&mut self, record: bool) -> Result<Outcome, Error> {
        if !self.config.horizon().is_finite() && self.stops.is_empty() {
            return Err(Error::invalid_configuration(
                "an unbounded run needs at least one stop condition",
            ));
        }
        self.run_observed(record, ())
    }

    /// Runs the model, emitting an [`Event`] to `observer` every tick.
    ///
    /// The observer sees each tick after the stop conditions pass and before
    /// any variable is updated. Returning [`Action::StopEarly`] ends the run
    /// without applying that tick.
    ///
    /// Unlike [`Model::run`], an unbounded horizon without stop conditions is
    /// allowed here; the observer is then responsible for ending the run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfiguring`] if the model has already run, or the
    /// first formula evaluation error.
    pub fn run_observed<Obs>(&mut self, record: bool, mut observer: Obs) -> Result<Outcome, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        self.ensure_configuring()?;
        self.phase = Phase::Running;
        if record {
            self.history = Some(History::new(self.entities.keys().cloned()));
        }

        info!(
            model = %self.config.name,
            dt = self.config.dt,
            max_t = ?self.config.max_t,
            entities = self.entities.len(),
            stops = self.stops.len(),
            record,
            "starting run"
        );

        let result = self.step_until_done(&mut observer);
        self.phase = Phase::Stopped;

        match &result {
            Ok(outcome) => info!(
                model = %self.config.name,
                status = %outcome.status,
                ticks = outcome.ticks,
                t = outcome.time,
                "run finished"
            ),
            Err(err) => error!(
                model = %self.config.name,
                ticks = self.ticks,
                t = self.t(),
                %err,
                "run aborted"
            ),
        }

        result
    }

    fn step_until_done<Obs>(&mut self, observer: &mut Obs) -> Result<Outcome, Error>
    where
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        let horizon = self.config.horizon();

        while self.t() < horizon {
            let environment = self.environment();

            if let Some(index) = self.satisfied_stop(&environment)? {
                let formula = self.stops[index].source().to_string();
                debug!(t = self.t(), condition = %formula, "stop condition satisfied");
                return Ok(self.outcome(Status::StopCondition { index, formula }));
            }

            let event = Event {
                step: self.ticks,
                environment: &environment,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                debug!(t = self.t(), "observer requested stop");
                return Ok(self.outcome(Status::StoppedByObserver));
            }

            let next = self.next_values(&environment)?;
            if let Some(history) = &mut self.history {
                history.record(environment.time(), self.entities.values());
            }
            self.commit(next);
            self.ticks += 1;
            trace!(tick = self.ticks, t = self.t(), "tick applied");
        }

        Ok(self.outcome(Status::HorizonReached))
    }

    /// Index of the first stop condition that holds, if any.
    fn satisfied_stop(&self, environment: &Environment) -> Result<Option<usize>, Error> {
        for (index, stop) in self.stops.iter().enumerate() {
            let satisfied = stop
                .evaluate_bool(environment)
                .map_err(|err| Error::evaluation(stop, err))?;
            if satisfied {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    /// Every variable's next value, in registration order, with `None` for
    /// constants. Nothing is written until [`Model::commit`].
    fn next_values(&self, environment: &Environment) -> Result<Vec<Option<f64>>, Error> {
        self.entities
            .values()
            .map(|entity| {
                entity
                    .as_variable()
                    .map(|variable| variable.next_value(environment))
                    .transpose()
            })
            .collect()
    }

    fn commit(&mut self, next: Vec<Option<f64>>) {
        for (entity, value) in self.entities.values_mut().zip(next) {
            if let (Some(variable), Some(value)) = (entity.as_variable_mut(), value) {
                variable.set_value(value);
            }
        }
    }

    fn outcome(&self, status: Status) -> Outcome {
        Outcome {
            status,
            ticks: self.ticks,
            time: self.t(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{Config, Constant, Variable};

    use super::*;

    fn counter(max_t: f64) -> Model {
        let mut model = Model::new(Config::new("counter").dt(0.5).max_t(max_t)).unwrap();
        model.register(Variable::new("n", 0.0)).unwrap();
        model.add_increasing_stream("n", "1").unwrap();
        model
    }

    #[test]
    fn runs_to_horizon() {
        let mut model = counter(2.0);
        let outcome = model.run(false).unwrap();

        assert_eq!(outcome.status, Status::HorizonReached);
        assert_eq!(outcome.ticks, 4);
        assert_relative_eq!(outcome.time, 2.0);
        assert_relative_eq!(model.value("n").unwrap(), 4.0);
        assert_eq!(model.phase(), Phase::Stopped);
    }

    #[test]
    fn zero_horizon_applies_no_ticks() {
        let mut model = counter(0.0);
        let outcome = model.run(true).unwrap();
        assert_eq!(outcome.ticks, 0);
        assert!(model.history().unwrap().is_empty());
    }

    #[test]
    fn variables_read_the_pre_tick_snapshot() {
        let mut model = Model::new(Config::new("swap").dt(1.0).max_t(1.0)).unwrap();
        model.register(Variable::new("a", 1.0)).unwrap();
        model.register(Variable::new("b", 2.0)).unwrap();
        model.define("a", "b").unwrap();
        model.define("b", "a").unwrap();

        model.run(false).unwrap();

        assert_relative_eq!(model.value("a").unwrap(), 2.0);
        assert_relative_eq!(model.value("b").unwrap(), 1.0);
    }

    #[test]
    fn failed_tick_commits_nothing() {
        let mut model = Model::new(Config::new("fail").dt(1.0).max_t(5.0)).unwrap();
        model.register(Variable::new("a", 1.0)).unwrap();
        model.register(Variable::new("b", 1.0)).unwrap();
        model.add_increasing_stream("a", "1").unwrap();
        model.add_increasing_stream("b", "1 / (3 - t)").unwrap();

        let err = model.run(false).unwrap_err();

        assert!(matches!(err, Error::DivisionByZero { .. }));
        assert_eq!(model.ticks(), 3);
        assert_relative_eq!(model.value("a").unwrap(), 4.0);
        assert_eq!(model.phase(), Phase::Stopped);
    }

    #[test]
    fn failed_tick_records_no_row() {
        let mut model = Model::new(Config::new("fail").dt(1.0).max_t(5.0)).unwrap();
        model.register(Variable::new("b", 1.0)).unwrap();
        model.add_increasing_stream("b", "1 / (3 - t)").unwrap();

        let err = model.run(true).unwrap_err();

        assert!(matches!(err, Error::DivisionByZero { .. }));
        assert_eq!(model.ticks(), 3);
        let history = model.history().unwrap();
        assert_eq!(history.len(), model.ticks());
        assert_eq!(history.times(), [0.0, 1.0, 2.0]);
        let b = model.series_for("b").unwrap();
        assert_eq!(b.len(), 3);
        assert_relative_eq!(b[2], 1.0 + 1.0 / 3.0 + 1.0 / 2.0);
        assert_relative_eq!(model.value("b").unwrap(), 1.0 + 1.0 / 3.0 + 1.0 / 2.0 + 1.0);
    }

    #[test]
    fn infinite_horizon_without_stops_is_rejected() {
        let mut model = Model::new(Config::new("forever").dt(1.0).max_t(f64::INFINITY)).unwrap();
        model.register(Variable::new("x", 0.0)).unwrap();
        assert!(matches!(
            model.run(false),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(model.phase(), Phase::Configuring);
    }

    #[test]
    fn non_boolean_stop_is_a_type_mismatch() {
        let mut model = counter(2.0);
        model.add_stop_condition("n + 1").unwrap();
        assert!(matches!(
            model.run(false),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(model.ticks(), 0);
    }

    #[test]
    fn unbounded_run_without_stops_is_rejected() {
        let mut model = Model::new(Config::new("forever").dt(1.0)).unwrap();
        model.register(Variable::new("x", 0.0)).unwrap();
        assert!(matches!(
            model.run(false),
            Err(Error::InvalidConfiguration { .. })
        ));
        assert_eq!(model.phase(), Phase::Configuring);
    }

    #[test]
    fn observer_can_end_an_unbounded_run() {
        let mut model = Model::new(Config::new("forever").dt(1.0)).unwrap();
        model.register(Variable::new("x", 0.0)).unwrap();
        model.add_increasing_stream("x", "2").unwrap();

        let outcome = model
            .run_observed(true, |event: &Event<'_>| {
                (event.value("x") >= Some(6.0)).then_some(Action::StopEarly)
            })
            .unwrap();

        assert_eq!(outcome.status, Status::StoppedByObserver);
        assert_eq!(outcome.ticks, 3);
        assert_eq!(model.series_for("x").unwrap(), [0.0, 2.0, 4.0]);
    }

    #[test]
    fn observer_sees_every_applied_tick() {
        let mut model = counter(2.0);
        let mut steps = Vec::new();
        model
            .run_observed(false, |event: &Event<'_>| {
                steps.push((event.step, event.time()));
                None
            })
            .unwrap();

        assert_eq!(steps, [(0, 0.0), (1, 0.5), (2, 1.0), (3, 1.5)]);
    }

    #[test]
    fn models_run_once() {
        let mut model = counter(1.0);
        model.run(false).unwrap();

        assert_eq!(
            model.run(false),
            Err(Error::NotConfiguring {
                phase: Phase::Stopped
            })
        );
        assert!(matches!(
            model.register(Constant::new("late", 1.0)),
            Err(Error::NotConfiguring { .. })
        ));
    }

    #[test]
    fn initialize_definitions_uses_start_values() {
        let mut model = Model::new(Config::new("car").dt(0.1).max_t(1.0)).unwrap();
        model.register(Constant::new("m_base", 1000.0)).unwrap();
        model.register(Variable::new("m_fuel", 10.0)).unwrap();
        model.register(Variable::new("m", 0.0)).unwrap();
        model.add_decreasing_stream("m_fuel", "1").unwrap();
        model.define("m", "m_base + m_fuel").unwrap();

        model.initialize_definitions().unwrap();

        assert_relative_eq!(model.value("m").unwrap(), 1010.0);
        assert_relative_eq!(model.value("m_fuel").unwrap(), 10.0);
        assert_eq!(model.ticks(), 0);
    }
}
