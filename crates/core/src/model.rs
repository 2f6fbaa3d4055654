mod action;
mod builder;
mod event;
mod outcome;
mod run;

use std::fmt;

use indexmap::IndexMap;
use stockflow_expr::Formula;

use crate::{
    Config, Entity, Environment, Error, History, Stream, Variable,
    environment::{STEP, TIME},
    error::parse_formula,
};

pub use action::Action;
pub use builder::ModelBuilder;
pub use event::Event;
pub use outcome::{Outcome, Status};

/// Lifecycle of a [`Model`].
///
/// Entities, definitions, streams, and stop conditions can only be added
/// while configuring. A model runs once; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Configuring,
    Running,
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Configuring => "configuring",
            Phase::Running => "running",
            Phase::Stopped => "stopped",
        })
    }
}

/// A registry of named entities plus the clock that advances them.
///
/// Entities are kept in declaration order, which is also the order variables
/// are updated in and the order history is reported in. Every tick reads a
/// single [`Environment`] snapshot, so that order never changes the result.
#[derive(Debug, Clone)]
pub struct Model {
    config: Config,
    entities: IndexMap<String, Entity>,
    stops: Vec<Formula>,
    ticks: usize,
    phase: Phase,
    history: Option<History>,
}

impl Model {
    /// Creates an empty model in the configuring phase.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            entities: IndexMap::new(),
            stops: Vec::new(),
            ticks: 0,
            phase: Phase::Configuring,
            history: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    #[must_use]
    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    /// Current simulated time.
    ///
    /// Computed as `ticks * dt` so it never drifts from the step count.
    #[must_use]
    pub fn t(&self) -> f64 {
        self.ticks as f64 * self.config.dt
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Registers a constant or variable under its name.
    ///
    /// # Errors
    ///
    /// - [`Error::NotConfiguring`] once the model has started running.
    /// - [`Error::InvalidConfiguration`] for an empty name or a reserved one
    ///   (`t`, `dt`).
    /// - [`Error::DuplicateName`] if the name is already registered.
    pub fn register(&mut self, entity: impl Into<Entity>) -> Result<(), Error> {
        self.ensure_configuring()?;
        let entity = entity.into();
        let name = entity.name();

        if name.is_empty() {
            return Err(Error::invalid_configuration("entity names must not be empty"));
        }
        if name == TIME || name == STEP {
            return Err(Error::invalid_configuration(format!(
                "`{name}` is reserved for the simulation clock"
            )));
        }
        if self.entities.contains_key(name) {
            return Err(Error::DuplicateName {
                name: name.to_string(),
            });
        }

        self.entities.insert(name.to_string(), entity);
        Ok(())
    }

    /// Registers every entity in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// See [`Model::register`].
    pub fn register_all<E: Into<Entity>>(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<(), Error> {
        entities
            .into_iter()
            .try_for_each(|entity| self.register(entity))
    }

    /// Appends a boolean stop condition.
    ///
    /// Stop conditions are checked in order at the start of every tick.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfiguring`] once the model has started running,
    /// or [`Error::FormulaSyntax`] if `formula` is not well formed.
    pub fn add_stop_condition(&mut self, formula: &str) -> Result<(), Error> {
        self.ensure_configuring()?;
        self.stops.push(parse_formula(formula)?);
        Ok(())
    }

    /// Sets the definition of a registered variable.
    ///
    /// # Errors
    ///
    /// Fails if the model is not configuring, `variable` does not name a
    /// registered variable, or `formula` is not well formed.
    pub fn define(&mut self, variable: &str, formula: &str) -> Result<(), Error> {
        self.variable_mut(variable)?.define(formula)
    }

    /// Attaches an increasing stream to a registered variable.
    ///
    /// # Errors
    ///
    /// Fails if the model is not configuring, `variable` does not name a
    /// registered variable, or `formula` is not well formed.
    pub fn add_increasing_stream(&mut self, variable: &str, formula: &str) -> Result<(), Error> {
        let stream = Stream::new(formula)?;
        self.variable_mut(variable)?.add_increasing_stream(stream);
        Ok(())
    }

    /// Attaches a decreasing stream to a registered variable.
    ///
    /// # Errors
    ///
    /// Fails if the model is not configuring, `variable` does not name a
    /// registered variable, or `formula` is not well formed.
    pub fn add_decreasing_stream(&mut self, variable: &str, formula: &str) -> Result<(), Error> {
        let stream = Stream::new(formula)?;
        self.variable_mut(variable)?.add_decreasing_stream(stream);
        Ok(())
    }

    /// Looks up a registered entity.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Current value of a registered entity.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(Entity::value)
    }

    /// Iterates over registered entities in declaration order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Stop conditions in the order they are checked.
    #[must_use]
    pub fn stop_conditions(&self) -> &[Formula] {
        &self.stops
    }

    /// Composes the environment for the current state and clock.
    #[must_use]
    pub fn environment(&self) -> Environment {
        Environment::compose(self.entities.values(), self.t(), self.config.dt)
    }

    /// History captured by the last recording run.
    #[must_use]
    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// The recorded series for a tracked entity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRecorded`] if the model did not run with history
    /// enabled or `name` is not a registered entity.
    pub fn series_for(&self, name: &str) -> Result<&[f64], Error> {
        self.history
            .as_ref()
            .and_then(|history| history.series(name))
            .ok_or_else(|| Error::NotRecorded {
                name: name.to_string(),
            })
    }

    fn ensure_configuring(&self) -> Result<(), Error> {
        match self.phase {
            Phase::Configuring => Ok(()),
            phase => Err(Error::NotConfiguring { phase }),
        }
    }

    fn variable_mut(&mut self, name: &str) -> Result<&mut Variable, Error> {
        self.ensure_configuring()?;
        self.entities
            .get_mut(name)
            .ok_or_else(|| Error::UnknownEntity {
                name: name.to_string(),
            })?
            .as_variable_mut()
            .ok_or_else(|| Error::NotAVariable {
                name: name.to_string(),
            })
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Model {}, ", self.config.name)?;
        match self.config.max_t {
            Some(max_t) => write!(f, "duration: {max_t} s")?,
            None => f.write_str("duration: unbounded")?,
        }
        write!(f, ", t = {} s", self.t())?;
        for entity in self.entities.values() {
            write!(f, "\n{entity}")?;
        }
        for stop in &self.stops {
            write!(f, "\nStop when: {stop}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{Constant, Variable};

    fn model() -> Model {
        Model::new(Config::new("test").dt(1.0).max_t(10.0)).unwrap()
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(matches!(
            Model::new(Config::new("bad").dt(0.0)),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn registers_in_declaration_order() {
        let mut model = model();
        model
            .register_all([
                Entity::from(Variable::new("b", 1.0)),
                Entity::from(Constant::new("a", 2.0)),
            ])
            .unwrap();

        let names: Vec<_> = model.entities().map(Entity::name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(model.value("a"), Some(2.0));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut model = model();
        model.register(Constant::new("x", 1.0)).unwrap();
        assert_eq!(
            model.register(Variable::new("x", 2.0)),
            Err(Error::DuplicateName {
                name: "x".to_string()
            })
        );
        assert_eq!(model.value("x"), Some(1.0));
    }

    #[test]
    fn rejects_reserved_and_empty_names() {
        let mut model = model();
        for name in ["t", "dt", ""] {
            assert!(matches!(
                model.register(Variable::new(name, 0.0)),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn streams_and_definitions_need_a_registered_variable() {
        let mut model = model();
        model.register(Constant::new("k", 1.0)).unwrap();

        assert_eq!(
            model.add_increasing_stream("missing", "k"),
            Err(Error::UnknownEntity {
                name: "missing".to_string()
            })
        );
        assert_eq!(
            model.define("k", "2"),
            Err(Error::NotAVariable {
                name: "k".to_string()
            })
        );
    }

    #[test]
    fn stop_conditions_are_parsed_eagerly() {
        let mut model = model();
        assert!(matches!(
            model.add_stop_condition("x <="),
            Err(Error::FormulaSyntax { .. })
        ));
        assert!(model.stop_conditions().is_empty());
    }

    #[test]
    fn environment_reflects_clock() {
        let mut model = model();
        model.register(Variable::new("x", 4.0)).unwrap();
        let env = model.environment();
        assert_eq!(env.get("x"), Some(4.0));
        assert_eq!(env.time(), 0.0);
        assert_eq!(env.dt(), 1.0);
    }

    #[test]
    fn series_before_running_is_not_recorded() {
        let mut model = model();
        model.register(Variable::new("x", 4.0)).unwrap();
        assert_eq!(
            model.series_for("x"),
            Err(Error::NotRecorded {
                name: "x".to_string()
            })
        );
    }

    #[test]
    fn display_lists_entities() {
        let mut model = model();
        model
            .register(Constant::new("Froll", 1000.0).with_unit("N"))
            .unwrap();
        model.register(Variable::new("s", 0.0).with_unit("m")).unwrap();
        model.add_increasing_stream("s", "v*dt").unwrap();
        model.add_stop_condition("s > 100").unwrap();

        assert_eq!(
            model.to_string(),
            "Model test, duration: 10 s, t = 0 s\n\
             Constant Froll with value: 1000 N\n\
             Variable s, with value: 0 m\n  Stream with formula: v*dt\n\
             Stop when: s > 100"
        );
    }

    #[test]
    fn models_are_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Model>();
    }
}
