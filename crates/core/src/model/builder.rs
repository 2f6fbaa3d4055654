use crate::{Config, Entity, Error};

use super::Model;

/// Collects declarations and assembles a [`Model`] in one fallible step.
///
/// Declarations are replayed in order by [`ModelBuilder::build`], so the
/// first problem is reported no matter how the builder was chained.
///
/// ```
/// use stockflow_core::{Config, Constant, ModelBuilder, Variable};
///
/// let mut model = ModelBuilder::new(Config::new("drain").dt(1.0))
///     .declare("rate", Constant::new("", 2.0))
///     .declare("x", Variable::new("", 10.0))
///     .decrease("x", "rate")
///     .stop_when("x <= 0")
///     .build()?;
///
/// model.run(false)?;
/// assert_eq!(model.value("x"), Some(0.0));
/// # Ok::<(), stockflow_core::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ModelBuilder {
    config: Config,
    declarations: Vec<Declaration>,
}

#[derive(Debug, Clone)]
enum Declaration {
    Entity { binding: String, entity: Entity },
    Define { variable: String, formula: String },
    Increase { variable: String, formula: String },
    Decrease { variable: String, formula: String },
    Stop { formula: String },
}

impl ModelBuilder {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            declarations: Vec::new(),
        }
    }

    /// Declares an entity bound to `binding`.
    ///
    /// An entity created with an empty name takes the binding as its name;
    /// an explicit name wins otherwise.
    #[must_use]
    pub fn declare(mut self, binding: impl Into<String>, entity: impl Into<Entity>) -> Self {
        self.declarations.push(Declaration::Entity {
            binding: binding.into(),
            entity: entity.into(),
        });
        self
    }

    #[must_use]
    pub fn define(mut self, variable: impl Into<String>, formula: impl Into<String>) -> Self {
        self.declarations.push(Declaration::Define {
            variable: variable.into(),
            formula: formula.into(),
        });
        self
    }

    /// Attaches an increasing stream.
    #[must_use]
    pub fn increase(mut self, variable: impl Into<String>, formula: impl Into<String>) -> Self {
        self.declarations.push(Declaration::Increase {
            variable: variable.into(),
            formula: formula.into(),
        });
        self
    }

    /// Attaches a decreasing stream.
    #[must_use]
    pub fn decrease(mut self, variable: impl Into<String>, formula: impl Into<String>) -> Self {
        self.declarations.push(Declaration::Decrease {
            variable: variable.into(),
            formula: formula.into(),
        });
        self
    }

    #[must_use]
    pub fn stop_when(mut self, formula: impl Into<String>) -> Self {
        self.declarations.push(Declaration::Stop {
            formula: formula.into(),
        });
        self
    }

    /// Builds the model, replaying declarations in order.
    ///
    /// # Errors
    ///
    /// Returns the first error any declaration raises, as the equivalent
    /// [`Model`] method would.
    pub fn build(self) -> Result<Model, Error> {
        let mut model = Model::new(self.config)?;

        for declaration in self.declarations {
            match declaration {
                Declaration::Entity {
                    binding,
                    mut entity,
                } => {
                    if entity.name().is_empty() {
                        entity.rename(binding);
                    }
                    model.register(entity)?;
                }
                Declaration::Define { variable, formula } => model.define(&variable, &formula)?,
                Declaration::Increase { variable, formula } => {
                    model.add_increasing_stream(&variable, &formula)?;
                }
                Declaration::Decrease { variable, formula } => {
                    model.add_decreasing_stream(&variable, &formula)?;
                }
                Declaration::Stop { formula } => model.add_stop_condition(&formula)?,
            }
        }

        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Constant, Variable};

    use super::*;

    #[test]
    fn unnamed_entities_take_their_binding() {
        let model = ModelBuilder::new(Config::new("named"))
            .declare("k", Constant::new("", 0.1))
            .declare("speed", Variable::new("v", 0.0))
            .build()
            .unwrap();

        assert_eq!(model.value("k"), Some(0.1));
        assert_eq!(model.value("v"), Some(0.0));
        assert_eq!(model.value("speed"), None);
    }

    #[test]
    fn reports_the_first_failing_declaration() {
        let result = ModelBuilder::new(Config::new("broken"))
            .declare("x", Variable::new("", 1.0))
            .increase("y", "1")
            .declare("x", Variable::new("", 2.0))
            .build();

        assert_eq!(
            result.unwrap_err(),
            Error::UnknownEntity {
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(matches!(
            ModelBuilder::new(Config::new("bad").dt(-1.0)).build(),
            Err(Error::InvalidConfiguration { .. })
        ));
    }
}
