use std::fmt;

use crate::{Constant, Variable};

/// Anything a model registers under a name.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Constant(Constant),
    Variable(Variable),
}

impl Entity {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Entity::Constant(constant) => constant.name(),
            Entity::Variable(variable) => variable.name(),
        }
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        match self {
            Entity::Constant(constant) => constant.unit(),
            Entity::Variable(variable) => variable.unit(),
        }
    }

    /// The entity's current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Entity::Constant(constant) => constant.value(),
            Entity::Variable(variable) => variable.value(),
        }
    }

    #[must_use]
    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Entity::Variable(variable) => Some(variable),
            Entity::Constant(_) => None,
        }
    }

    pub(crate) fn as_variable_mut(&mut self) -> Option<&mut Variable> {
        match self {
            Entity::Variable(variable) => Some(variable),
            Entity::Constant(_) => None,
        }
    }

    pub(crate) fn rename(&mut self, name: String) {
        match self {
            Entity::Constant(constant) => constant.rename(name),
            Entity::Variable(variable) => variable.rename(name),
        }
    }
}

impl From<Constant> for Entity {
    fn from(constant: Constant) -> Self {
        Entity::Constant(constant)
    }
}

impl From<Variable> for Entity {
    fn from(variable: Variable) -> Self {
        Entity::Variable(variable)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Constant(constant) => fmt::Display::fmt(constant, f),
            Entity::Variable(variable) => fmt::Display::fmt(variable, f),
        }
    }
}
