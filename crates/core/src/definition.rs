//! Declarative model documents.
//!
//! A [`Definition`] deserializes from any serde format; TOML reads naturally:
//!
//! ```toml
//! stops = ["x <= 0"]
//!
//! [model]
//! name = "drain"
//! dt = 1.0
//!
//! [constants.rate]
//! value = 2.0
//!
//! [variables.x]
//! start = 10.0
//! decrease = ["rate"]
//! ```
//!
//! Tables are keyed by binding. An entity takes its binding as its name
//! unless it sets `name` explicitly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Config, Constant, Error, Model, ModelBuilder, Variable};

/// A complete model description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Definition {
    /// Stop conditions, checked in order.
    pub stops: Vec<String>,
    pub model: Config,
    pub constants: IndexMap<String, ConstantDefinition>,
    pub variables: IndexMap<String, VariableDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstantDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariableDefinition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub unit: String,
    pub start: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub define: Option<String>,
    /// Increasing stream formulas, in attachment order.
    pub increase: Vec<String>,
    /// Decreasing stream formulas, attached after the increasing ones.
    pub decrease: Vec<String>,
}

impl Definition {
    /// Builds a model in the configuring phase.
    ///
    /// Constants are registered before variables, each group in document
    /// order. Formulas refer to entities by name, not by binding.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while declaring the model.
    pub fn build(&self) -> Result<Model, Error> {
        let mut builder = ModelBuilder::new(self.model.clone());

        for (binding, constant) in &self.constants {
            let name = constant.name.clone().unwrap_or_default();
            builder = builder.declare(
                binding.as_str(),
                Constant::new(name, constant.value).with_unit(constant.unit.as_str()),
            );
        }

        for (binding, variable) in &self.variables {
            let name = variable.name.as_deref().unwrap_or(binding);
            builder = builder.declare(
                binding.as_str(),
                Variable::new(name, variable.start).with_unit(variable.unit.as_str()),
            );
            if let Some(formula) = &variable.define {
                builder = builder.define(name, formula.as_str());
            }
            for formula in &variable.increase {
                builder = builder.increase(name, formula.as_str());
            }
            for formula in &variable.decrease {
                builder = builder.decrease(name, formula.as_str());
            }
        }

        for stop in &self.stops {
            builder = builder.stop_when(stop.as_str());
        }

        builder.build()
    }
}
