use indexmap::IndexMap;
use stockflow_expr::Scope;

use crate::Entity;

/// Reserved name bound to the current simulated time.
pub const TIME: &str = "t";

/// Reserved name bound to the fixed step size.
pub const STEP: &str = "dt";

/// The read-only name → value table formulas are evaluated against.
///
/// Holds every registered entity's current value, in declaration order,
/// followed by the reserved names [`TIME`] and [`STEP`]. Nothing else is
/// visible to a formula.
///
/// A model composes a fresh environment at the start of every tick and holds
/// it unchanged while all variables are updated, so no variable can observe
/// another's post-tick value.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    values: IndexMap<String, f64>,
}

impl Environment {
    /// Composes an environment from a registry of entities and the clock.
    pub fn compose<'a>(entities: impl IntoIterator<Item = &'a Entity>, t: f64, dt: f64) -> Self {
        Self::from_values(
            entities
                .into_iter()
                .map(|entity| (entity.name(), entity.value())),
            t,
            dt,
        )
    }

    /// Builds an environment from raw name/value pairs and the clock.
    ///
    /// Pairs named [`TIME`] or [`STEP`] are overwritten by `t` and `dt`.
    pub fn from_values<N: Into<String>>(
        values: impl IntoIterator<Item = (N, f64)>,
        t: f64,
        dt: f64,
    ) -> Self {
        let mut values: IndexMap<String, f64> = values
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        values.insert(TIME.to_string(), t);
        values.insert(STEP.to_string(), dt);
        Self { values }
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// The simulated time this environment was composed at.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.values[TIME]
    }

    /// The step size this environment was composed with.
    #[must_use]
    pub fn dt(&self) -> f64 {
        self.values[STEP]
    }

    /// Iterates over all bindings, reserved names last.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    /// Number of bindings, including the two reserved names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`: the reserved names are always bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Scope for Environment {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}
