use indexmap::IndexMap;

use crate::Entity;

/// Per-entity series captured at the start of every tick.
///
/// Row `i` holds the state the model was in during tick `i`, before that
/// tick's updates were applied. The tick's start time is kept alongside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    times: Vec<f64>,
    series: IndexMap<String, Vec<f64>>,
}

impl History {
    /// Creates an empty series for each name, in order.
    pub fn new<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self {
            times: Vec::new(),
            series: names
                .into_iter()
                .map(|name| (name.into(), Vec::new()))
                .collect(),
        }
    }

    /// Appends one row: `t` plus every tracked entity's current value.
    ///
    /// Entities that are not tracked are ignored.
    pub(crate) fn record<'a>(&mut self, t: f64, entities: impl IntoIterator<Item = &'a Entity>) {
        self.times.push(t);
        for entity in entities {
            if let Some(series) = self.series.get_mut(entity.name()) {
                series.push(entity.value());
            }
        }
    }

    /// The recorded series for `name`, if it is tracked.
    #[must_use]
    pub fn series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(Vec::as_slice)
    }

    /// Start time of every recorded tick.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Tracked names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Iterates over `(name, series)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series
            .iter()
            .map(|(name, series)| (name.as_str(), series.as_slice()))
    }

    /// Number of recorded rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}
