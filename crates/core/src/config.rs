use crate::Error;

/// Fixed parameters of a model.
///
/// `max_t` of `None` means the horizon is unbounded and the run ends only
/// through a stop condition or an observer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Config {
    pub name: String,
    pub dt: f64,
    pub max_t: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: "model".to_string(),
            dt: 0.1,
            max_t: None,
        }
    }
}

impl Config {
    /// Creates a configuration with the default step and an unbounded horizon.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the fixed step size.
    #[must_use]
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// Sets a finite run horizon.
    #[must_use]
    pub fn max_t(mut self, max_t: f64) -> Self {
        self.max_t = Some(max_t);
        self
    }

    /// Removes the run horizon.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_t = None;
        self
    }

    /// The run horizon, with an unbounded horizon as positive infinity.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.max_t.unwrap_or(f64::INFINITY)
    }

    /// Validates that the step is finite and positive and the horizon is a number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] describing the first problem found.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::invalid_configuration(format!(
                "dt must be finite and greater than zero, got {}",
                self.dt
            )));
        }
        if self.max_t.is_some_and(f64::is_nan) {
            return Err(Error::invalid_configuration("max_t must not be NaN"));
        }
        Ok(())
    }
}
