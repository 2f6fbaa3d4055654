use std::fmt;

use stockflow_expr::Formula;

use crate::{Environment, Error, Sign, Stream, error::parse_formula};

/// A named scalar that evolves once per tick.
///
/// Each tick a variable first replaces its value with its definition, if it
/// has one, and then adds every attached stream's signed contribution in
/// attachment order. A variable with both a definition and streams therefore
/// ends a tick at `definition + Σ streams`, not at `previous + Σ streams`.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    name: String,
    unit: String,
    value: f64,
    definition: Option<Formula>,
    streams: Vec<Stream>,
}

impl Variable {
    /// Creates a unitless variable with a start value and no update rule.
    pub fn new(name: impl Into<String>, start: f64) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            value: start,
            definition: None,
            streams: Vec::new(),
        }
    }

    /// Sets the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the algebraic definition that recomputes the value every tick.
    ///
    /// Replaces any previous definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormulaSyntax`] if `formula` is not well formed.
    pub fn define(&mut self, formula: &str) -> Result<(), Error> {
        self.definition = Some(parse_formula(formula)?);
        Ok(())
    }

    /// Attaches a stream that adds its formula's value every tick.
    pub fn add_increasing_stream(&mut self, stream: Stream) {
        self.streams.push(stream.with_sign(Sign::Positive));
    }

    /// Attaches a stream that subtracts its formula's value every tick.
    pub fn add_decreasing_stream(&mut self, stream: Stream) {
        self.streams.push(stream.with_sign(Sign::Negative));
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn definition(&self) -> Option<&Formula> {
        self.definition.as_ref()
    }

    #[must_use]
    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    /// Computes the value this variable would hold after a tick, without
    /// changing it.
    ///
    /// # Errors
    ///
    /// Returns the first formula evaluation error encountered.
    pub fn next_value(&self, environment: &Environment) -> Result<f64, Error> {
        let mut value = match &self.definition {
            Some(definition) => definition
                .evaluate_number(environment)
                .map_err(|err| Error::evaluation(definition, err))?,
            None => self.value,
        };

        for stream in &self.streams {
            value += stream.value(environment)?;
        }

        Ok(value)
    }

    /// Advances the variable by one tick against `environment`.
    ///
    /// On error the value is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first formula evaluation error encountered.
    pub fn tick(&mut self, environment: &Environment) -> Result<(), Error> {
        self.value = self.next_value(environment)?;
        Ok(())
    }

    /// Recomputes the value from the definition alone, ignoring streams.
    ///
    /// Returns `None` for a variable without a definition.
    pub(crate) fn defined_value(&self, environment: &Environment) -> Option<Result<f64, Error>> {
        self.definition.as_ref().map(|definition| {
            definition
                .evaluate_number(environment)
                .map_err(|err| Error::evaluation(definition, err))
        })
    }

    pub(crate) fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable {}, with value: {}", self.name, self.value)?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        if let Some(definition) = &self.definition {
            write!(f, "\n  Defined as: {definition}")?;
        }
        for stream in &self.streams {
            write!(f, "\n  {stream}")?;
        }
        Ok(())
    }
}
