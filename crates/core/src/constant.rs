use std::fmt;

/// An immutable named scalar.
///
/// The unit is a display label only; it is never checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    name: String,
    unit: String,
    value: f64,
}

impl Constant {
    /// Creates a unitless constant.
    ///
    /// An empty name is allowed when the constant is declared through a
    /// [`ModelBuilder`](crate::ModelBuilder), which names it after its binding.
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            unit: String::new(),
            value,
        }
    }

    /// Sets the display unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
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

    pub(crate) fn rename(&mut self, name: String) {
        self.name = name;
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant {} with value: {}", self.name, self.value)?;
        if !self.unit.is_empty() {
            write!(f, " {}", self.unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_unit_when_present() {
        let froll = Constant::new("Froll", 1000.0).with_unit("N");
        assert_eq!(froll.to_string(), "Constant Froll with value: 1000 N");

        let k = Constant::new("k", 0.1);
        assert_eq!(k.to_string(), "Constant k with value: 0.1");
    }
}
