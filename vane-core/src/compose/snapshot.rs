//! Sticky weather snapshot

use vane_protocol::{temperature_text, ConditionsText, FieldError, WeatherField};

/// Last known weather values
///
/// Each field keeps its value until a later batch supplies a new one, so a
/// partial or reordered batch never blanks data that is already known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSnapshot {
    temperature: Option<i32>,
    conditions: Option<ConditionsText>,
}

impl WeatherSnapshot {
    /// Create an empty snapshot
    pub const fn new() -> Self {
        Self {
            temperature: None,
            conditions: None,
        }
    }

    /// Merge one decoded field
    ///
    /// A temperature too wide to render is rejected and the previous value
    /// kept.
    pub fn merge(&mut self, field: WeatherField) -> Result<(), FieldError> {
        match field {
            WeatherField::Temperature(celsius) => {
                temperature_text(celsius)?;
                self.temperature = Some(celsius);
            }
            WeatherField::Conditions(text) => self.conditions = Some(text),
        }
        Ok(())
    }

    /// Last known temperature in degrees Celsius
    pub fn temperature(&self) -> Option<i32> {
        self.temperature
    }

    /// Last known conditions
    pub fn conditions(&self) -> Option<&str> {
        self.conditions.as_ref().map(|c| c.as_str())
    }

    /// Both fields have been received at least once
    pub fn is_complete(&self) -> bool {
        self.temperature.is_some() && self.conditions.is_some()
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.temperature = None;
        self.conditions = None;
    }
}
