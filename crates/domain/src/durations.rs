//! Per-color phase lengths.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ValidationError;

pub const DEFAULT_RED_SECS: f64 = 5.0;
pub const DEFAULT_YELLOW_SECS: f64 = 2.0;
pub const DEFAULT_GREEN_SECS: f64 = 5.0;

/// How long a light stays on each cycle color, in (fractional) seconds.
///
/// Values are validated on the way in through [`Durations::new`]. Reads go
/// through [`Durations::duration_of`], which substitutes the fixed fallback
/// for any value that is missing or not strictly positive, so a damaged
/// record can never stall the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Durations {
    #[serde(default = "default_red")]
    pub red: f64,
    #[serde(default = "default_yellow")]
    pub yellow: f64,
    #[serde(default = "default_green")]
    pub green: f64,
}

fn default_red() -> f64 {
    DEFAULT_RED_SECS
}

fn default_yellow() -> f64 {
    DEFAULT_YELLOW_SECS
}

fn default_green() -> f64 {
    DEFAULT_GREEN_SECS
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            red: DEFAULT_RED_SECS,
            yellow: DEFAULT_YELLOW_SECS,
            green: DEFAULT_GREEN_SECS,
        }
    }
}

impl Durations {
    /// Build validated durations.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDuration`] for the first value that
    /// is not a finite number strictly greater than zero.
    pub fn new(red: f64, yellow: f64, green: f64) -> Result<Self, ValidationError> {
        let durations = Self { red, yellow, green };
        durations.validate()?;
        Ok(durations)
    }

    /// Check that every value is usable as a phase length.
    ///
    /// # Errors
    ///
    /// Same as [`Durations::new`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        check("red", self.red)?;
        check("yellow", self.yellow)?;
        check("green", self.green)
    }

    /// Build durations from possibly-missing values, falling back to the
    /// defaults for anything absent or invalid.
    #[must_use]
    pub fn with_fallbacks(red: Option<f64>, yellow: Option<f64>, green: Option<f64>) -> Self {
        Self {
            red: red.filter(|v| is_valid(*v)).unwrap_or(DEFAULT_RED_SECS),
            yellow: yellow.filter(|v| is_valid(*v)).unwrap_or(DEFAULT_YELLOW_SECS),
            green: green.filter(|v| is_valid(*v)).unwrap_or(DEFAULT_GREEN_SECS),
        }
    }

    /// Phase length for `color`.
    ///
    /// [`Color::Off`] is not part of the cycle and has no phase length.
    #[must_use]
    pub fn duration_of(&self, color: Color) -> Duration {
        let (value, fallback) = match color {
            Color::Red => (self.red, DEFAULT_RED_SECS),
            Color::Yellow => (self.yellow, DEFAULT_YELLOW_SECS),
            Color::Green => (self.green, DEFAULT_GREEN_SECS),
            Color::Off => return Duration::ZERO,
        };
        let secs = if is_valid(value) { value } else { fallback };
        Duration::try_from_secs_f64(secs).unwrap_or_else(|_| Duration::from_secs_f64(fallback))
    }
}

fn is_valid(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check(color: &'static str, value: f64) -> Result<(), ValidationError> {
    if is_valid(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDuration { color, value })
    }
}
