//! Light color and the fixed signal cycle.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The single lamp a traffic light shows (or none).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Yellow,
    Green,
    #[default]
    Off,
}

impl Color {
    /// Colors a light steps through in sequence mode, in order.
    pub const CYCLE: [Self; 3] = [Self::Green, Self::Yellow, Self::Red];

    /// Color that follows `self` in the green → yellow → red cycle.
    ///
    /// Anything outside the cycle (i.e. [`Off`](Self::Off)) is treated as
    /// red, so the sequence always resumes at green.
    #[must_use]
    pub fn next_in_cycle(self) -> Self {
        match self {
            Self::Green => Self::Yellow,
            Self::Yellow => Self::Red,
            Self::Red | Self::Off => Self::Green,
        }
    }

    /// Whether this color belongs to the signal cycle.
    #[must_use]
    pub fn is_cycle_color(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Lowercase name, as sent to the hardware endpoint.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "yellow" => Ok(Self::Yellow),
            "green" => Ok(Self::Green),
            "off" => Ok(Self::Off),
            other => Err(ValidationError::UnknownColor(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_cycle_green_yellow_red_green() {
        assert_eq!(Color::Green.next_in_cycle(), Color::Yellow);
        assert_eq!(Color::Yellow.next_in_cycle(), Color::Red);
        assert_eq!(Color::Red.next_in_cycle(), Color::Green);
    }

    #[test]
    fn should_resume_at_green_when_off() {
        assert_eq!(Color::Off.next_in_cycle(), Color::Green);
    }

    #[test]
    fn should_return_to_start_after_full_cycle_from_any_color() {
        for start in [Color::Red, Color::Yellow, Color::Green] {
            let mut color = start;
            for _ in 0..Color::CYCLE.len() {
                color = color.next_in_cycle();
            }
            assert_eq!(color, start);
        }
    }

    #[test]
    fn should_default_to_off() {
        assert_eq!(Color::default(), Color::Off);
    }

    #[test]
    fn should_parse_case_insensitively() {
        assert_eq!("GREEN".parse::<Color>().unwrap(), Color::Green);
        assert_eq!(" off ".parse::<Color>().unwrap(), Color::Off);
    }

    #[test]
    fn should_reject_unknown_color() {
        assert_eq!(
            "blue".parse::<Color>(),
            Err(ValidationError::UnknownColor("blue".to_string()))
        );
    }

    #[test]
    fn should_serialize_lowercase() {
        let json = serde_json::to_string(&Color::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
        let parsed: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Color::Yellow);
    }
}
