//! Group-wide actions applied to every registered light.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An action fanned out to all lights at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalAction {
    /// Every light goes manual and off.
    Off,
    /// Every light restarts its own cycle at green at the same instant.
    ///
    /// Lights keep their own green duration, so they share a start time
    /// but not necessarily a phase.
    SyncSequence,
}

impl fmt::Display for GlobalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::SyncSequence => f.write_str("sync_sequence"),
        }
    }
}

impl FromStr for GlobalAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "sync_sequence" => Ok(Self::SyncSequence),
            other => Err(ValidationError::UnknownAction(other.to_string())),
        }
    }
}
