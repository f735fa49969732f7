//! Traffic light — one physical unit, its mode and its schedule.
//!
//! All state transitions live here as plain methods so the registry, the
//! engine and the control service share one definition of what "advance",
//! "override" and "start" mean.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::color::Color;
use crate::durations::Durations;
use crate::error::ValidationError;
use crate::time::{self, Timestamp};

/// Whether the sequence engine drives a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Color is fixed until explicitly changed; the engine ignores the light.
    #[default]
    Manual,
    /// Color advances automatically when `next_change_at` is reached.
    Sequence,
}

impl Mode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Sequence => "sequence",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(Self::Manual),
            "sequence" => Ok(Self::Sequence),
            other => Err(ValidationError::UnknownMode(other.to_string())),
        }
    }
}

/// A single traffic light as recorded by the registry.
///
/// `active_color` is the last commanded color; the registry assumes the
/// hardware applied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub address: Address,
    pub active_color: Color,
    pub mode: Mode,
    pub durations: Durations,
    /// When the engine should advance this light. Only set in sequence mode.
    pub next_change_at: Option<Timestamp>,
}

impl TrafficLight {
    /// A freshly added light: manual, off, default durations.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            active_color: Color::Off,
            mode: Mode::Manual,
            durations: Durations::default(),
            next_change_at: None,
        }
    }

    /// Whether the engine must advance this light at `now`.
    ///
    /// A sequencing light with no deadline is considered overdue.
    #[must_use]
    pub fn is_due(&self, now: Timestamp) -> bool {
        self.mode == Mode::Sequence && self.next_change_at.is_none_or(|at| now >= at)
    }

    /// Step to the next cycle color and reschedule from `now`.
    ///
    /// Returns the new color.
    pub fn advance(&mut self, now: Timestamp) -> Color {
        let next = self.active_color.next_in_cycle();
        self.show_until(next, now);
        next
    }

    /// Fix the light on `color` and stop sequencing.
    pub fn set_manual(&mut self, color: Color) {
        self.mode = Mode::Manual;
        self.active_color = color;
        self.next_change_at = None;
    }

    /// Turn the light off and stop sequencing.
    pub fn switch_off(&mut self) {
        self.set_manual(Color::Off);
    }

    /// (Re)start the cycle at green using the light's current durations.
    ///
    /// Always restarts from green regardless of prior state.
    pub fn start_sequence(&mut self, now: Timestamp) {
        self.mode = Mode::Sequence;
        self.show_until(Color::Green, now);
    }

    /// Replace the durations, then (re)start the cycle at green.
    pub fn start_sequence_with(&mut self, durations: Durations, now: Timestamp) {
        self.durations = durations;
        self.start_sequence(now);
    }

    /// Time left before the next automatic change, if sequencing.
    #[must_use]
    pub fn remaining(&self, now: Timestamp) -> Option<Duration> {
        match self.mode {
            Mode::Sequence => self.next_change_at.map(|at| time::remaining(now, at)),
            Mode::Manual => None,
        }
    }

    fn show_until(&mut self, color: Color, now: Timestamp) {
        self.active_color = color;
        self.next_change_at = Some(time::add(now, self.durations.duration_of(color)));
    }
}
