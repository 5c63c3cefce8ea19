//! Appliance state: the discrete operational state derived from power draw.
//!
//! States are never stored. Every value of these types comes from classifying
//! a fresh [`PowerReading`](crate::reading::PowerReading).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Power state of the appliance in the two-state view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    Off,
    On,
}

impl PowerState {
    /// Whether the appliance is drawing power.
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

/// Heat level of the appliance in the three-threshold view.
///
/// Ordered by power draw: `Off < FlameOnly < Low < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatLevel {
    Off,
    FlameOnly,
    Low,
    High,
}

impl fmt::Display for HeatLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::FlameOnly => f.write_str("flame_only"),
            Self::Low => f.write_str("low"),
            Self::High => f.write_str("high"),
        }
    }
}
