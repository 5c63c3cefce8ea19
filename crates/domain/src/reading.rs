//! Power reading reported by the smart outlet's energy meter.

use serde::{Deserialize, Serialize};

/// Instantaneous electrical measurements from the outlet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PowerReading {
    /// Current in amperes.
    pub current: f64,
    /// Voltage in volts.
    pub voltage: f64,
    /// Active power in watts.
    pub power: f64,
}

impl PowerReading {
    /// A reading that only carries active power.
    #[must_use]
    pub fn from_watts(power: f64) -> Self {
        Self {
            power,
            ..Self::default()
        }
    }
}
