//! Heat ring: planning presses of the forward-only `heat` button.
//!
//! While powered on, the `heat` button cycles
//! `FlameOnly → Low → High → FlameOnly → …`, one step per press. There is no
//! reverse direction, so every plan is a list of forward steps of length 0, 1
//! or 2.

use crate::error::FlickerError;
use crate::state::HeatLevel;

/// A position on the heat ring (every heat level except `Off`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RingPosition {
    FlameOnly,
    Low,
    High,
}

impl RingPosition {
    /// The position reached by one press of the `heat` button.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::FlameOnly => Self::Low,
            Self::Low => Self::High,
            Self::High => Self::FlameOnly,
        }
    }

    /// Ordered levels to pass through, one press each, to get from `self`
    /// to `desired`. Empty when already there.
    #[must_use]
    pub fn plan_to(self, desired: Self) -> Vec<HeatLevel> {
        use RingPosition::{FlameOnly, High, Low};

        let steps: &[Self] = match (self, desired) {
            (FlameOnly, Low) => &[Low],
            (FlameOnly, High) => &[Low, High],
            (Low, High) => &[High],
            (Low, FlameOnly) => &[High, FlameOnly],
            (High, FlameOnly) => &[FlameOnly],
            (High, Low) => &[FlameOnly, Low],
            (FlameOnly, FlameOnly) | (Low, Low) | (High, High) => &[],
        };
        steps.iter().copied().map(HeatLevel::from).collect()
    }
}

impl From<RingPosition> for HeatLevel {
    fn from(position: RingPosition) -> Self {
        match position {
            RingPosition::FlameOnly => Self::FlameOnly,
            RingPosition::Low => Self::Low,
            RingPosition::High => Self::High,
        }
    }
}

impl TryFrom<HeatLevel> for RingPosition {
    type Error = FlickerError;

    fn try_from(level: HeatLevel) -> Result<Self, Self::Error> {
        match level {
            HeatLevel::FlameOnly => Ok(Self::FlameOnly),
            HeatLevel::Low => Ok(Self::Low),
            HeatLevel::High => Ok(Self::High),
            HeatLevel::Off => Err(FlickerError::UnexpectedState(HeatLevel::Off)),
        }
    }
}
