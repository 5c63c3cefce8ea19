//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`FlickerError`]
//! via `#[from]` or an adapter-side `into_domain()`.

use std::error::Error as StdError;
use std::time::Duration;

use crate::state::HeatLevel;

/// Boxed error produced by an adapter behind a port.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Top-level error for every fallible operation in flicker.
#[derive(Debug, thiserror::Error)]
pub enum FlickerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Sensor(#[from] SensorError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Timeout(#[from] TimeoutError),

    /// The appliance reported a state from which the requested change cannot
    /// be planned.
    #[error("appliance is unexpectedly {0}")]
    UnexpectedState(HeatLevel),
}

/// Invalid input or configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("thresholds must be strictly increasing")]
    NonIncreasingThresholds,

    #[error("threshold {0} is not a finite number")]
    NonFiniteThreshold(f64),

    #[error("button name must not be empty")]
    EmptyButtonName,

    #[error("key code for button {0} must not be empty")]
    EmptyKeyCode(String),

    /// The command exists but must be driven through a dedicated route.
    #[error("use the /power/on and /power/off routes for {0}")]
    ReservedCommand(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),
}

/// A named thing (button, remote) does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of the missing thing (e.g. `"Button"`).
    pub entity: &'static str,
    /// Name that was looked up.
    pub id: String,
}

/// The power sensor could not produce a usable reading.
#[derive(Debug, thiserror::Error)]
pub enum SensorError {
    #[error("power sensor unavailable")]
    Unavailable(#[source] BoxError),

    #[error("malformed power reading {0}")]
    MalformedReading(f64),
}

/// The IR send mechanism failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to send IR command {key_code} on remote {remote}")]
pub struct DispatchError {
    pub remote: String,
    pub key_code: String,
    #[source]
    pub source: BoxError,
}

/// A confirmation loop exhausted its deadline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {elapsed:?} waiting for the appliance to reach {target}")]
pub struct TimeoutError {
    /// Human-readable target state (e.g. `"on"`, `"low"`).
    pub target: String,
    pub elapsed: Duration,
}
