//! Power service: status and confirmed on/off changes.

use std::sync::Arc;

use flicker_domain::error::FlickerError;
use flicker_domain::reading::PowerReading;
use flicker_domain::remote::POWER_BUTTON;
use flicker_domain::state::PowerState;
use flicker_domain::threshold::PowerThreshold;

use crate::appliance::{Appliance, Timing};
use crate::ports::{CommandDispatcher, PowerSensor};

/// Drives the appliance's `power` button until the outlet confirms the
/// requested state.
pub struct PowerService<S, D> {
    appliance: Arc<Appliance<S, D>>,
    threshold: PowerThreshold,
    timing: Timing,
}

impl<S, D> PowerService<S, D>
where
    S: PowerSensor,
    D: CommandDispatcher,
{
    /// Create a new service for the given appliance.
    pub fn new(appliance: Arc<Appliance<S, D>>, threshold: PowerThreshold, timing: Timing) -> Self {
        Self {
            appliance,
            threshold,
            timing,
        }
    }

    /// Raw outlet measurements.
    ///
    /// # Errors
    ///
    /// Propagates the sensor's error.
    pub async fn usage(&self) -> Result<PowerReading, FlickerError> {
        self.appliance.read().await
    }

    /// Current power state, derived from a fresh reading.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::Sensor`] when the reading is unavailable or
    /// malformed.
    pub async fn status(&self) -> Result<PowerState, FlickerError> {
        let reading = self.appliance.read().await?;
        Ok(self.threshold.classify(reading.power)?)
    }

    /// Bring the appliance to `desired`, pressing `power` as often as needed.
    ///
    /// Does nothing, and sends nothing, when the appliance is already there.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::Timeout`] when the outlet never confirms the
    /// change, or a sensor/dispatch error.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_state(&self, desired: PowerState) -> Result<(), FlickerError> {
        let _operation = self.appliance.exclusive().await;
        self.ensure_state_exclusive(desired).await
    }

    /// [`ensure_state`](Self::ensure_state) for callers already holding the
    /// operation lock.
    pub(crate) async fn ensure_state_exclusive(&self, desired: PowerState) -> Result<(), FlickerError> {
        let current = self.status().await?;
        if current == desired {
            tracing::debug!(%desired, "appliance already in requested power state");
            return Ok(());
        }

        tracing::info!(from = %current, to = %desired, "changing power state");
        let threshold = self.threshold;
        self.appliance
            .drive_to(POWER_BUTTON, self.timing, desired, move |watts| {
                threshold.classify(watts)
            })
            .await?;
        Ok(())
    }
}
