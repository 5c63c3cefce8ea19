//! Heat service: status and confirmed heat ring transitions.

use std::sync::Arc;

use flicker_domain::error::FlickerError;
use flicker_domain::remote::HEAT_BUTTON;
use flicker_domain::ring::RingPosition;
use flicker_domain::state::{HeatLevel, PowerState};
use flicker_domain::threshold::HeatThresholds;

use crate::appliance::{Appliance, Timing};
use crate::ports::{CommandDispatcher, PowerSensor};
use crate::services::power_service::PowerService;

/// Steps the appliance around the heat ring, one confirmed press at a time.
pub struct HeatService<S, D> {
    appliance: Arc<Appliance<S, D>>,
    power: Arc<PowerService<S, D>>,
    thresholds: HeatThresholds,
    timing: Timing,
}

impl<S, D> HeatService<S, D>
where
    S: PowerSensor,
    D: CommandDispatcher,
{
    /// Create a new service. `power` must drive the same appliance.
    pub fn new(
        appliance: Arc<Appliance<S, D>>,
        power: Arc<PowerService<S, D>>,
        thresholds: HeatThresholds,
        timing: Timing,
    ) -> Self {
        Self {
            appliance,
            power,
            thresholds,
            timing,
        }
    }

    /// Current heat level, derived from a fresh reading.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::Sensor`] when the reading is unavailable or
    /// malformed.
    pub async fn level(&self) -> Result<HeatLevel, FlickerError> {
        let reading = self.appliance.read().await?;
        Ok(self.thresholds.classify(reading.power)?)
    }

    /// Whether the appliance currently sits at `level`.
    ///
    /// # Errors
    ///
    /// See [`level`](Self::level).
    pub async fn is_level(&self, level: HeatLevel) -> Result<bool, FlickerError> {
        Ok(self.level().await? == level)
    }

    /// Bring the appliance to `desired`.
    ///
    /// `Off` is a plain power-off. Any other level first powers the appliance
    /// on, then walks the ring forward one confirmed `heat` press at a time.
    /// The whole operation holds the operation lock; a failed step leaves the
    /// appliance wherever it got to.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::Timeout`] when a step is never confirmed,
    /// [`FlickerError::UnexpectedState`] when the appliance reads as off right
    /// after power-on was confirmed, or a sensor/dispatch error.
    #[tracing::instrument(skip(self))]
    pub async fn set_level(&self, desired: HeatLevel) -> Result<(), FlickerError> {
        let _operation = self.appliance.exclusive().await;

        if desired == HeatLevel::Off {
            return self.power.ensure_state_exclusive(PowerState::Off).await;
        }
        let target = RingPosition::try_from(desired)?;
        self.power.ensure_state_exclusive(PowerState::On).await?;

        let current = self.level().await?;
        let plan = RingPosition::try_from(current)?.plan_to(target);
        tracing::info!(from = %current, to = %desired, presses = plan.len(), "changing heat level");

        let thresholds = self.thresholds;
        for step in plan {
            self.appliance
                .drive_to(HEAT_BUTTON, self.timing, step, move |watts| {
                    thresholds.classify(watts)
                })
                .await?;
        }
        Ok(())
    }
}
