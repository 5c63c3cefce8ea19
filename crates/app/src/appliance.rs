//! The appliance handle and its confirmation loop.
//!
//! [`Appliance`] bundles everything needed to act on the physical fireplace:
//! the power sensor, the shared [`SendGate`], the remote's button map, and the
//! operation lock that serializes whole multi-press operations.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{self, Instant};

use flicker_domain::error::{FlickerError, SensorError, TimeoutError};
use flicker_domain::reading::PowerReading;
use flicker_domain::remote::RemoteMap;

use crate::gate::SendGate;
use crate::ports::{CommandDispatcher, PowerSensor};

/// Deadlines of one confirmation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Overall time budget for reaching the target state.
    pub deadline: Duration,
    /// How long to poll after a press before pressing again.
    pub attempt: Duration,
    /// Delay between two sensor reads.
    pub poll_interval: Duration,
}

impl Timing {
    /// Power toggling: 30 s overall, a new press every 15 s.
    pub const POWER: Self = Self {
        deadline: Duration::from_secs(30),
        attempt: Duration::from_secs(15),
        poll_interval: Duration::from_millis(250),
    };

    /// One heat ring step: 60 s overall, a new press every 20 s.
    pub const HEAT: Self = Self {
        deadline: Duration::from_secs(60),
        attempt: Duration::from_secs(20),
        poll_interval: Duration::from_millis(250),
    };
}

/// Shared access to the physical appliance.
pub struct Appliance<S, D> {
    sensor: S,
    gate: Arc<SendGate<D>>,
    remote_name: String,
    buttons: RemoteMap,
    operation: Mutex<()>,
}

impl<S, D> Appliance<S, D>
where
    S: PowerSensor,
    D: CommandDispatcher,
{
    /// Create a handle for the appliance driven by `remote_name`.
    pub fn new(
        sensor: S,
        gate: Arc<SendGate<D>>,
        remote_name: impl Into<String>,
        buttons: RemoteMap,
    ) -> Self {
        Self {
            sensor,
            gate,
            remote_name: remote_name.into(),
            buttons,
            operation: Mutex::new(()),
        }
    }

    /// Take a fresh reading from the outlet.
    ///
    /// # Errors
    ///
    /// Propagates the sensor's error.
    pub async fn read(&self) -> Result<PowerReading, FlickerError> {
        self.sensor.read().await
    }

    /// Press a button once, without confirmation.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::NotFound`] for an unknown button, or the
    /// dispatcher's error.
    pub async fn press(&self, button: &str) -> Result<(), FlickerError> {
        let key_code = self.buttons.key_code(button)?;
        self.gate.press(&self.remote_name, key_code).await
    }

    /// Serialize a whole operation against every other confirmed operation.
    pub(crate) async fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.operation.lock().await
    }

    /// Press `button` until the classified reading equals `target`.
    ///
    /// The deadline is checked before every press; each press is followed by
    /// polling for at most `timing.attempt` (capped at the deadline). The
    /// send token is only held for the press itself. Returns the number of
    /// presses used.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::Timeout`] once the deadline has passed, or the
    /// first sensor, classifier, or dispatcher error encountered.
    pub(crate) async fn drive_to<T, F>(
        &self,
        button: &str,
        timing: Timing,
        target: T,
        classify: F,
    ) -> Result<u32, FlickerError>
    where
        T: Copy + PartialEq + Display + Send + Sync,
        F: Fn(f64) -> Result<T, SensorError> + Send + Sync,
    {
        let key_code = self.buttons.key_code(button)?;
        let started = Instant::now();
        let deadline = started + timing.deadline;
        let mut presses = 0_u32;

        loop {
            if Instant::now() >= deadline {
                tracing::warn!(button, %target, presses, "appliance never confirmed the transition");
                return Err(TimeoutError {
                    target: target.to_string(),
                    elapsed: started.elapsed(),
                }
                .into());
            }

            self.gate.press(&self.remote_name, key_code).await?;
            presses += 1;
            tracing::debug!(button, %target, presses, "pressed, polling for confirmation");

            let attempt_end = (Instant::now() + timing.attempt).min(deadline);
            loop {
                time::sleep(timing.poll_interval).await;
                let reading = self.sensor.read().await?;
                if classify(reading.power)? == target {
                    tracing::info!(
                        button,
                        %target,
                        presses,
                        watts = reading.power,
                        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                        "transition confirmed"
                    );
                    return Ok(presses);
                }
                if Instant::now() >= attempt_end {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use flicker_domain::state::{HeatLevel, PowerState};
    use flicker_domain::threshold::PowerThreshold;

    use super::*;
    use crate::testing::{HEAT_KEY, POWER_KEY, SimulatedFireplace};

    fn appliance(
        fireplace: &Arc<SimulatedFireplace>,
    ) -> Appliance<Arc<SimulatedFireplace>, Arc<SimulatedFireplace>> {
        let buttons = RemoteMap::new(BTreeMap::from([
            ("power".to_string(), POWER_KEY.to_string()),
            ("heat".to_string(), HEAT_KEY.to_string()),
        ]))
        .unwrap();
        Appliance::new(
            Arc::clone(fireplace),
            Arc::new(SendGate::new(Arc::clone(fireplace), 1)),
            "fireplace",
            buttons,
        )
    }

    fn power(watts: f64) -> Result<PowerState, SensorError> {
        PowerThreshold::default().classify(watts)
    }

    #[tokio::test(start_paused = true)]
    async fn should_confirm_after_single_press() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::Off));
        let appliance = appliance(&fireplace);

        let presses = appliance
            .drive_to("power", Timing::POWER, PowerState::On, power)
            .await
            .unwrap();

        assert_eq!(presses, 1);
        assert_eq!(fireplace.level(), HeatLevel::FlameOnly);
    }

    #[tokio::test(start_paused = true)]
    async fn should_press_again_after_attempt_window_when_signal_dropped() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::Off));
        fireplace.drop_next(1);
        let appliance = appliance(&fireplace);
        let started = Instant::now();

        let presses = appliance
            .drive_to("power", Timing::POWER, PowerState::On, power)
            .await
            .unwrap();

        assert_eq!(presses, 2);
        assert!(started.elapsed() >= Timing::POWER.attempt);
        assert!(started.elapsed() < Timing::POWER.deadline);
    }

    #[tokio::test(start_paused = true)]
    async fn should_time_out_at_deadline_and_not_before() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::Off));
        fireplace.stick();
        let appliance = appliance(&fireplace);
        let started = Instant::now();

        let result = appliance
            .drive_to("power", Timing::POWER, PowerState::On, power)
            .await;

        let elapsed = started.elapsed();
        assert!(matches!(result, Err(FlickerError::Timeout(_))));
        assert!(elapsed >= Timing::POWER.deadline);
        assert!(elapsed < Timing::POWER.deadline + Timing::POWER.attempt);
        assert_eq!(fireplace.presses().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn should_press_at_least_once_per_attempt_window() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::FlameOnly));
        fireplace.stick();
        let appliance = appliance(&fireplace);

        let result = appliance
            .drive_to("heat", Timing::HEAT, HeatLevel::Low, |watts| {
                flicker_domain::threshold::HeatThresholds::default().classify(watts)
            })
            .await;

        assert!(matches!(result, Err(FlickerError::Timeout(_))));
        assert_eq!(fireplace.presses(), vec![HEAT_KEY; 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_abort_on_sensor_failure() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::Off));
        fireplace.unplug_sensor();
        let appliance = appliance(&fireplace);

        let result = appliance
            .drive_to("power", Timing::POWER, PowerState::On, power)
            .await;

        assert!(matches!(result, Err(FlickerError::Sensor(_))));
        assert_eq!(fireplace.presses().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_fail_without_pressing_for_unknown_button() {
        let fireplace = Arc::new(SimulatedFireplace::at(HeatLevel::Off));
        let appliance = appliance(&fireplace);

        let result = appliance
            .drive_to("light", Timing::POWER, PowerState::On, power)
            .await;

        assert!(matches!(result, Err(FlickerError::NotFound(_))));
        assert!(fireplace.presses().is_empty());
    }
}
