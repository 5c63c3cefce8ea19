//! In-memory fakes for the ports, shared by the unit tests of this crate.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use flicker_domain::error::{DispatchError, FlickerError, SensorError};
use flicker_domain::reading::PowerReading;
use flicker_domain::state::HeatLevel;

use crate::ports::{CommandDispatcher, PowerSensor};

pub(crate) const POWER_KEY: &str = "KEY_POWER";
pub(crate) const HEAT_KEY: &str = "KEY_HEAT";

/// Tracks how many sends overlap.
#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn leave(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Dispatcher that records every send.
#[derive(Default)]
pub(crate) struct RecordingDispatcher {
    sent: Mutex<Vec<(String, String, u32)>>,
    in_flight: InFlight,
    delay: Option<Duration>,
    fail: bool,
}

impl RecordingDispatcher {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn slow() -> Self {
        Self {
            delay: Some(Duration::from_millis(10)),
            ..Self::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<(String, String, u32)> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.in_flight.max.load(Ordering::SeqCst)
    }
}

impl CommandDispatcher for RecordingDispatcher {
    async fn send(&self, remote: &str, key_code: &str, repeat_count: u32) -> Result<(), FlickerError> {
        self.in_flight.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.leave();
        if self.fail {
            return Err(DispatchError {
                remote: remote.to_string(),
                key_code: key_code.to_string(),
                source: "irsend exited with status 1".into(),
            }
            .into());
        }
        self.sent
            .lock()
            .unwrap()
            .push((remote.to_string(), key_code.to_string(), repeat_count));
        Ok(())
    }
}

#[derive(Default)]
struct SimState {
    level: Option<HeatLevel>,
    presses: Vec<String>,
    drop_next: usize,
    stuck: bool,
    sensor_down: bool,
    fail_after: Option<usize>,
}

/// Simulated fireplace: IR presses change its level, the sensor reports the
/// watts of that level.
#[derive(Default)]
pub(crate) struct SimulatedFireplace {
    state: Mutex<SimState>,
    in_flight: InFlight,
}

impl SimulatedFireplace {
    pub(crate) fn at(level: HeatLevel) -> Self {
        let fireplace = Self::default();
        fireplace.state.lock().unwrap().level = Some(level);
        fireplace
    }

    /// Ignore the next `count` presses, like an IR burst that missed.
    pub(crate) fn drop_next(&self, count: usize) {
        self.state.lock().unwrap().drop_next = count;
    }

    /// Ignore every press from now on.
    pub(crate) fn stick(&self) {
        self.state.lock().unwrap().stuck = true;
    }

    /// Reject every send from now on, like a missing `irsend`.
    pub(crate) fn fail_sends(&self) {
        self.fail_sends_after(0);
    }

    /// Deliver the next `count` sends, then reject every later one.
    pub(crate) fn fail_sends_after(&self, count: usize) {
        self.state.lock().unwrap().fail_after = Some(count);
    }

    pub(crate) fn unplug_sensor(&self) {
        self.state.lock().unwrap().sensor_down = true;
    }

    pub(crate) fn level(&self) -> HeatLevel {
        self.state.lock().unwrap().level.unwrap_or(HeatLevel::Off)
    }

    pub(crate) fn presses(&self) -> Vec<String> {
        self.state.lock().unwrap().presses.clone()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.in_flight.max.load(Ordering::SeqCst)
    }

    fn watts(level: HeatLevel) -> f64 {
        match level {
            HeatLevel::Off => 0.4,
            HeatLevel::FlameOnly => 45.0,
            HeatLevel::Low => 700.0,
            HeatLevel::High => 1_350.0,
        }
    }

    fn apply(state: &mut SimState, key_code: &str) {
        let level = state.level.unwrap_or(HeatLevel::Off);
        state.level = Some(match (key_code, level) {
            (POWER_KEY, HeatLevel::Off) => HeatLevel::FlameOnly,
            (POWER_KEY, _) => HeatLevel::Off,
            (HEAT_KEY, HeatLevel::FlameOnly) => HeatLevel::Low,
            (HEAT_KEY, HeatLevel::Low) => HeatLevel::High,
            (HEAT_KEY, HeatLevel::High) => HeatLevel::FlameOnly,
            _ => level,
        });
    }
}

impl CommandDispatcher for SimulatedFireplace {
    async fn send(&self, remote: &str, key_code: &str, _repeat_count: u32) -> Result<(), FlickerError> {
        self.in_flight.enter();
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.in_flight.leave();

        let mut state = self.state.lock().unwrap();
        match state.fail_after {
            Some(0) => {
                return Err(DispatchError {
                    remote: remote.to_string(),
                    key_code: key_code.to_string(),
                    source: "irsend exited with status 1".into(),
                }
                .into());
            }
            Some(left) => state.fail_after = Some(left - 1),
            None => {}
        }
        state.presses.push(key_code.to_string());
        if state.stuck {
            return Ok(());
        }
        if state.drop_next > 0 {
            state.drop_next -= 1;
            return Ok(());
        }
        Self::apply(&mut state, key_code);
        Ok(())
    }
}

impl PowerSensor for SimulatedFireplace {
    async fn read(&self) -> Result<PowerReading, FlickerError> {
        let state = self.state.lock().unwrap();
        if state.sensor_down {
            return Err(SensorError::Unavailable("connection refused".into()).into());
        }
        let level = state.level.unwrap_or(HeatLevel::Off);
        Ok(PowerReading {
            current: Self::watts(level) / 120.0,
            voltage: 120.0,
            power: Self::watts(level),
        })
    }
}
