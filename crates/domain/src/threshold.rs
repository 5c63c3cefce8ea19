//! Threshold sets and the state classifier.
//!
//! A threshold set partitions the real line of watt readings into state bands.
//! Bands are inclusive-low and exclusive-high; the top band is open-ended.

use serde::Deserialize;

use crate::error::{SensorError, ValidationError};
use crate::state::{HeatLevel, PowerState};

/// Calibrated watt thresholds separating the four heat levels.
///
/// Invariant: `off < mid_low < mid_high`, all finite.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawHeatThresholds")]
pub struct HeatThresholds {
    off: f64,
    mid_low: f64,
    mid_high: f64,
}

#[derive(Deserialize)]
struct RawHeatThresholds {
    off: f64,
    mid_low: f64,
    mid_high: f64,
}

impl TryFrom<RawHeatThresholds> for HeatThresholds {
    type Error = ValidationError;

    fn try_from(raw: RawHeatThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.off, raw.mid_low, raw.mid_high)
    }
}

impl HeatThresholds {
    /// Build a threshold set after checking its invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteThreshold`] for NaN or infinite
    /// values and [`ValidationError::NonIncreasingThresholds`] when the values
    /// are not strictly increasing.
    pub fn new(off: f64, mid_low: f64, mid_high: f64) -> Result<Self, ValidationError> {
        for value in [off, mid_low, mid_high] {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteThreshold(value));
            }
        }
        if !(off < mid_low && mid_low < mid_high) {
            return Err(ValidationError::NonIncreasingThresholds);
        }
        Ok(Self {
            off,
            mid_low,
            mid_high,
        })
    }

    /// Classify a watt reading into a heat level.
    ///
    /// A reading equal to a threshold belongs to the higher band.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::MalformedReading`] when `watts` is not finite.
    pub fn classify(&self, watts: f64) -> Result<HeatLevel, SensorError> {
        let watts = finite(watts)?;
        let level = if watts < self.off {
            HeatLevel::Off
        } else if watts < self.mid_low {
            HeatLevel::FlameOnly
        } else if watts < self.mid_high {
            HeatLevel::Low
        } else {
            HeatLevel::High
        };
        Ok(level)
    }
}

impl Default for HeatThresholds {
    fn default() -> Self {
        Self {
            off: 1.0,
            mid_low: 650.0,
            mid_high: 750.0,
        }
    }
}

/// Single watt threshold for the two-state on/off view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerThreshold(f64);

impl PowerThreshold {
    /// # Errors
    ///
    /// Returns [`ValidationError::NonFiniteThreshold`] for NaN or infinite values.
    pub fn new(watts: f64) -> Result<Self, ValidationError> {
        if watts.is_finite() {
            Ok(Self(watts))
        } else {
            Err(ValidationError::NonFiniteThreshold(watts))
        }
    }

    /// Classify a watt reading: strictly above the threshold is `On`.
    ///
    /// # Errors
    ///
    /// Returns [`SensorError::MalformedReading`] when `watts` is not finite.
    pub fn classify(self, watts: f64) -> Result<PowerState, SensorError> {
        Ok(PowerState::from(finite(watts)? > self.0))
    }
}

impl Default for PowerThreshold {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<HeatThresholds> for PowerThreshold {
    fn from(thresholds: HeatThresholds) -> Self {
        Self(thresholds.off)
    }
}

fn finite(watts: f64) -> Result<f64, SensorError> {
    if watts.is_finite() {
        Ok(watts)
    } else {
        Err(SensorError::MalformedReading(watts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> HeatThresholds {
        HeatThresholds::new(1.0, 650.0, 750.0).unwrap()
    }

    #[test]
    fn should_classify_reading_below_off_threshold_as_off() {
        assert_eq!(thresholds().classify(0.5).unwrap(), HeatLevel::Off);
    }

    #[test]
    fn should_classify_reading_between_mid_thresholds_as_low() {
        assert_eq!(thresholds().classify(700.0).unwrap(), HeatLevel::Low);
    }

    #[test]
    fn should_classify_reading_at_mid_high_as_high() {
        assert_eq!(thresholds().classify(750.0).unwrap(), HeatLevel::High);
    }

    #[test]
    fn should_classify_reading_at_off_threshold_as_flame_only() {
        assert_eq!(thresholds().classify(1.0).unwrap(), HeatLevel::FlameOnly);
    }

    #[test]
    fn should_classify_reading_at_mid_low_as_low() {
        assert_eq!(thresholds().classify(650.0).unwrap(), HeatLevel::Low);
    }

    #[test]
    fn should_classify_reading_just_below_boundaries_into_lower_band() {
        let t = thresholds();
        assert_eq!(t.classify(0.999).unwrap(), HeatLevel::Off);
        assert_eq!(t.classify(649.99).unwrap(), HeatLevel::FlameOnly);
        assert_eq!(t.classify(749.99).unwrap(), HeatLevel::Low);
    }

    #[test]
    fn should_classify_extreme_readings() {
        let t = thresholds();
        assert_eq!(t.classify(-5.0).unwrap(), HeatLevel::Off);
        assert_eq!(t.classify(1.0e9).unwrap(), HeatLevel::High);
    }

    #[test]
    fn should_reject_nan_reading() {
        let result = thresholds().classify(f64::NAN);
        assert!(matches!(result, Err(SensorError::MalformedReading(_))));
    }

    #[test]
    fn should_reject_infinite_reading_in_power_view() {
        let result = PowerThreshold::default().classify(f64::INFINITY);
        assert!(matches!(result, Err(SensorError::MalformedReading(_))));
    }

    #[test]
    fn should_reject_non_increasing_thresholds() {
        assert_eq!(
            HeatThresholds::new(1.0, 750.0, 650.0),
            Err(ValidationError::NonIncreasingThresholds)
        );
        assert_eq!(
            HeatThresholds::new(1.0, 650.0, 650.0),
            Err(ValidationError::NonIncreasingThresholds)
        );
    }

    #[test]
    fn should_reject_nan_threshold() {
        assert!(matches!(
            HeatThresholds::new(f64::NAN, 650.0, 750.0),
            Err(ValidationError::NonFiniteThreshold(_))
        ));
    }

    #[test]
    fn should_classify_power_strictly_above_threshold_as_on() {
        let t = PowerThreshold::new(1.0).unwrap();
        assert_eq!(t.classify(1.0).unwrap(), PowerState::Off);
        assert_eq!(t.classify(1.01).unwrap(), PowerState::On);
        assert_eq!(t.classify(0.0).unwrap(), PowerState::Off);
    }

    #[test]
    fn should_derive_power_threshold_from_off_threshold() {
        let t = PowerThreshold::from(HeatThresholds::new(2.0, 650.0, 750.0).unwrap());
        assert_eq!(t, PowerThreshold::new(2.0).unwrap());
    }

    #[test]
    fn should_deserialize_valid_thresholds() {
        let t: HeatThresholds =
            serde_json::from_str(r#"{"off": 2.0, "mid_low": 600.0, "mid_high": 800.0}"#).unwrap();
        assert_eq!(t, HeatThresholds::new(2.0, 600.0, 800.0).unwrap());
    }

    #[test]
    fn should_refuse_to_deserialize_unordered_thresholds() {
        let result: Result<HeatThresholds, _> =
            serde_json::from_str(r#"{"off": 2.0, "mid_low": 900.0, "mid_high": 800.0}"#);
        assert!(result.is_err());
    }
}
