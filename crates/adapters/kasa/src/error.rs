//! Kasa adapter error types.

use std::time::Duration;

use flicker_domain::error::{FlickerError, SensorError};

/// Errors specific to the Kasa adapter.
#[derive(Debug, thiserror::Error)]
pub enum KasaError {
    /// Connecting to, writing to or reading from the outlet failed.
    #[error("outlet I/O failed")]
    Io(#[from] std::io::Error),

    /// The outlet did not answer in time.
    #[error("outlet did not answer within {0:?}")]
    Timeout(Duration),

    /// A frame length exceeds what the protocol carries.
    #[error("frame of {0} bytes exceeds the protocol limit")]
    FrameTooLarge(usize),

    /// The reply is not the expected JSON.
    #[error("failed to parse outlet reply")]
    Parse(#[from] serde_json::Error),

    /// The outlet answered with a non-zero `err_code`.
    #[error("outlet returned error {code}: {message}")]
    Device { code: i64, message: String },

    /// The reply carries no power value.
    #[error("outlet reply has no power reading")]
    MissingReading,
}

impl KasaError {
    /// Convert into a [`SensorError::Unavailable`] for propagation across
    /// port boundaries.
    pub fn into_domain(self) -> FlickerError {
        SensorError::Unavailable(Box::new(self)).into()
    }
}

impl From<KasaError> for FlickerError {
    fn from(err: KasaError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_device_error() {
        let err = KasaError::Device {
            code: -1,
            message: "module not support".to_string(),
        };
        assert_eq!(err.to_string(), "outlet returned error -1: module not support");
    }

    #[test]
    fn should_convert_into_unavailable_sensor_error() {
        let err: FlickerError = KasaError::Timeout(Duration::from_secs(2)).into();
        assert!(matches!(
            err,
            FlickerError::Sensor(SensorError::Unavailable(_))
        ));
    }
}
