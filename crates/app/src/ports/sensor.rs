//! Power sensor port: the only feedback channel from the appliance.

use std::future::Future;

use flicker_domain::error::FlickerError;
use flicker_domain::reading::PowerReading;

/// Source of instantaneous power readings.
///
/// Implementations must fail fast: a hung outlet must surface as
/// [`SensorError::Unavailable`](flicker_domain::error::SensorError::Unavailable)
/// within a short I/O timeout rather than stall a confirmation loop.
pub trait PowerSensor: Send + Sync {
    /// Query the outlet once.
    fn read(&self) -> impl Future<Output = Result<PowerReading, FlickerError>> + Send;
}

impl<T: PowerSensor> PowerSensor for std::sync::Arc<T> {
    fn read(&self) -> impl Future<Output = Result<PowerReading, FlickerError>> + Send {
        (**self).read()
    }
}
