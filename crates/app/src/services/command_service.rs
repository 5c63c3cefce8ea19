//! Command service: single, unconfirmed button presses.

use std::sync::Arc;

use flicker_domain::error::{FlickerError, ValidationError};
use flicker_domain::remote::{HEAT_BUTTON, POWER_BUTTON};

use crate::appliance::Appliance;
use crate::ports::{CommandDispatcher, PowerSensor};

/// Fires arbitrary buttons of the appliance's remote once.
///
/// `power` is refused here: it is a blind toggle, so it is only ever pressed
/// through [`PowerService`](crate::services::power_service::PowerService),
/// which confirms the result. `heat` is pressed under the operation lock so
/// it never lands between the steps of a heat level change.
pub struct CommandService<S, D> {
    appliance: Arc<Appliance<S, D>>,
}

impl<S, D> CommandService<S, D>
where
    S: PowerSensor,
    D: CommandDispatcher,
{
    pub fn new(appliance: Arc<Appliance<S, D>>) -> Self {
        Self { appliance }
    }

    /// Press `command` once.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ReservedCommand`] for `power`,
    /// [`FlickerError::NotFound`] for an unknown button, or the dispatcher's
    /// error.
    #[tracing::instrument(skip(self))]
    pub async fn send(&self, command: &str) -> Result<(), FlickerError> {
        if command == POWER_BUTTON {
            return Err(ValidationError::ReservedCommand(command.to_string()).into());
        }
        if command == HEAT_BUTTON {
            let _operation = self.appliance.exclusive().await;
            return self.appliance.press(command).await;
        }
        self.appliance.press(command).await
    }
}
