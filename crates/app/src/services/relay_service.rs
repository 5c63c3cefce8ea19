//! Relay service: fire-and-forget presses on any configured remote.
//!
//! There is no sensor behind these remotes. Each button keeps an optimistic
//! toggle flag that flips on every successful send; it is a best-effort hint,
//! not appliance state.

use std::collections::BTreeMap;
use std::sync::Arc;

use flicker_domain::error::{FlickerError, NotFoundError};
use flicker_domain::remote::Remote;

use crate::gate::SendGate;
use crate::ports::CommandDispatcher;

/// Relays presses to named remotes through the shared send gate.
pub struct RelayService<D> {
    gate: Arc<SendGate<D>>,
    remotes: BTreeMap<String, Remote>,
}

impl<D: CommandDispatcher> RelayService<D> {
    pub fn new(gate: Arc<SendGate<D>>, remotes: impl IntoIterator<Item = Remote>) -> Self {
        let remotes = remotes
            .into_iter()
            .map(|remote| (remote.name().to_string(), remote))
            .collect();
        Self { gate, remotes }
    }

    /// Press `command` on `remote` and flip its optimistic flag.
    ///
    /// The flag flips while the send token is still held. Returns the new
    /// flag value.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::NotFound`] for an unknown remote or button, or
    /// the dispatcher's error (the flag is then left untouched).
    #[tracing::instrument(skip(self))]
    pub async fn send(&self, remote: &str, command: &str) -> Result<bool, FlickerError> {
        let remote = self.remote(remote)?;
        let button = remote.button(command)?;
        let toggled = self
            .gate
            .press_then(remote.name(), button.key_code(), || button.flip())
            .await?;
        tracing::debug!(toggled, "relay button flipped");
        Ok(toggled)
    }

    /// Last optimistic flag of `command` on `remote`.
    ///
    /// # Errors
    ///
    /// Returns [`FlickerError::NotFound`] for an unknown remote or button.
    pub fn status(&self, remote: &str, command: &str) -> Result<bool, FlickerError> {
        Ok(self.remote(remote)?.button(command)?.is_toggled())
    }

    fn remote(&self, name: &str) -> Result<&Remote, NotFoundError> {
        self.remotes.get(name).ok_or_else(|| NotFoundError {
            entity: "Remote",
            id: name.to_string(),
        })
    }
}
