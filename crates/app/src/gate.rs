//! Send gate: the serialization token for IR commands.
//!
//! The dispatcher lives *inside* the gate's mutex, so the only way to send is
//! to hold the token. The token covers one send plus an optional follow-up
//! (the relay's optimistic flip) and is released before any sensor polling.

use tokio::sync::Mutex;

use flicker_domain::error::FlickerError;

use crate::ports::CommandDispatcher;

/// Owns the [`CommandDispatcher`] and hands it out one send at a time.
pub struct SendGate<D> {
    dispatcher: Mutex<D>,
    repeat_count: u32,
}

impl<D: CommandDispatcher> SendGate<D> {
    /// Wrap a dispatcher; every send repeats the IR burst `repeat_count` times.
    #[must_use]
    pub fn new(dispatcher: D, repeat_count: u32) -> Self {
        Self {
            dispatcher: Mutex::new(dispatcher),
            repeat_count,
        }
    }

    /// Send one key code while holding the token.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's error unchanged.
    pub async fn press(&self, remote: &str, key_code: &str) -> Result<(), FlickerError> {
        self.press_then(remote, key_code, || ()).await
    }

    /// Send one key code and, if the send succeeded, run `after` before the
    /// token is released.
    ///
    /// # Errors
    ///
    /// Propagates the dispatcher's error unchanged; `after` does not run.
    pub async fn press_then<T, F>(
        &self,
        remote: &str,
        key_code: &str,
        after: F,
    ) -> Result<T, FlickerError>
    where
        F: FnOnce() -> T + Send,
    {
        let dispatcher = self.dispatcher.lock().await;
        tracing::debug!(remote, key_code, repeat = self.repeat_count, "sending IR command");
        dispatcher.send(remote, key_code, self.repeat_count).await?;
        Ok(after())
    }
}
