//! Command dispatcher port: the only actuation channel to the appliance.

use std::future::Future;

use flicker_domain::error::FlickerError;

/// Fires IR key codes through an emulated remote.
///
/// Sends are blind: success means the emitter ran, not that the appliance
/// reacted. Implementations must not retry and must not serialize on their
/// own; callers go through [`SendGate`](crate::gate::SendGate).
pub trait CommandDispatcher: Send + Sync {
    /// Send `key_code` on `remote` once, repeating the IR burst
    /// `repeat_count` times, and wait for the emitter to finish.
    fn send(
        &self,
        remote: &str,
        key_code: &str,
        repeat_count: u32,
    ) -> impl Future<Output = Result<(), FlickerError>> + Send;
}

impl<T: CommandDispatcher> CommandDispatcher for std::sync::Arc<T> {
    fn send(
        &self,
        remote: &str,
        key_code: &str,
        repeat_count: u32,
    ) -> impl Future<Output = Result<(), FlickerError>> + Send {
        (**self).send(remote, key_code, repeat_count)
    }
}
