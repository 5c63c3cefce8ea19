//! LIRC adapter error types.

use std::path::PathBuf;
use std::process::ExitStatus;

use flicker_domain::error::{DispatchError, FlickerError};

/// Errors specific to the LIRC adapter.
#[derive(Debug, thiserror::Error)]
pub enum LircError {
    /// `irsend` could not be started.
    #[error("failed to run {}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `irsend` ran but reported a failure.
    #[error("irsend exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

impl LircError {
    /// Convert into a [`FlickerError::Dispatch`] for the press that failed.
    pub fn into_domain(self, remote: &str, key_code: &str) -> FlickerError {
        DispatchError {
            remote: remote.to_string(),
            key_code: key_code.to_string(),
            source: Box::new(self),
        }
        .into()
    }
}
