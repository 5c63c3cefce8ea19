//! `irsend` process dispatcher.

use tokio::process::Command;

use flicker_app::ports::CommandDispatcher;
use flicker_domain::error::FlickerError;

use crate::config::LircConfig;
use crate::error::LircError;

/// Sends IR codes by running `irsend SEND_ONCE`.
#[derive(Debug, Clone)]
pub struct IrSendDispatcher {
    config: LircConfig,
}

impl IrSendDispatcher {
    #[must_use]
    pub fn new(config: LircConfig) -> Self {
        Self { config }
    }

    fn args(remote: &str, key_code: &str, repeat_count: u32) -> [String; 4] {
        [
            format!("--count={repeat_count}"),
            "SEND_ONCE".to_string(),
            remote.to_string(),
            key_code.to_string(),
        ]
    }

    async fn run(&self, remote: &str, key_code: &str, repeat_count: u32) -> Result<(), LircError> {
        let output = Command::new(&self.config.irsend_path)
            .args(Self::args(remote, key_code, repeat_count))
            .output()
            .await
            .map_err(|source| LircError::Spawn {
                path: self.config.irsend_path.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(LircError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl CommandDispatcher for IrSendDispatcher {
    async fn send(
        &self,
        remote: &str,
        key_code: &str,
        repeat_count: u32,
    ) -> Result<(), FlickerError> {
        tracing::debug!(remote, key_code, repeat_count, "running irsend");
        self.run(remote, key_code, repeat_count)
            .await
            .map_err(|err| err.into_domain(remote, key_code))
    }
}
