//! Kasa outlet client.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use flicker_app::ports::PowerSensor;
use flicker_domain::error::FlickerError;
use flicker_domain::reading::PowerReading;

use crate::cipher;
use crate::config::KasaConfig;
use crate::error::KasaError;
use crate::realtime;

/// Largest reply accepted from the outlet.
const MAX_REPLY_LEN: usize = 64 * 1024;

/// Power sensor backed by a Kasa smart outlet.
///
/// Every read opens a fresh connection; the outlet closes it after one reply.
#[derive(Debug, Clone)]
pub struct KasaPlug {
    config: KasaConfig,
}

impl KasaPlug {
    #[must_use]
    pub fn new(config: KasaConfig) -> Self {
        Self { config }
    }

    /// Send one command and return the decrypted reply.
    ///
    /// # Errors
    ///
    /// Returns [`KasaError::Timeout`] when the whole exchange exceeds the
    /// configured timeout, or an I/O error.
    pub async fn query(&self, request: &str) -> Result<Vec<u8>, KasaError> {
        let timeout = self.config.timeout();
        tokio::time::timeout(timeout, self.exchange(request.as_bytes()))
            .await
            .map_err(|_| KasaError::Timeout(timeout))?
    }

    async fn exchange(&self, request: &[u8]) -> Result<Vec<u8>, KasaError> {
        let mut stream = TcpStream::connect((self.config.host.as_str(), self.config.port)).await?;

        let len =
            u32::try_from(request.len()).map_err(|_| KasaError::FrameTooLarge(request.len()))?;
        let mut frame = Vec::with_capacity(4 + request.len());
        frame.extend_from_slice(&len.to_be_bytes());
        frame.extend_from_slice(&cipher::encrypt(request));
        stream.write_all(&frame).await?;

        let len = stream.read_u32().await?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len > MAX_REPLY_LEN {
            return Err(KasaError::FrameTooLarge(len));
        }
        let mut body = vec![0; len];
        stream.read_exact(&mut body).await?;
        Ok(cipher::decrypt(&body))
    }

    async fn realtime(&self) -> Result<PowerReading, KasaError> {
        let body = self.query(realtime::REQUEST).await?;
        realtime::parse(&body)
    }
}

impl PowerSensor for KasaPlug {
    async fn read(&self) -> Result<PowerReading, FlickerError> {
        let reading = self.realtime().await.inspect_err(|err| {
            tracing::debug!(host = %self.config.host, error = %err, "outlet query failed");
        })?;
        tracing::trace!(power = reading.power, "outlet reading");
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::net::TcpListener;

    use flicker_domain::error::SensorError;

    use super::*;

    /// Serve one connection: check the request, answer with `reply`.
    async fn fake_outlet(reply: &'static str) -> KasaConfig {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let len = stream.read_u32().await.unwrap();
            let mut request = vec![0; len as usize];
            stream.read_exact(&mut request).await.unwrap();
            assert_eq!(cipher::decrypt(&request), realtime::REQUEST.as_bytes());

            let body = cipher::encrypt(reply.as_bytes());
            stream.write_u32(body.len() as u32).await.unwrap();
            stream.write_all(&body).await.unwrap();
        });

        KasaConfig {
            host: "127.0.0.1".to_string(),
            port,
            timeout_ms: 1_000,
        }
    }

    #[tokio::test]
    async fn should_read_power_from_outlet() {
        let config = fake_outlet(
            r#"{"emeter":{"get_realtime":{"current":0.38,"voltage":120.1,"power":45.2,"err_code":0}}}"#,
        )
        .await;

        let reading = KasaPlug::new(config).read().await.unwrap();

        assert_eq!(reading.power, 45.2);
        assert_eq!(reading.voltage, 120.1);
    }

    #[tokio::test]
    async fn should_surface_outlet_error_as_unavailable_sensor() {
        let config = fake_outlet(r#"{"emeter":{"err_code":-1,"err_msg":"module not support"}}"#).await;

        let err = KasaPlug::new(config).read().await.unwrap_err();

        assert!(matches!(
            err,
            FlickerError::Sensor(SensorError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn should_time_out_when_outlet_stays_silent() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });
        let plug = KasaPlug::new(KasaConfig {
            host: "127.0.0.1".to_string(),
            port,
            timeout_ms: 100,
        });

        let err = plug.query(realtime::REQUEST).await.unwrap_err();

        assert!(matches!(err, KasaError::Timeout(_)));
    }

    #[tokio::test]
    async fn should_fail_when_outlet_is_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = KasaPlug::new(KasaConfig {
            host: "127.0.0.1".to_string(),
            port,
            timeout_ms: 1_000,
        })
        .read()
        .await
        .unwrap_err();

        assert!(matches!(err, FlickerError::Sensor(_)));
    }
}
