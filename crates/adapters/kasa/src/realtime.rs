//! `emeter.get_realtime` request and reply.
//!
//! Older firmware reports `power`, `voltage` and `current` in W, V and A.
//! Newer firmware reports `power_mw`, `voltage_mv` and `current_ma` instead.

use serde::Deserialize;

use flicker_domain::reading::PowerReading;

use crate::error::KasaError;

/// Query for the instantaneous energy meter values.
pub const REQUEST: &str = r#"{"emeter":{"get_realtime":{}}}"#;

#[derive(Debug, Deserialize)]
struct Reply {
    emeter: Emeter,
}

#[derive(Debug, Deserialize)]
struct Emeter {
    #[serde(default)]
    err_code: i64,
    err_msg: Option<String>,
    get_realtime: Option<Realtime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Realtime {
    err_code: i64,
    err_msg: Option<String>,
    power: Option<f64>,
    voltage: Option<f64>,
    current: Option<f64>,
    power_mw: Option<f64>,
    voltage_mv: Option<f64>,
    current_ma: Option<f64>,
}

fn check(code: i64, message: Option<String>) -> Result<(), KasaError> {
    if code == 0 {
        Ok(())
    } else {
        Err(KasaError::Device {
            code,
            message: message.unwrap_or_default(),
        })
    }
}

fn scaled(direct: Option<f64>, milli: Option<f64>) -> Option<f64> {
    direct.or(milli.map(|value| value / 1000.0))
}

/// Parse a decrypted `get_realtime` reply.
///
/// # Errors
///
/// Returns [`KasaError::Parse`] for malformed JSON, [`KasaError::Device`] when
/// the outlet reports an error (e.g. it has no energy meter) and
/// [`KasaError::MissingReading`] when no power value is present.
pub fn parse(body: &[u8]) -> Result<PowerReading, KasaError> {
    let reply: Reply = serde_json::from_slice(body)?;
    check(reply.emeter.err_code, reply.emeter.err_msg)?;
    let realtime = reply.emeter.get_realtime.unwrap_or_default();
    check(realtime.err_code, realtime.err_msg)?;

    let power = scaled(realtime.power, realtime.power_mw).ok_or(KasaError::MissingReading)?;
    Ok(PowerReading {
        current: scaled(realtime.current, realtime.current_ma).unwrap_or_default(),
        voltage: scaled(realtime.voltage, realtime.voltage_mv).unwrap_or_default(),
        power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_reply_in_base_units() {
        let body = br#"{"emeter":{"get_realtime":{"current":5.81,"voltage":120.4,"power":699.5,"total":12.3,"err_code":0}}}"#;

        let reading = parse(body).unwrap();

        assert_eq!(
            reading,
            PowerReading {
                current: 5.81,
                voltage: 120.4,
                power: 699.5,
            }
        );
    }

    #[test]
    fn should_scale_milli_unit_reply() {
        let body = br#"{"emeter":{"get_realtime":{"current_ma":375,"voltage_mv":120500,"power_mw":45000,"total_wh":10,"err_code":0}}}"#;

        let reading = parse(body).unwrap();

        assert_eq!(reading.power, 45.0);
        assert_eq!(reading.voltage, 120.5);
        assert_eq!(reading.current, 0.375);
    }

    #[test]
    fn should_report_outlet_without_energy_meter() {
        let body = br#"{"emeter":{"err_code":-1,"err_msg":"module not support"}}"#;

        let err = parse(body).unwrap_err();

        assert!(matches!(err, KasaError::Device { code: -1, .. }));
    }

    #[test]
    fn should_report_realtime_error_code() {
        let body = br#"{"emeter":{"get_realtime":{"err_code":-2,"err_msg":"busy"}}}"#;

        assert!(matches!(
            parse(body),
            Err(KasaError::Device { code: -2, .. })
        ));
    }

    #[test]
    fn should_reject_reply_without_power() {
        let body = br#"{"emeter":{"get_realtime":{"voltage":120.0,"err_code":0}}}"#;

        assert!(matches!(parse(body), Err(KasaError::MissingReading)));
    }

    #[test]
    fn should_reject_malformed_json() {
        assert!(matches!(parse(b"{not json"), Err(KasaError::Parse(_))));
    }
}
