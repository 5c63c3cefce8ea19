//! Fireplace control handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod heat;
#[allow(clippy::missing_errors_doc)]
pub mod power;
#[allow(clippy::missing_errors_doc)]
pub mod remote;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};

use flicker_app::ports::{CommandDispatcher, PowerSensor};

use crate::state::AppState;

/// Build the control routes.
pub fn routes<S, D>() -> Router<AppState<S, D>>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    Router::new()
        // Power
        .route("/power", post(power::set::<S, D>))
        .route("/power/on", get(power::on::<S, D>))
        .route("/power/off", get(power::off::<S, D>))
        .route("/power/status", get(power::status::<S, D>))
        .route("/power/usage", get(power::usage::<S, D>))
        .route("/energy/usage", get(power::usage::<S, D>))
        // Heat
        .route("/heat/status", get(heat::status::<S, D>))
        .route("/heat/low/on", get(heat::low_on::<S, D>))
        .route("/heat/low/off", get(heat::flame_only::<S, D>))
        .route("/heat/low/status", get(heat::low_status::<S, D>))
        .route("/heat/high/on", get(heat::high_on::<S, D>))
        .route("/heat/high/off", get(heat::flame_only::<S, D>))
        .route("/heat/high/status", get(heat::high_status::<S, D>))
        // Raw remote buttons; the router requires one name for the first
        // `/send` segment, which is a button here and a remote below.
        .route("/send/{name}", get(remote::send::<S, D>))
        .route("/send/{name}/{command}", get(remote::relay::<S, D>))
        .route("/status/{remote}/{command}", get(remote::status::<S, D>))
}

/// Response of the routes that change the appliance.
pub enum ControlResponse {
    Done,
}

impl IntoResponse for ControlResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Done => StatusCode::OK.into_response(),
        }
    }
}

/// Response of the boolean status routes, rendered as `"1"` or `"0"`.
pub enum FlagResponse {
    Set,
    Unset,
}

impl From<bool> for FlagResponse {
    fn from(value: bool) -> Self {
        if value { Self::Set } else { Self::Unset }
    }
}

impl IntoResponse for FlagResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Set => "1".into_response(),
            Self::Unset => "0".into_response(),
        }
    }
}
