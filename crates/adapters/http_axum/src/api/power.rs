//! Power handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use flicker_app::ports::{CommandDispatcher, PowerSensor};
use flicker_domain::reading::PowerReading;
use flicker_domain::state::PowerState;

use super::{ControlResponse, FlagResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Request body for `POST /power`.
#[derive(Debug, Deserialize)]
pub struct PowerRequest {
    pub value: f64,
}

impl PowerRequest {
    /// `0` turns the appliance off, anything else turns it on.
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn desired(&self) -> PowerState {
        PowerState::from(self.value != 0.0)
    }
}

/// Response of the usage endpoints.
pub enum UsageResponse {
    Ok(Json<PowerReading>),
}

impl IntoResponse for UsageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /power`
pub async fn set<S, D>(
    State(state): State<AppState<S, D>>,
    body: Result<Json<PowerRequest>, JsonRejection>,
) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let Json(req) = body?;
    state.power_service.ensure_state(req.desired()).await?;
    Ok(ControlResponse::Done)
}

/// `GET /power/on`
pub async fn on<S, D>(State(state): State<AppState<S, D>>) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    state.power_service.ensure_state(PowerState::On).await?;
    Ok(ControlResponse::Done)
}

/// `GET /power/off`
pub async fn off<S, D>(State(state): State<AppState<S, D>>) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    state.power_service.ensure_state(PowerState::Off).await?;
    Ok(ControlResponse::Done)
}

/// `GET /power/status`
pub async fn status<S, D>(State(state): State<AppState<S, D>>) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let power = state.power_service.status().await?;
    Ok(FlagResponse::from(power.is_on()))
}

/// `GET /energy/usage` and `GET /power/usage`
pub async fn usage<S, D>(State(state): State<AppState<S, D>>) -> Result<UsageResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let reading = state.power_service.usage().await?;
    Ok(UsageResponse::Ok(Json(reading)))
}
