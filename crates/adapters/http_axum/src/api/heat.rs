//! Heat level handlers.
//!
//! Both `off` routes target [`HeatLevel::FlameOnly`]: turning the heater off
//! keeps the flame effect running. Use `/power/off` to shut everything down.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use flicker_app::ports::{CommandDispatcher, PowerSensor};
use flicker_domain::state::HeatLevel;

use super::{ControlResponse, FlagResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Response of `GET /heat/status`.
pub enum LevelResponse {
    Ok(Json<HeatLevel>),
}

impl IntoResponse for LevelResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

async fn set_level<S, D>(
    state: &AppState<S, D>,
    level: HeatLevel,
) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    state.heat_service.set_level(level).await?;
    Ok(ControlResponse::Done)
}

async fn is_level<S, D>(state: &AppState<S, D>, level: HeatLevel) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let matches = state.heat_service.is_level(level).await?;
    Ok(FlagResponse::from(matches))
}

/// `GET /heat/status`
pub async fn status<S, D>(State(state): State<AppState<S, D>>) -> Result<LevelResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let level = state.heat_service.level().await?;
    Ok(LevelResponse::Ok(Json(level)))
}

/// `GET /heat/low/on`
pub async fn low_on<S, D>(State(state): State<AppState<S, D>>) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    set_level(&state, HeatLevel::Low).await
}

/// `GET /heat/high/on`
pub async fn high_on<S, D>(
    State(state): State<AppState<S, D>>,
) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    set_level(&state, HeatLevel::High).await
}

/// `GET /heat/low/off` and `GET /heat/high/off`
pub async fn flame_only<S, D>(
    State(state): State<AppState<S, D>>,
) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    set_level(&state, HeatLevel::FlameOnly).await
}

/// `GET /heat/low/status`
pub async fn low_status<S, D>(
    State(state): State<AppState<S, D>>,
) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    is_level(&state, HeatLevel::Low).await
}

/// `GET /heat/high/status`
pub async fn high_status<S, D>(
    State(state): State<AppState<S, D>>,
) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    is_level(&state, HeatLevel::High).await
}
