//! Raw button handlers: single presses on the appliance remote and relayed
//! presses on the other configured remotes.

use axum::extract::{Path, State};

use flicker_app::ports::{CommandDispatcher, PowerSensor};

use super::{ControlResponse, FlagResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// `GET /send/{command}`
pub async fn send<S, D>(
    State(state): State<AppState<S, D>>,
    Path(command): Path<String>,
) -> Result<ControlResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    state.command_service.send(&command).await?;
    Ok(ControlResponse::Done)
}

/// `GET /send/{remote}/{command}`
///
/// Responds with the button's new optimistic flag.
pub async fn relay<S, D>(
    State(state): State<AppState<S, D>>,
    Path((remote, command)): Path<(String, String)>,
) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let toggled = state.relay_service.send(&remote, &command).await?;
    Ok(FlagResponse::from(toggled))
}

/// `GET /status/{remote}/{command}`
pub async fn status<S, D>(
    State(state): State<AppState<S, D>>,
    Path((remote, command)): Path<(String, String)>,
) -> Result<FlagResponse, ApiError>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    let toggled = state.relay_service.status(&remote, &command)?;
    Ok(FlagResponse::from(toggled))
}
