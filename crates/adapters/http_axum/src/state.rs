//! Shared application state for axum handlers.

use std::sync::Arc;

use flicker_app::ports::{CommandDispatcher, PowerSensor};
use flicker_app::services::command_service::CommandService;
use flicker_app::services::heat_service::HeatService;
use flicker_app::services::power_service::PowerService;
use flicker_app::services::relay_service::RelayService;

/// Application state shared across all axum handlers.
///
/// Generic over the sensor and dispatcher types to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<S, D> {
    /// Power status and confirmed on/off changes.
    pub power_service: Arc<PowerService<S, D>>,
    /// Heat status and confirmed ring transitions.
    pub heat_service: Arc<HeatService<S, D>>,
    /// Single unconfirmed presses on the appliance remote.
    pub command_service: Arc<CommandService<S, D>>,
    /// Presses on the other configured remotes.
    pub relay_service: Arc<RelayService<D>>,
}

impl<S, D> Clone for AppState<S, D> {
    fn clone(&self) -> Self {
        Self {
            power_service: Arc::clone(&self.power_service),
            heat_service: Arc::clone(&self.heat_service),
            command_service: Arc::clone(&self.command_service),
            relay_service: Arc::clone(&self.relay_service),
        }
    }
}

impl<S, D> AppState<S, D>
where
    S: PowerSensor + 'static,
    D: CommandDispatcher + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The power service is shared with the heat service, so callers build
    /// the `Arc`s themselves.
    pub fn from_arcs(
        power_service: Arc<PowerService<S, D>>,
        heat_service: Arc<HeatService<S, D>>,
        command_service: Arc<CommandService<S, D>>,
        relay_service: Arc<RelayService<D>>,
    ) -> Self {
        Self {
            power_service,
            heat_service,
            command_service,
            relay_service,
        }
    }
}
