//! # flickerd: flicker daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (CLI argument, env vars, config file)
//! - Install the `tracing` subscriber
//! - Construct the outlet sensor and the `irsend` dispatcher (adapters)
//! - Probe the outlet once; refuse to start when it cannot be read
//! - Construct application services around one shared send gate
//! - Build the axum router, bind, and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use flicker_adapter_http_axum::state::AppState;
use flicker_adapter_kasa::KasaPlug;
use flicker_adapter_lirc::IrSendDispatcher;
use flicker_app::appliance::Appliance;
use flicker_app::gate::SendGate;
use flicker_app::services::command_service::CommandService;
use flicker_app::services::heat_service::HeatService;
use flicker_app::services::power_service::PowerService;
use flicker_app::services::relay_service::RelayService;
use flicker_domain::threshold::PowerThreshold;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Adapters
    let sensor = KasaPlug::new(config.outlet.clone());
    let dispatcher = IrSendDispatcher::new(config.lirc.clone());
    let gate = Arc::new(SendGate::new(dispatcher, config.lirc.repeat_count));

    let appliance = Arc::new(Appliance::new(
        sensor,
        Arc::clone(&gate),
        config.remote.name.clone(),
        config.remote.buttons.clone(),
    ));

    // Startup probe
    match appliance.read().await {
        Ok(reading) => {
            tracing::info!(
                outlet = %config.outlet.host,
                power = reading.power,
                "outlet reachable"
            );
        }
        Err(err) => {
            tracing::error!(outlet = %config.outlet.host, error = %err, "could not read the outlet");
            return Err(err.into());
        }
    }

    // Services
    let power_service = Arc::new(PowerService::new(
        Arc::clone(&appliance),
        PowerThreshold::from(config.thresholds),
        config.timing.power.timing(),
    ));
    let heat_service = Arc::new(HeatService::new(
        Arc::clone(&appliance),
        Arc::clone(&power_service),
        config.thresholds,
        config.timing.heat.timing(),
    ));
    let command_service = Arc::new(CommandService::new(appliance));
    let relay_service = Arc::new(RelayService::new(gate, config.relay_remotes()));

    // HTTP
    let state = AppState::from_arcs(power_service, heat_service, command_service, relay_service);
    let app = flicker_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, remote = %config.remote.name, "flickerd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("flickerd stopped");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received, draining requests");
}
