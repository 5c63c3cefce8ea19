//! # flicker-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `PowerSensor`: read the outlet's instantaneous power draw
//!   - `CommandDispatcher`: fire one IR key code on one remote
//! - Own the **send gate**, the one token that keeps a single IR command in flight
//! - Run the **confirmation loop**: press, poll, retry, give up at a deadline
//! - Define **driving/inbound** use-case services:
//!   - `PowerService`: power status and confirmed on/off changes
//!   - `HeatService`: heat status and confirmed ring transitions
//!   - `CommandService`: single unconfirmed button presses
//!   - `RelayService`: multi-remote presses with optimistic toggle flags
//!
//! ## Dependency rule
//! Depends on `flicker-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod appliance;
pub mod gate;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;
