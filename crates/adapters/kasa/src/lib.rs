//! # flicker-adapter-kasa
//!
//! Driven adapter implementing [`PowerSensor`](flicker_app::ports::PowerSensor)
//! for TP-Link Kasa smart outlets with an energy meter (HS110 and friends).
//!
//! ## Responsibilities
//! - Speak the outlet's local TCP protocol: length-prefixed JSON scrambled
//!   with an XOR autokey cipher
//! - Query `emeter.get_realtime` and turn the reply into a
//!   [`PowerReading`](flicker_domain::reading::PowerReading)
//! - Bound every exchange with an I/O timeout so a dead outlet fails fast
//!
//! ## Dependency rule
//! Same as other adapters: depends on `flicker-app` and `flicker-domain`.

pub mod cipher;
pub mod config;
pub mod error;
pub mod plug;
pub mod realtime;

pub use config::KasaConfig;
pub use error::KasaError;
pub use plug::KasaPlug;
