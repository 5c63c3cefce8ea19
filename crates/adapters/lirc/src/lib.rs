//! # flicker-adapter-lirc
//!
//! Driven adapter implementing [`CommandDispatcher`](flicker_app::ports::CommandDispatcher)
//! on top of LIRC's `irsend` tool.
//!
//! ## Responsibilities
//! - Run `irsend --count=<n> SEND_ONCE <remote> <key_code>` once per send
//! - Report a non-zero exit, with its stderr, as a dispatch failure
//!
//! The adapter does not serialize sends itself; callers go through the
//! application's send gate.
//!
//! ## Dependency rule
//! Same as other adapters: depends on `flicker-app` and `flicker-domain`.

pub mod config;
pub mod dispatcher;
pub mod error;

pub use config::LircConfig;
pub use dispatcher::IrSendDispatcher;
pub use error::LircError;
