//! # flicker-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Bind the fireplace control routes (`/power/*`, `/heat/*`, `/send/*`,
//!   `/status/*`, `/energy/usage`) to application services (driving adapter)
//! - Decode the `POST /power` JSON body
//! - Map application results and [`FlickerError`](flicker_domain::error::FlickerError)s
//!   into HTTP responses
//!
//! ## Dependency rule
//! Depends on `flicker-app` (for port traits and services) and `flicker-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
