//! # flicker-domain
//!
//! Pure domain model for the flicker fireplace controller.
//!
//! ## Responsibilities
//! - Define the **appliance states** ([`state::HeatLevel`], [`state::PowerState`])
//! - Define **power readings** reported by the smart outlet
//! - Classify readings into states through calibrated **threshold sets**
//! - Plan **heat ring** transitions (the `heat` button only cycles forward)
//! - Describe **remotes** and their buttons (key codes, optimistic toggle flags)
//! - Own the error taxonomy shared by every other crate
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod reading;
pub mod remote;
pub mod ring;
pub mod state;
pub mod threshold;
