//! Remotes: named IR buttons and their key codes.
//!
//! A [`RemoteMap`] is loaded once from configuration and never mutated.
//! A [`Remote`] wraps a map for the multi-remote relay and adds one
//! optimistic toggle flag per [`Button`].

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;

use crate::error::{NotFoundError, ValidationError};

/// Button that toggles appliance power.
pub const POWER_BUTTON: &str = "power";

/// Button that advances the heat ring by one step.
pub const HEAT_BUTTON: &str = "heat";

/// Immutable mapping from logical button name to IR key code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>")]
pub struct RemoteMap {
    buttons: BTreeMap<String, String>,
}

impl TryFrom<BTreeMap<String, String>> for RemoteMap {
    type Error = ValidationError;

    fn try_from(buttons: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        Self::new(buttons)
    }
}

impl RemoteMap {
    /// Build a map after checking that no name or key code is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyButtonName`] or
    /// [`ValidationError::EmptyKeyCode`].
    pub fn new(buttons: BTreeMap<String, String>) -> Result<Self, ValidationError> {
        for (name, key_code) in &buttons {
            if name.trim().is_empty() {
                return Err(ValidationError::EmptyButtonName);
            }
            if key_code.trim().is_empty() {
                return Err(ValidationError::EmptyKeyCode(name.clone()));
            }
        }
        Ok(Self { buttons })
    }

    /// Key code for the named button.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the remote has no such button.
    pub fn key_code(&self, name: &str) -> Result<&str, NotFoundError> {
        self.buttons
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| NotFoundError {
                entity: "Button",
                id: name.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.buttons.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}

/// A button on a relay remote.
///
/// The toggle flag is **unconfirmed, best-effort** state: it flips on every
/// successful send and is never reconciled with the power sensor.
#[derive(Debug)]
pub struct Button {
    key_code: String,
    toggled: AtomicBool,
}

impl Button {
    #[must_use]
    pub fn new(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            toggled: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn key_code(&self) -> &str {
        &self.key_code
    }

    /// Last optimistic toggle state.
    #[must_use]
    pub fn is_toggled(&self) -> bool {
        self.toggled.load(Ordering::Acquire)
    }

    /// Flip the optimistic flag, returning the new value.
    ///
    /// Callers flip while still holding the send token so a concurrent sender
    /// never sees a send without its flip.
    pub fn flip(&self) -> bool {
        !self.toggled.fetch_xor(true, Ordering::AcqRel)
    }
}

/// A named remote whose buttons carry optimistic toggle flags.
#[derive(Debug)]
pub struct Remote {
    name: String,
    buttons: BTreeMap<String, Button>,
}

impl Remote {
    #[must_use]
    pub fn new(name: impl Into<String>, map: &RemoteMap) -> Self {
        let buttons = map
            .buttons
            .iter()
            .map(|(button, key_code)| (button.clone(), Button::new(key_code.clone())))
            .collect();
        Self {
            name: name.into(),
            buttons,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// # Errors
    ///
    /// Returns [`NotFoundError`] when the remote has no such button.
    pub fn button(&self, name: &str) -> Result<&Button, NotFoundError> {
        self.buttons.get(name).ok_or_else(|| NotFoundError {
            entity: "Button",
            id: format!("{}/{name}", self.name),
        })
    }
}
