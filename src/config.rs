//! Input configuration
//!
//! Fixes the domains a dispatcher accepts bindings for. Persisted as JSON in
//! LocalStorage so alternate layouts survive a reload.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Physical key codes (`KeyboardEvent.code`). These do not depend on the
/// keyboard layout.
pub const DEFAULT_CODES: &[&str] = &[
    "KeyW",
    "KeyA",
    "KeyS",
    "KeyD",
    "KeyP",
    "Space",
    "Enter",
    "ArrowLeft",
    "ArrowUp",
    "ArrowRight",
    "ArrowDown",
];

/// Localized key values (`KeyboardEvent.key`). These follow the character
/// produced, wherever it sits on the keyboard.
pub const DEFAULT_KEYS: &[&str] = &[
    "w",
    "a",
    "s",
    "d",
    "p",
    " ",
    "Enter",
    "ArrowLeft",
    "ArrowUp",
    "ArrowRight",
    "ArrowDown",
];

/// Ids of on-screen controls that receive mouse and touch listeners
pub const DEFAULT_CLICKABLE_IDS: &[&str] = &["leftarrow", "uparrow", "rightarrow", "downarrow"];

/// Binding domains and listener options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Accepted `KeyboardEvent.code` ids
    pub codes: Vec<String>,
    /// Accepted `KeyboardEvent.key` ids
    pub keys: Vec<String>,
    /// Accepted clickable element ids
    pub clickable_ids: Vec<String>,
    /// Call `preventDefault` on keyboard events (stops arrow/space scrolling)
    pub prevent_default: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            codes: owned_ids(DEFAULT_CODES),
            keys: owned_ids(DEFAULT_KEYS),
            clickable_ids: owned_ids(DEFAULT_CLICKABLE_IDS),
            prevent_default: true,
        }
    }
}

fn owned_ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| (*s).to_string()).collect()
}

impl InputConfig {
    /// Config with no keyboard or pointer domains
    pub fn empty() -> Self {
        Self {
            codes: Vec::new(),
            keys: Vec::new(),
            clickable_ids: Vec::new(),
            prevent_default: true,
        }
    }

    /// Add a physical code to the domain
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        push_unique(&mut self.codes, code.into());
        self
    }

    /// Add a localized key to the domain
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        push_unique(&mut self.keys, key.into());
        self
    }

    /// Add a clickable element id to the domain
    pub fn with_clickable(mut self, id: impl Into<String>) -> Self {
        push_unique(&mut self.clickable_ids, id.into());
        self
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "keystack_input_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded input config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored input config: {}", e),
                }
            }
        }

        log::info!("Using default input config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Input config saved");
                }
                Err(e) => log::warn!("Input config not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn push_unique(ids: &mut Vec<String>, id: String) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
