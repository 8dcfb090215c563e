//! Error types for the input layer
//!
//! The dispatcher itself never fails; these cover the browser glue and
//! configuration loading.

use thiserror::Error;

/// Errors raised while configuring or attaching input handling
#[derive(Error, Debug)]
pub enum InputError {
    /// No global `window` (not running in a browser main thread)
    #[error("no global window available")]
    NoWindow,

    /// The window has no document
    #[error("window has no document")]
    NoDocument,

    /// `addEventListener` rejected a listener
    #[error("failed to attach '{event}' listener: {message}")]
    Listener { event: String, message: String },

    /// Stored configuration could not be parsed
    #[error("invalid input configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type used across the crate
pub type Result<T> = std::result::Result<T, InputError>;

impl InputError {
    /// Build a listener error from the event name and the rendered JS error
    pub fn listener(event: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Listener {
            event: event.into(),
            message: message.into(),
        }
    }
}
