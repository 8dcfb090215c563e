//! Keystack - keyboard and pointer input dispatch for browser games
//!
//! Core modules:
//! - `input`: Binding tables, overlapping-press stacks, event dispatch
//! - `config`: Binding domains, persisted in LocalStorage
//! - `platform`: Browser/native glue (DOM listeners on wasm)
//! - `state`: Game phase state machine
//! - `demo`: Top-down movement demo driven by the dispatcher

pub mod config;
pub mod demo;
pub mod error;
pub mod input;
pub mod platform;
pub mod state;

pub use config::InputConfig;
pub use error::{InputError, Result};
pub use input::{BindingId, Handlers, InputDispatcher, KeyEvent, PointerEvent};
pub use state::{GamePhase, PhaseEvent, PhaseStack};
