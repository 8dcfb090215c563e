//! Platform abstraction layer
//!
//! Handles browser/native differences for feeding raw input into a
//! dispatcher:
//! - [`InputHost`]: splits a game object into its dispatcher and the state
//!   its callbacks mutate
//! - `web` (wasm32 only): DOM listener attachment

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::input::{InputDispatcher, KeyEvent, PointerEvent};

/// Owner of a dispatcher and the context its callbacks receive
pub trait InputHost: 'static {
    type Context: 'static;

    /// Borrow the dispatcher and the callback context at the same time
    fn input_parts(&mut self) -> (&mut InputDispatcher<Self::Context>, &mut Self::Context);
}

/// A raw event from any source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawInput {
    Key(KeyEvent),
    Pointer(PointerEvent),
}

impl From<KeyEvent> for RawInput {
    fn from(event: KeyEvent) -> Self {
        RawInput::Key(event)
    }
}

impl From<PointerEvent> for RawInput {
    fn from(event: PointerEvent) -> Self {
        RawInput::Pointer(event)
    }
}

/// Route one raw event into the host's dispatcher
pub fn feed<H: InputHost>(host: &mut H, input: &RawInput) {
    let (dispatcher, ctx) = host.input_parts();
    match input {
        RawInput::Key(event) => dispatcher.handle_key(event, ctx),
        RawInput::Pointer(event) => dispatcher.handle_pointer(event, ctx),
    }
}

/// Release everything the host's dispatcher holds (focus lost)
pub fn release_all<H: InputHost>(host: &mut H) {
    let (dispatcher, ctx) = host.input_parts();
    dispatcher.release_all(ctx);
}
