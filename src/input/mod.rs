//! Input dispatch
//!
//! Turns raw keyboard and pointer events into press/release callbacks per
//! logical control:
//! - Keyboard: two identity spaces (localized key, physical code), each with
//!   an overlapping-press stack
//! - Pointer/touch: one press/depress pair per clickable element, last event
//!   wins
//!
//! The dispatcher is purely event driven and generic over the consumer's
//! state `C`, which every callback receives as `&mut C`.

pub mod binding;
pub mod event;
pub mod keyboard;
pub mod stack;

pub use binding::{Binding, BindingTable, Callback, Handlers};
pub use event::{KeyEvent, KeyPhase, PointerEvent, PointerPhase, PointerSource};
pub use keyboard::KeyTrack;
pub use stack::ActiveStack;

use crate::config::InputConfig;

/// Identifies a binding and the identity space it lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingId {
    /// Physical key position (`KeyboardEvent.code`)
    Code(String),
    /// Localized key value (`KeyboardEvent.key`)
    Key(String),
    /// Clickable element id
    Element(String),
}

impl BindingId {
    pub fn code(id: impl Into<String>) -> Self {
        BindingId::Code(id.into())
    }

    pub fn key(id: impl Into<String>) -> Self {
        BindingId::Key(id.into())
    }

    pub fn element(id: impl Into<String>) -> Self {
        BindingId::Element(id.into())
    }

    pub fn as_str(&self) -> &str {
        match self {
            BindingId::Code(id) | BindingId::Key(id) | BindingId::Element(id) => id,
        }
    }
}

/// Keyboard and pointer dispatcher over a fixed binding domain
#[derive(Debug)]
pub struct InputDispatcher<C> {
    keys: KeyTrack<C>,
    codes: KeyTrack<C>,
    elements: BindingTable<C>,
    prevent_default: bool,
}

impl<C> InputDispatcher<C> {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            keys: KeyTrack::new("key", config.keys.iter().cloned()),
            codes: KeyTrack::new("code", config.codes.iter().cloned()),
            elements: BindingTable::new(config.clickable_ids.iter().cloned()),
            prevent_default: config.prevent_default,
        }
    }

    /// Store handlers for `id`, replacing earlier ones. Ids outside the
    /// configured domain are ignored and return `false`.
    pub fn register(&mut self, id: BindingId, handlers: Handlers<C>) -> bool {
        let stored = match &id {
            BindingId::Code(code) => self.codes.register(code, handlers),
            BindingId::Key(key) => self.keys.register(key, handlers),
            BindingId::Element(el) => self.elements.register(el, handlers),
        };
        if !stored {
            log::debug!("Ignoring handlers for unknown binding {:?}", id);
        }
        stored
    }

    /// Dispatch a raw keyboard event to both identity spaces
    pub fn handle_key(&mut self, event: &KeyEvent, ctx: &mut C) {
        if event.repeat {
            return;
        }
        match event.phase {
            KeyPhase::Down => {
                self.keys.press(&event.key, ctx);
                self.codes.press(&event.code, ctx);
            }
            KeyPhase::Up => {
                self.keys.release(&event.key, ctx);
                self.codes.release(&event.code, ctx);
            }
        }
    }

    /// Dispatch a raw pointer/touch event to its element's binding
    pub fn handle_pointer(&mut self, event: &PointerEvent, ctx: &mut C) {
        let Some(binding) = self.elements.get_mut(&event.element_id) else {
            return;
        };
        match event.phase {
            PointerPhase::Down => {
                binding.press(ctx);
            }
            // Press began off the element; nothing of ours to release
            PointerPhase::Up if !binding.is_pressed() => return,
            PointerPhase::Up => {
                binding.release(ctx);
            }
        }
        log::trace!(
            "element '{}' {:?} via {:?}",
            event.element_id,
            event.phase,
            event.source
        );
    }

    /// Held physical codes, oldest first
    pub fn active_codes(&self) -> &[String] {
        self.codes.stack().as_slice()
    }

    /// Held localized keys, oldest first
    pub fn active_keys(&self) -> &[String] {
        self.keys.stack().as_slice()
    }

    pub fn is_pressed(&self, id: &BindingId) -> bool {
        match id {
            BindingId::Code(code) => self.codes.is_pressed(code),
            BindingId::Key(key) => self.keys.is_pressed(key),
            BindingId::Element(el) => self.elements.get(el).is_some_and(|b| b.is_pressed()),
        }
    }

    /// Whether `id` is inside the configured domain
    pub fn accepts(&self, id: &BindingId) -> bool {
        match id {
            BindingId::Code(code) => self.codes.contains(code),
            BindingId::Key(key) => self.keys.contains(key),
            BindingId::Element(el) => self.elements.contains(el),
        }
    }

    /// Clickable element ids in configured order
    pub fn element_ids(&self) -> impl Iterator<Item = &str> {
        self.elements.ids()
    }

    pub fn prevent_default(&self) -> bool {
        self.prevent_default
    }

    /// Release every held control, firing `on_release`. Used when the page
    /// loses focus and the matching up events will never arrive.
    pub fn release_all(&mut self, ctx: &mut C) {
        self.keys.release_all(ctx);
        self.codes.release_all(ctx);
        for binding in self.elements.iter_mut().filter(|b| b.is_pressed()) {
            binding.release(ctx);
        }
    }

    /// Drop all held state without firing callbacks
    pub fn reset(&mut self) {
        self.keys.reset();
        self.codes.reset();
        for binding in self.elements.iter_mut() {
            binding.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counts {
        left_press: u32,
        left_release: u32,
        right_press: u32,
        right_release: u32,
        char_press: u32,
        button: i32,
    }

    fn dispatcher() -> InputDispatcher<Counts> {
        let mut input = InputDispatcher::new(&InputConfig::default());
        input.register(
            BindingId::code("ArrowLeft"),
            Handlers::new()
                .on_press(|c: &mut Counts| c.left_press += 1)
                .on_release(|c: &mut Counts| c.left_release += 1),
        );
        input.register(
            BindingId::code("ArrowRight"),
            Handlers::new()
                .on_press(|c: &mut Counts| c.right_press += 1)
                .on_release(|c: &mut Counts| c.right_release += 1),
        );
        input
    }

    fn left_down() -> KeyEvent {
        KeyEvent::down("ArrowLeft", "ArrowLeft")
    }

    fn right_down() -> KeyEvent {
        KeyEvent::down("ArrowRight", "ArrowRight")
    }

    #[test]
    fn test_repeat_does_not_press_again() {
        let mut input = dispatcher();
        let mut c = Counts::default();
        input.handle_key(&left_down(), &mut c);
        input.handle_key(&left_down().repeated(), &mut c);
        input.handle_key(&left_down().repeated(), &mut c);
        assert_eq!(c.left_press, 1);
        assert_eq!(input.active_codes(), ["ArrowLeft"]);
    }

    #[test]
    fn test_left_right_release_right_falls_back_to_left() {
        let mut input = dispatcher();
        let mut c = Counts::default();

        input.handle_key(&left_down(), &mut c);
        assert_eq!(input.active_codes(), ["ArrowLeft"]);
        input.handle_key(&right_down(), &mut c);
        assert_eq!(input.active_codes(), ["ArrowLeft", "ArrowRight"]);
        input.handle_key(&KeyEvent::up("ArrowRight", "ArrowRight"), &mut c);
        assert_eq!(input.active_codes(), ["ArrowLeft"]);
        input.handle_key(&KeyEvent::up("ArrowLeft", "ArrowLeft"), &mut c);
        assert!(input.active_codes().is_empty());

        assert_eq!(c.left_press, 2);
        assert_eq!(c.right_press, 1);
        assert_eq!(c.left_release, 1);
        assert_eq!(c.right_release, 1);
    }

    #[test]
    fn test_duplicate_down_glitch() {
        let mut input = dispatcher();
        let mut c = Counts::default();
        input.handle_key(&left_down(), &mut c);
        input.handle_key(&left_down(), &mut c);
        assert_eq!(input.active_codes(), ["ArrowLeft"]);
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let mut input = dispatcher();
        let mut c = Counts::default();
        input.handle_key(&KeyEvent::up("ArrowLeft", "ArrowLeft"), &mut c);
        assert_eq!(c.left_release, 0);
        assert!(input.active_codes().is_empty());
    }

    #[test]
    fn test_unknown_registration_is_ignored() {
        let mut input = dispatcher();
        assert!(!input.register(
            BindingId::code("KeyQ"),
            Handlers::new().on_press(|c: &mut Counts| c.char_press += 1),
        ));
        assert!(!input.accepts(&BindingId::code("KeyQ")));

        let mut c = Counts::default();
        input.handle_key(&KeyEvent::down("q", "KeyQ"), &mut c);
        assert_eq!(c.char_press, 0);
    }

    #[test]
    fn test_key_and_code_spaces_dispatch_together() {
        let mut input = dispatcher();
        input.register(
            BindingId::key("w"),
            Handlers::new().on_press(|c: &mut Counts| c.char_press += 1),
        );
        input.register(
            BindingId::code("KeyW"),
            Handlers::new().on_press(|c: &mut Counts| c.left_press += 1),
        );

        let mut c = Counts::default();
        input.handle_key(&KeyEvent::down("w", "KeyW"), &mut c);
        assert_eq!(c.char_press, 1);
        assert_eq!(c.left_press, 1);
        assert_eq!(input.active_keys(), ["w"]);
        assert_eq!(input.active_codes(), ["KeyW"]);

        // Same physical key on a layout that produces 'z'
        input.handle_key(&KeyEvent::down("z", "KeyW"), &mut c);
        assert_eq!(c.char_press, 1);
        assert_eq!(c.left_press, 2);
    }

    #[test]
    fn test_pointer_press_depress() {
        let mut input = dispatcher();
        input.register(
            BindingId::element("leftarrow"),
            Handlers::new()
                .on_press(|c: &mut Counts| c.button -= 1)
                .on_release(|c: &mut Counts| c.button = 0),
        );
        let id = BindingId::element("leftarrow");
        let mut c = Counts::default();

        input.handle_pointer(
            &PointerEvent::new("leftarrow", PointerPhase::Down, PointerSource::Touch),
            &mut c,
        );
        assert_eq!(c.button, -1);
        assert!(input.is_pressed(&id));
        assert!(input.active_codes().is_empty());

        input.handle_pointer(
            &PointerEvent::new("leftarrow", PointerPhase::Up, PointerSource::Mouse),
            &mut c,
        );
        assert_eq!(c.button, 0);
        assert!(!input.is_pressed(&id));
    }

    #[test]
    fn test_pointer_up_without_down_is_ignored() {
        let mut input = dispatcher();
        input.register(
            BindingId::element("rightarrow"),
            Handlers::new()
                .on_press(|c: &mut Counts| c.button += 1)
                .on_release(|c: &mut Counts| c.button = 0),
        );
        let mut c = Counts {
            button: 7,
            ..Counts::default()
        };

        input.handle_pointer(
            &PointerEvent::new("rightarrow", PointerPhase::Up, PointerSource::Mouse),
            &mut c,
        );
        assert_eq!(c.button, 7);
        assert!(!input.is_pressed(&BindingId::element("rightarrow")));
    }

    #[test]
    fn test_pointer_unknown_element_ignored() {
        let mut input = dispatcher();
        let mut c = Counts::default();
        input.handle_pointer(
            &PointerEvent::new("fire", PointerPhase::Down, PointerSource::Mouse),
            &mut c,
        );
        assert_eq!(c.button, 0);
    }

    #[test]
    fn test_release_all_and_reset() {
        let mut input = dispatcher();
        let mut c = Counts::default();
        input.handle_key(&left_down(), &mut c);
        input.handle_key(&right_down(), &mut c);

        input.release_all(&mut c);
        assert_eq!(c.left_release, 1);
        assert_eq!(c.right_release, 1);
        assert!(input.active_codes().is_empty());
        assert!(!input.is_pressed(&BindingId::code("ArrowLeft")));

        input.handle_key(&left_down(), &mut c);
        input.reset();
        assert!(input.active_codes().is_empty());
        assert_eq!(c.left_release, 1);
    }

    #[test]
    fn test_element_ids_follow_config() {
        let input: InputDispatcher<()> = InputDispatcher::new(&InputConfig::default());
        assert_eq!(
            input.element_ids().collect::<Vec<_>>(),
            vec!["leftarrow", "uparrow", "rightarrow", "downarrow"]
        );
        assert!(input.prevent_default());
    }
}
