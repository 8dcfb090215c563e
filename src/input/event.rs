//! Platform-independent raw input events

/// Keyboard edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

impl KeyPhase {
    /// Map a DOM event type (`keydown`/`keyup`)
    pub fn from_dom_type(ty: &str) -> Option<Self> {
        match ty {
            "keydown" => Some(KeyPhase::Down),
            "keyup" => Some(KeyPhase::Up),
            _ => None,
        }
    }

    pub fn dom_type(&self) -> &'static str {
        match self {
            KeyPhase::Down => "keydown",
            KeyPhase::Up => "keyup",
        }
    }
}

/// A raw keyboard event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub phase: KeyPhase,
    /// Localized key value (`KeyboardEvent.key`)
    pub key: String,
    /// Physical key code (`KeyboardEvent.code`)
    pub code: String,
    /// Auto-repeat while held
    pub repeat: bool,
}

impl KeyEvent {
    pub fn down(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            phase: KeyPhase::Down,
            key: key.into(),
            code: code.into(),
            repeat: false,
        }
    }

    pub fn up(key: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            phase: KeyPhase::Up,
            key: key.into(),
            code: code.into(),
            repeat: false,
        }
    }

    /// Mark as an auto-repeat
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }
}

/// Pointer edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
}

/// What produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// DOM event types listened to on clickable elements
pub const POINTER_EVENT_TYPES: [&str; 4] = ["mousedown", "touchstart", "mouseup", "touchend"];

/// Map a DOM event type to its phase and source
pub fn pointer_kind(ty: &str) -> Option<(PointerPhase, PointerSource)> {
    match ty {
        "mousedown" => Some((PointerPhase::Down, PointerSource::Mouse)),
        "touchstart" => Some((PointerPhase::Down, PointerSource::Touch)),
        "mouseup" => Some((PointerPhase::Up, PointerSource::Mouse)),
        "touchend" => Some((PointerPhase::Up, PointerSource::Touch)),
        _ => None,
    }
}

/// A raw pointer or touch event on a named element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointerEvent {
    pub element_id: String,
    pub phase: PointerPhase,
    pub source: PointerSource,
}

impl PointerEvent {
    pub fn new(element_id: impl Into<String>, phase: PointerPhase, source: PointerSource) -> Self {
        Self {
            element_id: element_id.into(),
            phase,
            source,
        }
    }

    /// Build from a DOM event type; `None` for types we do not listen to
    pub fn from_dom_type(element_id: impl Into<String>, ty: &str) -> Option<Self> {
        pointer_kind(ty).map(|(phase, source)| Self::new(element_id, phase, source))
    }
}
