//! Bindings and the per-domain binding table

use std::fmt;

/// A press or release callback. Receives the consumer's state explicitly.
pub type Callback<C> = Box<dyn FnMut(&mut C)>;

/// Press/release callbacks for one logical control
pub struct Handlers<C> {
    on_press: Option<Callback<C>>,
    on_release: Option<Callback<C>>,
}

impl<C> Default for Handlers<C> {
    fn default() -> Self {
        Self {
            on_press: None,
            on_release: None,
        }
    }
}

impl<C> Handlers<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the callback fired when the control goes down
    pub fn on_press(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    /// Set the callback fired when the control comes back up
    pub fn on_release(mut self, f: impl FnMut(&mut C) + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    pub fn has_press(&self) -> bool {
        self.on_press.is_some()
    }

    pub fn has_release(&self) -> bool {
        self.on_release.is_some()
    }
}

impl<C> fmt::Debug for Handlers<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("on_press", &self.has_press())
            .field("on_release", &self.has_release())
            .finish()
    }
}

/// One logical control and its pressed/released state
#[derive(Debug)]
pub struct Binding<C> {
    pub id: String,
    pub handlers: Handlers<C>,
    pressed: bool,
}

impl<C> Binding<C> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            handlers: Handlers::default(),
            pressed: false,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Mark pressed and fire `on_press`. Returns whether a callback ran.
    pub fn press(&mut self, ctx: &mut C) -> bool {
        self.pressed = true;
        self.fire_press(ctx)
    }

    /// Mark released and fire `on_release`. Returns whether a callback ran.
    pub fn release(&mut self, ctx: &mut C) -> bool {
        self.pressed = false;
        match self.handlers.on_release.as_mut() {
            Some(f) => {
                f(ctx);
                true
            }
            None => false,
        }
    }

    /// Fire `on_press` without touching the pressed state
    pub fn fire_press(&mut self, ctx: &mut C) -> bool {
        match self.handlers.on_press.as_mut() {
            Some(f) => {
                f(ctx);
                true
            }
            None => false,
        }
    }

    /// Drop back to released without firing anything
    pub fn clear(&mut self) {
        self.pressed = false;
    }
}

/// Bindings over a domain of ids fixed at construction.
///
/// Domains are a handful of keys or buttons, so lookup is a linear scan that
/// keeps the configured order.
#[derive(Debug)]
pub struct BindingTable<C> {
    bindings: Vec<Binding<C>>,
}

impl<C> BindingTable<C> {
    /// Build a table accepting exactly `ids` (duplicates collapse)
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut bindings: Vec<Binding<C>> = Vec::new();
        for id in ids {
            let id = id.into();
            if !bindings.iter().any(|b| b.id == id) {
                bindings.push(Binding::new(id));
            }
        }
        Self { bindings }
    }

    /// Whether `id` belongs to the domain
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Store handlers for `id`. Ids outside the domain are ignored and
    /// return `false`.
    pub fn register(&mut self, id: &str, handlers: Handlers<C>) -> bool {
        match self.get_mut(id) {
            Some(binding) => {
                binding.handlers = handlers;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&Binding<C>> {
        self.bindings.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Binding<C>> {
        self.bindings.iter_mut().find(|b| b.id == id)
    }

    /// Ids in configured order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.id.as_str())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Binding<C>> {
        self.bindings.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
