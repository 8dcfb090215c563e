//! Keyboard press/release with overlapping-press resolution
//!
//! Each identity space (localized key, physical code) gets its own
//! [`KeyTrack`]: a binding table plus the stack of held bindings. Releasing
//! a key re-fires `on_press` for everything still held, oldest first, so the
//! most recent surviving press ends up winning. Holding left, then right,
//! then letting go of right restores leftward motion.

use super::binding::{BindingTable, Handlers};
use super::stack::ActiveStack;

/// Binding table and held stack for one identity space
#[derive(Debug)]
pub struct KeyTrack<C> {
    name: &'static str,
    table: BindingTable<C>,
    stack: ActiveStack,
}

impl<C> KeyTrack<C> {
    pub fn new<I, S>(name: &'static str, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name,
            table: BindingTable::new(ids),
            stack: ActiveStack::new(),
        }
    }

    pub fn register(&mut self, id: &str, handlers: Handlers<C>) -> bool {
        self.table.register(id, handlers)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.table.contains(id)
    }

    pub fn is_pressed(&self, id: &str) -> bool {
        self.table.get(id).is_some_and(|b| b.is_pressed())
    }

    /// Held ids, oldest first
    pub fn stack(&self) -> &ActiveStack {
        &self.stack
    }

    /// Handle a non-repeat down edge for `id`
    pub fn press(&mut self, id: &str, ctx: &mut C) {
        let Some(binding) = self.table.get_mut(id) else {
            return;
        };
        if !binding.press(ctx) {
            return;
        }
        if !self.stack.push(id) {
            log::trace!("{} '{}' pressed while already held", self.name, id);
        }
        log::trace!("{} '{}' down, held {:?}", self.name, id, self.stack.as_slice());
    }

    /// Handle a non-repeat up edge for `id`
    pub fn release(&mut self, id: &str, ctx: &mut C) {
        let Some(binding) = self.table.get_mut(id) else {
            return;
        };
        // An up edge for a key we never saw go down changes nothing.
        if !binding.is_pressed() {
            return;
        }
        let fired = binding.release(ctx);
        self.stack.remove(id);
        if !fired {
            return;
        }

        for held in self.stack.iter() {
            if let Some(binding) = self.table.get_mut(held) {
                binding.fire_press(ctx);
            }
        }
        log::trace!("{} '{}' up, held {:?}", self.name, id, self.stack.as_slice());
    }

    /// Release everything held, newest first, without re-pressing
    pub fn release_all(&mut self, ctx: &mut C) {
        let held = self.stack.drain();
        for id in held.iter().rev() {
            if let Some(binding) = self.table.get_mut(id) {
                binding.release(ctx);
            }
        }
        // Down but never stacked (no press handler)
        for binding in self.table.iter_mut().filter(|b| b.is_pressed()) {
            binding.release(ctx);
        }
    }

    /// Forget all held state without firing callbacks
    pub fn reset(&mut self) {
        self.stack.clear();
        for binding in self.table.iter_mut() {
            binding.clear();
        }
    }
}
