//! Browser glue: DOM listeners feeding an [`InputHost`]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, KeyboardEvent};

use super::{InputHost, RawInput, feed, release_all};
use crate::error::{InputError, Result};
use crate::input::event::POINTER_EVENT_TYPES;
use crate::input::{KeyEvent, KeyPhase, PointerEvent};

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Attached DOM listeners. Dropping this detaches them; call
/// [`Listeners::forget`] to keep them for the lifetime of the page.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    fn add(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
        options: Option<&AddEventListenerOptions>,
    ) -> Result<()> {
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let added = match options {
            Some(opts) => target
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event, callback, opts,
                ),
            None => target.add_event_listener_with_callback(event, callback),
        };
        added.map_err(|e| InputError::listener(event, format!("{:?}", e)))?;

        self.entries.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Leak the closures so the listeners stay attached
    pub fn forget(mut self) {
        for listener in self.entries.drain(..) {
            listener.closure.forget();
        }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for listener in self.entries.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

fn document() -> Result<Document> {
    let window = web_sys::window().ok_or(InputError::NoWindow)?;
    window.document().ok_or(InputError::NoDocument)
}

fn key_event(phase: KeyPhase, event: &KeyboardEvent) -> KeyEvent {
    KeyEvent {
        phase,
        key: event.key(),
        code: event.code(),
        repeat: event.repeat(),
    }
}

/// Attach keyboard listeners on the document and mouse/touch listeners on
/// every configured clickable element.
///
/// Calling this twice attaches twice; callers attach once per host.
pub fn attach<H: InputHost>(host: Rc<RefCell<H>>) -> Result<Listeners> {
    let document = document()?;
    let (prevent_default, element_ids) = {
        let mut h = host.borrow_mut();
        let (input, _) = h.input_parts();
        let ids: Vec<String> = input.element_ids().map(String::from).collect();
        (input.prevent_default(), ids)
    };

    let mut listeners = Listeners::default();

    // Keyboard
    let doc_target: &EventTarget = document.as_ref();
    for phase in [KeyPhase::Down, KeyPhase::Up] {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if prevent_default {
                event.prevent_default();
            }
            let raw = RawInput::Key(key_event(phase, event));
            feed(&mut *host.borrow_mut(), &raw);
        });
        listeners.add(doc_target, phase.dom_type(), closure, None)?;
    }

    // Mouse and touch on clickable elements
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    for id in element_ids {
        let Some(element) = document.get_element_by_id(&id) else {
            log::warn!("Clickable element '{}' not found, skipping", id);
            continue;
        };
        let target: &EventTarget = element.as_ref();
        for ty in POINTER_EVENT_TYPES {
            let host = host.clone();
            let id = id.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                // Stops the emulated mouse events that follow a touch
                if prevent_default && ty.starts_with("touch") {
                    event.prevent_default();
                }
                if let Some(pointer) = PointerEvent::from_dom_type(id.as_str(), ty) {
                    feed(&mut *host.borrow_mut(), &RawInput::Pointer(pointer));
                }
            });
            listeners.add(target, ty, closure, Some(&opts))?;
        }
    }

    log::info!("Input attached ({} listeners)", listeners.len());
    Ok(listeners)
}

/// Release every held control when the window loses focus, since the
/// matching keyup events go to another window.
pub fn attach_focus_guard<H: InputHost>(
    host: Rc<RefCell<H>>,
    listeners: &mut Listeners,
) -> Result<()> {
    let window = web_sys::window().ok_or(InputError::NoWindow)?;
    let target: &EventTarget = window.as_ref();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
        release_all(&mut *host.borrow_mut());
        log::info!("Released held input (window blur)");
    });
    listeners.add(target, "blur", closure, None)
}
