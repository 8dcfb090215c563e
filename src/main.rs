//! Keystack demo entry point
//!
//! Handles platform-specific initialization and runs the top-down demo.

use glam::Vec2;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use keystack::InputConfig;
use keystack::demo::{TopDown, bind_controls, debug_line};
use keystack::input::InputDispatcher;
use keystack::platform::InputHost;

/// Frame length the demo's speeds are tuned for (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Dispatcher plus the state its callbacks drive
struct Demo {
    input: InputDispatcher<TopDown>,
    game: TopDown,
    last_time: f64,
}

impl InputHost for Demo {
    type Context = TopDown;

    fn input_parts(&mut self) -> (&mut InputDispatcher<TopDown>, &mut TopDown) {
        (&mut self.input, &mut self.game)
    }
}

impl Demo {
    fn new(config: &InputConfig, start: Vec2) -> Self {
        let mut input = InputDispatcher::new(config);
        let bound = bind_controls(&mut input);
        log::info!("Bound {} controls", bound);
        Self {
            input,
            game: TopDown::new(start),
            last_time: 0.0,
        }
    }

    /// Advance one animation frame stamped `time` (ms)
    fn frame(&mut self, time: f64) {
        let delta = if self.last_time > 0.0 {
            ((time - self.last_time) / FRAME_MS) as f32
        } else {
            1.0
        };
        self.last_time = time;
        // Clamp after tab switches so the player doesn't teleport
        self.game.update(delta.min(6.0));
    }

    fn debug(&self) -> String {
        debug_line(&self.game, &self.input)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_demo {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use glam::Vec2;
    use keystack::InputConfig;
    use keystack::error::{InputError, Result};
    use keystack::platform::web;

    use super::Demo;

    pub fn run() -> Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Keystack demo starting...");

        // Write the effective layout back so it can be edited in LocalStorage
        let config = InputConfig::load().with_key("Escape");
        config.save();
        let demo = Rc::new(RefCell::new(Demo::new(&config, Vec2::new(320.0, 240.0))));

        let mut listeners = web::attach(demo.clone())?;
        web::attach_focus_guard(demo.clone(), &mut listeners)?;
        listeners.forget();

        request_animation_frame(demo)?;
        log::info!("Keystack demo running! Press Enter to start, P or Escape to pause");
        Ok(())
    }

    fn request_animation_frame(demo: Rc<RefCell<Demo>>) -> Result<()> {
        let window = web_sys::window().ok_or(InputError::NoWindow)?;
        let closure = Closure::once(move |time: f64| {
            game_loop(demo, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
        Ok(())
    }

    fn game_loop(demo: Rc<RefCell<Demo>>, time: f64) {
        {
            let mut d = demo.borrow_mut();
            d.frame(time);

            let debug = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.get_element_by_id("debug"));
            if let Some(el) = debug {
                el.set_text_content(Some(&d.debug()));
            }
        }

        if let Err(e) = request_animation_frame(demo) {
            log::error!("Game loop stopped: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_demo::run() {
        log::error!("Keystack failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use keystack::KeyEvent;
    use keystack::platform::{RawInput, feed};

    env_logger::init();
    log::info!("Keystack (native) starting...");
    log::info!("Native mode replays a scripted session - run with `trunk serve` for the web demo");

    let config = InputConfig::load().with_key("Escape");
    let mut demo = Demo::new(&config, Vec2::new(320.0, 240.0));
    let script: Vec<RawInput> = vec![
        KeyEvent::down("Enter", "Enter").into(),
        KeyEvent::up("Enter", "Enter").into(),
        KeyEvent::down("ArrowLeft", "ArrowLeft").into(),
        KeyEvent::down("ArrowLeft", "ArrowLeft").repeated().into(),
        KeyEvent::down("ArrowRight", "ArrowRight").into(),
        KeyEvent::up("ArrowRight", "ArrowRight").into(),
        KeyEvent::down("w", "KeyW").into(),
        KeyEvent::up("ArrowLeft", "ArrowLeft").into(),
        KeyEvent::up("w", "KeyW").into(),
        KeyEvent::down("Escape", "Escape").into(),
        KeyEvent::up("Escape", "Escape").into(),
    ];

    let mut time = 0.0;
    for raw in &script {
        feed(&mut demo, raw);
        time += FRAME_MS * 10.0;
        demo.frame(time);
        println!("{:<60} {}", format!("{:?}", raw), demo.debug());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
