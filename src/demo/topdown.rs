//! Top-down movement demo
//!
//! An eight-way walker driven by WASD/arrow codes and on-screen arrow
//! buttons. Movement binds to physical codes; pause and start bind to
//! localized keys so holding P never re-toggles pause when a movement key
//! is released.

use glam::Vec2;

use crate::input::{BindingId, Handlers, InputDispatcher};
use crate::state::{GamePhase, PhaseEvent, PhaseStack};

/// Pixels per frame at unit velocity
pub const WALK_SPEED: f32 = 1.0;

/// Facing derived from the velocity signs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Facing for a velocity (screen coordinates, y down). Standing still
    /// faces up.
    pub fn from_velocity(vel: Vec2) -> Self {
        let sx = sign(vel.x);
        let sy = sign(vel.y);
        match (sx, sy) {
            (-1, -1) => Direction::UpLeft,
            (0, -1) => Direction::Up,
            (1, -1) => Direction::UpRight,
            (1, 0) => Direction::Right,
            (1, 1) => Direction::DownRight,
            (0, 1) => Direction::Down,
            (-1, 1) => Direction::DownLeft,
            (-1, 0) => Direction::Left,
            _ => Direction::Up,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::UpRight => "up-right",
            Direction::Right => "right",
            Direction::DownRight => "down-right",
            Direction::Down => "down",
            Direction::DownLeft => "down-left",
            Direction::Left => "left",
            Direction::UpLeft => "up-left",
        }
    }
}

fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// The player character
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    pub fn facing(&self) -> Direction {
        Direction::from_velocity(self.vel)
    }

    /// Advance by `delta` frames
    pub fn step(&mut self, delta: f32) {
        self.pos += self.vel * WALK_SPEED * delta;
    }
}

/// Everything the demo's callbacks touch
#[derive(Debug, Clone, Default)]
pub struct TopDown {
    pub player: Player,
    pub phases: PhaseStack,
}

impl TopDown {
    pub fn new(start: Vec2) -> Self {
        Self {
            player: Player::new(start),
            phases: PhaseStack::new(GamePhase::MainMenu),
        }
    }

    pub fn phase(&self) -> Option<GamePhase> {
        self.phases.current()
    }

    /// One frame of the loop: only moves while playing
    pub fn update(&mut self, delta: f32) {
        if self.phase() == Some(GamePhase::Playing) {
            self.player.step(delta);
        }
    }
}

/// Movement axis a binding drives
#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

fn axis_handlers(axis: Axis, value: f32) -> Handlers<TopDown> {
    Handlers::new()
        .on_press(move |game: &mut TopDown| match axis {
            Axis::X => game.player.vel.x = value,
            Axis::Y => game.player.vel.y = value,
        })
        .on_release(move |game: &mut TopDown| match axis {
            Axis::X => game.player.vel.x = 0.0,
            Axis::Y => game.player.vel.y = 0.0,
        })
}

const MOVEMENT: [(&str, &str, &str, Axis, f32); 4] = [
    ("KeyW", "ArrowUp", "uparrow", Axis::Y, -1.0),
    ("KeyS", "ArrowDown", "downarrow", Axis::Y, 1.0),
    ("KeyA", "ArrowLeft", "leftarrow", Axis::X, -1.0),
    ("KeyD", "ArrowRight", "rightarrow", Axis::X, 1.0),
];

/// Wire the demo controls into `input`. Returns how many bindings the
/// configured domain accepted.
pub fn bind_controls(input: &mut InputDispatcher<TopDown>) -> usize {
    let mut bound = 0;
    for (letter, arrow, button, axis, value) in MOVEMENT {
        for id in [
            BindingId::code(letter),
            BindingId::code(arrow),
            BindingId::element(button),
        ] {
            bound += usize::from(input.register(id, axis_handlers(axis, value)));
        }
    }

    bound += usize::from(input.register(
        BindingId::key("p"),
        Handlers::new().on_press(|game: &mut TopDown| {
            game.phases.apply(PhaseEvent::TogglePause);
        }),
    ));
    // Escape is outside the default domain; hosts opt in through the config
    bound += usize::from(input.register(
        BindingId::key("Escape"),
        Handlers::new().on_press(|game: &mut TopDown| {
            game.phases.apply(PhaseEvent::TogglePause);
        }),
    ));
    bound += usize::from(input.register(
        BindingId::key("Enter"),
        Handlers::new().on_press(|game: &mut TopDown| {
            game.phases.apply(PhaseEvent::Start);
        }),
    ));
    bound
}

/// Debug text: position, facing, phase and the held code stack
pub fn debug_line(game: &TopDown, input: &InputDispatcher<TopDown>) -> String {
    let phase = match game.phase() {
        Some(phase) => format!("{:?}", phase),
        None => "Stopped".to_string(),
    };
    format!(
        "x: {:.0}, y: {:.0}, facing: {}, phase: {}, eventStack: [{}]",
        game.player.pos.x,
        game.player.pos.y,
        game.player.facing().as_str(),
        phase,
        input.active_codes().join(", ")
    )
}
