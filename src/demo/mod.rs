//! Playable demos built on the input dispatcher

pub mod topdown;

pub use topdown::{Direction, Player, TopDown, bind_controls, debug_line};
