//! Input and pacing abstractions
//!
//! The game loop drains a non-blocking event source once per tick and lets
//! a pacer block out the remainder of each frame. Terminal-backed
//! implementations live in `terminal`; tests substitute scripted fakes.

pub mod terminal;

pub use terminal::{CrosstermInput, FrameClock};

use anyhow::Result;

/// Directional keys the game responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

/// A discrete input event observed since the previous poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Non-blocking source of input events, drained once per tick
pub trait InputSource {
    fn poll(&mut self) -> Result<Vec<InputEvent>>;
}

/// Blocks until the next frame boundary at `rate` ticks/second
pub trait Pacer {
    fn tick(&mut self, rate: u32);
}
