//! Abstract draw commands
//!
//! The game core never touches pixels: it names a sprite handle and a
//! game-space position, and a backend decides what that looks like.
//! `draw_image`/`draw_text` buffer into the current frame in call order;
//! `present` commits the frame.

pub mod terminal;

pub use terminal::TerminalRenderer;

use anyhow::Result;

/// Opaque handle for the images the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteId {
    Background,
    Player,
    Enemy,
    Goal,
}

/// Frame-oriented render target
pub trait Renderer {
    fn draw_image(&mut self, sprite: SpriteId, x: f32, y: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    fn present(&mut self) -> Result<()>;
}
