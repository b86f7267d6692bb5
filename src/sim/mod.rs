//! Deterministic gameplay module
//!
//! All behavioral rules live here:
//! - Fixed per-tick movement steps, no wall-clock time
//! - Stable roster order (collision checks walk the slots in order)
//! - No platform or pixel-level dependencies; drawing is expressed through
//!   the abstract `Renderer` commands
pub mod collision;
pub mod state;
pub mod tick;

pub use collision::overlaps;
pub use state::{Body, Direction, Goal, Level, Outcome, Patroller, Player};
pub use tick::{TickInput, tick};
