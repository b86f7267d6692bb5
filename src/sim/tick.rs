//! Per-tick level update
//!
//! Advances every entity one step, then evaluates the outcome. Movement
//! always completes before any collision check, and the goal check takes
//! priority over the enemy checks.

use super::collision::overlaps;
use super::state::{Direction, Level, Outcome};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Vertical heading from the currently held key
    pub heading: Direction,
}

/// Advance the level by one tick and report the outcome.
pub fn tick(level: &mut Level, input: &TickInput) -> Outcome {
    let (width, height) = (level.width, level.height);

    level.player.advance(input.heading, height);
    for enemy in level.active_enemies_mut() {
        enemy.advance(width);
    }

    if overlaps(&level.player.body, &level.goal.body) {
        return Outcome::Win;
    }
    for enemy in level.active_enemies() {
        if overlaps(&level.player.body, &enemy.body) {
            return Outcome::Lose;
        }
    }
    Outcome::Ongoing
}
