//! Game state and entity movement rules
//!
//! Everything here is tick-local single-owner data: a `Level` is built fresh
//! for each difficulty tier and mutated only by the session's loop body.

use glam::Vec2;

use crate::consts::*;
use crate::renderer::{Renderer, SpriteId};
use crate::settings::Settings;

/// Vertical movement command for the player, set by input events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Up,
    Down,
    #[default]
    Neutral,
}

/// Shared positioned/sized body. `pos` is the top-left corner.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub pos: Vec2,
    pub size: Vec2,
    /// Game units per tick. Patrollers encode travel direction in the sign.
    pub speed: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, w: f32, h: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            speed,
        }
    }
}

/// The player-controlled sprite. Moves vertically, clamped to the floor.
#[derive(Debug, Clone)]
pub struct Player {
    pub body: Body,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, SPRITE_SIZE, SPRITE_SIZE, PLAYER_BASE_SPEED),
        }
    }

    /// Apply one tick of vertical movement, then clamp to the bottom edge.
    ///
    /// There is no top-edge clamp; the player can move above y=0.
    pub fn advance(&mut self, heading: Direction, max_height: f32) {
        match heading {
            Direction::Up => self.body.pos.y -= self.body.speed,
            Direction::Down => self.body.pos.y += self.body.speed,
            Direction::Neutral => {}
        }
        let floor = max_height - self.body.size.y;
        if self.body.pos.y >= floor {
            self.body.pos.y = floor;
        }
    }

    pub fn draw<R: Renderer>(&self, r: &mut R) {
        r.draw_image(SpriteId::Player, self.body.pos.x, self.body.pos.y);
    }
}

/// An enemy sprite bouncing horizontally between the screen edges.
#[derive(Debug, Clone)]
pub struct Patroller {
    pub body: Body,
}

impl Patroller {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            body: Body::new(x, y, SPRITE_SIZE, SPRITE_SIZE, speed),
        }
    }

    /// Apply one tick of horizontal movement.
    ///
    /// The boundary test runs every tick, not only at the crossing instant:
    /// anywhere inside an edge band the sign is forced before the step.
    pub fn advance(&mut self, max_width: f32) {
        if self.body.pos.x <= self.body.size.x {
            self.body.speed = self.body.speed.abs();
        } else if self.body.pos.x >= max_width - 2.0 * self.body.size.x {
            self.body.speed = -self.body.speed.abs();
        }
        self.body.pos.x += self.body.speed;
    }

    pub fn draw<R: Renderer>(&self, r: &mut R) {
        r.draw_image(SpriteId::Enemy, self.body.pos.x, self.body.pos.y);
    }
}

/// The static goal sprite the player is trying to reach
#[derive(Debug, Clone)]
pub struct Goal {
    pub body: Body,
}

impl Goal {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            body: Body::new(x, y, SPRITE_SIZE, SPRITE_SIZE, 0.0),
        }
    }

    pub fn draw<R: Renderer>(&self, r: &mut R) {
        r.draw_image(SpriteId::Goal, self.body.pos.x, self.body.pos.y);
    }
}

/// Result of one level tick, computed after movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win,
    Lose,
}

/// One difficulty tier's worth of entities.
///
/// The roster always holds three patrollers; only a tier-dependent prefix is
/// active (moved, drawn, collision-tested).
#[derive(Debug, Clone)]
pub struct Level {
    pub tier: u32,
    pub width: f32,
    pub height: f32,
    pub player: Player,
    pub enemies: [Patroller; 3],
    pub goal: Goal,
}

impl Level {
    /// Build the roster for a tier. Enemy speeds are scaled here, once;
    /// the multiplier is never re-applied during play.
    pub fn new(settings: &Settings, tier: u32) -> Self {
        let (width, height) = (settings.width, settings.height);
        let half = SPRITE_SIZE / 2.0;
        let player = Player::new(width / 2.0 - half, height - PLAYER_BOTTOM_MARGIN);
        let goal = Goal::new(width / 2.0 - half, GOAL_Y);
        let enemies = std::array::from_fn(|slot| {
            let speed = ENEMY_BASE_SPEED * tier as f32 * ENEMY_SLOT_MULTIPLIERS[slot];
            Patroller::new(ENEMY_SPAWN_X, ENEMY_SPAWN_YS[slot], speed)
        });
        Self {
            tier,
            width,
            height,
            player,
            enemies,
            goal,
        }
    }

    /// Number of active roster slots at this tier
    pub fn active_count(&self) -> usize {
        if self.tier > THIRD_ENEMY_TIER {
            3
        } else if self.tier > SECOND_ENEMY_TIER {
            2
        } else {
            1
        }
    }

    /// The prefix of the roster that moves, draws, and collides this tier
    pub fn active_enemies(&self) -> &[Patroller] {
        &self.enemies[..self.active_count()]
    }

    pub fn active_enemies_mut(&mut self) -> &mut [Patroller] {
        let n = self.active_count();
        &mut self.enemies[..n]
    }

    /// Draw player, active enemies, and goal. The caller draws the
    /// background first so sprites land on top.
    pub fn draw<R: Renderer>(&self, r: &mut R) {
        self.player.draw(r);
        for enemy in self.active_enemies() {
            enemy.draw(r);
        }
        self.goal.draw(r);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_player_clamps_to_floor() {
        let mut player = Player::new(100.0, SCREEN_HEIGHT - 55.0);
        player.advance(Direction::Down, SCREEN_HEIGHT);
        assert_eq!(player.body.pos.y, SCREEN_HEIGHT - player.body.size.y);

        // Already on the floor: stays there
        player.advance(Direction::Down, SCREEN_HEIGHT);
        assert_eq!(player.body.pos.y, SCREEN_HEIGHT - player.body.size.y);
    }

    #[test]
    fn test_player_has_no_ceiling() {
        let mut player = Player::new(100.0, 5.0);
        player.advance(Direction::Up, SCREEN_HEIGHT);
        assert_eq!(player.body.pos.y, -5.0);
    }

    #[test]
    fn test_player_neutral_does_not_move() {
        let mut player = Player::new(100.0, 300.0);
        player.advance(Direction::Neutral, SCREEN_HEIGHT);
        assert_eq!(player.body.pos.y, 300.0);
    }

    #[test]
    fn test_patroller_bounces_off_left_band() {
        // Inside the left band the sign is forced positive regardless of
        // the sign it arrived with
        let mut enemy = Patroller::new(30.0, 500.0, -4.0);
        enemy.advance(SCREEN_WIDTH);
        assert_eq!(enemy.body.speed, 4.0);
        assert_eq!(enemy.body.pos.x, 34.0);
    }

    #[test]
    fn test_patroller_bounces_off_right_band() {
        let bound = SCREEN_WIDTH - 2.0 * SPRITE_SIZE;
        let mut enemy = Patroller::new(bound + 1.0, 500.0, 4.0);
        enemy.advance(SCREEN_WIDTH);
        assert_eq!(enemy.body.speed, -4.0);
        assert_eq!(enemy.body.pos.x, bound - 3.0);
    }

    #[test]
    fn test_patroller_keeps_sign_between_bands() {
        let mut enemy = Patroller::new(400.0, 500.0, -4.0);
        enemy.advance(SCREEN_WIDTH);
        assert_eq!(enemy.body.speed, -4.0);
        assert_eq!(enemy.body.pos.x, 396.0);
    }

    #[test]
    fn test_level_roster_prefix_by_tier() {
        let settings = Settings::default();
        assert_eq!(Level::new(&settings, 1).active_count(), 1);
        assert_eq!(Level::new(&settings, 2).active_count(), 1);
        assert_eq!(Level::new(&settings, 3).active_count(), 2);
        assert_eq!(Level::new(&settings, 4).active_count(), 2);
        assert_eq!(Level::new(&settings, 5).active_count(), 3);
        assert_eq!(Level::new(&settings, 9).active_count(), 3);
    }

    #[test]
    fn test_enemy_speed_scaled_once_at_creation() {
        let settings = Settings::default();
        let level = Level::new(&settings, 3);
        assert_eq!(level.enemies[0].body.speed, 10.0 * 3.0 * 0.25);
        assert_eq!(level.enemies[1].body.speed, 10.0 * 3.0 * 0.30);
        assert_eq!(level.enemies[2].body.speed, 10.0 * 3.0 * 0.10);
    }

    proptest! {
        #[test]
        fn player_step_stays_within_one_speed(
            y in -100.0f32..640.0,
            up in proptest::bool::ANY,
        ) {
            let mut player = Player::new(437.0, y);
            let heading = if up { Direction::Up } else { Direction::Down };
            player.advance(heading, SCREEN_HEIGHT);

            let floor = SCREEN_HEIGHT - player.body.size.y;
            prop_assert!(player.body.pos.y <= floor);
            if up {
                prop_assert_eq!(player.body.pos.y, y - PLAYER_BASE_SPEED);
            } else {
                prop_assert!(player.body.pos.y >= y);
                prop_assert!(player.body.pos.y <= y + PLAYER_BASE_SPEED);
            }
        }

        #[test]
        fn patroller_sign_forced_in_left_band(
            x in -20.0f32..=50.0,
            speed in prop_oneof![-8.0f32..-0.1, 0.1f32..8.0],
        ) {
            let mut enemy = Patroller::new(x, 500.0, speed);
            enemy.advance(SCREEN_WIDTH);
            prop_assert!(enemy.body.speed > 0.0);
        }
    }
}
