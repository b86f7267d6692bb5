//! The game loop
//!
//! Collects input, ticks the level, issues draw commands, and reacts to the
//! outcome. Difficulty progression is an explicit outer loop over the tier
//! counter; each tier rebuilds the level from scratch.

use anyhow::Result;

use crate::consts::{MESSAGE_X, MESSAGE_Y};
use crate::platform::{InputEvent, InputSource, Key, Pacer};
use crate::renderer::{Renderer, SpriteId};
use crate::settings::Settings;
use crate::sim::{Direction, Level, Outcome, TickInput, tick};

const WIN_TEXT: &str = "You win! :)";
const LOSE_TEXT: &str = "You lose! :(";

/// How one tier ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelEnd {
    Won,
    Lost,
    Quit,
}

/// Owns the collaborators and drives the loop until the player loses or
/// quits. A win advances to the next tier with no upper bound.
pub struct Session<R, I, P> {
    settings: Settings,
    renderer: R,
    input: I,
    pacer: P,
    /// Currently held directional key; cleared only by its own release
    heading: Direction,
}

impl<R: Renderer, I: InputSource, P: Pacer> Session<R, I, P> {
    pub fn new(settings: Settings, renderer: R, input: I, pacer: P) -> Self {
        Self {
            settings,
            renderer,
            input,
            pacer,
            heading: Direction::Neutral,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tier = 1;
        loop {
            log::info!("Starting tier {tier}");
            match self.play_level(tier)? {
                LevelEnd::Won => tier += 1,
                LevelEnd::Lost => {
                    log::info!("Lost at tier {tier}");
                    return Ok(());
                }
                LevelEnd::Quit => {
                    log::info!("Quit at tier {tier}");
                    return Ok(());
                }
            }
        }
    }

    fn play_level(&mut self, tier: u32) -> Result<LevelEnd> {
        let mut level = Level::new(&self.settings, tier);
        // Each tier starts with no key considered held
        self.heading = Direction::Neutral;
        loop {
            // Quit takes effect before this tick's render
            if self.drain_input()? {
                return Ok(LevelEnd::Quit);
            }

            let outcome = tick(
                &mut level,
                &TickInput {
                    heading: self.heading,
                },
            );

            self.renderer.draw_image(SpriteId::Background, 0.0, 0.0);
            level.draw(&mut self.renderer);

            match outcome {
                Outcome::Ongoing => {
                    self.renderer.present()?;
                    self.pacer.tick(self.settings.tick_rate);
                }
                Outcome::Win => {
                    self.renderer.draw_text(WIN_TEXT, MESSAGE_X, MESSAGE_Y);
                    self.renderer.present()?;
                    self.pacer.tick(self.settings.settle_rate);
                    return Ok(LevelEnd::Won);
                }
                Outcome::Lose => {
                    self.renderer.draw_text(LOSE_TEXT, MESSAGE_X, MESSAGE_Y);
                    self.renderer.present()?;
                    self.pacer.tick(self.settings.settle_rate);
                    return Ok(LevelEnd::Lost);
                }
            }
        }
    }

    /// Apply pending input events. Returns true on a quit signal.
    ///
    /// A release resets the heading only when it matches the held key, so
    /// releasing the opposite arrow mid-hold does not stop movement.
    fn drain_input(&mut self) -> Result<bool> {
        for event in self.input.poll()? {
            match event {
                InputEvent::Quit => return Ok(true),
                InputEvent::KeyDown(Key::Up) => self.heading = Direction::Up,
                InputEvent::KeyDown(Key::Down) => self.heading = Direction::Down,
                InputEvent::KeyUp(key) => {
                    if held_key(self.heading) == Some(key) {
                        self.heading = Direction::Neutral;
                    }
                }
            }
        }
        Ok(false)
    }
}

fn held_key(heading: Direction) -> Option<Key> {
    match heading {
        Direction::Up => Some(Key::Up),
        Direction::Down => Some(Key::Down),
        Direction::Neutral => None,
    }
}
