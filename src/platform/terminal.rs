//! Crossterm-backed input polling and frame pacing

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};

use super::{InputEvent, InputSource, Key, Pacer};

/// Drains pending crossterm events without blocking.
///
/// Arrow keys map to `KeyDown`/`KeyUp`; `q`, Esc, and Ctrl-C all quit.
/// Key releases are only delivered by terminals with the keyboard
/// enhancement protocol; elsewhere movement persists until an opposing
/// key is pressed.
pub struct CrosstermInput {
    enhanced: bool,
}

impl CrosstermInput {
    /// Enable key-release reporting where the terminal supports it.
    pub fn new() -> Result<Self> {
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            log::warn!("Terminal does not report key releases; movement stops on an opposing key");
        }
        Ok(Self { enhanced })
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                events.extend(map_key(key));
            }
        }
        Ok(events)
    }
}

impl Drop for CrosstermInput {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// Translate one terminal key event into a game input event
fn map_key(key: KeyEvent) -> Option<InputEvent> {
    let dir = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            return (key.kind != KeyEventKind::Release).then_some(InputEvent::Quit);
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return (key.kind != KeyEventKind::Release).then_some(InputEvent::Quit);
        }
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    };
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => Some(InputEvent::KeyDown(dir)),
        KeyEventKind::Release => Some(InputEvent::KeyUp(dir)),
    }
}

/// Sleeps out the remainder of each frame at the requested rate.
///
/// The deadline is measured from the previous tick boundary, so a single
/// rate-1 settle tick after a run of rate-60 ticks pauses close to a full
/// second.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for FrameClock {
    fn tick(&mut self, rate: u32) {
        let frame = Duration::from_secs(1) / rate.max(1);
        let deadline = self.last + frame;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.last = Instant::now();
    }
}
