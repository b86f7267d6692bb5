//! Terminal cell-buffer renderer
//!
//! Maps the game space onto the terminal grid: sprites become colored cell
//! rectangles, text becomes styled characters. Frames are composed in an
//! off-screen buffer and flushed on `present`. The terminal is restored on
//! drop.

use std::io::{self, Stdout, Write};

use anyhow::{Context, Result, bail};
use crossterm::style::Color;
use crossterm::{cursor, execute, queue, style, terminal};

use super::{Renderer, SpriteId};
use crate::consts::{SCREEN_TITLE, SPRITE_SIZE};

/// Minimum terminal footprint the playfield is legible at
const MIN_COLS: u16 = 40;
const MIN_ROWS: u16 = 20;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    fg: Color::Reset,
};

/// Map a game-space coordinate onto a cell index along one axis
fn to_cell(v: f32, span: f32, cells: u16) -> i32 {
    (v / span * cells as f32).floor() as i32
}

pub struct TerminalRenderer {
    out: Stdout,
    cols: u16,
    rows: u16,
    width: f32,
    height: f32,
    cells: Vec<Cell>,
}

impl TerminalRenderer {
    /// Take over the terminal: raw mode, alternate screen, hidden cursor.
    ///
    /// Fails fast if the terminal is unusable; there is no degraded mode.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let (cols, rows) = terminal::size().context("Failed to query terminal size")?;
        if cols < MIN_COLS || rows < MIN_ROWS {
            bail!("Terminal too small: need at least {MIN_COLS}x{MIN_ROWS}, have {cols}x{rows}");
        }

        let mut out = io::stdout();
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            terminal::SetTitle(SCREEN_TITLE),
            cursor::Hide,
        )
        .context("Failed to set up terminal")?;

        Ok(Self {
            out,
            cols,
            rows,
            width,
            height,
            cells: vec![BLANK; cols as usize * rows as usize],
        })
    }

    fn glyph(sprite: SpriteId) -> Cell {
        match sprite {
            SpriteId::Background => Cell {
                ch: '.',
                fg: Color::DarkGrey,
            },
            SpriteId::Player => Cell {
                ch: '@',
                fg: Color::Green,
            },
            SpriteId::Enemy => Cell {
                ch: 'x',
                fg: Color::Red,
            },
            SpriteId::Goal => Cell {
                ch: '$',
                fg: Color::Yellow,
            },
        }
    }

    fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if col >= 0 && row >= 0 && (col as u16) < self.cols && (row as u16) < self.rows {
            self.cells[row as usize * self.cols as usize + col as usize] = cell;
        }
    }

    fn fill_rect(&mut self, col: i32, row: i32, w: i32, h: i32, cell: Cell) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(col + dx, row + dy, cell);
            }
        }
    }
}

impl Renderer for TerminalRenderer {
    fn draw_image(&mut self, sprite: SpriteId, x: f32, y: f32) {
        let cell = Self::glyph(sprite);
        if sprite == SpriteId::Background {
            self.fill_rect(0, 0, self.cols as i32, self.rows as i32, cell);
            return;
        }
        // Every sprite image is a SPRITE_SIZE square in game space
        let col = to_cell(x, self.width, self.cols);
        let row = to_cell(y, self.height, self.rows);
        let w = (to_cell(x + SPRITE_SIZE, self.width, self.cols) - col).max(1);
        let h = (to_cell(y + SPRITE_SIZE, self.height, self.rows) - row).max(1);
        self.fill_rect(col, row, w, h, cell);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        let col = to_cell(x, self.width, self.cols);
        let row = to_cell(y, self.height, self.rows);
        for (i, ch) in text.chars().enumerate() {
            self.set(
                col + i as i32,
                row,
                Cell {
                    ch,
                    fg: Color::White,
                },
            );
        }
    }

    fn present(&mut self) -> Result<()> {
        let mut current_fg = None;
        for row in 0..self.rows {
            queue!(self.out, cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let cell = self.cells[row as usize * self.cols as usize + col as usize];
                if current_fg != Some(cell.fg) {
                    queue!(self.out, style::SetForegroundColor(cell.fg))?;
                    current_fg = Some(cell.fg);
                }
                queue!(self.out, style::Print(cell.ch))?;
            }
        }
        queue!(self.out, style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
