//! Crossy entry point
//!
//! Wires the terminal backend to the game session. Any setup failure is
//! fatal: print the error chain and exit nonzero.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};

use crossy::platform::{CrosstermInput, FrameClock};
use crossy::renderer::TerminalRenderer;
use crossy::{Session, Settings};

const USAGE: &str = "crossy [--settings <settings.json>]";

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let settings = match parse_args()? {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    log::info!(
        "Crossy starting ({}x{} at {} ticks/s)",
        settings.width,
        settings.height,
        settings.tick_rate,
    );

    let renderer = TerminalRenderer::new(settings.width, settings.height)?;
    let input = CrosstermInput::new()?;
    let pacer = FrameClock::new();

    Session::new(settings, renderer, input, pacer).run()
}

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None => Ok(None),
        Some("--settings") => {
            let path = args.next().context(USAGE)?;
            Ok(Some(PathBuf::from(path)))
        }
        Some(_) => bail!("Usage: {USAGE}"),
    }
}
