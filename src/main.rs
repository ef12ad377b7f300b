//! Terminal runner (default binary).
//!
//! Polls crossterm for key events between ticks, feeds them through the key
//! inbox, and advances the game once per frame.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::core::{Game, GameSnapshot};
use blockfall::input::{KeyInbox, TerminalKeys, UiCommand};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Piece generator seed (defaults to one derived from the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Show the starting board index of every row
    #[arg(long)]
    debug: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Milliseconds per game tick
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, frame_ms = args.frame_ms, "starting");

    let mut term = TerminalRenderer::new();
    let reports_release = term.enter().context("set up terminal")?;

    let result = run(&mut term, &args, seed, reports_release);

    // Always try to restore terminal state.
    let restored = term.exit();
    result.and(restored)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("blockfall=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, args: &Args, seed: u32, reports_release: bool) -> Result<()> {
    let mut game = Game::new(seed);
    let inbox = KeyInbox::new();
    let keys = TerminalKeys::new(reports_release);
    info!(reports_release = keys.reports_release(), "keyboard ready");

    let view = GameView::default().with_debug(args.debug);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(args.frame_ms);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().context("query terminal size")?;
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout).context("poll terminal events")? {
            match event::read().context("read terminal event")? {
                Event::Key(key) => match keys.handle(&inbox, game.mode(), key) {
                    Some(UiCommand::Quit) => return Ok(()),
                    Some(UiCommand::Start) => {
                        inbox.clear();
                        game.start();
                        dirty = true;
                    }
                    None => {}
                },
                Event::Resize(..) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            let outcome = game.tick(&inbox.drain());
            dirty |= outcome.redraw_board || outcome.redraw_piece;
        }
    }
}
