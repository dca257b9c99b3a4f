//! Terminal Blockfall runner (default binary).
//!
//! Pumps crossterm events and a fixed 16ms tick into [`App`], which owns
//! every screen; rendering goes through the diffing framebuffer renderer
//! (no widget toolkit).

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::app::App;
use blockfall::store;
use blockfall::term::game_view::Viewport;
use blockfall::term::{FrameBuffer, TerminalRenderer};
use blockfall::types::{Difficulty, TICK_MS};

/// Falling-block puzzle for the terminal.
#[derive(Parser)]
#[command(name = "blockfall", about = "Falling-block puzzle for the terminal")]
struct Cli {
    /// Seed for the piece sequence (defaults to system entropy)
    #[arg(long)]
    seed: Option<u32>,

    /// Difficulty for this run, overriding the saved setting:
    /// easy, medium, hard or expert
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<Difficulty>,

    /// Directory for settings, high scores and statistics
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s)
        .ok_or_else(|| format!("unknown difficulty '{s}' (expected easy, medium, hard or expert)"))
}

fn entropy_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0x5EED)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = cli.data_dir.unwrap_or_else(store::default_data_dir);
    let seed = cli.seed.unwrap_or_else(entropy_seed);
    let mut app = App::new(seed, cli.difficulty, &data_dir);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App) -> Result<()> {
    let mut fb = FrameBuffer::new(80, 24);
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render_into(Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => app.key_press(key),
                    KeyEventKind::Release => app.key_release(key),
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; DAS/ARR repeats internally.
                    }
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}
