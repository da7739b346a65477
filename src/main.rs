//! Terminal falling-block puzzle (default binary).
//!
//! Crossterm drives input, the framebuffer renderer draws, and the engine
//! advances on a fixed tick.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use tui_blocks::config::{Args, GameConfig};
use tui_blocks::core::{GameSnapshot, GameState};
use tui_blocks::input::{command_for_event, should_quit};
use tui_blocks::session_log::{EventRecord, SessionLog};
use tui_blocks::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = GameConfig::from_env().with_args(Args::parse());
    let seed = config.resolve_seed();

    // Open the log before taking over the terminal so errors print normally.
    let mut log = match &config.log_path {
        Some(path) => Some(SessionLog::open(path)?),
        None => None,
    };

    let mut game = GameState::new(seed);
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &config, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(log) = log.as_mut() {
        log.flush();
    }
    result?;

    println!(
        "[Session] seed={} score={} lines={} pieces={}",
        game.seed(),
        game.score(),
        game.lines(),
        game.pieces()
    );
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    config: &GameConfig,
    mut log: Option<&mut SessionLog>,
) -> Result<()> {
    let started_at = Instant::now();
    if let Some(log) = log.as_deref_mut() {
        log.record(&EventRecord::Started {
            ts_ms: 0,
            seed: game.seed(),
        });
    }
    game.start();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = command_for_event(key) {
                        game.apply_command(command);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        let ts_ms = started_at.elapsed().as_millis() as u64;
        match log.as_deref_mut() {
            Some(log) => {
                for event in game.drain_events() {
                    log.record_event(event, ts_ms);
                }
            }
            None => game.drain_events().for_each(drop),
        }
    }
}
