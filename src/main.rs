//! Terminal Snake runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from
//! `tui_snake::term` (no widget/layout library).
//!
//! The engine has no clock of its own: this loop owns the schedule. It polls
//! input until the next tick is due, then applies the buffered actions and
//! advances the game exactly one step.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};

use tui_snake::config::AppConfig;
use tui_snake::core::{GameSnapshot, GameState};
use tui_snake::input::{should_quit, InputHandler};
use tui_snake::term::{FrameBuffer, GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_snake::types::{TickEvent, GAME_OVER_REDRAW_MS};

const WINDOW_TITLE: &str = "Snake";

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_logging(config.log_path.as_deref())?;

    let seed = config.seed.unwrap_or_else(rand::random::<u32>);
    info!(
        "starting: grid {}x{} tick {}ms seed {}",
        config.grid.width, config.grid.height, config.tick_ms, seed
    );

    let mut term = TerminalRenderer::new();
    term.enter(WINDOW_TITLE)?;

    let result = run(&mut term, &config, seed);

    // Always try to restore terminal state.
    if let Err(e) = term.exit() {
        warn!("failed to restore terminal: {:#}", e);
    }
    if let Err(e) = &result {
        warn!("exiting with error: {:#}", e);
    }
    result
}

/// Install a file logger when `path` is set.
///
/// The terminal is in raw mode on the alternate screen, so log lines never go
/// to stdout or stderr. Without a path no logger is installed.
fn init_logging(path: Option<&str>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("cannot create log file {}", path))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, seed: u32) -> Result<()> {
    let mut game = GameState::new(config.grid, seed);
    let view = GameView::new(config.cell_w, config.cell_h);
    let mut input = InputHandler::new();
    let mut throttle = RenderThrottle::new(GAME_OVER_REDRAW_MS);

    let mut reported_drops = 0u32;

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, snap.fingerprint(), snap.game_over()) {
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }
        // The snake stands still while the field is replaced by the size notice.
        let field_visible = view.layout(&snap, viewport).fits(viewport);

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        info!(
                            "quit: episode {} score {} best {}",
                            game.episode_id(),
                            game.score(),
                            game.best_score()
                        );
                        return Ok(());
                    }
                    input.handle_key_event(key);
                }
                Event::Resize(w, h) => {
                    debug!("terminal resized to {}x{}", w, h);
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if !field_visible {
                continue;
            }

            for action in input.drain() {
                game.apply_action(action);
            }
            if input.dropped() != reported_drops {
                debug!(
                    "input buffer full: {} action(s) dropped this tick",
                    input.dropped().wrapping_sub(reported_drops)
                );
                reported_drops = input.dropped();
            }
            game.tick();

            if let Some(TickEvent::GameOver { score, .. }) = game.take_last_event() {
                debug!("waiting for restart, final score {}", score);
            }
        }
    }
}
