//! Blockfall terminal runner (default binary).
//!
//! Polls crossterm for input, ticks the session at a fixed step and renders
//! through the framebuffer-based view.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::core::GameSnapshot;
use blockfall::input::{map_key, AutoRepeat, KeyCommand};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{CoreEvent, GameAction, TICK_MS};
use blockfall::{Config, Session};

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(config.log_file.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// Log to a file only; stdout belongs to the game.
fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &Config) -> Result<()> {
    let mut session = Session::from_config(config);
    info!(seed = session.game().seed(), "session created");

    let view = GameView::default();
    let mut repeat = AutoRepeat::with_repeat_ms(config.repeat_ms);
    if term.reports_key_release() {
        repeat = repeat.with_release_events();
    }

    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, session.overlay(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if !handle_key(&mut session, &mut repeat, key) {
                        session.quit();
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if session.is_running() {
                for action in repeat.update(TICK_MS) {
                    session.apply(action);
                }
            }
            session.tick(TICK_MS);

            for event in session.take_events() {
                on_core_event(event, &mut repeat);
            }
        }
    }
}

/// Returns false when the player asked to quit.
fn handle_key(session: &mut Session, repeat: &mut AutoRepeat, key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        repeat.handle_key_release(key.code);
        return true;
    }

    match map_key(key) {
        Some(KeyCommand::Quit) => return false,
        Some(KeyCommand::Action(GameAction::MoveLeft | GameAction::MoveRight)) => {
            if let Some(action) = repeat.handle_key_press(key.code) {
                session.apply(action);
            }
        }
        // Held keys only auto-repeat horizontal movement.
        _ if key.kind == KeyEventKind::Repeat => {}
        Some(KeyCommand::Pause) => {
            session.toggle_pause();
            repeat.reset();
        }
        Some(KeyCommand::Action(action)) => {
            if action == GameAction::Restart {
                repeat.reset();
            }
            session.apply(action);
        }
        None => {}
    }
    true
}

fn on_core_event(event: CoreEvent, repeat: &mut AutoRepeat) {
    match event {
        CoreEvent::GameOver => repeat.reset(),
        CoreEvent::LinesCleared { rows, .. } => debug!(rows, "runner saw line clear"),
        CoreEvent::LevelUp { level, .. } => debug!(level, "runner saw level up"),
    }
}
