//! LED Tetris runner (default binary).
//!
//! Drives the game from a fixed-period poll loop. The terminal stands in for
//! the 5x5 LED matrix and the keyboard for the two buttons.
//!
//! Environment:
//! - `LED_TETRIS_TUNING`: `leveled` (default) or `slowdown`
//! - `RUST_LOG`: log filter; logs go to stderr, so redirect it (`2>game.log`)

use std::env::{self, VarError};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use led_tetris::core::{GameState, SimpleRng, Transition};
use led_tetris::input::{handle_key_event, should_quit, ButtonPad};
use led_tetris::term::{GameView, PixelFrame, TerminalRenderer};
use led_tetris::types::{Clock, InputFrame, Tuning};

const TUNING_VAR: &str = "LED_TETRIS_TUNING";

/// Milliseconds since startup, truncated to `u32` like the device counter.
struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let tuning = tuning_from_env()?;
    tuning
        .validate()
        .with_context(|| format!("invalid tuning {tuning:?}"))?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, tuning);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn tuning_from_env() -> Result<Tuning> {
    match env::var(TUNING_VAR) {
        Ok(name) => Tuning::from_name(&name).ok_or_else(|| {
            anyhow!("unknown {TUNING_VAR} value {name:?} (expected \"leveled\" or \"slowdown\")")
        }),
        Err(VarError::NotPresent) => Ok(Tuning::default()),
        Err(err) => Err(err).with_context(|| format!("reading {TUNING_VAR}")),
    }
}

fn seed_from_wall_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, tuning: Tuning) -> Result<()> {
    let clock = MonotonicClock::new();
    let seed = seed_from_wall_clock();
    let mut game = GameState::new(tuning, SimpleRng::new(seed), clock.now_ms());
    info!(
        "starting with {:?}, seed {}, key event types {}",
        tuning,
        seed,
        term.reports_key_event_types()
    );

    let view = GameView::new();
    let mut pad = ButtonPad::new().with_release_events(term.reports_key_event_types());
    let mut frame = PixelFrame::new();
    let poll_interval = Duration::from_millis(tuning.poll_interval_ms as u64);

    loop {
        let poll_started = Instant::now();

        // Input latched since the previous poll.
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    let Some(binding) = handle_key_event(key) else {
                        continue;
                    };
                    match key.kind {
                        KeyEventKind::Press => pad.apply(binding, clock.now_ms()),
                        KeyEventKind::Repeat => pad.apply_repeat(binding, clock.now_ms()),
                        KeyEventKind::Release => pad.apply_release(binding),
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let now = clock.now_ms();
        pad.update(now);
        let outcome = game.tick(now, InputFrame::poll(&mut pad));

        // Feedback blocks the whole loop; nothing else advances meanwhile.
        match outcome.transition {
            Some(Transition::LifeLost { .. }) => {
                show_blocking(term, &PixelFrame::flash(), tuning.flash_ms)?
            }
            Some(Transition::GameOver { .. }) => {
                show_blocking(term, &PixelFrame::sad(), tuning.game_over_pause_ms)?
            }
            None => {}
        }

        view.render(&game, &mut frame);
        term.draw(&frame)?;
        term.draw_status(&status_line(&game))?;

        if let Some(rest) = poll_interval.checked_sub(poll_started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

fn show_blocking(term: &mut TerminalRenderer, frame: &PixelFrame, pause_ms: u32) -> Result<()> {
    term.draw(frame)?;
    thread::sleep(Duration::from_millis(pause_ms as u64));
    Ok(())
}

fn status_line(game: &GameState) -> String {
    if game.tuning().has_levels {
        format!(
            "lives {:>2}  level {}  lines {}   [a/b move, w rotate, q quit]",
            game.lives(),
            game.level(),
            game.lines_cleared()
        )
    } else {
        format!(
            "lives {:>2}  lines {}   [a/b move, w rotate, q quit]",
            game.lives(),
            game.lines_cleared()
        )
    }
}
