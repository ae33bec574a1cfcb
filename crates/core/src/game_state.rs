//! Game state module - lives, levels, timing and the life-lost / game-over cycle
//!
//! This module ties together the board, the piece controller and randomness.
//! [`GameState::tick`] is called once per poll with the current clock reading
//! and the buttons sampled for that poll. Blocking feedback (flash, sad face) is
//! not performed here: the tick reports a [`Transition`] and the loop driver
//! shows it.

use log::info;

use crate::board::Board;
use crate::piece::{FallOutcome, Piece, PieceController, SpawnOutcome};
use crate::rng::{RandomSource, SimpleRng};
use crate::types::{InputFrame, Tuning};

/// A life was lost or the game ended during a tick
///
/// By the time the transition is reported the board has been cleared and a new
/// piece spawned; the driver only has to show feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Spawn failed with lives to spare; `lives` is the count remaining
    LifeLost { lives: u8 },
    /// Spawn failed on the last life; the session has been reset.
    /// Carries the final level and line count.
    GameOver { level: u32, lines_cleared: u32 },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// A gravity step ran this tick
    pub gravity: bool,
    /// Rows cleared by a lock this tick, if a lock happened
    pub locked: Option<usize>,
    pub leveled_up: bool,
    pub shifted: bool,
    pub rotated: bool,
    pub transition: Option<Transition>,
}

/// Mutable session counters and timers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub lives: u8,
    /// Starts at 1
    pub level: u32,
    /// Cumulative across level-ups; reset only by game over
    pub lines_cleared_total: u32,
    /// Clock reading of the last gravity step
    pub last_fall_ms: u32,
    /// Clock reading of the last accepted rotation
    pub last_rotation_ms: u32,
    /// Start of the current post-rotation slowdown window
    pub slowdown_since: Option<u32>,
    /// Set for the tick in which a rotation succeeded (border flash)
    pub rotating: bool,
}

impl Session {
    pub fn new(tuning: &Tuning, now_ms: u32) -> Self {
        Self {
            lives: tuning.starting_lives,
            level: 1,
            lines_cleared_total: 0,
            last_fall_ms: now_ms,
            last_rotation_ms: 0,
            slowdown_since: None,
            rotating: false,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    tuning: Tuning,
    board: Board,
    pieces: PieceController,
    session: Session,
    rng: R,
}

impl<R: RandomSource> GameState<R> {
    /// Create a new game and spawn the first piece
    ///
    /// `tuning` must pass [`Tuning::validate`]; debug builds assert it.
    pub fn new(tuning: Tuning, rng: R, now_ms: u32) -> Self {
        debug_assert!(tuning.validate().is_ok(), "unplayable tuning {:?}", tuning);
        let mut state = Self {
            board: Board::new(tuning.board_rows as usize),
            pieces: PieceController::new(tuning.spawn_column),
            session: Session::new(&tuning, now_ms),
            tuning,
            rng,
        };
        state.respawn_on_empty_board();
        state
    }

    /// Reinitialize board and session to starting values and spawn a piece
    ///
    /// This is the game-over reset. Besides lives, level and lines it restarts
    /// every timer: `last_fall_ms` becomes `now_ms`, the rotation cooldown is
    /// measured from 0 again and any slowdown window ends. A lost life keeps
    /// the timers.
    pub fn restart(&mut self, now_ms: u32) {
        self.session = Session::new(&self.tuning, now_ms);
        self.respawn_on_empty_board();
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for scripted setups
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct session access for scripted setups
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn active(&self) -> Option<&Piece> {
        self.pieces.active()
    }

    /// Replace the active piece without a collision check
    pub fn set_active(&mut self, piece: Option<Piece>) {
        self.pieces.set_active(piece);
    }

    pub fn lives(&self) -> u8 {
        self.session.lives
    }

    pub fn level(&self) -> u32 {
        self.session.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.session.lines_cleared_total
    }

    pub fn rotating(&self) -> bool {
        self.session.rotating
    }

    /// Post-rotation slowdown in effect at `now_ms`
    pub fn slowdown_active(&self, now_ms: u32) -> bool {
        if !self.tuning.has_kick_slowdown {
            return false;
        }
        self.session
            .slowdown_since
            .is_some_and(|since| now_ms.wrapping_sub(since) < self.tuning.slowdown_window_ms)
    }

    /// Current gravity interval in milliseconds
    pub fn fall_interval_ms(&self, now_ms: u32) -> u32 {
        if self.slowdown_active(now_ms) {
            return self.tuning.slowdown_fall_ms;
        }
        if !self.tuning.has_levels {
            return self.tuning.base_fall_ms;
        }
        let step = self
            .tuning
            .fall_step_ms
            .saturating_mul(self.session.level.saturating_sub(1));
        self.tuning
            .base_fall_ms
            .saturating_sub(step)
            .max(self.tuning.min_fall_ms)
    }

    /// Advance one poll of the loop
    ///
    /// Gravity is time-gated; shifts and rotation are applied every tick.
    pub fn tick(&mut self, now_ms: u32, input: InputFrame) -> TickOutcome {
        let mut out = TickOutcome::default();
        self.session.rotating = false;

        let interval = self.fall_interval_ms(now_ms);
        if now_ms.wrapping_sub(self.session.last_fall_ms) > interval {
            out.gravity = true;
            self.gravity_step(now_ms, &mut out);
            self.session.last_fall_ms = now_ms;
        }

        if input.shift_left && self.pieces.shift(&self.board, -1) {
            out.shifted = true;
        }
        if input.shift_right && self.pieces.shift(&self.board, 1) {
            out.shifted = true;
        }

        if input.rotate_chord() {
            out.rotated = self.try_rotate(now_ms);
        }

        out
    }

    /// Rotate the active piece if the cooldown has elapsed
    pub fn try_rotate(&mut self, now_ms: u32) -> bool {
        if now_ms.wrapping_sub(self.session.last_rotation_ms) <= self.tuning.rotation_cooldown_ms {
            return false;
        }
        if !self.pieces.rotate(&self.board) {
            return false;
        }

        self.session.last_rotation_ms = now_ms;
        if self.tuning.has_kick_slowdown {
            self.session.slowdown_since = Some(now_ms);
            self.session.rotating = true;
        }
        true
    }

    fn gravity_step(&mut self, now_ms: u32, out: &mut TickOutcome) {
        match self.pieces.fall(&mut self.board, &mut self.rng) {
            FallOutcome::Moved | FallOutcome::Idle => {}
            FallOutcome::Locked { cleared, spawn } => {
                out.locked = Some(cleared);
                out.leveled_up = self.record_clear(cleared);
                if spawn == SpawnOutcome::Blocked {
                    out.transition = Some(self.lose_life(now_ms));
                }
            }
        }
    }

    /// Add cleared rows to the total and apply at most one level-up
    fn record_clear(&mut self, cleared: usize) -> bool {
        self.session.lines_cleared_total += cleared as u32;
        if !self.tuning.has_levels {
            return false;
        }

        let bands = self.session.lines_cleared_total / self.tuning.lines_per_level.max(1);
        if bands >= self.session.level {
            self.session.level += 1;
            info!(
                "level {} reached at {} lines",
                self.session.level, self.session.lines_cleared_total
            );
            return true;
        }
        false
    }

    fn lose_life(&mut self, now_ms: u32) -> Transition {
        self.session.lives = self.session.lives.saturating_sub(1);

        if self.session.lives > 0 {
            info!("life lost, {} remaining", self.session.lives);
            self.respawn_on_empty_board();
            return Transition::LifeLost {
                lives: self.session.lives,
            };
        }

        let transition = Transition::GameOver {
            level: self.session.level,
            lines_cleared: self.session.lines_cleared_total,
        };
        info!(
            "game over at level {} with {} lines",
            self.session.level, self.session.lines_cleared_total
        );
        self.restart(now_ms);
        transition
    }

    /// Clear the board and spawn; a validated tuning always fits a piece
    fn respawn_on_empty_board(&mut self) {
        self.board.clear();
        let spawn = self.pieces.spawn(&self.board, &mut self.rng);
        debug_assert_eq!(spawn, SpawnOutcome::Spawned, "piece does not fit an empty board");
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Tuning::default(), SimpleRng::new(1), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeKind;

    fn game(tuning: Tuning) -> GameState {
        GameState::new(tuning, SimpleRng::new(12345), 0)
    }

    #[test]
    fn test_new_game_state() {
        let state = game(Tuning::leveled());
        assert_eq!(state.lives(), 10);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines_cleared(), 0);
        assert_eq!(state.board().height(), 7);
        assert!(state.board().is_empty());
        assert!(state.active().is_some());
    }

    #[test]
    fn test_fall_interval_by_level() {
        let mut state = game(Tuning::leveled());
        assert_eq!(state.fall_interval_ms(0), 1000);
        state.session.level = 3;
        assert_eq!(state.fall_interval_ms(0), 600);
        state.session.level = 5;
        assert_eq!(state.fall_interval_ms(0), 200);
        state.session.level = 40;
        assert_eq!(state.fall_interval_ms(0), 200);
    }

    #[test]
    fn test_fall_interval_slowdown_window() {
        let mut state = game(Tuning::kick_slowdown());
        assert_eq!(state.fall_interval_ms(5_000), 800);
        state.session.slowdown_since = Some(5_000);
        assert_eq!(state.fall_interval_ms(5_000), 1500);
        assert_eq!(state.fall_interval_ms(5_999), 1500);
        assert_eq!(state.fall_interval_ms(6_000), 800);
    }

    #[test]
    fn test_gravity_is_strictly_gated() {
        let mut state = game(Tuning::leveled());
        let y0 = state.active().unwrap().y;

        assert!(!state.tick(1000, InputFrame::default()).gravity);
        assert_eq!(state.active().unwrap().y, y0);

        assert!(state.tick(1001, InputFrame::default()).gravity);
        assert_eq!(state.active().unwrap().y, y0 + 1);
        assert_eq!(state.session.last_fall_ms, 1001);
    }

    #[test]
    fn test_gravity_tolerates_clock_wrap() {
        let mut state = GameState::new(Tuning::leveled(), SimpleRng::new(3), u32::MAX - 100);
        let out = state.tick(950, InputFrame::default());
        assert!(out.gravity);
    }

    #[test]
    fn test_rotation_cooldown() {
        let mut state = game(Tuning::leveled());
        state.set_active(Some(Piece::new(ShapeKind::T, 1, 2)));
        let chord = InputFrame {
            a_held: true,
            b_held: true,
            ..InputFrame::default()
        };

        // Cooldown measured from the initial rotation timestamp of 0.
        assert!(!state.tick(500, chord).rotated);
        assert!(state.tick(501, chord).rotated);
        assert_eq!(state.session.last_rotation_ms, 501);
        assert!(!state.tick(900, chord).rotated);
        assert!(state.tick(1002, chord).rotated);
    }

    #[test]
    fn test_rotating_flag_lasts_one_tick() {
        let mut state = game(Tuning::kick_slowdown());
        state.set_active(Some(Piece::new(ShapeKind::T, 1, 1)));
        let chord = InputFrame {
            a_held: true,
            b_held: true,
            ..InputFrame::default()
        };

        assert!(state.tick(600, chord).rotated);
        assert!(state.rotating());
        assert_eq!(state.session.slowdown_since, Some(600));

        state.tick(650, InputFrame::default());
        assert!(!state.rotating());
        assert!(state.slowdown_active(650));
    }

    #[test]
    fn test_leveled_tuning_never_sets_rotating() {
        let mut state = game(Tuning::leveled());
        state.set_active(Some(Piece::new(ShapeKind::T, 1, 2)));
        assert!(state.try_rotate(600));
        assert!(!state.rotating());
        assert_eq!(state.session.slowdown_since, None);
    }

    #[test]
    fn test_level_check_runs_on_every_lock() {
        let mut state = game(Tuning::leveled());
        state.session.lines_cleared_total = 5;
        assert!(state.record_clear(0));
        assert_eq!(state.level(), 2);
        assert!(!state.record_clear(0));
        assert_eq!(state.level(), 2);
    }

    #[test]
    fn test_one_level_per_clear_across_bands() {
        let mut state = game(Tuning::leveled());
        state.session.lines_cleared_total = 4;

        // 4 -> 11 crosses two bands but only advances one level.
        assert!(state.record_clear(7));
        assert_eq!(state.level(), 2);
        assert_eq!(state.lines_cleared(), 11);

        // The next lock catches up even without clearing.
        assert!(state.record_clear(0));
        assert_eq!(state.level(), 3);
        assert!(!state.record_clear(0));
        assert_eq!(state.level(), 3);
    }

    #[test]
    fn test_game_over_goes_through_restart() {
        let mut state = game(Tuning::leveled());
        state.session.lives = 1;
        state.session.level = 4;
        state.session.lines_cleared_total = 17;
        state.session.last_rotation_ms = 4_000;
        state.board.set(1, 6, true);

        assert_eq!(
            state.lose_life(5_000),
            Transition::GameOver {
                level: 4,
                lines_cleared: 17
            }
        );
        assert_eq!(state.session(), &Session::new(&Tuning::leveled(), 5_000));
        assert!(state.board().is_empty());
        assert!(state.active().is_some());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "unplayable tuning")]
    fn test_new_rejects_board_too_short_for_pieces() {
        let tuning = Tuning {
            board_rows: 1,
            hidden_rows: 0,
            ..Tuning::leveled()
        };
        let _ = game(tuning);
    }

    #[test]
    fn test_no_levels_in_slowdown_tuning() {
        let mut state = game(Tuning::kick_slowdown());
        assert!(!state.record_clear(4));
        assert!(!state.record_clear(4));
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines_cleared(), 8);
    }

    #[test]
    fn test_lose_life_keeps_progress() {
        let mut state = game(Tuning::leveled());
        state.session.level = 3;
        state.session.lines_cleared_total = 12;
        state.board.set(0, 6, true);

        state.session.last_rotation_ms = 4_000;
        assert_eq!(state.lose_life(5_000), Transition::LifeLost { lives: 9 });
        assert_eq!(state.session.last_rotation_ms, 4_000);
        assert_eq!(state.level(), 3);
        assert_eq!(state.lines_cleared(), 12);
        assert!(state.board().is_empty());
        assert!(state.active().is_some());
    }

    #[test]
    fn test_restart_resets_session() {
        let mut state = game(Tuning::leveled());
        state.session.lives = 2;
        state.session.level = 4;
        state.board.set(1, 6, true);

        state.restart(777);
        assert_eq!(state.session(), &Session::new(&Tuning::leveled(), 777));
        assert!(state.board().is_empty());
        assert!(state.active().is_some());
    }
}
