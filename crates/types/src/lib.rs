//! Core types module - shared data structures, constants and collaborator traits
//!
//! This crate defines the fundamental types used throughout the workspace.
//! Everything here is plain data with no external dependencies, so it can be
//! used from the engine, the renderer and the terminal adapters alike.
//!
//! # Display and board dimensions
//!
//! The game runs on a 5x5 LED matrix. The logical board always has the display
//! width, but may be taller than the display: extra rows sit above the visible
//! window as a hidden spawn buffer.
//!
//! - **Display**: 5 columns x 5 rows, brightness 0-9 per pixel
//! - **Board width**: 5 columns (indexed 0-4)
//! - **Board height**: selected by [`Tuning::board_rows`] (5 or 7 in the presets)
//!
//! # Tunings
//!
//! | Field | `leveled()` | `kick_slowdown()` |
//! |-------|-------------|-------------------|
//! | `board_rows` / `hidden_rows` | 7 / 2 | 5 / 0 |
//! | `starting_lives` | 10 | 5 |
//! | `base_fall_ms` | 1000 | 800 |
//! | `fall_step_ms` / `min_fall_ms` | 200 / 200 | - |
//! | `lines_per_level` | 5 | - |
//! | `rotation_cooldown_ms` | 500 | 500 |
//! | `slowdown_fall_ms` / `slowdown_window_ms` | - | 1500 / 1000 |
//!
//! # Examples
//!
//! ```
//! use led_tetris_types::{ShapeKind, Tuning, DISPLAY_WIDTH};
//!
//! // Uniform draws map onto the weighted shape table
//! assert_eq!(ShapeKind::from_draw(0.01), ShapeKind::I);
//! assert_eq!(ShapeKind::from_draw(0.99), ShapeKind::Square);
//!
//! // Tunings can be selected by name
//! let tuning = Tuning::from_name("leveled").unwrap();
//! assert_eq!(tuning.board_rows, 7);
//! assert_eq!(tuning.visible_rows(), 5);
//! assert_eq!(DISPLAY_WIDTH, 5);
//! ```

/// Display width in pixels (5 columns)
pub const DISPLAY_WIDTH: u8 = 5;

/// Display height in pixels (5 rows)
pub const DISPLAY_HEIGHT: u8 = 5;

/// Board width in cells, always the display width
pub const BOARD_WIDTH: usize = DISPLAY_WIDTH as usize;

/// Upper bound on board rows any tuning may request
pub const MAX_BOARD_ROWS: usize = 16;

/// Brightest pixel value accepted by a display sink
pub const MAX_BRIGHTNESS: u8 = 9;

/// Brightness of placed board cells
pub const BOARD_BRIGHTNESS: u8 = 4;

/// Poll loop period in milliseconds
pub const POLL_INTERVAL_MS: u32 = 50;

/// Blocking pause while the life-lost flash is shown
pub const FLASH_MS: u32 = 200;

/// Blocking pause while the game-over indicator is shown
pub const GAME_OVER_PAUSE_MS: u32 = 2000;

/// Fewest board rows a tuning may use (height of a vertical I)
pub const MIN_BOARD_ROWS: usize = 4;

/// Preferred spawn column before clamping to the board
pub const SPAWN_COLUMN: i8 = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microconsole_timing_defaults() {
        assert_eq!(POLL_INTERVAL_MS, 50);
        assert_eq!(FLASH_MS, 200);
        assert_eq!(GAME_OVER_PAUSE_MS, 2000);
        assert_eq!(BOARD_BRIGHTNESS, 4);
        assert_eq!(MAX_BRIGHTNESS, 9);
    }

    #[test]
    fn from_draw_uses_cumulative_thresholds() {
        assert_eq!(ShapeKind::from_draw(0.0), ShapeKind::I);
        assert_eq!(ShapeKind::from_draw(0.049), ShapeKind::I);
        assert_eq!(ShapeKind::from_draw(0.05), ShapeKind::T);
        assert_eq!(ShapeKind::from_draw(0.299), ShapeKind::T);
        assert_eq!(ShapeKind::from_draw(0.30), ShapeKind::S);
        assert_eq!(ShapeKind::from_draw(0.549), ShapeKind::S);
        assert_eq!(ShapeKind::from_draw(0.55), ShapeKind::L);
        assert_eq!(ShapeKind::from_draw(0.774), ShapeKind::L);
        assert_eq!(ShapeKind::from_draw(0.775), ShapeKind::Square);
        assert_eq!(ShapeKind::from_draw(0.999_999), ShapeKind::Square);
    }

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = ShapeKind::ALL.iter().map(|k| k.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tuning_names_round_trip() {
        assert_eq!(Tuning::from_name("LEVELED"), Some(Tuning::leveled()));
        assert_eq!(Tuning::from_name("slowdown"), Some(Tuning::kick_slowdown()));
        assert_eq!(Tuning::from_name("kick-slowdown"), Some(Tuning::kick_slowdown()));
        assert_eq!(Tuning::from_name("arcade"), None);
    }

    #[test]
    fn presets_validate() {
        assert_eq!(Tuning::leveled().validate(), Ok(()));
        assert_eq!(Tuning::kick_slowdown().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_unplayable_tunings() {
        let short = Tuning {
            board_rows: 1,
            hidden_rows: 0,
            ..Tuning::leveled()
        };
        assert_eq!(short.validate(), Err(TuningError::BoardRows(1)));

        let tall = Tuning {
            board_rows: 17,
            ..Tuning::leveled()
        };
        assert_eq!(tall.validate(), Err(TuningError::BoardRows(17)));

        let hidden = Tuning {
            hidden_rows: 7,
            ..Tuning::leveled()
        };
        assert_eq!(
            hidden.validate(),
            Err(TuningError::HiddenRows { hidden: 7, board: 7 })
        );

        let no_lives = Tuning {
            starting_lives: 0,
            ..Tuning::kick_slowdown()
        };
        assert_eq!(no_lives.validate(), Err(TuningError::NoLives));

        let no_bands = Tuning {
            lines_per_level: 0,
            ..Tuning::leveled()
        };
        assert_eq!(no_bands.validate(), Err(TuningError::LinesPerLevel));
        assert!(no_bands.validate().unwrap_err().to_string().contains("lines_per_level"));
    }

    #[test]
    fn presets_fit_the_display() {
        for tuning in [Tuning::leveled(), Tuning::kick_slowdown()] {
            assert!(tuning.hidden_rows < tuning.board_rows);
            assert!((tuning.board_rows as usize) <= MAX_BOARD_ROWS);
            assert_eq!(tuning.visible_rows(), DISPLAY_HEIGHT);
        }
    }
}

/// The five block shapes this ruleset spawns
///
/// - **I**: 1x4 horizontal bar
/// - **T**: 2x3, `.#. / ###`
/// - **S**: 2x3, `.## / ##.`
/// - **L**: 2x3, `### / ..#`
/// - **Square**: 2x2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    T,
    S,
    L,
    Square,
}

impl ShapeKind {
    /// All kinds, in draw-table order
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::I,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::L,
        ShapeKind::Square,
    ];

    /// Spawn probability of this kind
    pub fn weight(&self) -> f64 {
        match self {
            ShapeKind::I => 0.05,
            ShapeKind::T => 0.25,
            ShapeKind::S => 0.25,
            ShapeKind::L => 0.225,
            ShapeKind::Square => 0.225,
        }
    }

    /// Map a uniform draw in `[0, 1)` to a kind
    ///
    /// Cumulative thresholds are 0.05 / 0.30 / 0.55 / 0.775 / 1.0.
    /// Draws at or above 1.0 fall through to `Square`.
    ///
    /// # Examples
    ///
    /// ```
    /// use led_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_draw(0.10), ShapeKind::T);
    /// assert_eq!(ShapeKind::from_draw(0.60), ShapeKind::L);
    /// ```
    pub fn from_draw(r: f64) -> Self {
        if r < 0.05 {
            ShapeKind::I
        } else if r < 0.30 {
            ShapeKind::T
        } else if r < 0.55 {
            ShapeKind::S
        } else if r < 0.775 {
            ShapeKind::L
        } else {
            ShapeKind::Square
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::L => "l",
            ShapeKind::Square => "square",
        }
    }
}

/// The two physical control buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    /// Left button: shifts the piece left
    A,
    /// Right button: shifts the piece right
    B,
}

impl Button {
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
        }
    }
}

/// Variant configuration selecting engine behavior
///
/// The two presets are alternate tunings of the same engine; custom tunings
/// can be built with struct update syntax from either preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Total logical board rows
    pub board_rows: u8,
    /// Rows above the visible window (spawn buffer)
    pub hidden_rows: u8,
    /// Level/lines progression drives the fall interval
    pub has_levels: bool,
    /// Successful rotations start a slow-fall window and flash a border
    pub has_kick_slowdown: bool,
    pub starting_lives: u8,
    pub base_fall_ms: u32,
    /// Fall interval reduction per level above 1
    pub fall_step_ms: u32,
    /// Fall interval floor
    pub min_fall_ms: u32,
    pub lines_per_level: u32,
    pub rotation_cooldown_ms: u32,
    /// Fall interval while a post-rotation slowdown is active
    pub slowdown_fall_ms: u32,
    pub slowdown_window_ms: u32,
    pub spawn_column: i8,
    pub board_brightness: u8,
    pub flash_ms: u32,
    pub game_over_pause_ms: u32,
    pub poll_interval_ms: u32,
}

impl Tuning {
    /// Seven-row board with two hidden rows, levels and lines
    pub const fn leveled() -> Self {
        Self {
            board_rows: 7,
            hidden_rows: 2,
            has_levels: true,
            has_kick_slowdown: false,
            starting_lives: 10,
            base_fall_ms: 1000,
            fall_step_ms: 200,
            min_fall_ms: 200,
            lines_per_level: 5,
            rotation_cooldown_ms: 500,
            slowdown_fall_ms: 1000,
            slowdown_window_ms: 0,
            spawn_column: SPAWN_COLUMN,
            board_brightness: BOARD_BRIGHTNESS,
            flash_ms: FLASH_MS,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }

    /// Five-row board with post-rotation slowdown and border flash
    pub const fn kick_slowdown() -> Self {
        Self {
            board_rows: 5,
            hidden_rows: 0,
            has_levels: false,
            has_kick_slowdown: true,
            starting_lives: 5,
            base_fall_ms: 800,
            fall_step_ms: 0,
            min_fall_ms: 800,
            lines_per_level: 5,
            rotation_cooldown_ms: 500,
            slowdown_fall_ms: 1500,
            slowdown_window_ms: 1000,
            spawn_column: SPAWN_COLUMN,
            board_brightness: BOARD_BRIGHTNESS,
            flash_ms: FLASH_MS,
            game_over_pause_ms: GAME_OVER_PAUSE_MS,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }

    /// Look up a preset by name (case-insensitive)
    ///
    /// Accepts `"leveled"` / `"levels"` and `"slowdown"` / `"kick-slowdown"`.
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "leveled" | "levels" => Some(Self::leveled()),
            "slowdown" | "kick-slowdown" | "kick_slowdown" => Some(Self::kick_slowdown()),
            _ => None,
        }
    }

    /// Rows mapped onto the display
    pub fn visible_rows(&self) -> u8 {
        self.board_rows
            .saturating_sub(self.hidden_rows)
            .min(DISPLAY_HEIGHT)
    }

    /// Check that every shape can spawn and turn on an empty board
    ///
    /// Both presets pass. Custom tunings should be checked before a game is
    /// built from them.
    pub fn validate(&self) -> Result<(), TuningError> {
        let rows = self.board_rows as usize;
        if !(MIN_BOARD_ROWS..=MAX_BOARD_ROWS).contains(&rows) {
            return Err(TuningError::BoardRows(self.board_rows));
        }
        if self.hidden_rows >= self.board_rows {
            return Err(TuningError::HiddenRows {
                hidden: self.hidden_rows,
                board: self.board_rows,
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::NoLives);
        }
        if self.has_levels && self.lines_per_level == 0 {
            return Err(TuningError::LinesPerLevel);
        }
        Ok(())
    }
}

/// Why a [`Tuning`] cannot run a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuningError {
    /// Outside `MIN_BOARD_ROWS..=MAX_BOARD_ROWS`
    BoardRows(u8),
    /// No board row would be visible
    HiddenRows { hidden: u8, board: u8 },
    NoLives,
    LinesPerLevel,
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::BoardRows(rows) => write!(
                f,
                "board_rows {} outside {}..={}",
                rows, MIN_BOARD_ROWS, MAX_BOARD_ROWS
            ),
            TuningError::HiddenRows { hidden, board } => {
                write!(f, "hidden_rows {} leaves none of {} rows visible", hidden, board)
            }
            TuningError::NoLives => write!(f, "starting_lives must be at least 1"),
            TuningError::LinesPerLevel => write!(f, "lines_per_level must be at least 1"),
        }
    }
}

impl std::error::Error for TuningError {}

impl Default for Tuning {
    fn default() -> Self {
        Self::leveled()
    }
}

/// Monotonic millisecond counter
///
/// Values may wrap; consumers compare with wrapping subtraction.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

/// Button polling contract of the micro-console
pub trait ButtonInput {
    /// True once per physical press since the previous call
    fn was_pressed(&mut self, button: Button) -> bool;

    /// True while the button is held down
    fn is_pressed(&self, button: Button) -> bool;
}

/// Pixel output of the LED matrix
pub trait DisplaySink {
    fn clear(&mut self);

    /// Set pixel `(x, y)` to `brightness` (0-9); out-of-range coordinates are ignored
    fn set_pixel(&mut self, x: u8, y: u8, brightness: u8);
}

/// Input gathered during one poll of the loop
///
/// The engine only ever sees this snapshot, never the button device itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// A was pressed since the last poll
    pub shift_left: bool,
    /// B was pressed since the last poll
    pub shift_right: bool,
    pub a_held: bool,
    pub b_held: bool,
}

impl InputFrame {
    /// Read one frame from a button device, consuming its press edges
    pub fn poll(input: &mut impl ButtonInput) -> Self {
        Self {
            shift_left: input.was_pressed(Button::A),
            shift_right: input.was_pressed(Button::B),
            a_held: input.is_pressed(Button::A),
            b_held: input.is_pressed(Button::B),
        }
    }

    /// Both buttons held: the rotation chord
    pub fn rotate_chord(&self) -> bool {
        self.a_held && self.b_held
    }
}
