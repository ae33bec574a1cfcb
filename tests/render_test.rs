//! Rendering tests - board window, piece brightness and the rotation border
//!
//! Frames are rendered into a `PixelFrame` and checked pixel by pixel, so no
//! terminal is involved.

use led_tetris::core::{GameState, Piece, SimpleRng};
use led_tetris::term::{encode_diff_into, encode_full_into, GameView, PixelFrame};
use led_tetris::types::{DisplaySink, ShapeKind, Tuning, BOARD_BRIGHTNESS, MAX_BRIGHTNESS};

fn empty_game(tuning: Tuning) -> GameState {
    let mut game = GameState::new(tuning, SimpleRng::new(12345), 0);
    game.set_active(None);
    game
}

fn render(game: &GameState) -> PixelFrame {
    let mut frame = PixelFrame::new();
    GameView::new().render(game, &mut frame);
    frame
}

/// Records every call so tests can check what reaches a sink.
#[derive(Default)]
struct RecordingSink {
    clears: usize,
    pixels: Vec<(u8, u8, u8)>,
}

impl DisplaySink for RecordingSink {
    fn clear(&mut self) {
        self.clears += 1;
        self.pixels.clear();
    }

    fn set_pixel(&mut self, x: u8, y: u8, brightness: u8) {
        self.pixels.push((x, y, brightness));
    }
}

#[test]
fn test_windowed_board_hides_spawn_rows() {
    let mut game = empty_game(Tuning::leveled());
    game.board_mut().set(0, 0, true);
    game.board_mut().set(1, 1, true);
    game.board_mut().set(2, 2, true);
    game.board_mut().set(4, 6, true);

    let frame = render(&game);
    assert_eq!(frame.lit_count(), 2);
    assert_eq!(frame.get(2, 0), Some(BOARD_BRIGHTNESS));
    assert_eq!(frame.get(4, 4), Some(BOARD_BRIGHTNESS));
}

#[test]
fn test_direct_board_maps_rows_one_to_one() {
    let mut game = empty_game(Tuning::kick_slowdown());
    game.board_mut().set(0, 0, true);
    game.board_mut().set(3, 4, true);

    let frame = render(&game);
    assert_eq!(frame.lit_count(), 2);
    assert_eq!(frame.get(0, 0), Some(BOARD_BRIGHTNESS));
    assert_eq!(frame.get(3, 4), Some(BOARD_BRIGHTNESS));
}

#[test]
fn test_piece_partly_in_hidden_rows() {
    let mut game = empty_game(Tuning::leveled());
    // T at y=1: its top cell is in hidden row 1, its base on display row 0.
    game.set_active(Some(Piece::new(ShapeKind::T, 1, 1)));

    let frame = render(&game);
    assert_eq!(frame.lit_count(), 3);
    for x in 1..=3 {
        assert_eq!(frame.get(x, 0), Some(MAX_BRIGHTNESS));
    }
}

#[test]
fn test_piece_brightness_tracks_lives() {
    let mut game = empty_game(Tuning::leveled());
    game.set_active(Some(Piece::new(ShapeKind::Square, 0, 3)));

    for (lives, expected) in [(10, 9), (7, 6), (5, 4), (2, 1), (1, 1)] {
        game.session_mut().lives = lives;
        let frame = render(&game);
        assert_eq!(frame.get(0, 1), Some(expected), "lives {}", lives);
        assert_eq!(frame.get(1, 2), Some(expected), "lives {}", lives);
    }
}

#[test]
fn test_piece_drawn_over_board() {
    let mut game = empty_game(Tuning::kick_slowdown());
    game.board_mut().set(0, 4, true);
    game.set_active(Some(Piece::new(ShapeKind::Square, 0, 2)));

    let frame = render(&game);
    assert_eq!(frame.get(0, 4), Some(BOARD_BRIGHTNESS));
    assert_eq!(frame.get(0, 2), Some(MAX_BRIGHTNESS));
    assert_eq!(frame.lit_count(), 5);
}

#[test]
fn test_border_only_while_rotating() {
    let mut game = empty_game(Tuning::kick_slowdown());
    game.board_mut().set(2, 2, true);

    let frame = render(&game);
    assert_eq!(frame.lit_count(), 1);

    game.session_mut().rotating = true;
    let frame = render(&game);
    assert_eq!(frame.lit_count(), 17);
    for i in 0..5 {
        assert_eq!(frame.get(i, 0), Some(MAX_BRIGHTNESS));
        assert_eq!(frame.get(i, 4), Some(MAX_BRIGHTNESS));
        assert_eq!(frame.get(0, i), Some(MAX_BRIGHTNESS));
        assert_eq!(frame.get(4, i), Some(MAX_BRIGHTNESS));
    }
    assert_eq!(frame.get(2, 2), Some(BOARD_BRIGHTNESS));
}

#[test]
fn test_leveled_tuning_never_draws_border() {
    let mut game = empty_game(Tuning::leveled());
    game.session_mut().rotating = true;
    assert_eq!(render(&game).lit_count(), 0);
}

#[test]
fn test_render_clears_sink_first() {
    let mut game = empty_game(Tuning::kick_slowdown());
    game.board_mut().set(1, 4, true);

    let mut sink = RecordingSink::default();
    sink.set_pixel(0, 0, 9);
    GameView::new().render(&game, &mut sink);

    assert_eq!(sink.clears, 1);
    assert_eq!(sink.pixels, vec![(1, 4, BOARD_BRIGHTNESS)]);
}

#[test]
fn test_frame_present_replays_lit_pixels() {
    let mut sink = RecordingSink::default();
    PixelFrame::sad().present(&mut sink);
    assert_eq!(sink.clears, 1);
    assert_eq!(sink.pixels.len(), PixelFrame::sad().lit_count());
    assert!(sink.pixels.contains(&(0, 4, 9)));
}

#[test]
fn test_diff_encoding_is_empty_for_identical_frames() {
    let frame = PixelFrame::sad();
    let mut out = Vec::new();
    encode_diff_into(&frame, &frame, &mut out).unwrap();
    assert!(out.is_empty());

    encode_full_into(&frame, &mut out).unwrap();
    assert!(!out.is_empty());
}
