//! Position builders shared by unit tests

use super::{Pos, State};

/// Seed used by test positions so hashes are reproducible
pub(crate) const TEST_SEED: u64 = 0x5EED_0F_600D;

/// Interleave Black and White moves into a game history, Black first.
///
/// `black` must hold as many moves as `white` or one more.
pub(crate) fn interleave(black: &[(u8, u8)], white: &[(u8, u8)]) -> Vec<Pos> {
    assert!(
        black.len() == white.len() || black.len() == white.len() + 1,
        "unbalanced test position: {} black, {} white",
        black.len(),
        white.len()
    );
    let mut moves = Vec::with_capacity(black.len() + white.len());
    for (i, &(r, c)) in black.iter().enumerate() {
        moves.push(Pos::new(r, c));
        if let Some(&(r, c)) = white.get(i) {
            moves.push(Pos::new(r, c));
        }
    }
    moves
}

/// Build a position by replaying [`interleave`]d moves.
pub(crate) fn position(size: usize, black: &[(u8, u8)], white: &[(u8, u8)]) -> State {
    let mut state = State::with_seed(size, TEST_SEED);
    for pos in interleave(black, white) {
        state.make_move(pos);
    }
    state
}

/// A full 5x5 board with no five anywhere, Black having moved last.
pub(crate) fn full_board_draw() -> State {
    const GRID: [&str; 5] = ["BBWWB", "WWBBW", "BBWWB", "WWBBW", "BBWWB"];
    let mut black = Vec::new();
    let mut white = Vec::new();
    for (r, row) in GRID.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            let cell = (r as u8, c as u8);
            if ch == 'B' {
                black.push(cell);
            } else {
                white.push(cell);
            }
        }
    }
    position(5, &black, &white)
}
