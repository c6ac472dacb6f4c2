//! Heuristic evaluation function for Gomoku positions
//!
//! Every length-5 window along the rays through a stone is a potential five.
//! A window counts for a player only if it holds that player's stones and
//! empty cells, nothing else; the fewer empties remain, the more it is worth.

use crate::board::{Direction, Pos, State, Stone};
use crate::rules::GameStatus;

use super::patterns::{win_score, PatternScore};

/// Window length scanned along each ray
const WINDOW_LEN: usize = 5;

/// Score a single window for `color`.
///
/// Returns 0 if the window holds an opponent stone or an off-board cell, or
/// if it is completely empty. A complete five is not skipped and scores
/// `WINDOW[0]`; finished games are scored by [`evaluate_state`] instead.
#[inline]
#[must_use]
pub fn score_window(window: &[Stone], color: Stone) -> i32 {
    let mut empty = 0;
    for &cell in window {
        if cell == Stone::Empty {
            empty += 1;
        } else if cell != color {
            return 0;
        }
    }
    if empty == window.len() {
        0
    } else {
        PatternScore::WINDOW[empty]
    }
}

/// Evaluate the cell at `pos` for `color` by summing window scores along its
/// four rays. Used both for stones on the board and for candidate moves.
#[must_use]
pub fn evaluate_field(state: &State, pos: Pos, color: Stone) -> i32 {
    Direction::ALL
        .iter()
        .map(|&dir| {
            state
                .ray(pos, dir)
                .windows(WINDOW_LEN)
                .map(|window| score_window(window, color))
                .sum::<i32>()
        })
        .sum()
}

/// Evaluate the state from the perspective of the player to move.
///
/// Decided games score `±(WIN + depth)` so that wins found with more depth
/// remaining (i.e. sooner) are preferred; a draw scores 0.
#[must_use]
pub fn evaluate_state(state: &State, depth: i32) -> i32 {
    let color = state.to_move();
    let opponent = color.opponent();

    match state.terminal_status() {
        GameStatus::Won(winner) if winner == color => return win_score(depth),
        GameStatus::Won(_) => return -win_score(depth),
        GameStatus::Draw => return 0,
        GameStatus::Ongoing => {}
    }

    let mine: i32 = state
        .stones(color)
        .map(|pos| evaluate_field(state, pos, color))
        .sum();
    let theirs: i32 = state
        .stones(opponent)
        .map(|pos| evaluate_field(state, pos, opponent))
        .sum();

    mine - theirs
}
