//! Win condition checking
//!
//! A win can only be created by the stone just placed, so terminal detection
//! inspects the four rays through the last move instead of the whole board.
//! Overlines (six or more) count as a win.

use crate::board::{Direction, Pos, State, Stone, RAY_CENTER};

/// Stones in a row needed to win
pub const WIN_LENGTH: usize = 5;

/// Outcome of a position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The given player completed five in a row
    Won(Stone),
    /// Board full without a five
    Draw,
}

impl GameStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    #[inline]
    pub fn winner(self) -> Option<Stone> {
        match self {
            GameStatus::Won(stone) => Some(stone),
            _ => None,
        }
    }
}

/// Fast five-in-a-row check through a specific position.
///
/// Every length-5 window of the 9-cell ray that contains the centre is tested,
/// so only fives passing through `pos` are found. No allocation.
#[inline]
pub fn has_five_through(state: &State, pos: Pos, color: Stone) -> bool {
    Direction::ALL.iter().any(|&dir| {
        let ray = state.ray(pos, dir);
        (0..=RAY_CENTER).any(|start| ray[start..start + WIN_LENGTH].iter().all(|&s| s == color))
    })
}

/// Status of `state`, judged from the most recent move only.
pub fn terminal_status(state: &State) -> GameStatus {
    let Some(last) = state.last_move() else {
        return GameStatus::Ongoing;
    };

    let last_color = state.to_move().opponent();
    if has_five_through(state, last, last_color) {
        return GameStatus::Won(last_color);
    }

    if state.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::testutil::{full_board_draw, position};

    #[test]
    fn test_empty_board_is_ongoing() {
        let state = State::with_seed(15, 1);
        assert_eq!(terminal_status(&state), GameStatus::Ongoing);
    }

    #[test]
    fn test_five_horizontal() {
        let state = position(
            15,
            &[(7, 3), (7, 4), (7, 5), (7, 6), (7, 7)],
            &[(0, 0), (0, 2), (0, 4), (0, 6)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_five_vertical_white() {
        let state = position(
            15,
            &[(0, 0), (0, 2), (0, 4), (0, 6), (0, 8)],
            &[(5, 9), (6, 9), (7, 9), (8, 9), (9, 9)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::White));
    }

    #[test]
    fn test_five_diagonal_down() {
        let state = position(
            15,
            &[(2, 2), (3, 3), (4, 4), (6, 6), (5, 5)],
            &[(14, 0), (14, 2), (14, 4), (14, 6)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_five_diagonal_up() {
        let state = position(
            15,
            &[(10, 2), (9, 3), (8, 4), (7, 5), (6, 6)],
            &[(0, 0), (0, 2), (0, 4), (0, 6)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_five_at_corner_edge() {
        // Bottom-right corner along the bottom edge
        let state = position(
            15,
            &[(14, 14), (14, 13), (14, 12), (14, 11), (14, 10)],
            &[(0, 0), (0, 2), (0, 4), (0, 6)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));

        // Top-left corner along the anti-diagonal
        let state = position(
            15,
            &[(4, 0), (3, 1), (2, 2), (1, 3), (0, 4)],
            &[(10, 10), (10, 12), (12, 10), (12, 12)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_four_is_not_a_win() {
        let state = position(
            15,
            &[(7, 3), (7, 4), (7, 5), (7, 6)],
            &[(0, 0), (0, 2), (0, 4)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Ongoing);
    }

    #[test]
    fn test_broken_five_is_not_a_win() {
        // XXXX_X with the last stone at the far end
        let state = position(
            15,
            &[(7, 2), (7, 3), (7, 4), (7, 5), (7, 7)],
            &[(0, 0), (0, 2), (0, 4), (0, 6)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Ongoing);
    }

    #[test]
    fn test_overline_is_a_win() {
        // Gap filled last, making six
        let state = position(
            15,
            &[(7, 2), (7, 3), (7, 4), (7, 6), (7, 7), (7, 5)],
            &[(0, 0), (0, 2), (0, 4), (0, 6), (0, 8)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Won(Stone::Black));
    }

    #[test]
    fn test_only_last_move_is_inspected() {
        // White five completed earlier, but the last move is Black's elsewhere
        let state = position(
            15,
            &[(0, 0), (0, 2), (0, 4), (0, 6), (0, 8), (14, 14)],
            &[(5, 5), (5, 6), (5, 7), (5, 8), (5, 9)],
        );
        assert_eq!(terminal_status(&state), GameStatus::Ongoing);
    }

    #[test]
    fn test_full_board_draw() {
        let mut state = full_board_draw();
        assert!(state.is_full());
        assert_eq!(terminal_status(&state), GameStatus::Draw);

        let last = state.last_move().unwrap();
        state.undo_move(last);
        assert_eq!(terminal_status(&state), GameStatus::Ongoing);
    }

    #[test]
    fn test_status_helpers() {
        assert!(!GameStatus::Ongoing.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
        assert_eq!(GameStatus::Won(Stone::White).winner(), Some(Stone::White));
        assert_eq!(GameStatus::Draw.winner(), None);
    }
}
