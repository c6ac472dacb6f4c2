//! Search state: board cells, ray views, move history and Zobrist hash

use super::rays::{Ray, RayTable};
use super::{Direction, Pos, Stone, RAY_CENTER, RAY_LEN};
use crate::config::check_board_size;
use crate::error::GomokuError;
use crate::rules::{terminal_status, GameStatus};
use crate::search::ZobristKeys;

/// Position state owned by a single search.
///
/// Cells are stored row-major with one extra sentinel slot at the end that
/// always holds `Stone::OutOfBounds`; rays index into the same storage.
#[derive(Debug, Clone)]
pub struct State {
    size: usize,
    cells: Vec<Stone>,
    rays: RayTable,
    /// Applied moves, doubles as the undo stack
    history: Vec<Pos>,
    hash: u64,
    zobrist: ZobristKeys,
}

impl State {
    /// Empty board with freshly drawn Zobrist keys.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_keys(size, ZobristKeys::new(size))
    }

    /// Empty board with reproducible Zobrist keys.
    #[must_use]
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::with_keys(size, ZobristKeys::with_seed(size, seed))
    }

    fn with_keys(size: usize, zobrist: ZobristKeys) -> Self {
        let mut cells = vec![Stone::Empty; size * size + 1];
        cells[size * size] = Stone::OutOfBounds;

        Self {
            size,
            cells,
            rays: RayTable::new(size),
            history: Vec::with_capacity(size * size),
            hash: 0,
            zobrist,
        }
    }

    /// Rebuild a state by replaying `history` from an empty board.
    ///
    /// Every move is validated; a corrupted history is rejected rather than
    /// silently producing a wrong position.
    pub fn from_history(
        size: usize,
        history: &[Pos],
        seed: Option<u64>,
    ) -> Result<Self, GomokuError> {
        check_board_size(size)?;
        let mut state = match seed {
            Some(seed) => Self::with_seed(size, seed),
            None => Self::new(size),
        };
        for &pos in history {
            state.try_make_move(pos)?;
        }
        Ok(state)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Occupant of a cell on the board
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        self.cells[pos.to_index(self.size)]
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        pos.is_within(self.size) && self.get(pos) == Stone::Empty
    }

    /// Player to move next, derived from history parity
    #[inline]
    pub fn to_move(&self) -> Stone {
        if self.history.len() % 2 == 0 {
            Stone::Black
        } else {
            Stone::White
        }
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.history.last().copied()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == self.size * self.size
    }

    /// Incrementally maintained Zobrist hash
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Recompute the hash from scratch over the whole board.
    #[must_use]
    pub fn compute_hash(&self) -> u64 {
        (0..self.size * self.size).fold(0, |h, idx| {
            self.zobrist
                .toggle(h, Pos::from_index(idx, self.size), self.cells[idx])
        })
    }

    /// Validate and apply a move.
    pub fn try_make_move(&mut self, pos: Pos) -> Result<(), GomokuError> {
        if !pos.is_within(self.size) {
            return Err(GomokuError::OutOfBounds {
                pos,
                size: self.size,
            });
        }
        if self.get(pos) != Stone::Empty {
            return Err(GomokuError::Occupied { pos });
        }
        self.make_move(pos);
        Ok(())
    }

    /// Apply a pre-validated move for the player to move.
    #[inline]
    pub fn make_move(&mut self, pos: Pos) {
        debug_assert!(self.is_empty(pos), "make_move on non-empty {pos}");
        let color = self.to_move();
        self.cells[pos.to_index(self.size)] = color;
        self.hash = self.zobrist.toggle(self.hash, pos, color);
        self.history.push(pos);
    }

    /// Undo the most recent move. Must be called in LIFO order.
    #[inline]
    pub fn undo_move(&mut self, pos: Pos) {
        let last = self.history.pop();
        debug_assert_eq!(last, Some(pos), "undo_move out of LIFO order");
        let idx = pos.to_index(self.size);
        self.hash = self.zobrist.toggle(self.hash, pos, self.cells[idx]);
        self.cells[idx] = Stone::Empty;
    }

    /// True if any stone lies within `distance` steps of `pos` along one of
    /// the four axes. `distance` is capped at the ray half-length.
    pub fn has_adjacent_stone(&self, pos: Pos, distance: usize) -> bool {
        let distance = distance.min(RAY_CENTER);
        self.rays
            .rays_at(pos.to_index(self.size))
            .iter()
            .any(|ray| {
                (1..=distance).any(|d| {
                    self.cell_at(ray[RAY_CENTER + d]).is_player()
                        || self.cell_at(ray[RAY_CENTER - d]).is_player()
                })
            })
    }

    /// Current occupants along the ray through `pos`
    #[inline]
    pub fn ray(&self, pos: Pos, dir: Direction) -> [Stone; RAY_LEN] {
        self.rays.ray(pos, dir).map(|idx| self.cell_at(idx))
    }

    /// Cell indices along the ray through `pos`
    #[inline]
    pub(crate) fn ray_indices(&self, pos: Pos, dir: Direction) -> &Ray {
        self.rays.ray(pos, dir)
    }

    /// Occupant of a raw cell index, including the sentinel slot
    #[inline]
    pub(crate) fn cell_at(&self, idx: u32) -> Stone {
        self.cells[idx as usize]
    }

    /// Board position of a raw (non-sentinel) cell index
    #[inline]
    pub(crate) fn pos_of(&self, idx: u32) -> Pos {
        debug_assert!((idx as usize) < self.rays.sentinel());
        Pos::from_index(idx as usize, self.size)
    }

    /// Positions holding `stone`, row-major
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size;
        self.cells[..size * size]
            .iter()
            .enumerate()
            .filter(move |&(_, &s)| s == stone)
            .map(move |(idx, _)| Pos::from_index(idx, size))
    }

    /// Win/draw status, judged from the last move only
    #[inline]
    pub fn terminal_status(&self) -> GameStatus {
        terminal_status(self)
    }
}
