//! Zobrist hashing for position identification
//!
//! Every (player, row, col) triple gets an independent 64-bit random key.
//! A position hash is the XOR of the keys of all occupied cells, so placing
//! or removing a stone is a single XOR. Keys belong to one `State`: each
//! fresh state draws its own table, nothing is shared process-wide.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, Stone};
//! use gomoku::search::ZobristKeys;
//!
//! let keys = ZobristKeys::with_seed(15, 7);
//! let pos = Pos::new(7, 7);
//!
//! let hash = keys.toggle(0, pos, Stone::Black);
//! assert_ne!(hash, 0);
//!
//! // XOR is its own inverse
//! assert_eq!(keys.toggle(hash, pos, Stone::Black), 0);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Pos, Stone};

/// Per-state Zobrist key table
#[derive(Debug, Clone)]
pub struct ZobristKeys {
    size: usize,
    /// Keys for Black stones, row-major
    black: Vec<u64>,
    /// Keys for White stones, row-major
    white: Vec<u64>,
}

impl ZobristKeys {
    /// Draw a fresh table from OS entropy.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::from_rng(size, &mut StdRng::from_entropy())
    }

    /// Draw a reproducible table from a fixed seed.
    #[must_use]
    pub fn with_seed(size: usize, seed: u64) -> Self {
        Self::from_rng(size, &mut StdRng::seed_from_u64(seed))
    }

    fn from_rng(size: usize, rng: &mut impl Rng) -> Self {
        let cells = size * size;
        let black = (0..cells).map(|_| rng.gen()).collect();
        let white = (0..cells).map(|_| rng.gen()).collect();
        Self { size, black, white }
    }

    /// Key for a stone of `stone` color at `pos`
    #[inline]
    #[must_use]
    pub fn key(&self, pos: Pos, stone: Stone) -> u64 {
        let idx = pos.to_index(self.size);
        match stone {
            Stone::Black => self.black[idx],
            Stone::White => self.white[idx],
            Stone::Empty | Stone::OutOfBounds => 0,
        }
    }

    /// XOR a stone in or out of `hash`.
    ///
    /// Placing and removing are the same operation.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, pos: Pos, stone: Stone) -> u64 {
        hash ^ self.key(pos, stone)
    }
}
