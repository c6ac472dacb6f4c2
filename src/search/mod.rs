//! Search module for Gomoku AI
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Threat pattern matching for move ordering
//! - LRU transposition table for best-move caching
//! - Negamax alpha-beta search with iterative deepening

pub mod alphabeta;
pub mod threat;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{CancelHandle, SearchResult, SearchStats, Searcher, MAX_DEPTH, MIN_DEPTH};
pub use threat::{ThreatKind, ThreatMatcher, ThreatPattern};
pub use tt::{TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristKeys;
