//! Gomoku AI engine with negamax search
//!
//! Computes the next move in freestyle Gomoku (five or more in a row wins)
//! on an odd N×N board under a wall-clock budget:
//! - Board state with index-based rays and incremental Zobrist hashing
//! - Threat patterns (fours, threes, refutations) for move ordering
//! - Window-based heuristic evaluation
//! - Iterative-deepening negamax with alpha-beta and an LRU transposition table
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Cells, positions, rays and the search state
//! - [`rules`]: Win and draw detection
//! - [`eval`]: Position evaluation and heuristics
//! - [`search`]: Hashing, threats, transposition table and negamax
//! - [`engine`]: Main AI engine facing the game loop
//! - [`config`]: Engine settings, loadable from TOML
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Pos};
//!
//! let mut engine = AIEngine::with_config(15, 200).unwrap();
//! let mut history = vec![Pos::new(7, 7)];
//!
//! // AI responds as White
//! if let Some(pos) = engine.get_move(&history).unwrap() {
//!     history.push(pos);
//!     println!("AI plays at {pos}");
//! }
//! ```
//!
//! # Cancellation
//!
//! [`AIEngine::cancel_handle`] returns a [`CancelHandle`] that can stop a
//! running search from another thread. The engine then answers with the best
//! move of the last completed depth.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Pos, State, Stone};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::GomokuError;
pub use search::CancelHandle;
