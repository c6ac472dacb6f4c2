//! Main AI engine facing the game loop
//!
//! The engine takes the full move history, rebuilds a fresh position from it
//! and runs an iterative-deepening negamax search under the configured time
//! limit. Nothing but the configuration survives between calls.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Pos};
//!
//! let mut engine = AIEngine::with_config(15, 200).unwrap();
//!
//! // Black opens in the centre
//! assert_eq!(engine.get_move(&[]).unwrap(), Some(Pos::new(7, 7)));
//!
//! // White answers within the time limit
//! let reply = engine.get_move(&[Pos::new(7, 7)]).unwrap();
//! assert!(reply.is_some());
//! ```

use std::time::Instant;

use tracing::warn;

use crate::board::{Pos, State};
use crate::config::EngineConfig;
use crate::error::GomokuError;
use crate::search::{CancelHandle, SearchResult, SearchStats, Searcher};

/// How the returned move was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Board full, nothing to play
    NoMove,
    /// Single candidate (opening centre, forced win or forced block)
    Forced,
    /// At least one search depth completed
    Search,
    /// Interrupted before any depth completed; head of the static ordering
    Fallback,
}

/// Result of a move search with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, `None` only if the board is full
    pub best_move: Option<Pos>,
    /// Root score from the mover's perspective at `depth`
    pub score: i32,
    /// Deepest completed search depth
    pub depth: i32,
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
}

impl MoveResult {
    fn from_search(result: &SearchResult, time_ms: u64) -> Self {
        let search_type = match (result.candidates, result.depth) {
            (0, _) => SearchType::NoMove,
            (1, _) => SearchType::Forced,
            (_, 0) => SearchType::Fallback,
            _ => SearchType::Search,
        };
        Self {
            best_move: result.best_move,
            score: result.score,
            depth: result.depth,
            search_type,
            time_ms,
            nodes: result.stats.nodes,
        }
    }
}

/// Main AI Engine for Gomoku.
///
/// One engine serves one game loop; `get_move` takes `&mut self`, so calls
/// never overlap. Use [`AIEngine::cancel_handle`] to stop a running search
/// from another thread.
pub struct AIEngine {
    config: EngineConfig,
    searcher: Searcher,
    cancel: CancelHandle,
}

impl AIEngine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, GomokuError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: EngineConfig) -> Self {
        let searcher = Searcher::new(&config);
        let cancel = searcher.cancel_handle();
        Self {
            config,
            searcher,
            cancel,
        }
    }

    /// Engine with default settings for the given board size and time limit.
    pub fn with_config(board_size: usize, time_limit_ms: u64) -> Result<Self, GomokuError> {
        Self::new(EngineConfig::new(board_size, time_limit_ms))
    }

    /// Best move for the player to move after `history`.
    ///
    /// Returns `Ok(None)` when no legal move exists and an error if
    /// `history` is not a legal sequence of moves on this board.
    pub fn get_move(&mut self, history: &[Pos]) -> Result<Option<Pos>, GomokuError> {
        Ok(self.get_move_with_stats(history)?.best_move)
    }

    /// Like [`AIEngine::get_move`], with search metadata.
    ///
    /// A pending cancellation is honoured by this call and cleared when it
    /// returns.
    pub fn get_move_with_stats(&mut self, history: &[Pos]) -> Result<MoveResult, GomokuError> {
        let start = Instant::now();
        let outcome = self.search(history);
        self.cancel.reset();

        let result = outcome?;
        Ok(MoveResult::from_search(
            &result,
            start.elapsed().as_millis() as u64,
        ))
    }

    fn search(&mut self, history: &[Pos]) -> Result<SearchResult, GomokuError> {
        let mut state =
            State::from_history(self.config.board_size, history, self.config.zobrist_seed)
                .map_err(|err| {
                    warn!(%err, moves = history.len(), "rejected move history");
                    err
                })?;
        Ok(self.searcher.search(&mut state))
    }

    /// Handle for cancelling a search from another thread.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stop the running search, or the next one if none is running.
    pub fn cancel_search(&self) {
        self.cancel.cancel();
    }

    /// Set the time limit for subsequent searches.
    ///
    /// Rejects a limit the config would reject; the old limit then stays.
    pub fn set_time_limit(&mut self, time_limit_ms: u64) -> Result<(), GomokuError> {
        let mut config = self.config.clone();
        config.set_time_limit_ms(time_limit_ms);
        config.validate()?;

        self.searcher.set_time_limit(config.time_limit());
        self.config = config;
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters from the most recent search.
    #[must_use]
    pub fn last_stats(&self) -> SearchStats {
        self.searcher.stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::from_valid(EngineConfig::default())
    }
}
