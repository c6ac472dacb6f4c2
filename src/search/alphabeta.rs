//! Negamax search with alpha-beta pruning and iterative deepening
//!
//! The searcher owns its transposition table and threat matcher; a fresh
//! [`State`] is handed in for every top-level search.
//!
//! # Features
//!
//! - Iterative deepening from [`MIN_DEPTH`] to [`MAX_DEPTH`], each depth
//!   seeding the root ordering of the next
//! - Hash move from the transposition table tried first at every node
//! - Threat-driven move ordering: wins, forced blocks, then counter-attacks
//! - Cooperative cancellation and a wall-clock limit checked at every node
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Pos, State};
//! use gomoku::config::EngineConfig;
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(&EngineConfig::new(15, 100));
//! let mut state = State::new(15);
//!
//! // The opening move is forced to the centre
//! let result = searcher.search(&mut state);
//! assert_eq!(result.best_move, Some(Pos::new(7, 7)));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::board::{Pos, State, Stone};
use crate::config::EngineConfig;
use crate::eval::{evaluate_field, evaluate_state};

use super::threat::{ThreatKind, ThreatMatcher};
use super::tt::{TTStats, TranspositionTable};

/// First iterative-deepening depth
pub const MIN_DEPTH: i32 = 2;
/// Last iterative-deepening depth
pub const MAX_DEPTH: i32 = 10;

/// Score of a root move that was never searched
const UNSEARCHED: i32 = i32::MIN;

/// Timeout or cancellation, unwound through every negamax frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Interrupted;

/// Shared flag for stopping a search from another thread.
///
/// Checked on entry to every node; a set flag unwinds the search to the
/// last completed depth.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the running (or next) search stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub(crate) fn reset(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Every negamax entry, leaves included
    pub nodes: u64,
    /// Nodes that expanded children
    pub interior_nodes: u64,
    /// Children searched across all interior nodes
    pub branches_explored: u64,
    /// Interior nodes that tried a cached best move first
    pub hash_move_hits: u64,
    /// Deepest fully completed iteration, 0 if none
    pub completed_depth: i32,
}

impl SearchStats {
    /// Average children searched per interior node
    pub fn avg_branching(&self) -> f64 {
        if self.interior_nodes == 0 {
            0.0
        } else {
            self.branches_explored as f64 / self.interior_nodes as f64
        }
    }
}

/// Outcome of one top-level search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move, `None` only when no candidate exists
    pub best_move: Option<Pos>,
    /// Root score of `best_move` at `depth`, 0 if no depth completed
    pub score: i32,
    /// Deepest completed iteration, 0 for forced moves and fallbacks
    pub depth: i32,
    /// Size of the pre-search root ordering
    pub candidates: usize,
    pub stats: SearchStats,
}

/// Candidate list that drops repeats while keeping discovery order.
struct MoveSet {
    moves: Vec<Pos>,
    seen: Vec<bool>,
    size: usize,
}

impl MoveSet {
    fn new(size: usize) -> Self {
        Self {
            moves: Vec::new(),
            seen: vec![false; size * size],
            size,
        }
    }

    fn insert(&mut self, pos: Pos) {
        let idx = pos.to_index(self.size);
        if !self.seen[idx] {
            self.seen[idx] = true;
            self.moves.push(pos);
        }
    }

    fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    fn into_vec(self) -> Vec<Pos> {
        self.moves
    }
}

/// Negamax searcher with a best-move transposition table.
pub struct Searcher {
    tt: TranspositionTable,
    matcher: ThreatMatcher,
    cancel: CancelHandle,
    time_limit: Duration,
    candidate_distance: usize,
    root_window: i32,
    start: Instant,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher from the search-related fields of `config`.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tt: TranspositionTable::new(config.cache_capacity),
            matcher: ThreatMatcher::new(),
            cancel: CancelHandle::new(),
            time_limit: config.time_limit(),
            candidate_distance: config.candidate_distance,
            root_window: config.root_window,
            start: Instant::now(),
            stats: SearchStats::default(),
        }
    }

    pub fn set_time_limit(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
    }

    /// Handle that stops this searcher's running search.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Counters from the most recent search
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    /// Find the best move for the player to move in `state`.
    ///
    /// Counters and the transposition table are reset first. On return
    /// `state` is exactly as it was passed in, even after an interruption.
    /// The cancellation flag is left untouched.
    pub fn search(&mut self, state: &mut State) -> SearchResult {
        self.stats = SearchStats::default();
        self.tt.clear();

        let result = self.iterative_deepening(state, MIN_DEPTH, MAX_DEPTH);

        let elapsed = self.start.elapsed();
        let elapsed_ms = elapsed.as_secs_f64() * 1000.0;
        info!(
            elapsed_ms = elapsed.as_millis() as u64,
            nodes = self.stats.nodes,
            nodes_per_ms = self.stats.nodes as f64 / elapsed_ms.max(1.0),
            avg_branching = self.stats.avg_branching(),
            depth = result.depth,
            "search finished"
        );
        result
    }

    /// Order candidate moves for the player to move.
    ///
    /// In priority order:
    /// 1. Empty board: the centre cell only
    /// 2. Cells completing one of our fours
    /// 3. Cells blocking an opponent four
    /// 4. Cells answering an opponent three, plus our refutations
    /// 5. Empty cells near a stone, best `evaluate_field` first, with
    ///    `hash_move` left out since it is tried separately
    #[must_use]
    pub fn sorted_moves(&self, state: &State, hash_move: Option<Pos>) -> Vec<Pos> {
        if state.move_count() == 0 {
            let center = (state.size() / 2) as u8;
            return vec![Pos::new(center, center)];
        }

        let me = state.to_move();
        let opponent = me.opponent();
        let mut moves = MoveSet::new(state.size());

        self.collect_threats(state, ThreatKind::Four, me, &mut moves);
        if !moves.is_empty() {
            return moves.into_vec();
        }

        self.collect_threats(state, ThreatKind::Four, opponent, &mut moves);
        if !moves.is_empty() {
            return moves.into_vec();
        }

        self.collect_threats(state, ThreatKind::Three, opponent, &mut moves);
        if !moves.is_empty() {
            self.collect_threats(state, ThreatKind::Refutation, me, &mut moves);
            return moves.into_vec();
        }

        self.quiet_moves(state, hash_move)
    }

    fn collect_threats(
        &self,
        state: &State,
        kind: ThreatKind,
        player: Stone,
        moves: &mut MoveSet,
    ) {
        for pos in state.stones(player) {
            self.matcher
                .collect(kind, state, pos, player, |m| moves.insert(m));
        }
    }

    fn quiet_moves(&self, state: &State, hash_move: Option<Pos>) -> Vec<Pos> {
        let size = state.size();
        let me = state.to_move();

        let mut scored: Vec<(Pos, i32)> = (0..size * size)
            .map(|idx| Pos::from_index(idx, size))
            .filter(|&pos| Some(pos) != hash_move)
            .filter(|&pos| state.is_empty(pos))
            .filter(|&pos| state.has_adjacent_stone(pos, self.candidate_distance))
            .map(|pos| (pos, evaluate_field(state, pos, me)))
            .collect();

        // Stable, so equal scores stay in row-major order
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(pos, _)| pos).collect()
    }

    #[inline]
    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.start.elapsed() > self.time_limit
    }

    /// Make `mv`, search the child, undo. The move is undone before an
    /// interruption propagates.
    fn search_child(
        &mut self,
        state: &mut State,
        mv: Pos,
        depth: i32,
        alpha: i32,
        beta: i32,
    ) -> Result<i32, Interrupted> {
        state.make_move(mv);
        let score = self.negamax(state, depth - 1, -beta, -alpha);
        state.undo_move(mv);
        Ok(-score?)
    }

    /// Fail-soft negamax from the perspective of the player to move.
    fn negamax(
        &mut self,
        state: &mut State,
        depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> Result<i32, Interrupted> {
        self.stats.nodes += 1;
        if self.should_stop() {
            return Err(Interrupted);
        }

        if depth == 0 || state.terminal_status().is_terminal() {
            return Ok(evaluate_state(state, depth));
        }
        self.stats.interior_nodes += 1;

        let hash = state.hash();
        // A stale or colliding entry may point at an occupied cell
        let hash_move = self
            .tt
            .get(hash)
            .map(|entry| entry.best_move)
            .filter(|&mv| state.is_empty(mv));

        let mut best = i32::MIN;
        let mut best_move = None;

        if let Some(mv) = hash_move {
            self.stats.hash_move_hits += 1;
            self.stats.branches_explored += 1;
            let score = self.search_child(state, mv, depth, alpha, beta)?;
            best = score;
            best_move = Some(mv);
            alpha = alpha.max(best);
            if best >= beta {
                return Ok(best);
            }
        }

        for mv in self.sorted_moves(state, hash_move) {
            if Some(mv) == hash_move {
                continue;
            }
            self.stats.branches_explored += 1;
            let score = self.search_child(state, mv, depth, alpha, beta)?;
            if score > best {
                best = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best);
            if best >= beta {
                break;
            }
        }

        match best_move {
            Some(mv) => {
                self.tt.store(hash, mv, depth);
                Ok(best)
            }
            None => Ok(evaluate_state(state, depth)),
        }
    }

    /// Search every root move at `depth` and return them best first.
    fn search_moves(
        &mut self,
        state: &mut State,
        moves: &[Pos],
        depth: i32,
    ) -> Result<Vec<(Pos, i32)>, Interrupted> {
        let mut scored: Vec<(Pos, i32)> = moves.iter().map(|&mv| (mv, UNSEARCHED)).collect();
        let mut alpha = -self.root_window;
        let beta = self.root_window;
        let mut best = UNSEARCHED;

        for entry in scored.iter_mut() {
            entry.1 = self.search_child(state, entry.0, depth, alpha, beta)?;
            best = best.max(entry.1);
            alpha = alpha.max(best);
            if best >= beta {
                break;
            }
        }

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        Ok(scored)
    }

    /// Deepen from `min_depth` to `max_depth` until done or interrupted.
    ///
    /// Returns the head of the ordering from the last completed depth, or of
    /// the pre-search ordering if not even `min_depth` completed.
    fn iterative_deepening(
        &mut self,
        state: &mut State,
        min_depth: i32,
        max_depth: i32,
    ) -> SearchResult {
        self.start = Instant::now();
        let mut moves = self.sorted_moves(state, None);
        let candidates = moves.len();

        let mut result = SearchResult {
            best_move: moves.first().copied(),
            score: 0,
            depth: 0,
            candidates,
            stats: self.stats,
        };
        if candidates <= 1 {
            debug!(candidates, "no search needed");
            return result;
        }

        for depth in min_depth..=max_depth {
            match self.search_moves(state, &moves, depth) {
                Ok(scored) => {
                    let (best, score) = scored[0];
                    debug!(depth, best = %best, score, "depth completed");
                    moves = scored.into_iter().map(|(mv, _)| mv).collect();
                    result.score = score;
                    result.depth = depth;
                    self.stats.completed_depth = depth;
                }
                Err(Interrupted) => {
                    debug!(
                        depth,
                        elapsed_ms = self.start.elapsed().as_millis() as u64,
                        "search interrupted"
                    );
                    break;
                }
            }
        }

        result.best_move = moves.first().copied();
        result.stats = self.stats;
        result
    }
}
