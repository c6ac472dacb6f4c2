//! Transposition table for caching best moves between iterations
//!
//! Entries map a Zobrist hash to the best move found for that position and
//! the depth it was searched to. The table holds at most `capacity` entries
//! and evicts the least recently used one when full. Recency is kept in an
//! intrusive doubly linked list threaded through a slab of nodes, so `get`,
//! `put` and eviction are all O(1).
//!
//! # Example
//!
//! ```
//! use gomoku::board::Pos;
//! use gomoku::search::{TTEntry, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(2);
//! tt.put(1, TTEntry::new(Pos::new(7, 7), 2));
//! tt.put(2, TTEntry::new(Pos::new(7, 8), 2));
//!
//! // Touch key 1 so key 2 becomes the eviction candidate
//! assert!(tt.get(1).is_some());
//! tt.put(3, TTEntry::new(Pos::new(8, 8), 2));
//!
//! assert!(tt.get(2).is_none());
//! assert!(tt.get(1).is_some());
//! ```

use std::collections::HashMap;

use crate::board::Pos;

/// Slot index meaning "no node"
const NIL: usize = usize::MAX;

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Best move found for this position
    pub best_move: Pos,
    /// Remaining depth the move was searched with
    pub depth: i32,
}

impl TTEntry {
    #[inline]
    pub fn new(best_move: Pos, depth: i32) -> Self {
        Self { best_move, depth }
    }
}

#[derive(Debug, Clone)]
struct Node {
    key: u64,
    entry: TTEntry,
    prev: usize,
    next: usize,
}

/// Bounded LRU map from position hash to [`TTEntry`].
#[derive(Debug, Clone)]
pub struct TranspositionTable {
    map: HashMap<u64, usize>,
    nodes: Vec<Node>,
    /// Most recently used
    head: usize,
    /// Least recently used
    tail: usize,
    capacity: usize,
    stats: TTStats,
}

impl TranspositionTable {
    /// Create an empty table holding at most `capacity` entries.
    ///
    /// Storage grows on demand, so a large capacity costs nothing until used.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let initial = capacity.min(4096);
        Self {
            map: HashMap::with_capacity(initial),
            nodes: Vec::with_capacity(initial),
            head: NIL,
            tail: NIL,
            capacity,
            stats: TTStats::default(),
        }
    }

    /// Look up `key` and mark it most recently used.
    pub fn get(&mut self, key: u64) -> Option<TTEntry> {
        match self.map.get(&key).copied() {
            Some(idx) => {
                self.stats.hits += 1;
                self.promote(idx);
                Some(self.nodes[idx].entry)
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Look up `key` without touching recency.
    #[must_use]
    pub fn peek(&self, key: u64) -> Option<&TTEntry> {
        self.map.get(&key).map(|&idx| &self.nodes[idx].entry)
    }

    /// Insert or overwrite `key`, marking it most recently used. Inserting a
    /// new key into a full table evicts the least recently used entry first.
    pub fn put(&mut self, key: u64, entry: TTEntry) {
        if let Some(&idx) = self.map.get(&key) {
            self.nodes[idx].entry = entry;
            self.promote(idx);
            return;
        }

        let idx = if self.map.len() >= self.capacity {
            // Reuse the LRU slot for the new entry
            let idx = self.tail;
            self.unlink(idx);
            self.map.remove(&self.nodes[idx].key);
            self.stats.evictions += 1;
            self.nodes[idx].key = key;
            self.nodes[idx].entry = entry;
            idx
        } else {
            self.nodes.push(Node {
                key,
                entry,
                prev: NIL,
                next: NIL,
            });
            self.nodes.len() - 1
        };

        self.push_front(idx);
        self.map.insert(key, idx);
    }

    /// Store a best move, keeping an existing entry unless the new search
    /// went strictly deeper.
    pub fn store(&mut self, key: u64, best_move: Pos, depth: i32) {
        match self.get(key) {
            Some(existing) if existing.depth >= depth => {}
            _ => self.put(key, TTEntry::new(best_move, depth)),
        }
    }

    /// Remove every entry and reset recency and statistics.
    pub fn clear(&mut self) {
        self.map.clear();
        self.nodes.clear();
        self.head = NIL;
        self.tail = NIL;
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn stats(&self) -> TTStats {
        TTStats {
            size: self.map.len(),
            ..self.stats
        }
    }

    fn promote(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        if prev == NIL {
            self.head = next;
        } else {
            self.nodes[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.nodes[next].prev = prev;
        }
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = NIL;
    }

    fn push_front(&mut self, idx: usize) {
        self.nodes[idx].prev = NIL;
        self.nodes[idx].next = self.head;
        if self.head != NIL {
            self.nodes[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }
}

/// Statistics about table usage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    /// Entries currently stored
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(n: u8) -> TTEntry {
        TTEntry::new(Pos::new(n, n), 1)
    }

    #[test]
    fn test_put_and_get() {
        let mut tt = TranspositionTable::new(8);
        tt.put(42, entry(3));
        assert_eq!(tt.get(42), Some(entry(3)));
        assert_eq!(tt.get(43), None);
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_single_entry() {
        let mut tt = TranspositionTable::new(8);
        tt.put(1, entry(1));
        tt.put(1, entry(2));
        assert_eq!(tt.len(), 1);
        assert_eq!(tt.get(1), Some(entry(2)));
    }

    #[test]
    fn test_evicts_least_recently_inserted() {
        let mut tt = TranspositionTable::new(3);
        for key in 1..=4 {
            tt.put(key, entry(key as u8));
        }
        assert_eq!(tt.len(), 3);
        assert_eq!(tt.get(1), None);
        for key in 2..=4 {
            assert!(tt.get(key).is_some());
        }
        assert_eq!(tt.stats().evictions, 1);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut tt = TranspositionTable::new(3);
        tt.put(1, entry(1));
        tt.put(2, entry(2));
        tt.put(3, entry(3));

        assert!(tt.get(1).is_some());
        tt.put(4, entry(4));

        // 2 was the least recently accessed
        assert!(tt.peek(2).is_none());
        assert!(tt.peek(1).is_some());
        assert!(tt.peek(3).is_some());
        assert!(tt.peek(4).is_some());
    }

    #[test]
    fn test_put_existing_refreshes_recency() {
        let mut tt = TranspositionTable::new(2);
        tt.put(1, entry(1));
        tt.put(2, entry(2));
        tt.put(1, entry(5));
        tt.put(3, entry(3));

        assert!(tt.peek(2).is_none());
        assert_eq!(tt.peek(1), Some(&entry(5)));
    }

    #[test]
    fn test_peek_does_not_refresh() {
        let mut tt = TranspositionTable::new(2);
        tt.put(1, entry(1));
        tt.put(2, entry(2));
        assert!(tt.peek(1).is_some());
        tt.put(3, entry(3));
        assert!(tt.peek(1).is_none());
    }

    #[test]
    fn test_evicts_in_order_over_many_inserts() {
        let mut tt = TranspositionTable::new(100);
        for key in 0..1000u64 {
            tt.put(key, entry((key % 15) as u8));
        }
        assert_eq!(tt.len(), 100);
        assert!(tt.peek(899).is_none());
        assert!((900..1000).all(|k| tt.peek(k).is_some()));
        assert_eq!(tt.stats().evictions, 900);
    }

    #[test]
    fn test_capacity_one() {
        let mut tt = TranspositionTable::new(1);
        tt.put(1, entry(1));
        tt.put(2, entry(2));
        assert_eq!(tt.len(), 1);
        assert!(tt.get(1).is_none());
        assert_eq!(tt.get(2), Some(entry(2)));
    }

    #[test]
    fn test_store_replaces_only_if_deeper() {
        let mut tt = TranspositionTable::new(8);
        tt.store(7, Pos::new(1, 1), 3);

        tt.store(7, Pos::new(2, 2), 2);
        assert_eq!(tt.peek(7), Some(&TTEntry::new(Pos::new(1, 1), 3)));

        tt.store(7, Pos::new(3, 3), 3);
        assert_eq!(tt.peek(7), Some(&TTEntry::new(Pos::new(1, 1), 3)));

        tt.store(7, Pos::new(4, 4), 5);
        assert_eq!(tt.peek(7), Some(&TTEntry::new(Pos::new(4, 4), 5)));
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::new(4);
        tt.put(1, entry(1));
        tt.put(2, entry(2));
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.get(1).is_none());

        // Still usable after clearing
        tt.put(3, entry(3));
        assert_eq!(tt.get(3), Some(entry(3)));
    }

    #[test]
    fn test_stats_track_hits_and_misses() {
        let mut tt = TranspositionTable::new(4);
        tt.put(1, entry(1));
        let _ = tt.get(1);
        let _ = tt.get(2);
        let stats = tt.stats();
        assert_eq!(stats.size, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
    }
}
