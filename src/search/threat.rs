//! Threat pattern matching for move ordering
//!
//! Three fixed families of stone/gap templates are slid along the rays through
//! a stone:
//! - Fours: one gap away from five (the gap wins or must be blocked)
//! - Threes: open and broken threes that become an unstoppable four
//! - Refutations: three stones that one more move turns into a four, used to
//!   find counter-attacks when defending against a three
//!
//! Off-board ray cells hold `Stone::OutOfBounds`, which never equals a template
//! cell, so a match never extends past the edge and every gap resolves to a
//! real board position.

use crate::board::{Direction, Pos, State, Stone, RAY_LEN};

/// A stone/gap template with its gap offsets, stored for both players
#[derive(Debug, Clone)]
pub struct ThreatPattern {
    /// Template from Black's and White's perspective
    templates: [Vec<Stone>; 2],
    /// Offsets of the cells to play (attack or block)
    squares: Vec<usize>,
}

impl ThreatPattern {
    /// Build a pattern from a canonical template where 0 is an empty cell and
    /// 1 a stone of the owning player.
    #[must_use]
    pub fn new(canonical: &[u8], squares: &[usize]) -> Self {
        let to_stones = |player: Stone| -> Vec<Stone> {
            canonical
                .iter()
                .map(|&c| if c == 1 { player } else { Stone::Empty })
                .collect()
        };
        debug_assert!(squares.iter().all(|&s| canonical[s] == 0));

        Self {
            templates: [to_stones(Stone::Black), to_stones(Stone::White)],
            squares: squares.to_vec(),
        }
    }

    /// Template from the perspective of `player`
    #[inline]
    pub fn pattern(&self, player: Stone) -> &[Stone] {
        &self.templates[player.player_index()]
    }

    #[inline]
    pub fn squares(&self) -> &[usize] {
        &self.squares
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates[0].len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates[0].is_empty()
    }
}

/// Pattern families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatKind {
    Four,
    Three,
    Refutation,
}

/// Matches threat families around stones
#[derive(Debug, Clone)]
pub struct ThreatMatcher {
    fours: Vec<ThreatPattern>,
    threes: Vec<ThreatPattern>,
    refutations: Vec<ThreatPattern>,
}

impl ThreatMatcher {
    #[must_use]
    pub fn new() -> Self {
        let fours = vec![
            ThreatPattern::new(&[1, 1, 1, 1, 0], &[4]),
            ThreatPattern::new(&[1, 1, 1, 0, 1], &[3]),
            ThreatPattern::new(&[1, 1, 0, 1, 1], &[2]),
            ThreatPattern::new(&[1, 0, 1, 1, 1], &[1]),
            ThreatPattern::new(&[0, 1, 1, 1, 1], &[0]),
        ];

        // Straight and broken threes; squares are the extension plus both ends
        let threes = vec![
            ThreatPattern::new(&[0, 1, 1, 1, 0, 0], &[0, 4, 5]),
            ThreatPattern::new(&[0, 0, 1, 1, 1, 0], &[0, 1, 5]),
            ThreatPattern::new(&[0, 1, 0, 1, 1, 0], &[0, 2, 5]),
            ThreatPattern::new(&[0, 1, 1, 0, 1, 0], &[0, 3, 5]),
        ];

        let refutations = vec![
            ThreatPattern::new(&[1, 1, 1, 0, 0], &[3, 4]),
            ThreatPattern::new(&[1, 1, 0, 0, 1], &[2, 3]),
            ThreatPattern::new(&[1, 0, 0, 1, 1], &[1, 2]),
            ThreatPattern::new(&[0, 0, 1, 1, 1], &[0, 1]),
        ];

        Self {
            fours,
            threes,
            refutations,
        }
    }

    #[inline]
    pub fn family(&self, kind: ThreatKind) -> &[ThreatPattern] {
        match kind {
            ThreatKind::Four => &self.fours,
            ThreatKind::Three => &self.threes,
            ThreatKind::Refutation => &self.refutations,
        }
    }

    /// Cells completing a four of `player` through the stone at `pos`
    #[must_use]
    pub fn fours(&self, state: &State, pos: Pos, player: Stone) -> Vec<Pos> {
        self.threat_moves(ThreatKind::Four, state, pos, player)
    }

    /// Extension and blocking cells of threes of `player` through `pos`
    #[must_use]
    pub fn threes(&self, state: &State, pos: Pos, player: Stone) -> Vec<Pos> {
        self.threat_moves(ThreatKind::Three, state, pos, player)
    }

    /// Cells turning a three of `player` through `pos` into a four
    #[must_use]
    pub fn refutations(&self, state: &State, pos: Pos, player: Stone) -> Vec<Pos> {
        self.threat_moves(ThreatKind::Refutation, state, pos, player)
    }

    /// Collect the squares of every `kind` pattern matching on a ray through
    /// `pos`. A position may appear more than once.
    #[must_use]
    pub fn threat_moves(
        &self,
        kind: ThreatKind,
        state: &State,
        pos: Pos,
        player: Stone,
    ) -> Vec<Pos> {
        let mut moves = Vec::new();
        self.collect(kind, state, pos, player, |m| moves.push(m));
        moves
    }

    /// Feed every matched square to `emit`.
    pub(crate) fn collect(
        &self,
        kind: ThreatKind,
        state: &State,
        pos: Pos,
        player: Stone,
        mut emit: impl FnMut(Pos),
    ) {
        for dir in Direction::ALL {
            let indices = state.ray_indices(pos, dir);
            let ray = state.ray(pos, dir);

            for pattern in self.family(kind) {
                let template = pattern.pattern(player);
                for start in 0..=RAY_LEN - pattern.len() {
                    if ray[start..start + pattern.len()] == *template {
                        for &square in pattern.squares() {
                            emit(state.pos_of(indices[start + square]));
                        }
                    }
                }
            }
        }
    }
}

impl Default for ThreatMatcher {
    fn default() -> Self {
        Self::new()
    }
}
