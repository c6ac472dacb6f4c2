//! Score constants for Gomoku evaluation

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Score of a live length-5 window, indexed by how many of its cells are
    /// still empty. Fewer empties means closer to a five.
    pub const WINDOW: [i32; 5] = [19, 15, 11, 7, 3];

    /// Base score of a decided game. The remaining depth is added on top so
    /// faster wins (and slower losses) are preferred.
    pub const WIN: i32 = 10_000;
}

/// Score of a won position with `depth` plies of search remaining
#[inline]
pub const fn win_score(depth: i32) -> i32 {
    PatternScore::WIN + depth
}
