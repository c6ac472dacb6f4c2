//! Board representation for Gomoku

pub mod rays;
pub mod state;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports
pub use rays::RayTable;
pub use state::State;

/// Number of cells in a ray (offsets -4..=+4 along one axis)
pub const RAY_LEN: usize = 9;
/// Index of the centre cell inside a ray
pub const RAY_CENTER: usize = 4;

/// Cell occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    /// First player (moves on even plies)
    Black,
    /// Second player (moves on odd plies)
    White,
    /// Sentinel seen only through rays past the board edge
    OutOfBounds,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            other => other,
        }
    }

    /// True for Black or White
    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, Stone::Black | Stone::White)
    }

    /// Table index for per-player data (Black = 0, White = 1)
    #[inline]
    pub(crate) fn player_index(self) -> usize {
        debug_assert!(self.is_player(), "{self:?} is not a player");
        match self {
            Stone::White => 1,
            _ => 0,
        }
    }
}

/// Position on the board, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board of the given size
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_within(self, size: usize) -> bool {
        (self.row as usize) < size && (self.col as usize) < size
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

/// The four line axes through a cell.
///
/// Ray index 0 lies at offset -4 along the axis, index 8 at offset +4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Top-left to bottom-right
    DiagonalDown,
    /// Bottom-left to top-right
    DiagonalUp,
    Vertical,
    Horizontal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::DiagonalDown,
        Direction::DiagonalUp,
        Direction::Vertical,
        Direction::Horizontal,
    ];

    /// (row, col) step for one positive offset along the axis
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::DiagonalDown => (1, 1),
            Direction::DiagonalUp => (-1, 1),
            Direction::Vertical => (1, 0),
            Direction::Horizontal => (0, 1),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}
