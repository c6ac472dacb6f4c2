//! Error types

use thiserror::Error;

use crate::board::Pos;

/// Errors surfaced by the engine.
///
/// Search timeouts and cancellations are not errors; they only truncate
/// iterative deepening.
#[derive(Debug, Error)]
pub enum GomokuError {
    #[error("move {pos} is outside the {size}x{size} board")]
    OutOfBounds { pos: Pos, size: usize },

    #[error("move {pos} targets an occupied cell")]
    Occupied { pos: Pos },

    #[error("board size {0} is invalid (expected an odd size between 5 and 255)")]
    InvalidBoardSize(usize),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
