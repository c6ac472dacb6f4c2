//! Engine configuration
//!
//! All fields have defaults, so a TOML file only needs the values it changes:
//!
//! ```toml
//! board_size = 19
//! time_limit_ms = 500
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GomokuError;
use crate::eval::PatternScore;
use crate::search::MAX_DEPTH;

/// Smallest board that can hold a five in every direction
pub const MIN_BOARD_SIZE: usize = 5;
/// Largest board addressable by `Pos` coordinates
pub const MAX_BOARD_SIZE: usize = u8::MAX as usize;

/// Check that `size` is an odd board dimension within range.
pub(crate) fn check_board_size(size: usize) -> Result<(), GomokuError> {
    if (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) && size % 2 == 1 {
        Ok(())
    } else {
        Err(GomokuError::InvalidBoardSize(size))
    }
}

/// Settings consumed by [`crate::AIEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board dimension (odd, so the centre cell is unique)
    pub board_size: usize,
    /// Wall-clock budget per move
    pub time_limit_ms: u64,
    /// Transposition cache entries
    pub cache_capacity: usize,
    /// Quiet candidates must lie this close to a stone along some axis
    pub candidate_distance: usize,
    /// Root alpha-beta bound; must lie outside every terminal score
    pub root_window: i32,
    /// Fixed Zobrist seed, fresh keys per search when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zobrist_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: 15,
            time_limit_ms: 2000,
            cache_capacity: 1_000_000,
            candidate_distance: 2,
            root_window: 11_000,
            zobrist_seed: None,
        }
    }
}

impl EngineConfig {
    /// Default settings for a given board size and time budget.
    #[must_use]
    pub fn new(board_size: usize, time_limit_ms: u64) -> Self {
        Self {
            board_size,
            time_limit_ms,
            ..Self::default()
        }
    }

    pub fn set_time_limit_ms(&mut self, time_limit_ms: u64) {
        self.time_limit_ms = time_limit_ms;
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, GomokuError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GomokuError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), GomokuError> {
        check_board_size(self.board_size)?;

        if self.time_limit_ms == 0 {
            return Err(GomokuError::InvalidConfig(
                "time_limit_ms must be positive".into(),
            ));
        }
        if self.cache_capacity == 0 {
            return Err(GomokuError::InvalidConfig(
                "cache_capacity must be positive".into(),
            ));
        }
        if !(1..=4).contains(&self.candidate_distance) {
            return Err(GomokuError::InvalidConfig(format!(
                "candidate_distance must be in 1..=4, got {}",
                self.candidate_distance
            )));
        }

        let max_terminal = PatternScore::WIN + MAX_DEPTH;
        if self.root_window <= max_terminal {
            return Err(GomokuError::InvalidConfig(format!(
                "root_window must exceed {max_terminal}, got {}",
                self.root_window
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.board_size, 15);
        assert_eq!(config.time_limit(), Duration::from_secs(2));
    }

    #[test]
    fn test_new_overrides_size_and_time() {
        let mut config = EngineConfig::new(19, 500);
        assert_eq!(config.board_size, 19);
        assert_eq!(config.time_limit_ms, 500);
        assert_eq!(config.cache_capacity, EngineConfig::default().cache_capacity);

        config.set_time_limit_ms(750);
        assert_eq!(config.time_limit(), Duration::from_millis(750));
    }

    #[test]
    fn test_board_size_checks() {
        assert!(check_board_size(5).is_ok());
        assert!(check_board_size(255).is_ok());
        for bad in [0, 3, 14, 16, 257] {
            assert!(matches!(
                check_board_size(bad),
                Err(GomokuError::InvalidBoardSize(s)) if s == bad
            ));
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = EngineConfig::from_toml_str("board_size = 19\ntime_limit_ms = 300\n").unwrap();
        assert_eq!(config.board_size, 19);
        assert_eq!(config.time_limit_ms, 300);
        assert_eq!(config.candidate_distance, 2);
        assert_eq!(config.zobrist_seed, None);
    }

    #[test]
    fn test_toml_seed() {
        let config = EngineConfig::from_toml_str("zobrist_seed = 42").unwrap();
        assert_eq!(config.zobrist_seed, Some(42));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig {
            zobrist_seed: Some(7),
            ..EngineConfig::new(9, 100)
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineConfig::from_toml_str("board_size = 16"),
            Err(GomokuError::InvalidBoardSize(16))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("time_limit_ms = 0"),
            Err(GomokuError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("candidate_distance = 5"),
            Err(GomokuError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_toml_str("root_window = 10000"),
            Err(GomokuError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("board_size = \"big\""),
            Err(GomokuError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::from_file("/nonexistent/gomoku.toml"),
            Err(GomokuError::ConfigIo(_))
        ));
    }
}
