//! Position evaluation
//!
//! - [`patterns`]: score constants
//! - [`heuristic`]: window-based field and state evaluation

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate_field, evaluate_state, score_window};
pub use patterns::PatternScore;
