//! The error type shared across the crate.
//!
//! Ordinary unsolvability is *not* an error: solvers report it through
//! `SolveResult::solved == false`. `SudokuError` covers contract violations
//! (bad dimensions, out-of-range values) and adapter failures (malformed
//! input, I/O).

use thiserror::Error;

/// Errors produced by board construction and the I/O adapters.
#[derive(Debug, Error)]
pub enum SudokuError {
    /// A caller passed an argument that violates a documented contract,
    /// such as a non-square grid or an out-of-range cell value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Puzzle input could not be interpreted (unrecognized characters,
    /// length not a perfect square, no recognizable grid layout).
    #[error("parse error: {0}")]
    Parse(String),

    /// An underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
