#![deny(missing_docs)]
//! This crate provides a high-performance Sudoku solver for arbitrary N x N
//! boards with M x K box partitioning, built around two interchangeable
//! engines: a backtracking search with incremental constraint propagation,
//! and Algorithm X over a dancing-links exact-cover matrix.

/// The `benchmark` module measures solver performance: warm-up, timed runs,
/// multi-worker throughput, and algorithm comparisons.
pub mod benchmark;

/// The `board` module implements the N x N Sudoku board model: dimensions,
/// validity checks, and candidate enumeration.
pub mod board;

/// The `error` module defines the crate-wide error type.
pub mod error;

/// The `json` module reads and writes puzzles and solutions in a number of
/// JSON formats.
pub mod json;

/// The `puzzles` module holds the built-in benchmark puzzles.
pub mod puzzles;

/// The `solver` module exposes the solver interface and both engines.
pub mod solver;
