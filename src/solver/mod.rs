#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The solver interface and its two engines.
//!
//! Both engines implement the [`Solver`] trait and are dispatched through
//! the closed [`SolverImpls`] enum; each benchmark worker knows its
//! algorithm at construction, so dispatch stays static. Unsolvability is
//! not an error: it is reported through [`SolveResult::solved`] with a
//! descriptive message.

/// The `backtrack` module implements recursive search with constraint
/// propagation and MRV cell selection.
pub mod backtrack;

/// The `dlx` module implements Algorithm X over a dancing-links
/// exact-cover matrix.
pub mod dlx;

use crate::board::{Board, Grid};
use std::fmt::Display;

pub use backtrack::BacktrackingSolver;
pub use dlx::DlxSolver;

/// The outcome of a single solve call. Populated on every call, solved or
/// not.
#[derive(Debug, Clone, Default)]
pub struct SolveResult {
    /// Whether a complete valid solution was found.
    pub solved: bool,
    /// The working grid at the end of the search. A full solution when
    /// `solved`, otherwise whatever the search left behind.
    pub solution: Grid,
    /// Search-node count: one per recursive search call.
    pub iterations: usize,
    /// Number of abandoned branches.
    pub backtracks: usize,
    /// Wall time of the solve, in milliseconds.
    pub time_ms: f64,
    /// Name of the engine that produced this result.
    pub algorithm: String,
    /// Why the puzzle was not solved, when it was not.
    pub error_message: Option<String>,
}

/// The capability set both engines expose.
pub trait Solver {
    /// Solves `board`, leaving the input untouched.
    fn solve(&mut self, board: &Board) -> SolveResult;

    /// Collects up to `max` distinct solutions of `board`.
    ///
    /// After this returns, treat the solver as consumed: call
    /// [`Solver::reset`] before reusing it. The bounded search may unwind
    /// early once `max` is reached.
    fn find_all_solutions(&mut self, board: &Board, max: usize) -> Vec<Board>;

    /// Whether `board` has exactly one solution.
    fn has_unique_solution(&mut self, board: &Board) -> bool {
        self.find_all_solutions(board, 2).len() == 1
    }

    /// The engine's display name.
    fn name(&self) -> &'static str;

    /// Clears statistics and scratch state, readying the solver for
    /// another puzzle.
    fn reset(&mut self);
}

/// The closed set of solving algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SolverAlgorithm {
    /// Recursive backtracking with constraint propagation and MRV.
    Backtracking,
    /// Algorithm X with dancing links over the exact-cover formulation.
    DancingLinks,
}

impl SolverAlgorithm {
    /// Constructs a fresh solver for this algorithm.
    #[must_use]
    pub fn create(self) -> SolverImpls {
        match self {
            Self::Backtracking => SolverImpls::Backtracking(BacktrackingSolver::new()),
            Self::DancingLinks => SolverImpls::Dlx(DlxSolver::new()),
        }
    }
}

impl Display for SolverAlgorithm {
    /// Formats the algorithm by its engine display name.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backtracking => write!(f, "Backtracking"),
            Self::DancingLinks => write!(f, "Dancing Links (DLX)"),
        }
    }
}

/// Static dispatch over the two engines.
#[derive(Debug, Clone)]
pub enum SolverImpls {
    /// The backtracking engine.
    Backtracking(BacktrackingSolver),
    /// The dancing-links engine.
    Dlx(DlxSolver),
}

impl Solver for SolverImpls {
    fn solve(&mut self, board: &Board) -> SolveResult {
        match self {
            Self::Backtracking(solver) => solver.solve(board),
            Self::Dlx(solver) => solver.solve(board),
        }
    }

    fn find_all_solutions(&mut self, board: &Board, max: usize) -> Vec<Board> {
        match self {
            Self::Backtracking(solver) => solver.find_all_solutions(board, max),
            Self::Dlx(solver) => solver.find_all_solutions(board, max),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Backtracking(solver) => solver.name(),
            Self::Dlx(solver) => solver.name(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Backtracking(solver) => solver.reset(),
            Self::Dlx(solver) => solver.reset(),
        }
    }
}
