//! The backtracking engine.
//!
//! Recursive search over a board with incremental constraint propagation.
//! The engine keeps a candidate bitmask per cell plus per-row, per-column,
//! and per-box used-value masks. Each search node first runs propagation to
//! a fixed point (naked singles, then hidden singles), then picks the most
//! constrained empty cell (MRV) and tries its candidates in ascending
//! order. Before each trial the full state (board, candidates, axis masks)
//! is snapshotted; a failed trial restores the snapshot exactly, so every
//! backtrack returns the search to its pre-trial condition.

use crate::board::{Board, CandidateMask, Cell};
use crate::solver::{SolveResult, Solver};
use std::time::Instant;

/// Recursive backtracking solver with constraint propagation and MRV cell
/// selection.
#[derive(Debug, Clone, Default)]
pub struct BacktrackingSolver {
    size: usize,
    box_rows: usize,
    box_cols: usize,
    candidates: Vec<Vec<CandidateMask>>,
    row_used: Vec<CandidateMask>,
    col_used: Vec<CandidateMask>,
    box_used: Vec<CandidateMask>,
    iterations: usize,
    backtracks: usize,
}

impl BacktrackingSolver {
    /// Creates an idle solver. State is built per puzzle inside `solve`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of search nodes visited by the last solve.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of abandoned branches in the last solve.
    #[must_use]
    pub const fn backtracks(&self) -> usize {
        self.backtracks
    }

    /// Builds the candidate and used-value masks from `board`.
    fn initialize(&mut self, board: &Board) {
        self.size = board.size();
        self.box_rows = board.box_rows();
        self.box_cols = board.box_cols();

        self.candidates = vec![vec![0; self.size]; self.size];
        self.row_used = vec![0; self.size];
        self.col_used = vec![0; self.size];
        self.box_used = vec![0; board.dimension().num_boxes()];

        for row in 0..self.size {
            for col in 0..self.size {
                let value = board.get(row, col);
                if value != 0 {
                    let bit = 1 << (value - 1);
                    self.row_used[row] |= bit;
                    self.col_used[col] |= bit;
                    let box_idx = self.box_index(row, col);
                    self.box_used[box_idx] |= bit;
                }
            }
        }

        let all = board.dimension().value_mask();
        for row in 0..self.size {
            for col in 0..self.size {
                if board.get(row, col) == 0 {
                    let used = self.row_used[row]
                        | self.col_used[col]
                        | self.box_used[self.box_index(row, col)];
                    self.candidates[row][col] = all & !used;
                }
            }
        }
    }

    const fn box_index(&self, row: usize, col: usize) -> usize {
        (row / self.box_rows) * (self.size / self.box_cols) + (col / self.box_cols)
    }

    /// Places `value` at `(row, col)` and prunes it from the candidate sets
    /// of the cell's row, column, and box.
    fn update_candidates(&mut self, row: usize, col: usize, value: Cell) {
        let bit: CandidateMask = 1 << (value - 1);

        self.row_used[row] |= bit;
        self.col_used[col] |= bit;
        let box_idx = self.box_index(row, col);
        self.box_used[box_idx] |= bit;

        self.candidates[row][col] = 0;

        for j in 0..self.size {
            self.candidates[row][j] &= !bit;
        }
        for i in 0..self.size {
            self.candidates[i][col] &= !bit;
        }
        let start_row = (row / self.box_rows) * self.box_rows;
        let start_col = (col / self.box_cols) * self.box_cols;
        for i in 0..self.box_rows {
            for j in 0..self.box_cols {
                self.candidates[start_row + i][start_col + j] &= !bit;
            }
        }
    }

    /// Runs propagation to a fixed point. Returns `false` on contradiction:
    /// some empty cell ended up with no candidates.
    fn propagate(&mut self, board: &mut Board) -> bool {
        let mut changed = true;
        while changed {
            changed = false;

            if self.place_naked_singles(board) {
                changed = true;
            }
            if self.place_hidden_singles(board) {
                changed = true;
            }

            for row in 0..self.size {
                for col in 0..self.size {
                    if board.get(row, col) == 0 && self.candidates[row][col] == 0 {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Fills every empty cell whose candidate set is a single value.
    fn place_naked_singles(&mut self, board: &mut Board) -> bool {
        let mut changed = false;
        for row in 0..self.size {
            for col in 0..self.size {
                if board.get(row, col) == 0 && self.candidates[row][col].count_ones() == 1 {
                    let value = self.candidates[row][col].trailing_zeros() as Cell + 1;
                    board.set_unchecked(row, col, value);
                    self.update_candidates(row, col, value);
                    changed = true;
                }
            }
        }
        changed
    }

    /// Fills every value that has exactly one legal position within a row,
    /// column, or box.
    fn place_hidden_singles(&mut self, board: &mut Board) -> bool {
        let mut changed = false;
        let bit = |v: usize| -> CandidateMask { 1 << v };

        for row in 0..self.size {
            for v in 0..self.size {
                if self.row_used[row] & bit(v) != 0 {
                    continue;
                }
                let mut count = 0;
                let mut last_col = 0;
                for col in 0..self.size {
                    if board.get(row, col) == 0 && self.candidates[row][col] & bit(v) != 0 {
                        count += 1;
                        last_col = col;
                    }
                }
                if count == 1 {
                    board.set_unchecked(row, last_col, v + 1);
                    self.update_candidates(row, last_col, v + 1);
                    changed = true;
                }
            }
        }

        for col in 0..self.size {
            for v in 0..self.size {
                if self.col_used[col] & bit(v) != 0 {
                    continue;
                }
                let mut count = 0;
                let mut last_row = 0;
                for row in 0..self.size {
                    if board.get(row, col) == 0 && self.candidates[row][col] & bit(v) != 0 {
                        count += 1;
                        last_row = row;
                    }
                }
                if count == 1 {
                    board.set_unchecked(last_row, col, v + 1);
                    self.update_candidates(last_row, col, v + 1);
                    changed = true;
                }
            }
        }

        let boxes_per_band = self.size / self.box_cols;
        for box_idx in 0..self.box_used.len() {
            let start_row = (box_idx / boxes_per_band) * self.box_rows;
            let start_col = (box_idx % boxes_per_band) * self.box_cols;

            for v in 0..self.size {
                if self.box_used[box_idx] & bit(v) != 0 {
                    continue;
                }
                let mut count = 0;
                let mut last = (0, 0);
                for i in 0..self.box_rows {
                    for j in 0..self.box_cols {
                        let (r, c) = (start_row + i, start_col + j);
                        if board.get(r, c) == 0 && self.candidates[r][c] & bit(v) != 0 {
                            count += 1;
                            last = (r, c);
                        }
                    }
                }
                if count == 1 {
                    board.set_unchecked(last.0, last.1, v + 1);
                    self.update_candidates(last.0, last.1, v + 1);
                    changed = true;
                }
            }
        }

        changed
    }

    /// The empty cell with the fewest candidates, ties broken by scan
    /// order. The scan stops early at a single-candidate cell. Returns
    /// `None` when no cell is empty.
    fn select_best_cell(&self, board: &Board) -> Option<(usize, usize)> {
        let mut best = None;
        let mut min_count = u32::MAX;

        for row in 0..self.size {
            for col in 0..self.size {
                if board.get(row, col) == 0 {
                    let count = self.candidates[row][col].count_ones();
                    if count < min_count {
                        min_count = count;
                        best = Some((row, col));
                        if min_count == 1 {
                            return best;
                        }
                    }
                }
            }
        }
        best
    }

    fn solve_recursive(&mut self, board: &mut Board) -> bool {
        self.iterations += 1;

        if !self.propagate(board) {
            return false;
        }

        let Some((row, col)) = self.select_best_cell(board) else {
            // No empty cells left: propagation filled the board.
            return board.is_valid();
        };

        let cell_candidates = self.candidates[row][col];
        if cell_candidates == 0 {
            return false;
        }

        for v in 0..self.size {
            if cell_candidates & (1 << v) == 0 {
                continue;
            }
            let value = v + 1;

            let saved_board = board.clone();
            let saved_candidates = self.candidates.clone();
            let saved_row_used = self.row_used.clone();
            let saved_col_used = self.col_used.clone();
            let saved_box_used = self.box_used.clone();

            board.set_unchecked(row, col, value);
            self.update_candidates(row, col, value);

            if self.solve_recursive(board) {
                return true;
            }

            self.backtracks += 1;
            *board = saved_board;
            self.candidates = saved_candidates;
            self.row_used = saved_row_used;
            self.col_used = saved_col_used;
            self.box_used = saved_box_used;
        }

        false
    }

    /// Like `solve_recursive`, but solution leaves append a clone of the
    /// filled board and report "enough found" once `max` is reached;
    /// otherwise they fail to force the search onward.
    fn solve_all(&mut self, board: &mut Board, solutions: &mut Vec<Board>, max: usize) -> bool {
        self.iterations += 1;

        if !self.propagate(board) {
            return false;
        }

        let Some((row, col)) = self.select_best_cell(board) else {
            if board.is_valid() {
                solutions.push(board.clone());
                return solutions.len() >= max;
            }
            return false;
        };

        let cell_candidates = self.candidates[row][col];
        if cell_candidates == 0 {
            return false;
        }

        for v in 0..self.size {
            if cell_candidates & (1 << v) == 0 {
                continue;
            }
            let value = v + 1;

            let saved_board = board.clone();
            let saved_candidates = self.candidates.clone();
            let saved_row_used = self.row_used.clone();
            let saved_col_used = self.col_used.clone();
            let saved_box_used = self.box_used.clone();

            board.set_unchecked(row, col, value);
            self.update_candidates(row, col, value);

            if self.solve_all(board, solutions, max) {
                return true;
            }

            self.backtracks += 1;
            *board = saved_board;
            self.candidates = saved_candidates;
            self.row_used = saved_row_used;
            self.col_used = saved_col_used;
            self.box_used = saved_box_used;
        }

        false
    }
}

impl Solver for BacktrackingSolver {
    fn solve(&mut self, board: &Board) -> SolveResult {
        let mut result = SolveResult {
            algorithm: self.name().to_string(),
            ..SolveResult::default()
        };

        let start = Instant::now();

        self.reset();

        // Conflicting givens never propagate to an empty candidate set
        // (used-value bits are idempotent), so they are rejected up front
        // rather than searched.
        if !board.is_valid() {
            result.solution = board.grid().clone();
            result.time_ms = start.elapsed().as_secs_f64() * 1000.0;
            result.error_message = Some("puzzle is invalid (conflicting givens)".to_string());
            return result;
        }

        self.initialize(board);

        let mut work = board.clone();

        if !self.propagate(&mut work) {
            result.solution = work.grid().clone();
            result.iterations = self.iterations;
            result.backtracks = self.backtracks;
            result.time_ms = start.elapsed().as_secs_f64() * 1000.0;
            result.error_message =
                Some("puzzle is unsolvable (constraint propagation failed)".to_string());
            return result;
        }

        let solved = self.solve_recursive(&mut work);

        result.solved = solved;
        result.solution = work.grid().clone();
        result.iterations = self.iterations;
        result.backtracks = self.backtracks;
        result.time_ms = start.elapsed().as_secs_f64() * 1000.0;

        if !solved {
            result.error_message = Some("no solution found".to_string());
        }

        result
    }

    fn find_all_solutions(&mut self, board: &Board, max: usize) -> Vec<Board> {
        let mut solutions = Vec::new();
        if max == 0 || !board.is_valid() {
            return solutions;
        }

        self.reset();
        self.initialize(board);

        let mut work = board.clone();
        if !self.propagate(&mut work) {
            return solutions;
        }

        let _ = self.solve_all(&mut work, &mut solutions, max);
        solutions
    }

    fn name(&self) -> &'static str {
        "Backtracking"
    }

    fn reset(&mut self) {
        self.iterations = 0;
        self.backtracks = 0;
        self.candidates.clear();
        self.row_used.clear();
        self.col_used.clear();
        self.box_used.clear();
    }
}
