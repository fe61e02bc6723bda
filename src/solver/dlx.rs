//! The dancing-links engine.
//!
//! Reformulates a puzzle as an exact-cover problem and runs Knuth's
//! Algorithm X over a sparse 0/1 matrix. The matrix is a torus of
//! doubly-linked nodes held in one arena `Vec`, linked by indices rather
//! than pointers; covering a column rewires links without deleting nodes,
//! and uncovering in reverse order restores the torus exactly.
//!
//! The matrix carries `4 * N^2` constraint columns: cell occupancy,
//! row-digit, column-digit, and box-digit. Every matrix row holds exactly
//! four 1-nodes, one per constraint kind. The matrix is rebuilt from
//! scratch on every solve and the arena is dropped on return.

use crate::board::{Board, Cell};
use crate::solver::{SolveResult, Solver};
use smallvec::SmallVec;
use std::time::Instant;

/// Index of the sentinel header that anchors the column-header list.
const ROOT: usize = 0;

/// One node of the torus. Column headers reuse the same layout, with
/// `size` tracking the number of 1-nodes below them.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Node {
    up: usize,
    down: usize,
    left: usize,
    right: usize,
    column: usize,
    row_id: usize,
    size: usize,
}

impl Node {
    /// A node linked to itself in both directions.
    const fn unlinked(index: usize) -> Self {
        Self {
            up: index,
            down: index,
            left: index,
            right: index,
            column: index,
            row_id: 0,
            size: 0,
        }
    }
}

/// Exact-cover solver using Algorithm X with dancing links.
#[derive(Debug, Clone, Default)]
pub struct DlxSolver {
    nodes: Vec<Node>,
    size: usize,
    box_rows: usize,
    box_cols: usize,
    solution_rows: Vec<usize>,
    iterations: usize,
    backtracks: usize,
}

impl DlxSolver {
    /// Creates an idle solver. The matrix is built per puzzle inside
    /// `solve`.
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

    /// Encodes `(row, col, value)` as a matrix row identifier.
    const fn row_id(&self, row: usize, col: usize, value: Cell) -> usize {
        row * self.size * self.size + col * self.size + (value - 1)
    }

    /// Decodes a matrix row identifier back to `(row, col, value)`.
    const fn decode_row_id(&self, row_id: usize) -> (usize, usize, Cell) {
        let value = row_id % self.size + 1;
        let rest = row_id / self.size;
        (rest / self.size, rest % self.size, value)
    }

    // Constraint column layout: cell, row-digit, column-digit, box-digit,
    // each occupying an N^2 block.
    const fn cell_constraint(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    const fn row_constraint(&self, row: usize, value: Cell) -> usize {
        self.size * self.size + row * self.size + (value - 1)
    }

    const fn col_constraint(&self, col: usize, value: Cell) -> usize {
        2 * self.size * self.size + col * self.size + (value - 1)
    }

    const fn box_constraint(&self, box_idx: usize, value: Cell) -> usize {
        3 * self.size * self.size + box_idx * self.size + (value - 1)
    }

    /// Arena index of the header for constraint column `constraint`.
    const fn header(constraint: usize) -> usize {
        constraint + 1
    }

    /// Creates the sentinel and `num_constraints` column headers, linked
    /// into one circular list.
    fn create_column_headers(&mut self, num_constraints: usize) {
        self.nodes.push(Node::unlinked(ROOT));

        let mut prev = ROOT;
        for _ in 0..num_constraints {
            let idx = self.nodes.len();
            let mut header = Node::unlinked(idx);
            header.left = prev;
            header.right = ROOT;
            self.nodes.push(header);
            self.nodes[prev].right = idx;
            self.nodes[ROOT].left = idx;
            prev = idx;
        }
    }

    /// Adds one matrix row: a 1-node in each listed constraint column,
    /// spliced at the column tail and linked into a circular row list.
    fn add_row(&mut self, row_id: usize, columns: &[usize]) {
        let mut first: Option<usize> = None;

        for &constraint in columns {
            let header = Self::header(constraint);
            let idx = self.nodes.len();
            let up = self.nodes[header].up;

            self.nodes.push(Node {
                up,
                down: header,
                left: idx,
                right: idx,
                column: header,
                row_id,
                size: 0,
            });
            self.nodes[up].down = idx;
            self.nodes[header].up = idx;
            self.nodes[header].size += 1;

            match first {
                None => first = Some(idx),
                Some(head) => {
                    let prev = self.nodes[head].left;
                    self.nodes[idx].left = prev;
                    self.nodes[idx].right = head;
                    self.nodes[prev].right = idx;
                    self.nodes[head].left = idx;
                }
            }
        }
    }

    /// Builds the exact-cover matrix for `board`.
    ///
    /// Given cells contribute one matrix row (their value); empty cells
    /// contribute one row per value that passes the placement check.
    fn build_matrix(&mut self, board: &Board) {
        self.size = board.size();
        self.box_rows = board.box_rows();
        self.box_cols = board.box_cols();

        let n = self.size;
        self.nodes = Vec::with_capacity(1 + 4 * n * n + 4 * n * n * n);
        self.create_column_headers(4 * n * n);

        for row in 0..n {
            for col in 0..n {
                let given = board.get(row, col);
                let box_idx = board.box_index(row, col);

                let (low, high) = if given == 0 { (1, n) } else { (given, given) };
                for value in low..=high {
                    if given == 0 && !board.is_valid_placement(row, col, value) {
                        continue;
                    }

                    let columns: SmallVec<[usize; 4]> = SmallVec::from_buf([
                        self.cell_constraint(row, col),
                        self.row_constraint(row, value),
                        self.col_constraint(col, value),
                        self.box_constraint(box_idx, value),
                    ]);
                    self.add_row(self.row_id(row, col, value), &columns);
                }
            }
        }
    }

    /// Unlinks column `col` from the header list and removes every other
    /// 1-node of every row in the column from its own column's vertical
    /// list. Nodes are never deleted; only links are rewired.
    fn cover(&mut self, col: usize) {
        let (left, right) = (self.nodes[col].left, self.nodes[col].right);
        self.nodes[right].left = left;
        self.nodes[left].right = right;

        let mut row = self.nodes[col].down;
        while row != col {
            let mut node = self.nodes[row].right;
            while node != row {
                let (up, down) = (self.nodes[node].up, self.nodes[node].down);
                self.nodes[down].up = up;
                self.nodes[up].down = down;
                let column = self.nodes[node].column;
                self.nodes[column].size -= 1;
                node = self.nodes[node].right;
            }
            row = self.nodes[row].down;
        }
    }

    /// Exactly reverses `cover`: rows bottom-to-top, nodes right-to-left.
    /// This ordering is mandatory; anything else leaves the torus
    /// inconsistent.
    fn uncover(&mut self, col: usize) {
        let mut row = self.nodes[col].up;
        while row != col {
            let mut node = self.nodes[row].left;
            while node != row {
                let column = self.nodes[node].column;
                self.nodes[column].size += 1;
                let (up, down) = (self.nodes[node].up, self.nodes[node].down);
                self.nodes[down].up = node;
                self.nodes[up].down = node;
                node = self.nodes[node].left;
            }
            row = self.nodes[row].up;
        }

        let (left, right) = (self.nodes[col].left, self.nodes[col].right);
        self.nodes[right].left = col;
        self.nodes[left].right = col;
    }

    /// The uncovered column with the fewest 1-nodes, short-circuiting once
    /// a column of size <= 1 is seen. `None` when the header list is empty.
    fn select_column(&self) -> Option<usize> {
        let mut best = None;
        let mut min_size = usize::MAX;

        let mut col = self.nodes[ROOT].right;
        while col != ROOT {
            let size = self.nodes[col].size;
            if size < min_size {
                min_size = size;
                best = Some(col);
                if min_size <= 1 {
                    break;
                }
            }
            col = self.nodes[col].right;
        }
        best
    }

    fn search(&mut self) -> bool {
        self.iterations += 1;

        if self.nodes[ROOT].right == ROOT {
            return true;
        }

        let Some(col) = self.select_column() else {
            return false;
        };
        if self.nodes[col].size == 0 {
            return false;
        }

        self.cover(col);

        let mut row = self.nodes[col].down;
        while row != col {
            self.solution_rows.push(self.nodes[row].row_id);

            let mut node = self.nodes[row].right;
            while node != row {
                self.cover(self.nodes[node].column);
                node = self.nodes[node].right;
            }

            if self.search() {
                return true;
            }

            self.backtracks += 1;
            self.solution_rows.pop();

            let mut node = self.nodes[row].left;
            while node != row {
                self.uncover(self.nodes[node].column);
                node = self.nodes[node].left;
            }

            row = self.nodes[row].down;
        }

        self.uncover(col);
        false
    }

    /// Bounded multi-solution search. Records a copy of the solution stack
    /// at every empty-header leaf; returns `true` once `max` solutions are
    /// collected, unwinding the matrix on the way out so the torus is left
    /// consistent.
    fn search_all(&mut self, solutions: &mut Vec<Vec<usize>>, max: usize) -> bool {
        self.iterations += 1;

        if self.nodes[ROOT].right == ROOT {
            solutions.push(self.solution_rows.clone());
            return solutions.len() >= max;
        }

        let Some(col) = self.select_column() else {
            return false;
        };
        if self.nodes[col].size == 0 {
            return false;
        }

        self.cover(col);

        let mut row = self.nodes[col].down;
        while row != col {
            self.solution_rows.push(self.nodes[row].row_id);

            let mut node = self.nodes[row].right;
            while node != row {
                self.cover(self.nodes[node].column);
                node = self.nodes[node].right;
            }

            if self.search_all(solutions, max) {
                let mut node = self.nodes[row].left;
                while node != row {
                    self.uncover(self.nodes[node].column);
                    node = self.nodes[node].left;
                }
                self.solution_rows.pop();
                self.uncover(col);
                return true;
            }

            self.backtracks += 1;
            self.solution_rows.pop();

            let mut node = self.nodes[row].left;
            while node != row {
                self.uncover(self.nodes[node].column);
                node = self.nodes[node].left;
            }

            row = self.nodes[row].down;
        }

        self.uncover(col);
        false
    }

    /// Overlays the decoded row identifiers onto a copy of `original`.
    fn solution_to_board(&self, row_ids: &[usize], original: &Board) -> Board {
        let mut result = original.clone();
        for &row_id in row_ids {
            let (row, col, value) = self.decode_row_id(row_id);
            result.set_unchecked(row, col, value);
        }
        result
    }

    /// Drops the node arena. The matrix never outlives a solve call.
    fn release(&mut self) {
        self.nodes.clear();
        self.solution_rows.clear();
    }
}

impl Solver for DlxSolver {
    fn solve(&mut self, board: &Board) -> SolveResult {
        let mut result = SolveResult {
            algorithm: self.name().to_string(),
            ..SolveResult::default()
        };

        let start = Instant::now();

        self.reset();
        self.build_matrix(board);

        let solved = self.search();

        result.time_ms = start.elapsed().as_secs_f64() * 1000.0;
        result.solved = solved;
        result.iterations = self.iterations;
        result.backtracks = self.backtracks;

        if solved {
            result.solution = self
                .solution_to_board(&self.solution_rows, board)
                .into_grid();
        } else {
            result.solution = board.grid().clone();
            result.error_message = Some("no solution found".to_string());
        }

        self.release();
        result
    }

    fn find_all_solutions(&mut self, board: &Board, max: usize) -> Vec<Board> {
        if max == 0 {
            return Vec::new();
        }

        self.reset();
        self.build_matrix(board);

        let mut solution_sets = Vec::new();
        let _ = self.search_all(&mut solution_sets, max);

        let boards = solution_sets
            .iter()
            .map(|row_ids| self.solution_to_board(row_ids, board))
            .collect();

        self.release();
        boards
    }

    fn name(&self) -> &'static str {
        "Dancing Links (DLX)"
    }

    fn reset(&mut self) {
        self.nodes.clear();
        self.solution_rows.clear();
        self.iterations = 0;
        self.backtracks = 0;
    }
}
