#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The Sudoku board model.
//!
//! A [`Board`] is an N x N grid of integer cells where `0` denotes an empty
//! cell and `1..=N` a filled one. The grid is partitioned into rectangular
//! boxes of `box_rows x box_cols` cells, described by a [`BoardDimension`].
//! Boards are plain values: cheap to clone and freely copied across
//! benchmark workers. Solvers never mutate a caller's board; they work on a
//! private copy.

use crate::error::SudokuError;
use itertools::Itertools;
use std::fmt::Display;

/// A single cell value. `0` means empty, `1..=N` a placed digit.
pub type Cell = usize;

/// A full grid of cells, stored row-major.
pub type Grid = Vec<Vec<Cell>>;

/// A set of candidate values for one cell, as a bitmask.
///
/// Bit `v - 1` is set when value `v` is a candidate. The dimension invariant
/// `N <= 32` guarantees every candidate set fits.
pub type CandidateMask = u32;

/// Describes the geometry of a board: its side length and box partition.
///
/// Invariant: `box_rows * box_cols == size`, all three at least 1, and
/// `size <= MAX_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardDimension {
    /// Total side length (e.g. 9 for a 9x9 board).
    pub size: usize,
    /// Rows per box (e.g. 3 for a 9x9 board).
    pub box_rows: usize,
    /// Columns per box (e.g. 3 for a 9x9 board).
    pub box_cols: usize,
}

impl BoardDimension {
    /// The largest supported board side length. Candidate sets are `u32`
    /// bitmasks, so values beyond 32 cannot be represented.
    pub const MAX_SIZE: usize = 32;

    /// A 4x4 board with 2x2 boxes.
    pub const STANDARD_4X4: Self = Self::new(4, 2, 2);
    /// A 6x6 board with 2x3 boxes.
    pub const STANDARD_6X6: Self = Self::new(6, 2, 3);
    /// A 9x9 board with 3x3 boxes.
    pub const STANDARD_9X9: Self = Self::new(9, 3, 3);
    /// A 12x12 board with 3x4 boxes.
    pub const STANDARD_12X12: Self = Self::new(12, 3, 4);
    /// A 16x16 board with 4x4 boxes.
    pub const STANDARD_16X16: Self = Self::new(16, 4, 4);
    /// A 25x25 board with 5x5 boxes.
    pub const STANDARD_25X25: Self = Self::new(25, 5, 5);

    /// Creates a dimension descriptor without validating it.
    ///
    /// Use [`BoardDimension::is_valid`] (or construct a [`Board`], which
    /// checks) when the inputs are untrusted.
    #[must_use]
    pub const fn new(size: usize, box_rows: usize, box_cols: usize) -> Self {
        Self {
            size,
            box_rows,
            box_cols,
        }
    }

    /// Derives box dimensions from a side length alone.
    ///
    /// Picks the box-row count closest to `sqrt(size)` that divides `size`,
    /// falling back to `(size, 1, size)`, a single band of 1 x N boxes.
    /// For the standard sizes this reproduces the usual partitions:
    /// 6 -> 2x3, 9 -> 3x3, 12 -> 3x4, 16 -> 4x4, 25 -> 5x5.
    #[must_use]
    pub fn from_size(size: usize) -> Self {
        let mut root = 1;
        while (root + 1) * (root + 1) <= size {
            root += 1;
        }
        for rows in (1..=root).rev() {
            if size % rows == 0 {
                return Self::new(size, rows, size / rows);
            }
        }
        Self::new(size, 1, size)
    }

    /// Checks the dimension invariant.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.size >= 1
            && self.size <= Self::MAX_SIZE
            && self.box_rows >= 1
            && self.box_cols >= 1
            && self.box_rows * self.box_cols == self.size
    }

    /// Number of boxes on the board (`N/M * N/K`, which equals `N`).
    #[must_use]
    pub const fn num_boxes(&self) -> usize {
        (self.size / self.box_rows) * (self.size / self.box_cols)
    }

    /// The bitmask with one bit set per legal value `1..=size`.
    #[must_use]
    pub const fn value_mask(&self) -> CandidateMask {
        if self.size >= 32 {
            u32::MAX
        } else {
            (1u32 << self.size) - 1
        }
    }
}

impl Default for BoardDimension {
    /// The classic 9x9 board.
    fn default() -> Self {
        Self::STANDARD_9X9
    }
}

impl Display for BoardDimension {
    /// Formats the dimension as `NxN (MxK boxes)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} ({}x{} boxes)",
            self.size, self.size, self.box_rows, self.box_cols
        )
    }
}

/// An N x N Sudoku board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    dim: BoardDimension,
}

impl Board {
    /// Creates an empty board with the given dimension.
    ///
    /// # Errors
    ///
    /// Returns [`SudokuError::InvalidArgument`] if the dimension invariant
    /// does not hold.
    pub fn new(dim: BoardDimension) -> Result<Self, SudokuError> {
        if !dim.is_valid() {
            return Err(SudokuError::InvalidArgument(format!(
                "invalid board dimension: size {} with {}x{} boxes",
                dim.size, dim.box_rows, dim.box_cols
            )));
        }
        Ok(Self {
            grid: vec![vec![0; dim.size]; dim.size],
            dim,
        })
    }

    /// Creates a board from a grid, deriving the box partition from the
    /// grid's side length via [`BoardDimension::from_size`].
    ///
    /// # Errors
    ///
    /// Returns [`SudokuError::InvalidArgument`] if the grid is empty, not
    /// square, larger than [`BoardDimension::MAX_SIZE`], or contains a value
    /// outside `0..=N`.
    pub fn from_grid(grid: Grid) -> Result<Self, SudokuError> {
        let size = grid.len();
        Self::with_dimension(grid, BoardDimension::from_size(size))
    }

    /// Creates a board from a grid with an explicit dimension.
    ///
    /// # Errors
    ///
    /// Returns [`SudokuError::InvalidArgument`] if the dimension is invalid,
    /// the grid shape does not match it, or a cell value is out of range.
    pub fn with_dimension(grid: Grid, dim: BoardDimension) -> Result<Self, SudokuError> {
        if !dim.is_valid() {
            return Err(SudokuError::InvalidArgument(format!(
                "invalid board dimension: size {} with {}x{} boxes",
                dim.size, dim.box_rows, dim.box_cols
            )));
        }
        if grid.len() != dim.size {
            return Err(SudokuError::InvalidArgument(format!(
                "grid has {} rows but dimension says {}",
                grid.len(),
                dim.size
            )));
        }
        for (i, row) in grid.iter().enumerate() {
            if row.len() != dim.size {
                return Err(SudokuError::InvalidArgument(format!(
                    "row {} has {} cells but dimension says {}",
                    i,
                    row.len(),
                    dim.size
                )));
            }
            for &value in row {
                if value > dim.size {
                    return Err(SudokuError::InvalidArgument(format!(
                        "cell value {value} exceeds board size {}",
                        dim.size
                    )));
                }
            }
        }
        Ok(Self { grid, dim })
    }

    /// The board's dimension descriptor.
    #[must_use]
    pub const fn dimension(&self) -> BoardDimension {
        self.dim
    }

    /// The board's side length.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.dim.size
    }

    /// Rows per box.
    #[must_use]
    pub const fn box_rows(&self) -> usize {
        self.dim.box_rows
    }

    /// Columns per box.
    #[must_use]
    pub const fn box_cols(&self) -> usize {
        self.dim.box_cols
    }

    /// A view of the underlying grid.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consumes the board and returns its grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Reads the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of range; passing indices outside
    /// `[0, N)` is a contract violation.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.grid[row][col]
    }

    /// Writes `value` to the cell at `(row, col)`. `0` clears the cell.
    ///
    /// # Errors
    ///
    /// Returns [`SudokuError::InvalidArgument`] when the indices are out of
    /// range or `value` is neither `0` nor in `1..=N`.
    pub fn set(&mut self, row: usize, col: usize, value: Cell) -> Result<(), SudokuError> {
        if !self.in_range(row, col) {
            return Err(SudokuError::InvalidArgument(format!(
                "cell ({row}, {col}) out of range for a {0}x{0} board",
                self.dim.size
            )));
        }
        if value != 0 && !self.is_valid_value(value) {
            return Err(SudokuError::InvalidArgument(format!(
                "cell value {value} out of range 1..={}",
                self.dim.size
            )));
        }
        self.grid[row][col] = value;
        Ok(())
    }

    /// Writes a cell the caller has already range-checked.
    pub(crate) fn set_unchecked(&mut self, row: usize, col: usize, value: Cell) {
        self.grid[row][col] = value;
    }

    /// Whether the cell at `(row, col)` is empty.
    #[must_use]
    pub fn is_cell_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == 0
    }

    /// Whether `(row, col)` addresses a cell on this board.
    #[must_use]
    pub const fn in_range(&self, row: usize, col: usize) -> bool {
        row < self.dim.size && col < self.dim.size
    }

    /// Whether `value` is a legal non-empty cell value for this board.
    #[must_use]
    pub const fn is_valid_value(&self, value: Cell) -> bool {
        value >= 1 && value <= self.dim.size
    }

    /// Whether no digit repeats within any row, column, or box.
    ///
    /// Empty cells are ignored, so a partially filled board can be valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.dim.size;
        for row in 0..n {
            if !self.is_row_valid(row) {
                return false;
            }
        }
        for col in 0..n {
            if !self.is_col_valid(col) {
                return false;
            }
        }
        for band in 0..n / self.dim.box_rows {
            for stack in 0..n / self.dim.box_cols {
                if !self.is_box_valid(band * self.dim.box_rows, stack * self.dim.box_cols) {
                    return false;
                }
            }
        }
        true
    }

    fn is_row_valid(&self, row: usize) -> bool {
        let mut seen: CandidateMask = 0;
        for col in 0..self.dim.size {
            let value = self.grid[row][col];
            if value != 0 {
                let bit = 1 << (value - 1);
                if seen & bit != 0 {
                    return false;
                }
                seen |= bit;
            }
        }
        true
    }

    fn is_col_valid(&self, col: usize) -> bool {
        let mut seen: CandidateMask = 0;
        for row in 0..self.dim.size {
            let value = self.grid[row][col];
            if value != 0 {
                let bit = 1 << (value - 1);
                if seen & bit != 0 {
                    return false;
                }
                seen |= bit;
            }
        }
        true
    }

    fn is_box_valid(&self, start_row: usize, start_col: usize) -> bool {
        let mut seen: CandidateMask = 0;
        for i in 0..self.dim.box_rows {
            for j in 0..self.dim.box_cols {
                let value = self.grid[start_row + i][start_col + j];
                if value != 0 {
                    let bit = 1 << (value - 1);
                    if seen & bit != 0 {
                        return false;
                    }
                    seen |= bit;
                }
            }
        }
        true
    }

    /// Whether placing `value` at `(row, col)` collides with the same value
    /// elsewhere in the cell's row, column, or box. The cell itself is
    /// excluded, so re-checking an already placed value succeeds.
    ///
    /// `value == 0` is trivially placeable; an out-of-range value is not.
    #[must_use]
    pub fn is_valid_placement(&self, row: usize, col: usize, value: Cell) -> bool {
        if value == 0 {
            return true;
        }
        if !self.is_valid_value(value) {
            return false;
        }

        for c in 0..self.dim.size {
            if c != col && self.grid[row][c] == value {
                return false;
            }
        }
        for r in 0..self.dim.size {
            if r != row && self.grid[r][col] == value {
                return false;
            }
        }

        let (start_row, start_col) = self.box_start(row, col);
        for i in 0..self.dim.box_rows {
            for j in 0..self.dim.box_cols {
                let (r, c) = (start_row + i, start_col + j);
                if (r != row || c != col) && self.grid[r][c] == value {
                    return false;
                }
            }
        }
        true
    }

    /// Whether the board is completely filled and valid.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.has_empty_cell() && self.is_valid()
    }

    /// Whether any cell is empty.
    #[must_use]
    pub fn has_empty_cell(&self) -> bool {
        self.grid.iter().any(|row| row.contains(&0))
    }

    /// The first empty cell in scan order (row-major), if any.
    #[must_use]
    pub fn find_first_empty(&self) -> Option<(usize, usize)> {
        for (i, row) in self.grid.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    return Some((i, j));
                }
            }
        }
        None
    }

    /// All empty cells in scan order.
    #[must_use]
    pub fn find_all_empty(&self) -> Vec<(usize, usize)> {
        let mut empty = Vec::new();
        for (i, row) in self.grid.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    empty.push((i, j));
                }
            }
        }
        empty
    }

    /// Number of empty cells.
    #[must_use]
    pub fn count_empty(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|&&v| v == 0).count())
            .sum()
    }

    /// Number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.dim.size * self.dim.size - self.count_empty()
    }

    /// Fraction of cells that are filled, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fill_ratio(&self) -> f64 {
        let total = self.dim.size * self.dim.size;
        if total == 0 {
            return 0.0;
        }
        self.filled_count() as f64 / total as f64
    }

    /// A rough difficulty score: empty cells weighted by how constrained
    /// they already are. Higher is harder.
    #[must_use]
    pub fn difficulty(&self) -> usize {
        let mut constrained = 0;
        for row in 0..self.dim.size {
            for col in 0..self.dim.size {
                if self.grid[row][col] == 0 {
                    let count = self.candidates(row, col).count_ones() as usize;
                    if count <= 2 {
                        constrained += 3 - count;
                    }
                }
            }
        }
        self.count_empty() * 10 + constrained * 5
    }

    /// The candidate set for the cell at `(row, col)` as a bitmask.
    ///
    /// Returns the empty mask for a filled cell. Bit `v - 1` is set when
    /// [`Board::is_valid_placement`] accepts `v` there.
    #[must_use]
    pub fn candidates(&self, row: usize, col: usize) -> CandidateMask {
        let mut mask: CandidateMask = 0;
        if self.grid[row][col] != 0 {
            return mask;
        }
        for value in 1..=self.dim.size {
            if self.is_valid_placement(row, col, value) {
                mask |= 1 << (value - 1);
            }
        }
        mask
    }

    /// The candidate set for the cell at `(row, col)` as a list of values.
    #[must_use]
    pub fn candidate_values(&self, row: usize, col: usize) -> Vec<Cell> {
        let mask = self.candidates(row, col);
        (1..=self.dim.size)
            .filter(|&v| mask & (1 << (v - 1)) != 0)
            .collect()
    }

    /// The index of the box containing `(row, col)`, in `[0, N)`.
    #[must_use]
    pub const fn box_index(&self, row: usize, col: usize) -> usize {
        (row / self.dim.box_rows) * (self.dim.size / self.dim.box_cols)
            + (col / self.dim.box_cols)
    }

    /// The top-left cell of the box containing `(row, col)`.
    #[must_use]
    pub const fn box_start(&self, row: usize, col: usize) -> (usize, usize) {
        (
            (row / self.dim.box_rows) * self.dim.box_rows,
            (col / self.dim.box_cols) * self.dim.box_cols,
        )
    }

    /// Renders the board as bare digit rows, space-separated for boards
    /// larger than 9x9.
    #[must_use]
    pub fn to_compact_string(&self) -> String {
        let wide = self.dim.size > 9;
        self.grid
            .iter()
            .map(|row| {
                if wide {
                    row.iter().map(|v| format!("{v:>2}")).join(" ")
                } else {
                    row.iter().map(ToString::to_string).join("")
                }
            })
            .join("\n")
    }
}

impl Display for Board {
    /// Renders the grid with `-`/`|` box separators and `.` for empties.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = self.dim.size;
        let cell_width = if n >= 10 { 3 } else { 2 };
        let box_width = self.dim.box_cols * cell_width + 1;
        let total_width = (n / self.dim.box_cols) * (box_width + 1) + 1;
        let h_line = "-".repeat(total_width);

        for i in 0..n {
            if i % self.dim.box_rows == 0 {
                writeln!(f, "{h_line}")?;
            }
            for j in 0..n {
                if j == 0 {
                    write!(f, "|")?;
                } else if j % self.dim.box_cols == 0 {
                    write!(f, " |")?;
                }
                let value = self.grid[i][j];
                if value == 0 {
                    write!(f, " {:>width$}", ".", width = cell_width - 1)?;
                } else {
                    write!(f, " {value:>width$}", width = cell_width - 1)?;
                }
            }
            writeln!(f, " |")?;
        }
        writeln!(f, "{h_line}")
    }
}

impl TryFrom<Grid> for Board {
    type Error = SudokuError;

    /// Converts a grid into a board, deriving the box partition.
    fn try_from(grid: Grid) -> Result<Self, Self::Error> {
        Self::from_grid(grid)
    }
}

impl From<Board> for Grid {
    /// Converts a board into its grid.
    fn from(board: Board) -> Self {
        board.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_4x4(cells: [[Cell; 4]; 4]) -> Board {
        Board::from_grid(cells.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn dimension_from_size_standard_partitions() {
        assert_eq!(BoardDimension::from_size(4), BoardDimension::STANDARD_4X4);
        assert_eq!(BoardDimension::from_size(6), BoardDimension::STANDARD_6X6);
        assert_eq!(BoardDimension::from_size(9), BoardDimension::STANDARD_9X9);
        assert_eq!(
            BoardDimension::from_size(12),
            BoardDimension::STANDARD_12X12
        );
        assert_eq!(
            BoardDimension::from_size(16),
            BoardDimension::STANDARD_16X16
        );
        assert_eq!(
            BoardDimension::from_size(25),
            BoardDimension::STANDARD_25X25
        );
    }

    #[test]
    fn dimension_from_size_prime_falls_back_to_band() {
        let dim = BoardDimension::from_size(7);
        assert_eq!(dim, BoardDimension::new(7, 1, 7));
        assert!(dim.is_valid());
    }

    #[test]
    fn dimension_validity() {
        assert!(BoardDimension::STANDARD_9X9.is_valid());
        assert!(!BoardDimension::new(9, 2, 3).is_valid());
        assert!(!BoardDimension::new(0, 0, 0).is_valid());
        assert!(!BoardDimension::new(36, 6, 6).is_valid());
        assert!(BoardDimension::new(32, 4, 8).is_valid());
    }

    #[test]
    fn dimension_value_mask() {
        assert_eq!(BoardDimension::STANDARD_4X4.value_mask(), 0b1111);
        assert_eq!(BoardDimension::STANDARD_9X9.value_mask(), 0x1FF);
        assert_eq!(BoardDimension::new(32, 4, 8).value_mask(), u32::MAX);
    }

    #[test]
    fn empty_board_construction() {
        let board = Board::new(BoardDimension::STANDARD_9X9).unwrap();
        assert_eq!(board.size(), 9);
        assert_eq!(board.count_empty(), 81);
        assert!(board.is_valid());
        assert!(!board.is_solved());
    }

    #[test]
    fn from_grid_rejects_non_square() {
        let grid = vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]];
        assert!(matches!(
            Board::from_grid(grid),
            Err(SudokuError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_grid_rejects_out_of_range_value() {
        let mut grid = vec![vec![0; 4]; 4];
        grid[1][2] = 5;
        assert!(Board::from_grid(grid).is_err());
    }

    #[test]
    fn with_dimension_rejects_mismatched_grid() {
        let grid = vec![vec![0; 4]; 4];
        assert!(Board::with_dimension(grid, BoardDimension::STANDARD_9X9).is_err());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut board = Board::new(BoardDimension::STANDARD_4X4).unwrap();
        board.set(1, 2, 3).unwrap();
        assert_eq!(board.get(1, 2), 3);
        board.set(1, 2, 0).unwrap();
        assert!(board.is_cell_empty(1, 2));
    }

    #[test]
    fn set_rejects_bad_arguments() {
        let mut board = Board::new(BoardDimension::STANDARD_4X4).unwrap();
        assert!(board.set(4, 0, 1).is_err());
        assert!(board.set(0, 4, 1).is_err());
        assert!(board.set(0, 0, 5).is_err());
    }

    #[test]
    fn validity_detects_duplicates_per_axis() {
        // Row duplicate.
        let board = board_4x4([[1, 0, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(!board.is_valid());

        // Column duplicate.
        let board = board_4x4([[2, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(!board.is_valid());

        // Box duplicate (no row/column collision).
        let board = board_4x4([[3, 0, 0, 0], [0, 3, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(!board.is_valid());

        let board = board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [2, 1, 4, 3], [4, 3, 2, 1]]);
        assert!(board.is_valid());
        assert!(board.is_solved());
    }

    #[test]
    fn placement_excludes_the_cell_itself() {
        let board = board_4x4([[1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        assert!(board.is_valid_placement(0, 0, 1));
        assert!(!board.is_valid_placement(0, 3, 1));
        assert!(!board.is_valid_placement(3, 0, 1));
        assert!(!board.is_valid_placement(1, 1, 1));
        assert!(board.is_valid_placement(1, 2, 1));
        assert!(!board.is_valid_placement(0, 0, 9));
    }

    #[test]
    fn candidates_match_placements() {
        let board = board_4x4([[1, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 2, 0]]);
        // (0, 1) shares a row and box with the 1.
        assert_eq!(board.candidate_values(0, 1), vec![2, 3, 4]);
        // (0, 2) shares a row with the 1 and a column with the 2.
        assert_eq!(board.candidate_values(0, 2), vec![3, 4]);
        // Filled cells have no candidates.
        assert_eq!(board.candidates(0, 0), 0);
    }

    #[test]
    fn box_geometry() {
        let board = Board::new(BoardDimension::STANDARD_6X6).unwrap();
        // 2x3 boxes, two per band.
        assert_eq!(board.box_index(0, 0), 0);
        assert_eq!(board.box_index(0, 3), 1);
        assert_eq!(board.box_index(1, 2), 0);
        assert_eq!(board.box_index(2, 0), 2);
        assert_eq!(board.box_index(5, 5), 5);
        assert_eq!(board.box_start(3, 4), (2, 3));

        let board = Board::new(BoardDimension::STANDARD_9X9).unwrap();
        assert_eq!(board.box_index(4, 7), 5);
        assert_eq!(board.box_start(4, 7), (3, 6));
    }

    #[test]
    fn empty_cell_queries() {
        let board = board_4x4([[1, 2, 3, 4], [3, 4, 1, 2], [0, 1, 4, 3], [4, 3, 0, 1]]);
        assert!(board.has_empty_cell());
        assert_eq!(board.find_first_empty(), Some((2, 0)));
        assert_eq!(board.find_all_empty(), vec![(2, 0), (3, 2)]);
        assert_eq!(board.count_empty(), 2);
        assert_eq!(board.filled_count(), 14);
        assert!((board.fill_ratio() - 14.0 / 16.0).abs() < 1e-12);
    }

    #[test]
    fn display_draws_box_separators() {
        let board = board_4x4([[1, 0, 0, 0], [0, 2, 0, 0], [0, 0, 3, 0], [0, 0, 0, 4]]);
        let rendered = board.to_string();
        assert!(rendered.contains("| 1  . | .  . |"));
        assert!(rendered.contains("| .  . | .  4 |"));
        assert!(rendered.starts_with('-'));
    }

    #[test]
    fn compact_rendering() {
        let board = board_4x4([[1, 0, 0, 0], [0, 2, 0, 0], [0, 0, 3, 0], [0, 0, 0, 4]]);
        assert_eq!(board.to_compact_string(), "1000\n0200\n0030\n0004");
    }
}
