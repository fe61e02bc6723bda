//! Built-in benchmark puzzles.
//!
//! Three canonical test cases used by the CLI (`-t`), the benches, and the
//! tests. The grids are stable: changing them invalidates recorded
//! benchmark figures and the expectations in the test suite.

use crate::board::{Board, BoardDimension, Cell, Grid};
use crate::error::SudokuError;

/// A hard 9x9 puzzle in the AI-Escargot mould. Values are 1-9, 0 for empty.
pub const PUZZLE_9X9: [[Cell; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

/// A hard 16x16 puzzle. Values are 1-16, 0 for empty.
pub const PUZZLE_16X16: [[Cell; 16]; 16] = [
    [0, 0, 0, 0, 0, 0, 0, 15, 0, 10, 0, 0, 0, 12, 1, 0],
    [0, 1, 10, 0, 0, 0, 0, 3, 0, 0, 16, 0, 0, 0, 0, 0],
    [3, 0, 0, 8, 12, 1, 0, 14, 0, 0, 0, 0, 0, 0, 0, 6],
    [0, 2, 0, 0, 0, 0, 0, 0, 14, 0, 0, 15, 0, 0, 0, 0],
    [0, 0, 0, 3, 15, 0, 0, 0, 8, 1, 0, 0, 5, 7, 0, 0],
    [4, 0, 0, 10, 1, 0, 0, 0, 11, 0, 0, 7, 15, 0, 0, 0],
    [0, 0, 8, 1, 7, 16, 0, 0, 0, 14, 0, 6, 12, 0, 0, 0],
    [0, 0, 0, 0, 14, 0, 13, 12, 0, 0, 0, 0, 0, 1, 0, 0],
    [0, 0, 11, 0, 0, 0, 0, 0, 6, 7, 0, 14, 0, 0, 0, 0],
    [0, 0, 0, 2, 3, 0, 11, 0, 0, 0, 10, 1, 14, 9, 0, 0],
    [0, 0, 0, 14, 6, 0, 0, 10, 0, 0, 0, 4, 11, 0, 0, 5],
    [0, 0, 3, 13, 0, 0, 4, 16, 0, 0, 0, 9, 6, 0, 0, 0],
    [0, 0, 0, 0, 11, 0, 0, 6, 0, 0, 0, 0, 0, 0, 2, 0],
    [10, 0, 0, 0, 0, 0, 0, 0, 15, 0, 1, 6, 16, 0, 0, 7],
    [0, 0, 0, 0, 0, 15, 0, 0, 2, 0, 0, 0, 0, 4, 12, 0],
    [0, 16, 15, 0, 0, 0, 3, 0, 7, 0, 0, 0, 0, 0, 0, 0],
];

/// Builds the 25x25 mega puzzle: a staggered diagonal of givens, one per
/// box row, leaving roughly 90% of the cells empty for a heavy search load.
#[must_use]
pub fn puzzle_25x25() -> Grid {
    let mut grid = vec![vec![0; 25]; 25];
    for (row, grid_row) in grid.iter_mut().enumerate() {
        for k in 0..5 {
            let col = 5 * k + row % 5;
            let value = (5 * k + 6 * (row % 5) + row / 5) % 25 + 1;
            grid_row[col] = value;
        }
    }
    grid
}

/// Returns the built-in puzzle for `size`, with its dimension.
///
/// # Errors
///
/// Returns [`SudokuError::InvalidArgument`] for sizes other than 9, 16,
/// or 25.
pub fn by_size(size: usize) -> Result<(Grid, BoardDimension), SudokuError> {
    match size {
        9 => Ok((
            PUZZLE_9X9.iter().map(|r| r.to_vec()).collect(),
            BoardDimension::STANDARD_9X9,
        )),
        16 => Ok((
            PUZZLE_16X16.iter().map(|r| r.to_vec()).collect(),
            BoardDimension::STANDARD_16X16,
        )),
        25 => Ok((puzzle_25x25(), BoardDimension::STANDARD_25X25)),
        _ => Err(SudokuError::InvalidArgument(format!(
            "unsupported test size {size}; supported: 9, 16, 25"
        ))),
    }
}

/// Returns the built-in puzzle for `size` as a [`Board`].
///
/// # Errors
///
/// Returns [`SudokuError::InvalidArgument`] for sizes other than 9, 16,
/// or 25.
pub fn builtin_board(size: usize) -> Result<Board, SudokuError> {
    let (grid, dim) = by_size(size)?;
    Board::with_dimension(grid, dim)
}

/// A short human-readable description of the built-in puzzle for `size`.
#[must_use]
pub const fn description(size: usize) -> &'static str {
    match size {
        9 => "9x9 Classic (3x3 boxes)",
        16 => "16x16 Extended (4x4 boxes)",
        25 => "25x25 Mega (5x5 boxes), heavy benchmark",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_boards_are_valid_and_incomplete() {
        for size in [9, 16, 25] {
            let board = builtin_board(size).unwrap();
            assert_eq!(board.size(), size);
            assert!(board.is_valid(), "{size}x{size} builtin must be valid");
            assert!(board.has_empty_cell());
        }
    }

    #[test]
    fn unsupported_size_is_rejected() {
        assert!(by_size(4).is_err());
        assert!(by_size(0).is_err());
    }

    #[test]
    fn mega_puzzle_has_expected_givens() {
        let grid = puzzle_25x25();
        assert_eq!(grid[0][0], 1);
        assert_eq!(grid[1][1], 7);
        assert_eq!(grid[9][4], 1);
        assert_eq!(grid[24][24], 24);
        let givens: usize = grid
            .iter()
            .map(|row| row.iter().filter(|&&v| v != 0).count())
            .sum();
        assert_eq!(givens, 125);
    }

    #[test]
    fn descriptions_cover_supported_sizes() {
        assert!(description(9).starts_with("9x9"));
        assert!(description(16).starts_with("16x16"));
        assert!(description(25).starts_with("25x25"));
        assert_eq!(description(5), "Unknown");
    }
}
