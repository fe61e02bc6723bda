#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Reads and writes puzzles in JSON.
//!
//! Input is deliberately permissive: a puzzle can arrive as a 2D number
//! array, an array of row strings, a flat square-length numeric array, or
//! one whitespace-tolerant string, either under a `"grid"`/`"puzzle"`/
//! `"board"` key or directly at the root. Empty cells are `0`, `.`, `_`,
//! or space; values above 9 use letters `A..Z` (case insensitive).
//! Dimensions may be given explicitly with `"size"`/`"box_rows"`/
//! `"box_cols"` (or the `"box_size"` shorthand) and are otherwise derived
//! from the grid's side length.

use crate::board::{Board, BoardDimension, Cell, Grid};
use crate::error::SudokuError;
use crate::solver::SolveResult;
use itertools::Itertools;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// Explicit dimension keys accepted at the top level of a puzzle object.
#[derive(Debug, Default, Deserialize)]
struct DimensionSpec {
    size: Option<usize>,
    box_rows: Option<usize>,
    box_cols: Option<usize>,
    box_size: Option<usize>,
}

/// Loads a board from a JSON file.
///
/// # Errors
///
/// Returns [`SudokuError::Io`] when the file cannot be read,
/// [`SudokuError::Json`] for malformed JSON, and [`SudokuError::Parse`] or
/// [`SudokuError::InvalidArgument`] when the content is not a usable
/// puzzle.
pub fn load_from_file(path: &Path) -> Result<Board, SudokuError> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

/// Loads a board from a JSON string.
///
/// # Errors
///
/// Same as [`load_from_file`], minus the I/O failures.
pub fn load_from_str(content: &str) -> Result<Board, SudokuError> {
    let value: Value = serde_json::from_str(content)?;
    from_json(&value)
}

/// Interprets an already parsed JSON value as a puzzle.
///
/// # Errors
///
/// Returns [`SudokuError::Parse`] when no recognizable grid layout is
/// found and [`SudokuError::InvalidArgument`] when the grid or explicit
/// dimensions are inconsistent.
pub fn from_json(value: &Value) -> Result<Board, SudokuError> {
    let grid = if let Some(grid_value) = value.get("grid") {
        parse_grid_value(grid_value)?
    } else if let Some(puzzle) = value.get("puzzle") {
        let text = puzzle.as_str().ok_or_else(|| {
            SudokuError::Parse("\"puzzle\" must be a string".to_string())
        })?;
        parse_single_string(text)?
    } else if let Some(board_value) = value.get("board") {
        match board_value {
            Value::String(text) => parse_single_string(text)?,
            Value::Array(_) => parse_grid_value(board_value)?,
            _ => {
                return Err(SudokuError::Parse(
                    "\"board\" must be a string or an array".to_string(),
                ))
            }
        }
    } else if value.is_array() {
        parse_grid_value(value)?
    } else if let Some(text) = value.as_str() {
        parse_single_string(text)?
    } else {
        return Err(SudokuError::Parse(
            "could not find a grid: expected \"grid\", \"puzzle\", \"board\", \
             a root-level array, or a root-level string"
                .to_string(),
        ));
    };

    let dim = detect_dimension(value, grid.len())?;
    Board::with_dimension(grid, dim)
}

/// Dispatches an array value to the right grid parser by its first
/// element: nested arrays, row strings, or a flat numeric array.
fn parse_grid_value(value: &Value) -> Result<Grid, SudokuError> {
    let rows = value
        .as_array()
        .ok_or_else(|| SudokuError::Parse("grid must be an array".to_string()))?;
    match rows.first() {
        Some(Value::Array(_)) => parse_grid_2d(rows),
        Some(Value::String(_)) => parse_grid_strings(rows),
        Some(Value::Number(_)) => parse_flat_numbers(rows),
        _ => Err(SudokuError::Parse(
            "grid must contain rows, row strings, or numbers".to_string(),
        )),
    }
}

/// Parses a 2D array of cells. Cells are numbers or single-character
/// strings.
fn parse_grid_2d(rows: &[Value]) -> Result<Grid, SudokuError> {
    let mut grid = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let cells = row.as_array().ok_or_else(|| {
            SudokuError::Parse(format!("grid row {i} is not an array"))
        })?;
        let mut grid_row = Vec::with_capacity(cells.len());
        for cell in cells {
            let value = match cell {
                Value::Number(n) => n.as_u64().map(|v| v as Cell).ok_or_else(|| {
                    SudokuError::Parse(format!("negative cell value in row {i}"))
                })?,
                Value::String(s) => s
                    .chars()
                    .next()
                    .and_then(char_to_cell)
                    .unwrap_or(0),
                _ => {
                    return Err(SudokuError::Parse(format!(
                        "unsupported cell type in row {i}"
                    )))
                }
            };
            grid_row.push(value);
        }
        grid.push(grid_row);
    }
    Ok(grid)
}

/// Parses an array of row strings. Unrecognized characters (separators and
/// the like) are skipped.
fn parse_grid_strings(rows: &[Value]) -> Result<Grid, SudokuError> {
    let mut grid = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let text = row.as_str().ok_or_else(|| {
            SudokuError::Parse(format!("grid row {i} is not a string"))
        })?;
        grid.push(text.chars().filter_map(char_to_cell).collect_vec());
    }
    Ok(grid)
}

/// Parses one whitespace-tolerant puzzle string whose length must be a
/// perfect square.
fn parse_single_string(text: &str) -> Result<Grid, SudokuError> {
    let cleaned = text.chars().filter(|c| !c.is_whitespace()).collect_vec();

    let len = cleaned.len();
    let size = integer_sqrt(len);
    if size == 0 || size * size != len {
        return Err(SudokuError::Parse(format!(
            "invalid puzzle string length {len}: not a perfect square"
        )));
    }

    let cells = cleaned
        .iter()
        .map(|&c| {
            char_to_cell(c).ok_or_else(|| {
                SudokuError::Parse(format!("unrecognized puzzle character '{c}'"))
            })
        })
        .collect::<Result<Vec<Cell>, _>>()?;

    Ok(cells.chunks(size).map(<[Cell]>::to_vec).collect())
}

/// Parses a flat numeric array whose length must be a perfect square,
/// chunking it into rows.
fn parse_flat_numbers(values: &[Value]) -> Result<Grid, SudokuError> {
    let cells = values
        .iter()
        .map(|v| {
            v.as_u64().map(|n| n as Cell).ok_or_else(|| {
                SudokuError::Parse("flat grid arrays must hold non-negative numbers".to_string())
            })
        })
        .collect::<Result<Vec<Cell>, _>>()?;

    let len = cells.len();
    let size = integer_sqrt(len);
    if size == 0 || size * size != len {
        return Err(SudokuError::Parse(format!(
            "flat grid length {len} is not a perfect square"
        )));
    }

    Ok(cells.chunks(size).map(<[Cell]>::to_vec).collect())
}

/// Maps one puzzle character to a cell value. `None` for characters that
/// carry no cell meaning.
const fn char_to_cell(c: char) -> Option<Cell> {
    match c {
        '1'..='9' => Some(c as Cell - '0' as Cell),
        '0' | '.' | '_' | ' ' => Some(0),
        'A'..='Z' => Some(10 + c as Cell - 'A' as Cell),
        'a'..='z' => Some(10 + c as Cell - 'a' as Cell),
        _ => None,
    }
}

/// The inverse of [`char_to_cell`] for emission: `.` for empty, digits,
/// then capital letters.
fn cell_to_char(value: Cell) -> char {
    match value {
        0 => '.',
        1..=9 => char::from(b'0' + value as u8),
        _ => char::from(b'A' + (value - 10) as u8),
    }
}

fn integer_sqrt(n: usize) -> usize {
    let mut root = 0;
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}

/// Reads explicit dimension keys from the puzzle object, falling back to
/// derivation from the grid's side length.
fn detect_dimension(value: &Value, grid_size: usize) -> Result<BoardDimension, SudokuError> {
    if value.is_object() {
        let spec: DimensionSpec = serde_json::from_value(value.clone())?;
        if let (Some(size), Some(box_rows), Some(box_cols)) =
            (spec.size, spec.box_rows, spec.box_cols)
        {
            return Ok(BoardDimension::new(size, box_rows, box_cols));
        }
        if let Some(box_size) = spec.box_size {
            return Ok(BoardDimension::new(grid_size, box_size, box_size));
        }
    }
    Ok(BoardDimension::from_size(grid_size))
}

/// Serializes a board: dimensions, the 2D grid, and `grid_string` rows for
/// visual inspection.
#[must_use]
pub fn to_json(board: &Board) -> Value {
    let grid_string = board
        .grid()
        .iter()
        .map(|row| row.iter().map(|&v| cell_to_char(v)).collect::<String>())
        .collect_vec();

    json!({
        "size": board.size(),
        "box_rows": board.box_rows(),
        "box_cols": board.box_cols(),
        "grid": board.grid(),
        "grid_string": grid_string,
    })
}

/// Serializes a board to a JSON string.
///
/// # Errors
///
/// Returns [`SudokuError::Json`] if serialization fails.
pub fn to_string(board: &Board, pretty: bool) -> Result<String, SudokuError> {
    let value = to_json(board);
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

/// Writes a board to a JSON file.
///
/// # Errors
///
/// Returns [`SudokuError::Io`] when the file cannot be written.
pub fn save_to_file(board: &Board, path: &Path, pretty: bool) -> Result<(), SudokuError> {
    std::fs::write(path, to_string(board, pretty)?)?;
    Ok(())
}

/// Serializes a solve outcome: the original puzzle, solve metadata, and
/// the solution grid when one was found.
///
/// # Errors
///
/// Returns [`SudokuError::InvalidArgument`] if the result's solution grid
/// does not match the original board's dimension.
pub fn solution_to_json(original: &Board, result: &SolveResult) -> Result<Value, SudokuError> {
    let mut value = json!({
        "original": to_json(original),
        "solved": result.solved,
        "algorithm": result.algorithm,
        "time_ms": result.time_ms,
        "iterations": result.iterations,
        "backtracks": result.backtracks,
    });

    if result.solved {
        let solution = Board::with_dimension(result.solution.clone(), original.dimension())?;
        value["solution"] = to_json(&solution);
    }
    if let Some(message) = &result.error_message {
        value["error"] = json!(message);
    }

    Ok(value)
}

/// Writes a solve outcome to a JSON file.
///
/// # Errors
///
/// Returns [`SudokuError::Io`] when the file cannot be written, or any
/// error [`solution_to_json`] produces.
pub fn save_solution_to_file(
    original: &Board,
    result: &SolveResult,
    path: &Path,
    pretty: bool,
) -> Result<(), SudokuError> {
    let value = solution_to_json(original, result)?;
    let text = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    std::fs::write(path, text)?;
    Ok(())
}

/// A plain-text description of the accepted input formats, shown by the
/// CLI's `--json-help`.
#[must_use]
pub const fn format_help() -> &'static str {
    r#"
Supported JSON Input Formats
============================

Format 1: 2D Array (recommended)
{
  "grid": [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    ...
  ]
}

Format 2: String Rows (use '.' or '0' for empty cells)
{
  "grid": [
    "530070000",
    "600195000",
    ...
  ]
}

Format 3: Single String
{
  "puzzle": "530070000600195000098000060800060003400803001700020006060000280000419005000080079"
}

Format 4: With Explicit Dimensions (for non-standard sizes)
{
  "size": 16,
  "box_rows": 4,
  "box_cols": 4,
  "grid": [...]
}

Notes:
- Empty cells can be represented as 0, '.', '_', or ' '
- For boards larger than 9x9, use letters (A-Z) for values 10-35
- The grid can also be the root JSON element (without wrapper object)
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzles;

    const PUZZLE_9X9_STRING: &str = "530070000600195000098000060800060003\
                                     400803001700020006060000280000419005\
                                     000080079";

    #[test]
    fn parses_2d_number_grid() {
        let board = load_from_str(
            r#"{"grid": [[1, 0, 3, 0], [0, 4, 0, 2], [2, 0, 4, 0], [0, 3, 0, 1]]}"#,
        )
        .unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.get(0, 0), 1);
        assert_eq!(board.get(1, 1), 4);
        assert_eq!(board.dimension(), BoardDimension::STANDARD_4X4);
    }

    #[test]
    fn parses_row_strings_with_letters() {
        let board = load_from_str(r#"{"grid": ["12..", "34..", "....", "...."]}"#).unwrap();
        assert_eq!(board.get(0, 1), 2);
        assert_eq!(board.get(1, 0), 3);
        assert!(board.is_cell_empty(3, 3));

        // Letters cover values above nine on larger boards.
        let mut rows: Vec<String> = (0..16).map(|_| ".".repeat(16)).collect();
        rows[0] = "ABCDEFG123456789".to_string();
        let value = serde_json::json!({ "grid": rows });
        let board = from_json(&value).unwrap();
        assert_eq!(board.get(0, 0), 10);
        assert_eq!(board.get(0, 6), 16);
        assert_eq!(board.get(0, 7), 1);
    }

    #[test]
    fn parses_single_puzzle_string() {
        let value = serde_json::json!({ "puzzle": PUZZLE_9X9_STRING });
        let board = from_json(&value).unwrap();
        assert_eq!(board, puzzles::builtin_board(9).unwrap());
    }

    #[test]
    fn puzzle_string_tolerates_whitespace() {
        let spaced = "1 0 3 0\n0 4 0 2\n2 0 4 0\n0 3 0 1";
        let value = serde_json::json!({ "puzzle": spaced });
        let board = from_json(&value).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.get(3, 1), 3);
    }

    #[test]
    fn parses_board_key_and_root_level_forms() {
        let board = load_from_str(r#"{"board": "1030040220400301"}"#).unwrap();
        assert_eq!(board.size(), 4);

        let board = load_from_str(r#"[[1, 0], [0, 2]]"#);
        // A 2x2 grid derives a 1x2 box band; valid dimension, valid board.
        assert!(board.is_ok());

        let board = load_from_str(r#""1030040220400301""#).unwrap();
        assert_eq!(board.get(0, 2), 3);
    }

    #[test]
    fn parses_flat_numeric_array() {
        let board =
            load_from_str(r#"{"grid": [1, 0, 3, 0, 0, 4, 0, 2, 2, 0, 4, 0, 0, 3, 0, 1]}"#)
                .unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.get(2, 2), 4);

        // Values above nine survive, unlike a character round trip.
        let cells: Vec<usize> = (0..256).map(|i| if i == 0 { 16 } else { 0 }).collect();
        let value = serde_json::json!({ "grid": cells });
        let board = from_json(&value).unwrap();
        assert_eq!(board.size(), 16);
        assert_eq!(board.get(0, 0), 16);
    }

    #[test]
    fn explicit_dimensions_override_derivation() {
        let value = serde_json::json!({
            "size": 6,
            "box_rows": 3,
            "box_cols": 2,
            "grid": vec![vec![0; 6]; 6],
        });
        let board = from_json(&value).unwrap();
        assert_eq!(board.box_rows(), 3);
        assert_eq!(board.box_cols(), 2);

        let value = serde_json::json!({
            "box_size": 2,
            "grid": vec![vec![0; 4]; 4],
        });
        let board = from_json(&value).unwrap();
        assert_eq!(board.dimension(), BoardDimension::STANDARD_4X4);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            load_from_str("not json at all"),
            Err(SudokuError::Json(_))
        ));
        assert!(matches!(
            load_from_str(r#"{"puzzle": "12345"}"#),
            Err(SudokuError::Parse(_))
        ));
        assert!(matches!(
            load_from_str(r#"{"puzzle": "1#3004022040030#"}"#),
            Err(SudokuError::Parse(_))
        ));
        assert!(matches!(
            load_from_str(r#"{"answer": 42}"#),
            Err(SudokuError::Parse(_))
        ));
        // Inconsistent explicit dimensions.
        assert!(load_from_str(
            r#"{"size": 4, "box_rows": 2, "box_cols": 3, "grid": [[0,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]}"#
        )
        .is_err());
    }

    #[test]
    fn board_round_trips_through_json() {
        let board = puzzles::builtin_board(9).unwrap();
        let value = to_json(&board);
        assert_eq!(value["size"], 9);
        assert_eq!(value["grid_string"][0], "53..7....");
        let reparsed = from_json(&value).unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn grid_string_uses_letters_above_nine() {
        let mut board = Board::new(BoardDimension::STANDARD_16X16).unwrap();
        board.set(0, 0, 10).unwrap();
        board.set(0, 1, 16).unwrap();
        let value = to_json(&board);
        let first_row = value["grid_string"][0].as_str().unwrap();
        assert!(first_row.starts_with("AG.."));
    }

    #[test]
    fn solution_json_carries_metadata() {
        use crate::solver::{Solver, SolverAlgorithm};

        let board = puzzles::builtin_board(9).unwrap();
        let mut solver = SolverAlgorithm::DancingLinks.create();
        let result = solver.solve(&board);

        let value = solution_to_json(&board, &result).unwrap();
        assert_eq!(value["solved"], true);
        assert_eq!(value["algorithm"], "Dancing Links (DLX)");
        assert_eq!(value["solution"]["grid"][0][2], 4);
        assert!(value.get("error").is_none());

        let unsolved = SolveResult {
            algorithm: "Backtracking".to_string(),
            error_message: Some("no solution found".to_string()),
            ..SolveResult::default()
        };
        let value = solution_to_json(&board, &unsolved).unwrap();
        assert_eq!(value["solved"], false);
        assert_eq!(value["error"], "no solution found");
        assert!(value.get("solution").is_none());
    }

    #[test]
    fn format_help_names_every_format() {
        let help = format_help();
        assert!(help.contains("2D Array"));
        assert!(help.contains("String Rows"));
        assert!(help.contains("Single String"));
        assert!(help.contains("Explicit Dimensions"));
    }
}
