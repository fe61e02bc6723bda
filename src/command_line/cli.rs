#![allow(clippy::cast_precision_loss)]
//! Defines the command-line interface for the Sudoku solver.
//!
//! Uses `clap` for parsing arguments. Exit codes: 0 when the puzzle was
//! solved (or a benchmark/comparison completed), 1 for unsolvable puzzles,
//! invalid input, or internal errors.

use clap::{CommandFactory, Parser, ValueEnum};
use std::path::{Path, PathBuf};
use sudoku_solver::benchmark::{Benchmark, BenchmarkConfig};
use sudoku_solver::board::Board;
use sudoku_solver::error::SudokuError;
use sudoku_solver::json;
use sudoku_solver::puzzles;
use sudoku_solver::solver::{SolveResult, Solver, SolverAlgorithm};
use tikv_jemalloc_ctl::{epoch, stats};

/// The algorithm selection exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum AlgorithmChoice {
    /// Dancing Links (Algorithm X).
    Dlx,
    /// Backtracking with constraint propagation.
    Backtrack,
    /// Run both engines and compare them.
    Compare,
}

#[derive(Parser, Debug)]
#[command(
    name = "sudoku_solver",
    version,
    about = "A high-performance Sudoku solver"
)]
pub(crate) struct Cli {
    /// Input puzzle file (JSON).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Puzzle as a string (use . or 0 for empty cells).
    #[arg(short, long)]
    puzzle: Option<String>,

    /// Use a built-in test puzzle (9, 16, or 25).
    #[arg(short, long, value_parser = parse_test_size)]
    test: Option<usize>,

    /// Solving algorithm.
    #[arg(short, long, value_enum, default_value = "dlx")]
    algorithm: AlgorithmChoice,

    /// Run a benchmark with N iterations.
    #[arg(short, long, default_value_t = 0)]
    benchmark: usize,

    /// Number of parallel workers for benchmarks (0 = hardware
    /// concurrency).
    #[arg(short, long, default_value_t = 1)]
    workers: usize,

    /// Write the solution to a JSON file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Check whether the solution is unique.
    #[arg(short, long, default_value_t = false)]
    unique: bool,

    /// Verbose output: per-run benchmark lines and memory statistics.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Minimal output: print only the solution grid.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,

    /// Show the accepted JSON input formats and exit.
    #[arg(long, default_value_t = false)]
    json_help: bool,

    /// Generate shell completions and exit.
    #[arg(long, value_enum)]
    completions: Option<clap_complete::Shell>,
}

fn parse_test_size(raw: &str) -> Result<usize, String> {
    let size: usize = raw
        .parse()
        .map_err(|_| format!("invalid test size: {raw}"))?;
    if matches!(size, 9 | 16 | 25) {
        Ok(size)
    } else {
        Err(format!("unsupported test size {size}; supported: 9, 16, 25"))
    }
}

/// Parses arguments, runs the requested flow, and returns the process
/// exit code.
pub(crate) fn run() -> i32 {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return 0;
    }

    if cli.json_help {
        println!("{}", json::format_help());
        return 0;
    }

    if !cli.quiet {
        print_header();
    }

    match execute(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error}");
            1
        }
    }
}

fn execute(cli: &Cli) -> Result<i32, SudokuError> {
    let board = load_board(cli)?;

    if !cli.quiet {
        println!("Input Puzzle:");
        print!("{board}");
        println!("Size: {0}x{0}", board.size());
        println!("Empty cells: {}", board.count_empty());
        println!("Fill ratio: {:.1}%", board.fill_ratio() * 100.0);
        println!();
    }

    if !board.is_valid() {
        eprintln!("Error: input puzzle is invalid");
        return Ok(1);
    }

    let workers = if cli.workers == 0 {
        Benchmark::hardware_concurrency()
    } else {
        cli.workers
    };

    if cli.algorithm == AlgorithmChoice::Compare {
        return Ok(run_comparison(cli, &board, workers));
    }

    let algorithm = match cli.algorithm {
        AlgorithmChoice::Backtrack => SolverAlgorithm::Backtracking,
        _ => SolverAlgorithm::DancingLinks,
    };

    if cli.benchmark > 0 {
        return Ok(run_benchmark(cli, &board, algorithm, workers));
    }

    solve_once(cli, &board, algorithm)
}

fn load_board(cli: &Cli) -> Result<Board, SudokuError> {
    if let Some(path) = &cli.input {
        if is_image_file(path) {
            return Err(SudokuError::InvalidArgument(
                "image input requires OCR support, which is not built in; \
                 provide a JSON puzzle instead"
                    .to_string(),
            ));
        }
        return json::load_from_file(path);
    }

    if let Some(puzzle) = &cli.puzzle {
        return json::from_json(&serde_json::json!({ "puzzle": puzzle }));
    }

    if let Some(size) = cli.test {
        if !cli.quiet {
            println!("Using built-in test puzzle: {}\n", puzzles::description(size));
        }
        return puzzles::builtin_board(size);
    }

    puzzles::builtin_board(9)
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "bmp" | "tiff" | "tif"
            )
        })
}

fn print_header() {
    println!(
        "High-Performance Sudoku Solver v{}",
        env!("CARGO_PKG_VERSION")
    );
    println!("Using Dancing Links (DLX) & Constraint Propagation");
    println!(
        "Hardware concurrency: {} threads",
        Benchmark::hardware_concurrency()
    );
    println!();
}

fn print_result(result: &SolveResult) {
    println!("\n=== Solution Result ===");

    if result.solved {
        println!("Status: SOLVED");
    } else {
        println!("Status: FAILED");
        if let Some(message) = &result.error_message {
            println!("Error: {message}");
        }
    }

    println!("Algorithm: {}", result.algorithm);
    if result.time_ms < 1.0 {
        println!(
            "Time: {:.6} ms ({:.3} us)",
            result.time_ms,
            result.time_ms * 1000.0
        );
    } else {
        println!("Time: {:.6} ms", result.time_ms);
    }
    println!("Iterations: {}", result.iterations);
    println!("Backtracks: {}", result.backtracks);
}

/// Prints allocator statistics after a solve. Best effort: skipped when
/// the allocator does not report them.
fn print_memory_stats() {
    let _ = epoch::advance();
    if let (Ok(allocated), Ok(resident)) = (
        stats::allocated::mib().and_then(|mib| mib.read()),
        stats::resident::mib().and_then(|mib| mib.read()),
    ) {
        println!(
            "Memory: {:.1} MiB allocated, {:.1} MiB resident",
            allocated as f64 / (1024.0 * 1024.0),
            resident as f64 / (1024.0 * 1024.0)
        );
    }
}

/// Prints the solved grid carried by a benchmark's last run, if any.
fn print_solution_from(result: &SolveResult, board: &Board) {
    if !result.solved {
        return;
    }
    if let Ok(solution) = Board::with_dimension(result.solution.clone(), board.dimension()) {
        println!("Solution: {}", result.algorithm);
        print!("{solution}");
        println!();
    }
}

fn run_comparison(cli: &Cli, board: &Board, workers: usize) -> i32 {
    let config = BenchmarkConfig {
        runs: if cli.benchmark > 0 { cli.benchmark } else { 10 },
        warmup_runs: 2,
        num_workers: workers,
        verbose: cli.verbose,
    };
    let bench = Benchmark::with_config(config);
    let algorithms = [SolverAlgorithm::DancingLinks, SolverAlgorithm::Backtracking];

    if workers > 1 {
        if !cli.quiet {
            println!("Comparing algorithms (multi-threaded: {workers} workers)...\n");
        }

        let results = bench.compare_multithreaded(board, &algorithms);

        if !cli.quiet {
            for algorithm in &algorithms {
                if let Some(worker) = results[algorithm].worker_results.first() {
                    print_solution_from(&worker.last_result, board);
                }
            }
        }

        bench.print_multithread_comparison(&results);
    } else {
        if !cli.quiet {
            println!("Comparing algorithms...\n");
        }

        let results = bench.compare(board, &algorithms);

        if !cli.quiet {
            for algorithm in &algorithms {
                print_solution_from(&results[algorithm].last_result, board);
            }
        }

        bench.print_comparison(&results);
    }

    if cli.verbose {
        print_memory_stats();
    }

    0
}

fn run_benchmark(cli: &Cli, board: &Board, algorithm: SolverAlgorithm, workers: usize) -> i32 {
    let config = BenchmarkConfig {
        runs: cli.benchmark,
        warmup_runs: (cli.benchmark / 5).min(2),
        num_workers: workers,
        verbose: cli.verbose,
    };
    let bench = Benchmark::with_config(config);

    if workers > 1 {
        if !cli.quiet {
            println!("Running multi-threaded benchmark...");
            println!("  Workers: {workers}");
            println!("  Runs per worker: {}", cli.benchmark);
            println!("  Total runs: {}\n", workers * cli.benchmark);
        }

        let result = bench.run_multithreaded(board, algorithm);
        bench.print_multithread_result(&result);
    } else {
        if !cli.quiet {
            println!("Running benchmark ({} iterations)...\n", cli.benchmark);
        }

        let mut solver = algorithm.create();
        let result = bench.run(board, &mut solver);
        bench.print_result(&result);
    }

    if cli.verbose {
        print_memory_stats();
    }

    0
}

fn solve_once(cli: &Cli, board: &Board, algorithm: SolverAlgorithm) -> Result<i32, SudokuError> {
    let mut solver = algorithm.create();

    if !cli.quiet {
        println!("Solving with {}...", solver.name());
    }

    let result = solver.solve(board);

    if !cli.quiet {
        print_result(&result);
    }
    if cli.verbose {
        print_memory_stats();
    }

    if result.solved {
        let solution = Board::with_dimension(result.solution.clone(), board.dimension())?;

        if cli.quiet {
            println!("{}", solution.to_compact_string());
        } else {
            println!("\nSolution:");
            print!("{solution}");
        }

        if cli.unique {
            println!("\nChecking uniqueness...");
            solver.reset();
            if solver.has_unique_solution(board) {
                println!("Solution is UNIQUE");
            } else {
                println!("Multiple solutions exist");
            }
        }

        if let Some(path) = &cli.output {
            json::save_solution_to_file(board, &result, path, true)?;
            println!("\nSolution saved to: {}", path.display());
        }
    }

    Ok(if result.solved { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_the_documented_flags() {
        let cli = Cli::parse_from([
            "sudoku_solver",
            "-t",
            "16",
            "-a",
            "backtrack",
            "-b",
            "50",
            "-w",
            "4",
            "-u",
            "-v",
        ]);
        assert_eq!(cli.test, Some(16));
        assert_eq!(cli.algorithm, AlgorithmChoice::Backtrack);
        assert_eq!(cli.benchmark, 50);
        assert_eq!(cli.workers, 4);
        assert!(cli.unique);
        assert!(cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn cli_rejects_unsupported_test_sizes() {
        assert!(Cli::try_parse_from(["sudoku_solver", "-t", "12"]).is_err());
        assert!(Cli::try_parse_from(["sudoku_solver", "-t", "nine"]).is_err());
    }

    #[test]
    fn defaults_select_dlx_without_benchmark() {
        let cli = Cli::parse_from(["sudoku_solver"]);
        assert_eq!(cli.algorithm, AlgorithmChoice::Dlx);
        assert_eq!(cli.benchmark, 0);
        assert_eq!(cli.workers, 1);
        assert!(cli.input.is_none());
        assert!(cli.puzzle.is_none());
    }

    #[test]
    fn image_paths_are_detected_case_insensitively() {
        assert!(is_image_file(Path::new("puzzle.PNG")));
        assert!(is_image_file(Path::new("scan.jpeg")));
        assert!(!is_image_file(Path::new("puzzle.json")));
        assert!(!is_image_file(Path::new("puzzle")));
    }
}
