//! The benchmark runner.
//!
//! Measures solver performance over repeated runs: warm-up followed by
//! timed solves on a single thread, or a multi-worker throughput run
//! against a stabilized single-thread baseline. Workers are plain OS
//! threads spawned fresh per call; each owns a private solver and reads
//! the shared board immutably, so no synchronization is needed beyond the
//! final join. All durations come from the monotonic clock and are
//! reported as `f64` milliseconds.

use crate::board::Board;
use crate::solver::{SolveResult, Solver, SolverAlgorithm, SolverImpls};
use itertools::Itertools;
use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

/// Warm-up solves before the baseline measurement.
const BASELINE_WARMUP: usize = 10;

/// Solves in the timed baseline block. Fixed independently of the
/// configured run count so speedup figures are comparable across runs.
const BASELINE_RUNS: usize = 100;

/// Configuration for benchmark runs.
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Timed solves per run (per worker in multithreaded mode).
    pub runs: usize,
    /// Untimed solves before measurement starts (single-threaded runs
    /// only).
    pub warmup_runs: usize,
    /// Parallel workers for [`Benchmark::run_multithreaded`].
    pub num_workers: usize,
    /// Print each individual run.
    pub verbose: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            warmup_runs: 2,
            num_workers: 1,
            verbose: false,
        }
    }
}

/// Aggregated statistics over one benchmark run.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkResult {
    /// Name of the benchmarked engine.
    pub algorithm: String,
    /// Fastest solve, in milliseconds.
    pub min_time_ms: f64,
    /// Slowest solve, in milliseconds.
    pub max_time_ms: f64,
    /// Mean solve time, in milliseconds.
    pub avg_time_ms: f64,
    /// Sample standard deviation (N-1 divisor; zero below two runs).
    pub std_dev_ms: f64,
    /// Search nodes summed over all runs.
    pub total_iterations: usize,
    /// Backtracks summed over all runs.
    pub total_backtracks: usize,
    /// Number of timed runs.
    pub runs: usize,
    /// Whether every run produced a solution.
    pub all_solved: bool,
    /// The final run's full result, for solution access.
    pub last_result: SolveResult,
}

/// Aggregated statistics over a multi-worker benchmark run.
#[derive(Debug, Clone, Default)]
pub struct MultithreadResult {
    /// Name of the benchmarked algorithm.
    pub algorithm: String,
    /// Number of parallel workers.
    pub num_workers: usize,
    /// Timed solves per worker.
    pub runs_per_worker: usize,
    /// `num_workers * runs_per_worker`.
    pub total_runs: usize,
    /// Whether every run of every worker produced a solution.
    pub all_solved: bool,
    /// Real elapsed time around the launch-to-join span, in milliseconds.
    pub wall_time_ms: f64,
    /// Sum of all worker solve time, in milliseconds.
    pub total_cpu_time_ms: f64,
    /// Solves per second over the wall-clock interval.
    pub throughput: f64,
    /// Per-worker statistics, in spawn order.
    pub worker_results: Vec<BenchmarkResult>,
    /// Mean CPU time per solve across all workers, in milliseconds.
    pub avg_time_per_solve_ms: f64,
    /// Wall-time ratio against the single-thread baseline doing the same
    /// total work.
    pub speedup: f64,
    /// `speedup / num_workers`; 1.0 is ideal scaling.
    pub efficiency: f64,
}

/// Drives timed solver runs and aggregates their statistics.
#[derive(Debug, Clone, Default)]
pub struct Benchmark {
    config: BenchmarkConfig,
}

impl Benchmark {
    /// Creates a benchmark with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a benchmark with an explicit configuration.
    #[must_use]
    pub const fn with_config(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: BenchmarkConfig) {
        self.config = config;
    }

    /// Number of logical CPUs, or 1 when it cannot be determined.
    #[must_use]
    pub fn hardware_concurrency() -> usize {
        thread::available_parallelism().map_or(1, NonZeroUsize::get)
    }

    /// Runs `solver` on `puzzle`: `warmup_runs` discarded solves, then
    /// `runs` timed ones, aggregated into min/max/mean/stddev.
    pub fn run(&self, puzzle: &Board, solver: &mut SolverImpls) -> BenchmarkResult {
        for _ in 0..self.config.warmup_runs {
            solver.reset();
            let _ = solver.solve(puzzle);
        }
        Self::collect_runs(self.config.runs, self.config.verbose, puzzle, solver)
    }

    /// Benchmarks each algorithm in turn on the same puzzle.
    pub fn compare(
        &self,
        puzzle: &Board,
        algorithms: &[SolverAlgorithm],
    ) -> FxHashMap<SolverAlgorithm, BenchmarkResult> {
        let mut results = FxHashMap::default();
        for &algorithm in algorithms {
            let mut solver = algorithm.create();
            results.insert(algorithm, self.run(puzzle, &mut solver));
        }
        results
    }

    /// Runs the benchmark over a batch of puzzles with a shared solver.
    pub fn run_batch(&self, puzzles: &[Board], solver: &mut SolverImpls) -> Vec<BenchmarkResult> {
        let mut results = Vec::with_capacity(puzzles.len());
        for (i, puzzle) in puzzles.iter().enumerate() {
            if self.config.verbose {
                println!("Puzzle {}/{}:", i + 1, puzzles.len());
            }
            results.push(self.run(puzzle, solver));
        }
        results
    }

    /// The timed inner loop shared by single-threaded runs and workers.
    fn collect_runs(
        runs: usize,
        verbose: bool,
        puzzle: &Board,
        solver: &mut SolverImpls,
    ) -> BenchmarkResult {
        let mut result = BenchmarkResult {
            algorithm: solver.name().to_string(),
            runs,
            all_solved: true,
            ..BenchmarkResult::default()
        };

        let mut times = Vec::with_capacity(runs);

        for i in 0..runs {
            solver.reset();
            let solve_result = solver.solve(puzzle);

            times.push(solve_result.time_ms);
            result.total_iterations += solve_result.iterations;
            result.total_backtracks += solve_result.backtracks;
            if !solve_result.solved {
                result.all_solved = false;
            }

            if verbose {
                println!(
                    "  Run {}: {:.3} ms, {} iterations, {} backtracks{}",
                    i + 1,
                    solve_result.time_ms,
                    solve_result.iterations,
                    solve_result.backtracks,
                    if solve_result.solved { "" } else { " [FAILED]" }
                );
            }

            result.last_result = solve_result;
        }

        if !times.is_empty() {
            result.min_time_ms = times.iter().copied().map(OrderedFloat).min().map_or(0.0, |m| m.0);
            result.max_time_ms = times.iter().copied().map(OrderedFloat).max().map_or(0.0, |m| m.0);
            result.avg_time_ms = Self::mean(&times);
            result.std_dev_ms = Self::std_dev(&times, result.avg_time_ms);
        }

        result
    }

    /// One worker's share of a multithreaded run. Constructs a private
    /// solver; nothing mutable is shared with other workers.
    fn worker_task(
        config: &BenchmarkConfig,
        puzzle: &Board,
        algorithm: SolverAlgorithm,
    ) -> BenchmarkResult {
        let mut solver = algorithm.create();
        Self::collect_runs(config.runs, false, puzzle, &mut solver)
    }

    /// Runs `num_workers` parallel workers, each solving the shared
    /// read-only puzzle `runs` times, and relates the aggregate to a
    /// stabilized single-thread baseline.
    ///
    /// The baseline is measured before the workers start so the parallel
    /// phase cannot skew it; the flip side is that it cannot account for
    /// thermal effects that only appear under full load.
    ///
    /// # Panics
    ///
    /// Panics if a worker thread panics, which would mean a solver bug.
    #[must_use]
    pub fn run_multithreaded(
        &self,
        puzzle: &Board,
        algorithm: SolverAlgorithm,
    ) -> MultithreadResult {
        let num_workers = self.config.num_workers.max(1);

        let mut result = MultithreadResult {
            algorithm: algorithm.to_string(),
            num_workers,
            runs_per_worker: self.config.runs,
            total_runs: num_workers * self.config.runs,
            all_solved: true,
            ..MultithreadResult::default()
        };

        // Stabilized baseline: a fixed 100-solve block, independent of the
        // configured run count.
        let single_solve_time = {
            let mut solver = algorithm.create();
            for _ in 0..BASELINE_WARMUP {
                solver.reset();
                let _ = solver.solve(puzzle);
            }
            let timer = Instant::now();
            for _ in 0..BASELINE_RUNS {
                solver.reset();
                let _ = solver.solve(puzzle);
            }
            timer.elapsed().as_secs_f64() * 1000.0 / BASELINE_RUNS as f64
        };

        let wall = Instant::now();

        let worker_results: Vec<BenchmarkResult> = thread::scope(|scope| {
            let handles = (0..num_workers)
                .map(|_| scope.spawn(|| Self::worker_task(&self.config, puzzle, algorithm)))
                .collect_vec();
            handles
                .into_iter()
                .map(|handle| handle.join().expect("benchmark worker panicked"))
                .collect()
        });

        result.wall_time_ms = wall.elapsed().as_secs_f64() * 1000.0;

        #[allow(clippy::cast_precision_loss)]
        for worker in &worker_results {
            result.total_cpu_time_ms += worker.avg_time_ms * worker.runs as f64;
            if !worker.all_solved {
                result.all_solved = false;
            }
        }
        result.worker_results = worker_results;

        #[allow(clippy::cast_precision_loss)]
        {
            let total_runs = result.total_runs as f64;
            result.avg_time_per_solve_ms = result.total_cpu_time_ms / total_runs;
            result.throughput = total_runs / result.wall_time_ms * 1000.0;
            let expected_single_thread_time = single_solve_time * total_runs;
            result.speedup = expected_single_thread_time / result.wall_time_ms;
            result.efficiency = result.speedup / num_workers as f64;
        }

        result
    }

    /// Runs the multithreaded benchmark for each algorithm in turn.
    pub fn compare_multithreaded(
        &self,
        puzzle: &Board,
        algorithms: &[SolverAlgorithm],
    ) -> FxHashMap<SolverAlgorithm, MultithreadResult> {
        let mut results = FxHashMap::default();
        for &algorithm in algorithms {
            results.insert(algorithm, self.run_multithreaded(puzzle, algorithm));
        }
        results
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            0.0
        } else {
            values.iter().sum::<f64>() / values.len() as f64
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn std_dev(values: &[f64], mean: f64) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let sum: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
        (sum / (values.len() - 1) as f64).sqrt()
    }

    /// Renders a single-run report.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate_report(&self, result: &BenchmarkResult) -> String {
        let mut out = String::new();

        out.push_str("=== Benchmark Report ===\n");
        out.push_str(&format!("Algorithm: {}\n", result.algorithm));
        out.push_str(&format!("Runs: {}\n", result.runs));
        out.push_str(&format!(
            "All Solved: {}\n\n",
            if result.all_solved { "Yes" } else { "No" }
        ));

        out.push_str("Timing (ms):\n");
        out.push_str(&format!("  Min:     {:>12.6}\n", result.min_time_ms));
        out.push_str(&format!("  Max:     {:>12.6}\n", result.max_time_ms));
        out.push_str(&format!("  Average: {:>12.6}\n", result.avg_time_ms));
        out.push_str(&format!("  Std Dev: {:>12.6}\n\n", result.std_dev_ms));

        let runs = result.runs.max(1);
        out.push_str("Statistics:\n");
        out.push_str(&format!(
            "  Total Iterations: {}\n",
            result.total_iterations
        ));
        out.push_str(&format!(
            "  Total Backtracks: {}\n",
            result.total_backtracks
        ));
        out.push_str(&format!(
            "  Avg Iterations:   {}\n",
            result.total_iterations / runs
        ));
        out.push_str(&format!(
            "  Avg Backtracks:   {}\n",
            result.total_backtracks / runs
        ));

        out
    }

    /// Renders a comparison table over single-threaded results, marking
    /// the best average time.
    #[must_use]
    pub fn generate_comparison_report(
        &self,
        results: &FxHashMap<SolverAlgorithm, BenchmarkResult>,
    ) -> String {
        let mut out = String::new();

        out.push_str("=== Algorithm Comparison ===\n\n");

        let name_width = results
            .values()
            .map(|r| r.algorithm.len())
            .chain(["Algorithm".len()])
            .max()
            .unwrap_or(9)
            + 2;

        out.push_str(&format!(
            "{:<name_width$}{:>12}{:>12}{:>12}{:>12}{:>8}\n",
            "Algorithm", "Min (ms)", "Avg (ms)", "Max (ms)", "Std Dev", "Solved"
        ));
        out.push_str(&"-".repeat(name_width + 12 * 4 + 8 + 2));
        out.push('\n');

        let best_avg = results
            .values()
            .map(|r| OrderedFloat(r.avg_time_ms))
            .min()
            .map_or(f64::MAX, |m| m.0);

        for algorithm in results.keys().sorted() {
            let result = &results[algorithm];
            let is_best = (result.avg_time_ms - best_avg).abs() < f64::EPSILON;
            out.push_str(&format!(
                "{:<name_width$}{:>12.6}{:>12.6}{:>12.6}{:>12.6}{:>8}{}\n",
                result.algorithm,
                result.min_time_ms,
                result.avg_time_ms,
                result.max_time_ms,
                result.std_dev_ms,
                if result.all_solved { "Yes" } else { "No" },
                if is_best { " *" } else { "" }
            ));
        }

        out.push_str("\n* = Best average time\n");
        out
    }

    /// Renders a multithreaded-run report with per-worker statistics.
    #[must_use]
    pub fn generate_multithread_report(&self, result: &MultithreadResult) -> String {
        let mut out = String::new();

        out.push_str("=== Multi-threaded Benchmark Report ===\n");
        out.push_str(&format!("Algorithm: {}\n", result.algorithm));
        out.push_str(&format!("Workers: {}\n", result.num_workers));
        out.push_str(&format!("Runs per worker: {}\n", result.runs_per_worker));
        out.push_str(&format!("Total runs: {}\n", result.total_runs));
        out.push_str(&format!(
            "All Solved: {}\n\n",
            if result.all_solved { "Yes" } else { "No" }
        ));

        out.push_str("Performance:\n");
        out.push_str(&format!("  Wall time:      {:>12.3} ms\n", result.wall_time_ms));
        out.push_str(&format!(
            "  Total CPU time: {:>12.3} ms\n",
            result.total_cpu_time_ms
        ));
        out.push_str(&format!(
            "  Throughput:     {:>12.3} solves/sec\n",
            result.throughput
        ));
        out.push_str(&format!("  Speedup:        {:>12.3}x\n", result.speedup));
        out.push_str(&format!(
            "  Efficiency:     {:>12.3}%\n\n",
            result.efficiency * 100.0
        ));

        out.push_str("Per-worker statistics:\n");
        out.push_str(&format!(
            "{:<10}{:>12}{:>12}{:>12}\n",
            "Worker", "Avg (ms)", "Min (ms)", "Max (ms)"
        ));
        out.push_str(&"-".repeat(46));
        out.push('\n');

        for (i, worker) in result.worker_results.iter().enumerate() {
            out.push_str(&format!(
                "{:<10}{:>12.3}{:>12.3}{:>12.3}\n",
                format!("W{i}"),
                worker.avg_time_ms,
                worker.min_time_ms,
                worker.max_time_ms
            ));
        }

        out
    }

    /// Renders a comparison table over multithreaded results, marking the
    /// best throughput.
    #[must_use]
    pub fn generate_multithread_comparison_report(
        &self,
        results: &FxHashMap<SolverAlgorithm, MultithreadResult>,
    ) -> String {
        let mut out = String::new();

        out.push_str("=== Multi-threaded Algorithm Comparison ===\n");
        out.push_str(&format!(
            "Workers: {} | Runs per worker: {}\n\n",
            self.config.num_workers, self.config.runs
        ));

        let name_width = results
            .values()
            .map(|r| r.algorithm.len())
            .chain(["Algorithm".len()])
            .max()
            .unwrap_or(9)
            + 2;

        out.push_str(&format!(
            "{:<name_width$}{:>14}{:>14}{:>14}{:>14}\n",
            "Algorithm", "Wall (ms)", "Throughput", "Speedup", "Efficiency"
        ));
        out.push_str(&"-".repeat(name_width + 14 * 4));
        out.push('\n');

        let best_throughput = results
            .values()
            .map(|r| OrderedFloat(r.throughput))
            .max()
            .map_or(0.0, |m| m.0);

        for algorithm in results.keys().sorted() {
            let result = &results[algorithm];
            let is_best = (result.throughput - best_throughput).abs() < f64::EPSILON;
            out.push_str(&format!(
                "{:<name_width$}{:>14.2}{:>12.2}/s{:>13.2}x{:>13.2}%{}\n",
                result.algorithm,
                result.wall_time_ms,
                result.throughput,
                result.speedup,
                result.efficiency * 100.0,
                if is_best { " *" } else { "" }
            ));
        }

        out.push_str("\n* = Best throughput\n");
        out
    }

    /// Prints a single-run report to stdout.
    pub fn print_result(&self, result: &BenchmarkResult) {
        print!("{}", self.generate_report(result));
    }

    /// Prints a multithreaded-run report to stdout.
    pub fn print_multithread_result(&self, result: &MultithreadResult) {
        print!("{}", self.generate_multithread_report(result));
    }

    /// Prints a single-threaded comparison table to stdout.
    pub fn print_comparison(&self, results: &FxHashMap<SolverAlgorithm, BenchmarkResult>) {
        print!("{}", self.generate_comparison_report(results));
    }

    /// Prints a multithreaded comparison table to stdout.
    pub fn print_multithread_comparison(
        &self,
        results: &FxHashMap<SolverAlgorithm, MultithreadResult>,
    ) {
        print!("{}", self.generate_multithread_comparison_report(results));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardDimension;
    use crate::puzzles;

    fn small_puzzle() -> Board {
        Board::from_grid(vec![
            vec![1, 0, 3, 0],
            vec![0, 4, 0, 2],
            vec![2, 0, 4, 0],
            vec![0, 3, 0, 1],
        ])
        .unwrap()
    }

    #[test]
    fn mean_and_std_dev() {
        assert!((Benchmark::mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
        assert!((Benchmark::mean(&[]) - 0.0).abs() < 1e-12);

        let std_dev = Benchmark::std_dev(&[1.0, 2.0, 3.0, 4.0], 2.5);
        assert!((std_dev - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((Benchmark::std_dev(&[7.0], 7.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn single_threaded_run_aggregates() {
        let puzzle = small_puzzle();
        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 3,
            warmup_runs: 1,
            num_workers: 1,
            verbose: false,
        });
        let mut solver = SolverAlgorithm::DancingLinks.create();
        let result = bench.run(&puzzle, &mut solver);

        assert_eq!(result.runs, 3);
        assert!(result.all_solved);
        assert!(result.min_time_ms <= result.avg_time_ms);
        assert!(result.avg_time_ms <= result.max_time_ms);
        assert!(result.total_iterations >= 3);
        assert!(result.last_result.solved);
    }

    #[test]
    fn comparison_covers_every_algorithm() {
        let puzzle = small_puzzle();
        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 2,
            warmup_runs: 0,
            num_workers: 1,
            verbose: false,
        });
        let results = bench.compare(
            &puzzle,
            &[SolverAlgorithm::DancingLinks, SolverAlgorithm::Backtracking],
        );
        assert_eq!(results.len(), 2);
        assert!(results[&SolverAlgorithm::DancingLinks].all_solved);
        assert!(results[&SolverAlgorithm::Backtracking].all_solved);

        let report = bench.generate_comparison_report(&results);
        assert!(report.contains("Backtracking"));
        assert!(report.contains("Dancing Links (DLX)"));
        assert!(report.contains("* = Best average time"));
    }

    #[test]
    fn batch_runs_one_result_per_puzzle() {
        let puzzles = vec![small_puzzle(), small_puzzle()];
        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 1,
            warmup_runs: 0,
            num_workers: 1,
            verbose: false,
        });
        let mut solver = SolverAlgorithm::Backtracking.create();
        let results = bench.run_batch(&puzzles, &mut solver);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.all_solved));
    }

    #[test]
    fn multithreaded_run_aggregates_workers() {
        let puzzle = small_puzzle();
        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 4,
            warmup_runs: 0,
            num_workers: 2,
            verbose: false,
        });
        let result = bench.run_multithreaded(&puzzle, SolverAlgorithm::DancingLinks);

        assert_eq!(result.num_workers, 2);
        assert_eq!(result.runs_per_worker, 4);
        assert_eq!(result.total_runs, 8);
        assert_eq!(result.worker_results.len(), 2);
        assert!(result.all_solved);
        assert!(result.wall_time_ms > 0.0);
        assert!(result.throughput > 0.0);
        assert!(result.speedup > 0.0);
        assert!(result.efficiency > 0.0);

        let report = bench.generate_multithread_report(&result);
        assert!(report.contains("Workers: 2"));
        assert!(report.contains("W0"));
        assert!(report.contains("W1"));
    }

    #[test]
    fn multithreaded_comparison_report_marks_best() {
        let puzzle = small_puzzle();
        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 2,
            warmup_runs: 0,
            num_workers: 2,
            verbose: false,
        });
        let results = bench.compare_multithreaded(
            &puzzle,
            &[SolverAlgorithm::DancingLinks, SolverAlgorithm::Backtracking],
        );
        let report = bench.generate_multithread_comparison_report(&results);
        assert!(report.contains("* = Best throughput"));
        assert!(report.contains("Dancing Links (DLX)"));
    }

    #[test]
    fn failed_solves_clear_all_solved() {
        let mut board = Board::new(BoardDimension::STANDARD_4X4).unwrap();
        board.set(0, 0, 1).unwrap();
        board.set(0, 1, 1).unwrap();

        let bench = Benchmark::with_config(BenchmarkConfig {
            runs: 2,
            warmup_runs: 0,
            num_workers: 1,
            verbose: false,
        });
        let mut solver = SolverAlgorithm::Backtracking.create();
        let result = bench.run(&board, &mut solver);
        assert!(!result.all_solved);
    }

    #[test]
    fn hardware_concurrency_is_positive() {
        assert!(Benchmark::hardware_concurrency() >= 1);
    }
}
