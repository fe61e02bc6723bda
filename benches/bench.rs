use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::time::Duration;
use sudoku_solver::board::Board;
use sudoku_solver::puzzles;
use sudoku_solver::solver::{Solver, SolverAlgorithm};

fn bench_9x9(c: &mut Criterion) {
    let board = puzzles::builtin_board(9).unwrap();

    c.bench_function("9x9 - dlx", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::DancingLinks.create();
            let result = solver.solve(&board);
            black_box(result);
        })
    });

    c.bench_function("9x9 - backtracking", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::Backtracking.create();
            let result = solver.solve(&board);
            black_box(result);
        })
    });
}

fn bench_16x16(c: &mut Criterion) {
    let board = puzzles::builtin_board(16).unwrap();

    let mut group = c.benchmark_group("16x16");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("dlx", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::DancingLinks.create();
            let result = solver.solve(&board);
            black_box(result);
        })
    });

    group.bench_function("backtracking", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::Backtracking.create();
            let result = solver.solve(&board);
            black_box(result);
        })
    });

    group.finish();
}

fn bench_solver_reuse(c: &mut Criterion) {
    let board = puzzles::builtin_board(9).unwrap();

    c.bench_function("9x9 - dlx reused via reset", |b| {
        let mut solver = SolverAlgorithm::DancingLinks.create();
        b.iter(|| {
            solver.reset();
            let result = solver.solve(&board);
            black_box(result);
        })
    });
}

fn bench_uniqueness(c: &mut Criterion) {
    let board = puzzles::builtin_board(9).unwrap();

    c.bench_function("9x9 - uniqueness check", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::DancingLinks.create();
            let unique = solver.has_unique_solution(&board);
            black_box(unique);
        })
    });
}

fn bench_empty_board(c: &mut Criterion) {
    let board = Board::new(sudoku_solver::board::BoardDimension::STANDARD_9X9).unwrap();

    c.bench_function("empty 9x9 - dlx", |b| {
        b.iter(|| {
            let mut solver = SolverAlgorithm::DancingLinks.create();
            let result = solver.solve(&board);
            black_box(result);
        })
    });
}

criterion_group!(
    benches,
    bench_9x9,
    bench_16x16,
    bench_solver_reuse,
    bench_uniqueness,
    bench_empty_board
);
criterion_main!(benches);
