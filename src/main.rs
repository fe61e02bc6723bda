//! Binary entry point for the Sudoku solver.

use tikv_jemallocator::Jemalloc;

mod command_line;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() {
    std::process::exit(command_line::cli::run());
}
