/// The `cli` module defines the command-line interface and drives the
/// solve, benchmark, and comparison flows.
pub(crate) mod cli;
