//! Command-line interface for the cactus realizer.
//!
//! The single `realize` command loads a distance matrix from a text, CSV or
//! PHYLIP-style file, realizes it and renders the resulting edge list.

mod commands;

pub use commands::{
    Cli, CliError, Command, EPSILON_ENV, ExecutionSummary, MIN_DISTANCE_ENV, RealizeCommand,
    render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
