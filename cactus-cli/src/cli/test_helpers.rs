//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use cactus_core::extend::DEFAULT_MAX_ROUNDS;
use tempfile::TempDir;

use super::{Cli, CliError, RealizeCommand, run_cli};

pub(super) const TREE_PHYLIP: &str = "\
# four taxa on a tree with two internal vertices
4
a 0 5 7 7
b 5 0 8 8
c 7 8 0 6
d 7 8 6 0
";

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_matrix_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Builds a `realize` command with explicit default tolerances so the
/// environment cannot influence the outcome.
pub(super) fn realize_command(path: PathBuf) -> RealizeCommand {
    RealizeCommand {
        path,
        epsilon: Some(1e-12),
        min_distance: Some(1e-12),
        max_rounds: DEFAULT_MAX_ROUNDS.get(),
        name: None,
        verify: false,
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
