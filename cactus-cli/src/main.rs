//! `cactus` binary entry point.
//!
//! Parses arguments, realizes the requested matrix, prints the edge list to
//! stdout and maps failures to a non-zero exit code after logging them with
//! their stable error codes.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cactus_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, matrix_code) = match err.downcast_ref::<CliError>() {
            Some(CliError::Core(core)) => (Some(core.code()), core.matrix_code()),
            _ => (None, None),
        };
        let message = format!("{err:#}");
        let code_field = code.map(|code| field::display(code.as_str()));
        let matrix_code_field = matrix_code.map(|code| field::display(code.as_str()));

        error!(
            error = %message,
            code = code_field,
            matrix_code = matrix_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

// Tracing is not available yet, so this is the one direct write to stderr.
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
