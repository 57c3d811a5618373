//! Command implementations and argument parsing for the cactus CLI.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use cactus_core::{
    CactusBuilder, CactusError, DEFAULT_EPSILON, DEFAULT_MIN_DISTANCE, DataSource,
    DistanceMatrix, Realization, extend::DEFAULT_MAX_ROUNDS, verify::max_realization_error,
};
use cactus_providers_matrix::{MatrixProvider, MatrixProviderError};
use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// Environment variable overriding the default domination tolerance.
pub const EPSILON_ENV: &str = "CACTUS_EPSILON";

/// Environment variable overriding the default near-zero distance.
pub const MIN_DISTANCE_ENV: &str = "CACTUS_MIN_DISTANCE";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "cactus",
    about = "Realize a distance matrix as a sparse weighted graph."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Realize a distance matrix file and print the edge list.
    Realize(RealizeCommand),
}

/// Options accepted by the `realize` command.
#[derive(Debug, Args, Clone)]
pub struct RealizeCommand {
    /// Path to a square or PHYLIP-style distance matrix.
    pub path: PathBuf,

    /// Tolerance for comparing distances (defaults to `CACTUS_EPSILON` or 1e-12).
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Distance below which two points coincide (defaults to
    /// `CACTUS_MIN_DISTANCE` or 1e-12).
    #[arg(long = "min-distance")]
    pub min_distance: Option<f64>,

    /// Maximum number of compaction rounds before giving up.
    #[arg(
        long = "max-rounds",
        default_value_t = DEFAULT_MAX_ROUNDS.get(),
        value_parser = clap::value_parser!(usize),
    )]
    pub max_rounds: usize,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// Report the largest deviation between graph and input distances.
    #[arg(long)]
    pub verify: bool,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the input matrix.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The input file was malformed.
    #[error(transparent)]
    Matrix(#[from] MatrixProviderError),
    /// Configuration or realization failed.
    #[error(transparent)]
    Core(#[from] CactusError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source implementation.
    pub data_source: String,
    /// Realized graph and taxon mapping.
    pub realization: Realization,
    /// Taxon labels, when the input carried them.
    pub labels: Option<Vec<String>>,
    /// Largest deviation between graph and input distances, when requested.
    pub max_deviation: Option<f64>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading or realizing the input fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cactus_cli::cli::{Cli, Command, RealizeCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "3\n0 1 3\n1 0 2\n3 2 0\n")?;
/// let cli = Cli {
///     command: Command::Realize(RealizeCommand {
///         path: file.path().to_path_buf(),
///         epsilon: None,
///         min_distance: None,
///         max_rounds: 100,
///         name: Some("line".into()),
///         verify: true,
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.realization.graph().edge_count(), 2);
/// assert_eq!(summary.max_deviation, Some(0.0));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Realize(realize) => {
            Span::current().record("command", field::display("realize"));
            run_realize(realize)
        }
    }
}

#[instrument(
    name = "cli.realize",
    err,
    skip(command),
    fields(
        path = %command.path.display(),
        override_name = field::Empty,
        verify = command.verify,
    ),
)]
pub(super) fn run_realize(command: RealizeCommand) -> Result<ExecutionSummary, CliError> {
    let RealizeCommand {
        path,
        epsilon,
        min_distance,
        max_rounds,
        name,
        verify,
    } = command;
    Span::current().record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );

    let realizer = CactusBuilder::new()
        .with_epsilon(tolerance_override(epsilon, EPSILON_ENV, DEFAULT_EPSILON))
        .with_min_distance(tolerance_override(
            min_distance,
            MIN_DISTANCE_ENV,
            DEFAULT_MIN_DISTANCE,
        ))
        .with_max_rounds(max_rounds)
        .build()?;

    let chosen_name = derive_data_source_name(&path, name.as_deref());
    let reader = open_matrix_reader(&path)?;
    let provider = MatrixProvider::try_from_reader(chosen_name, reader)?;
    let realization = realizer.realize(&provider)?;

    let max_deviation = if verify {
        let matrix = DistanceMatrix::try_from_source(&provider, &realizer.tolerances())?;
        Some(max_realization_error(&matrix, &realization))
    } else {
        None
    };

    info!(
        data_source = provider.name(),
        vertices = realization.graph().vertex_count(),
        edges = realization.graph().edge_count(),
        "command completed"
    );
    Ok(ExecutionSummary {
        data_source: provider.name().to_owned(),
        realization,
        labels: provider.labels().map(<[String]>::to_vec),
        max_deviation,
    })
}

/// Picks the explicit flag, then the environment, then `default`.
fn tolerance_override(flag: Option<f64>, variable: &'static str, default: f64) -> f64 {
    match flag {
        Some(value) => value,
        None => tolerance_from_env(variable, env::var(variable), default),
    }
}

/// Reads a tolerance from an environment lookup, warning and falling back to
/// `default` when the value is unusable.
pub(super) fn tolerance_from_env(
    variable: &'static str,
    lookup: Result<String, env::VarError>,
    default: f64,
) -> f64 {
    let raw = match lookup {
        Ok(raw) => raw,
        Err(env::VarError::NotPresent) => return default,
        Err(err) => {
            warn!(variable, error = %err, default, "ignoring tolerance override");
            return default;
        }
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => value,
        _ => {
            warn!(
                variable,
                value = raw.as_str(),
                default,
                "ignoring tolerance override"
            );
            default
        }
    }
}

#[instrument(name = "cli.open_matrix_reader", err, fields(path = field::Empty))]
pub(super) fn open_matrix_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Formats an edge weight with at most five decimals and no trailing zeros.
pub(super) fn format_weight(weight: f64) -> String {
    let fixed = format!("{weight:.5}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Edges are listed once each as `u<TAB>v<TAB>weight` with `u < v`, in
/// ascending order.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cactus_cli::cli::{ExecutionSummary, render_summary};
/// # use cactus_core::{Realization, WeightedGraph};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let mut graph = WeightedGraph::new(2);
/// graph.put_edge(0, 1, 2.5)?;
/// let summary = ExecutionSummary {
///     data_source: "pair".into(),
///     realization: Realization::new(graph, vec![0, 1], 0),
///     labels: None,
///     max_deviation: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: pair\nvertices: 2 (taxa: 2, auxiliary: 0)\nedges: 1\n0\t1\t2.5\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let realization = &summary.realization;
    let graph = realization.graph();
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(
        writer,
        "vertices: {} (taxa: {}, auxiliary: {})",
        graph.vertex_count(),
        realization.taxon_vertices().len(),
        realization.auxiliary_count(),
    )?;
    writeln!(writer, "edges: {}", graph.edge_count())?;
    for (edge, weight) in graph.edges() {
        writeln!(writer, "{}\t{}\t{}", edge.u(), edge.v(), format_weight(weight))?;
    }
    if let Some(labels) = &summary.labels {
        writeln!(writer, "taxa:")?;
        for (label, vertex) in labels.iter().zip(realization.taxon_vertices()) {
            writeln!(writer, "{label}\t{vertex}")?;
        }
    }
    if let Some(deviation) = summary.max_deviation {
        writeln!(writer, "max deviation: {}", format_weight(deviation))?;
    }
    Ok(())
}
