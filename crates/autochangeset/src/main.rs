mod error;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use autochangeset_core::AttributionStrategy;
use autochangeset_operations::operations::{GenerateInput, GenerateOperation};
use autochangeset_operations::providers::{FileSystemChangesetWriter, Git2Provider, ProcessRunner};
use autochangeset_workspace::Config;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "autochangeset")]
#[command(version)]
#[command(
    about = "Generate changesets for changed packages from conventional commits",
    long_about = None
)]
struct Cli {
    /// Workspace root (default: current directory)
    #[arg(long = "path", short = 'C')]
    path: Option<PathBuf>,

    /// Configuration file (default: autochangeset.toml in the workspace root)
    #[arg(long)]
    config: Option<PathBuf>,

    /// How commits are attributed to changed packages
    #[arg(long, value_enum)]
    attribution: Option<AttributionStrategy>,

    /// Base revision of the diff used to detect changed packages
    #[arg(long)]
    base_ref: Option<String>,

    /// Write a patch changeset even for packages without attributed commits
    #[arg(long)]
    force: bool,

    /// Print the changesets instead of writing them
    #[arg(long)]
    dry_run: bool,

    /// Log pipeline decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(fmt::layer().without_time().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let root = resolve_root(cli.path)?;
    let mut config = load_config(&root, cli.config.as_deref())?;

    if let Some(attribution) = cli.attribution {
        config.attribution = attribution;
    }
    if let Some(base_ref) = cli.base_ref {
        config.base_ref = base_ref;
    }
    config.force |= cli.force;
    debug!(root = %root.display(), ?config, "resolved configuration");

    let operation = GenerateOperation::new(
        Git2Provider::new(),
        ProcessRunner::new(),
        FileSystemChangesetWriter::new(),
    );
    let output = operation.execute(&GenerateInput {
        root,
        config,
        dry_run: cli.dry_run,
    });

    if cli.dry_run {
        output::print_dry_run(&output);
    } else {
        output::print_summary(&output);
    }

    Ok(())
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf> {
    let root = match path {
        Some(p) => p,
        None => std::env::current_dir().map_err(CliError::CurrentDir)?,
    };

    if !root.is_dir() {
        return Err(CliError::RootNotFound(root));
    }
    Ok(root)
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let config = match explicit {
        Some(path) => Config::from_file(path)?,
        None => Config::load(root)?,
    };
    Ok(config)
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
