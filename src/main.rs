//! datadir - locate the nearest test-data directory and inventory its files.
//!
//! Usage:
//!   datadir find [NAMES]...       Print the resolved directory
//!   datadir walk [NAMES]...       List the classified files beneath it
//!   datadir --help                Show help

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use datadir_scan::{Locator, LocatorConfig, WalkConfig};

#[derive(Parser)]
#[command(
    name = "datadir",
    version,
    about = "Locate the nearest test-data directory and inventory its files",
    long_about = "datadir searches the working directory and its ancestors for a \
                  directory with one of the given names (default: testdata), falling \
                  back to the enclosing git repository root, and can list every file \
                  beneath it with its content type."
)]
struct Cli {
    /// Log verbosity
    #[arg(short = 'z', long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Include source locations in log lines
    #[arg(short = 'x', long, global = true, default_value_t = true, action = ArgAction::Set)]
    include_source_locations: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    output: OutputFormat,

    /// Search from this directory instead of the current one
    #[arg(short = 'C', long, global = true)]
    cwd: Option<PathBuf>,

    /// Do not fall back to the repository root
    #[arg(long, global = true)]
    no_repo_fallback: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the nearest matching directory
    Find {
        /// Directory names to search for, in priority order
        names: Vec<String>,
    },

    /// List the files beneath the resolved directory
    Walk {
        /// Directory names to search for, in priority order
        names: Vec<String>,

        /// Walk this directory instead of resolving one
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Sort results by path
        #[arg(short, long)]
        sort: bool,

        /// Skip hidden files
        #[arg(long)]
        skip_hidden: bool,

        /// Follow symbolic links
        #[arg(short = 'L', long)]
        follow_symlinks: bool,

        /// Maximum depth to descend
        #[arg(short = 'd', long)]
        max_depth: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
}

impl LogLevel {
    /// Filter directive for this level. `notice` has no tracing equivalent.
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info | LogLevel::Notice => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Serialized result of `find`.
#[derive(Serialize)]
struct Found {
    path: PathBuf,
    candidate: String,
    anchor: String,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.log_level, cli.include_source_locations);

    tracing::trace!(version = env!("CARGO_PKG_VERSION"), "Starting application");

    let mut builder = LocatorConfig::builder();
    builder.repo_fallback(!cli.no_repo_fallback);
    if let Some(cwd) = cli.cwd {
        builder.working_dir(cwd);
    }

    match cli.command {
        Command::Find { names } => {
            let config = builder.candidates(names).build()?;
            run_find(config, cli.output)?;
        }
        Command::Walk {
            names,
            root,
            sort,
            skip_hidden,
            follow_symlinks,
            max_depth,
        } => {
            let config = builder
                .candidates(names)
                .walk(WalkConfig {
                    follow_symlinks,
                    include_hidden: !skip_hidden,
                    max_depth,
                })
                .build()?;
            run_walk(config, root, sort, cli.output)?;
        }
    }

    Ok(())
}

/// Configure the global tracing subscriber. `RUST_LOG` wins over `--log-level`.
fn init_logging(level: LogLevel, source_locations: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive()));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_file(source_locations)
        .with_line_number(source_locations)
        .init();
}

/// Resolve and print the matching directory.
fn run_find(config: LocatorConfig, format: OutputFormat) -> Result<()> {
    let mut locator = Locator::from_config(config);
    locator.resolve().context("Resolution failed")?;

    if let Some(resolution) = locator.resolution() {
        let found = Found {
            path: resolution.path.clone(),
            candidate: resolution.candidate.clone(),
            anchor: resolution.anchor.to_string(),
        };
        print!("{}", render(format, &found)?);
    }

    Ok(())
}

/// Walk the resolved (or given) directory and print its descriptors.
fn run_walk(
    config: LocatorConfig,
    root: Option<PathBuf>,
    sort: bool,
    format: OutputFormat,
) -> Result<()> {
    let mut locator = Locator::from_config(config);

    let result = match root {
        Some(root) => locator.walk_path(root),
        None => locator.walk(),
    };

    let mut descriptors = match result {
        Ok(descriptors) => descriptors,
        Err(err) => {
            let (partial, source) = err.into_parts();
            if !partial.is_empty() {
                tracing::warn!(count = partial.len(), "Discarding partial walk results");
            }
            return Err(source).context("Walk failed");
        }
    };

    if sort {
        descriptors.sort_by(|a, b| a.path().cmp(b.path()));
    }

    print!("{}", render(format, &descriptors)?);

    Ok(())
}

/// Encode a value as 4-space indented JSON or as YAML.
fn render<T: Serialize>(format: OutputFormat, datum: &T) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let mut buffer = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            datum
                .serialize(&mut serializer)
                .context("Failed to encode json")?;

            let mut out = String::from_utf8(buffer).context("Encoded json is not UTF-8")?;
            out.push('\n');
            Ok(out)
        }
        OutputFormat::Yaml => serde_yaml::to_string(datum).context("Failed to encode yaml"),
    }
}
