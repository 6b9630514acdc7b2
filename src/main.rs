//! dfront command-line driver.
//!
//! ```bash
//! # Parse, optimize and run a program
//! dfront demos/arithmetic.d
//!
//! # Show the symbol table without the tree, skip execution
//! dfront demos/collections.d --no-tree --symbols --no-execute
//! ```

use std::{fs::read_to_string, path::PathBuf, process};

use clap::{Parser, ValueEnum};
use dfront::{
    display_error,
    pipeline::{run_source, PipelineOptions},
};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "dfront",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parser, constant folder and top-level interpreter for .d scripts"
)]
struct Cli {
    /// Source file to process
    file: PathBuf,

    /// Skip constant folding and dead declaration pruning
    #[arg(long)]
    no_optimize: bool,

    /// Stop after optimization
    #[arg(long)]
    no_execute: bool,

    /// Do not print the final syntax tree
    #[arg(long)]
    no_tree: bool,

    /// Print the symbol table
    #[arg(long)]
    symbols: bool,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, value_enum)]
    log: Option<LogLevel>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet, cli.log);

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            error!("Failed to read {}: {}", cli.file.display(), err);
            process::exit(1);
        }
    };

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.display().to_string());

    let options = PipelineOptions {
        optimize: !cli.no_optimize,
        execute: !cli.no_execute,
        print_tree: !cli.no_tree,
        print_symbols: cli.symbols,
    };

    if let Err(err) = run_source(&source, &file_name, &options) {
        display_error(&err, &source);
        process::exit(1);
    }
}

fn setup_logging(verbose: u8, quiet: bool, log_level: Option<LogLevel>) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}
