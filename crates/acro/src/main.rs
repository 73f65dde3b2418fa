//! acro CLI - Acronym expansion.
//!
//! Provides commands for:
//! - `acro [FORMAT]`: pandoc JSON filter (stdin to stdout)
//! - `expand`: Expand markers in a text document
//! - `list`: Print the acronym listing of a document

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExpandArgs, FilterArgs, ListArgs};
use output::Output;

/// acro - Acronym expansion with first-use tracking.
///
/// Without a subcommand, runs as a pandoc JSON filter.
#[derive(Parser)]
#[command(name = "acro", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand acronym markers in a text document.
    Expand(ExpandArgs),
    /// List acronyms defined or used in a document.
    List(ListArgs),
}

impl Cli {
    fn verbose(&self) -> bool {
        match &self.command {
            Some(Commands::Expand(args)) => args.source.verbose,
            Some(Commands::List(args)) => args.source.verbose,
            None => self.filter.source.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
    // Logs go to stderr; stdout carries the pandoc JSON stream.
    let filter = if cli.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Some(Commands::Expand(args)) => args.execute(),
        Some(Commands::List(args)) => args.execute(),
        None => cli.filter.execute(),
    };

    if let Err(err) = result {
        output.error(&err.to_string());
        std::process::exit(1);
    }
}
