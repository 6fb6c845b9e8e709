//! obsplan: observation project document editor.
//!
//! # Usage
//!
//! ```text
//! obsplan new [NAME] [--code CODE]... [--output PATH] [--format json|yaml]
//! obsplan add <FILE> [CODE] [--inactive] [--type vlbi|single-dish] [-i]
//! obsplan insert <FILE> <INDEX> <CODE> [--inactive] [--type ...] [-i]
//! obsplan remove <FILE> <INDEX> [-i]
//! obsplan set <FILE> <INDEX> <CODE> [--inactive] [--type ...] [-i]
//! obsplan rename <FILE> <NAME> [-i]
//! obsplan show <FILE> [--index N] [--json]
//! ```
//!
//! Editing commands print the updated document to stdout unless `-i` is given.
//! Logs go to stderr; `RUST_LOG` overrides `-v`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    edit::{AddArgs, InsertArgs, RemoveArgs, RenameArgs, SetArgs},
    new::NewArgs,
    show::ShowArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "obsplan",
    version,
    about = "Create, edit and inspect observation project documents",
    long_about = None,
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new project document.
    New(NewArgs),

    /// Append an observation.
    Add(AddArgs),

    /// Insert an observation before INDEX (INDEX may equal the count to append).
    Insert(InsertArgs),

    /// Remove the observation at INDEX.
    Remove(RemoveArgs),

    /// Replace the observation at INDEX.
    Set(SetArgs),

    /// Change the project name.
    Rename(RenameArgs),

    /// Print a project summary and its observations.
    Show(ShowArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);
    match cli.command {
        Commands::New(args) => args.run(),
        Commands::Add(args) => args.run(),
        Commands::Insert(args) => args.run(),
        Commands::Remove(args) => args.run(),
        Commands::Set(args) => args.run(),
        Commands::Rename(args) => args.run(),
        Commands::Show(args) => args.run(),
    }
}

fn init_tracing(verbose: u8, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
