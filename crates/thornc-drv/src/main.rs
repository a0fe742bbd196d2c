//! `thornc` — a thin CLI for manually exercising the lexer and parser.
//!
//! This is a collaborator binary for inspecting what the front end
//! produces on a given source file, not a production compiler driver: it
//! has no codegen, no linking, and no target-selection machinery.

mod commands;
mod error;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::lex::{run_lex, LexArgs};
use commands::parse::{run_parse, ParseArgs};

/// Inspect the thornc lexer and parser on a source file.
#[derive(Parser, Debug)]
#[command(name = "thornc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dump tokens or an AST for a thornc source file", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true, env = "THORNC_VERBOSE")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Dump the token stream for a source file.
    Lex(LexCommand),
    /// Dump the parsed AST (and any diagnostics) for a source file.
    Parse(ParseCommand),
}

#[derive(Parser, Debug)]
struct LexCommand {
    /// Source file to lex.
    path: PathBuf,
}

#[derive(Parser, Debug)]
struct ParseCommand {
    /// Source file to parse.
    path: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Lex(cmd) => run_lex(LexArgs { path: cmd.path }),
        Commands::Parse(cmd) => run_parse(ParseArgs { path: cmd.path }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init();
}
