//! minic CLI - a command-line demo/REPL driver for the minic interpreter
//! core.
//!
//! Parses command-line arguments, initialises logging, loads
//! configuration, and dispatches to the selected subcommand.

mod commands;
mod config;
mod error;
mod evaluator;
mod platform;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{LexArgs, LexCommand, ReplArgs, ReplCommand};
use config::Config;
use error::{MinicCliError, Result};

/// minic - an embeddable C-dialect interpreter core, exercised from the
/// command line.
#[derive(Parser, Debug)]
#[command(name = "minic")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Lex and interactively drive the minic interpreter core", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true, env = "MINIC_VERBOSE")]
    verbose: bool,

    /// Path to a minic.toml configuration file
    #[arg(short, long, global = true, env = "MINIC_CONFIG")]
    config: Option<PathBuf>,

    /// Disable colored log output
    #[arg(long, global = true, env = "MINIC_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenise a source file and print its token stream
    Lex(LexCommandArgs),

    /// Start an interactive read-eval-print loop
    Repl,
}

#[derive(Parser, Debug)]
struct LexCommandArgs {
    /// Source file to tokenise
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;
    execute_command(cli.command, config)
}

fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };

    let subscriber = fmt::layer().with_ansi(!no_color).with_target(false).with_thread_ids(false).with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| MinicCliError::Config(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn execute_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Lex(args) => LexCommand::new(LexArgs { file: args.file }).run(),
        Commands::Repl => ReplCommand::new(ReplArgs, config).run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lex_subcommand() {
        let cli = Cli::parse_from(["minic", "lex", "input.c"]);
        match cli.command {
            Commands::Lex(args) => assert_eq!(args.file, PathBuf::from("input.c")),
            _ => panic!("expected Lex command"),
        }
    }

    #[test]
    fn parses_repl_subcommand() {
        let cli = Cli::parse_from(["minic", "repl"]);
        assert!(matches!(cli.command, Commands::Repl));
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::parse_from(["minic", "--verbose", "repl"]);
        assert!(cli.verbose);
    }

    #[test]
    fn config_flag_accepts_a_path() {
        let cli = Cli::parse_from(["minic", "--config", "custom.toml", "repl"]);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
    }
}
