//! Geocache CLI - Command-line interface
//!
//! Plays the geocache game one command at a time. The session is saved
//! after every gameplay command, so `geocache move north` followed by
//! `geocache look` picks up where the previous invocation left off.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::play::PlayCommands;
use runner::RunOptions;

#[derive(Debug, Parser)]
#[command(name = "geocache", author, version, about, long_about = None)]
struct Cli {
    /// Save file to use instead of game.save_file
    #[arg(long, global = true, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Play(PlayCommands),

    /// View or change configuration settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    let options = RunOptions {
        save_file: cli.save,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Play(command) => commands::play::run(command, &options),
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
