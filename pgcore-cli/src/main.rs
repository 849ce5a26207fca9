//! pgcore CLI - Command-line interface
//!
//! Inspects how a Bethesda game will load its plugins and archives.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use pgcore::game::GameType;

use crate::commands::{archives, ini, plugins};
use crate::runner::CliRunner;

#[derive(Parser)]
#[command(name = "pgcore")]
#[command(version)]
#[command(about = "Resolve plugin and archive load order for Bethesda games", long_about = None)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Directory for the log file
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Game selection shared by every command.
#[derive(Args, Debug)]
pub struct GameArgs {
    /// Game profile (skyrimse, skyrimgog, skyrimvr, skyrim, enderal, enderalse)
    #[arg(long, default_value = "skyrimse")]
    pub game: GameType,

    /// Game installation directory (the folder containing Data)
    #[arg(long)]
    pub game_dir: PathBuf,

    /// Per-game documents folder holding the INI files (detected if omitted)
    #[arg(long)]
    pub documents_dir: Option<PathBuf>,

    /// Per-game app data folder holding plugins.txt (detected if omitted)
    #[arg(long)]
    pub appdata_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List active plugins in load order
    Plugins {
        /// Keep file extensions (.esm/.esp/.esl)
        #[arg(long)]
        keep_extension: bool,
    },

    /// Show the archive load order and orphan archives
    Archives {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Write the report to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the effective game INI settings
    Ini {
        /// Print a single value (Section.Key)
        #[arg(long)]
        key: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let runner = match CliRunner::new(&cli.game, cli.log_dir.as_deref()) {
        Ok(runner) => runner,
        Err(e) => e.exit(),
    };

    let result = match cli.command {
        Commands::Plugins { keep_extension } => plugins::run(&runner, keep_extension),
        Commands::Archives { json, output } => archives::run(&runner, json, output.as_deref()),
        Commands::Ini { key } => ini::run(&runner, key.as_deref()),
    };

    if let Err(e) = result {
        e.exit();
    }
}
