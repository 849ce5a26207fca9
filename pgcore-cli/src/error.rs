//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::path::PathBuf;
use std::process;

use pgcore::game::GameError;
use pgcore::queue::QueueError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Game installation or load order error
    Game(GameError),
    /// Background writer could not accept work
    Queue(QueueError),
    /// Failed to write output file
    FileWrite { path: PathBuf, error: std::io::Error },
    /// Failed to serialize output
    Serialize(serde_json::Error),
    /// Requested INI key does not exist
    KeyNotFound(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Game(GameError::InvalidGameDir { .. }) => {
                eprintln!();
                eprintln!("Make sure:");
                eprintln!("  1. --game-dir points at the game root, not its Data folder");
                eprintln!("  2. --game matches the installed game");
            }
            CliError::Game(GameError::LoadOrder(_)) => {
                eprintln!();
                eprintln!("If you use a mod manager profile, pass its folder with --appdata-dir.");
            }
            CliError::Game(GameError::SystemPath(_)) => {
                eprintln!();
                eprintln!("Pass --documents-dir and --appdata-dir explicitly on this platform.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Game(e) => write!(f, "{}", e),
            CliError::Queue(e) => write!(f, "Output writer error: {}", e),
            CliError::FileWrite { path, error } => {
                write!(f, "Failed to write file '{}': {}", path.display(), error)
            }
            CliError::Serialize(e) => write!(f, "Failed to serialize output: {}", e),
            CliError::KeyNotFound(key) => write!(f, "INI key '{}' not found", key),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Game(e) => Some(e),
            CliError::Queue(e) => Some(e),
            CliError::FileWrite { error, .. } => Some(error),
            CliError::Serialize(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        CliError::Game(e)
    }
}

impl From<QueueError> for CliError {
    fn from(e: QueueError) -> Self {
        CliError::Queue(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialize(e)
    }
}
