//! CLI runner for common setup and operations.
//!
//! Encapsulates logging initialization, game context creation and output
//! writing so command handlers stay small.

use std::path::{Path, PathBuf};

use tracing::info;

use pgcore::game::{self, GameContext, GameError, GamePaths};
use pgcore::logging::{default_log_dir, default_log_file, init_logging, LoggingGuard};
use pgcore::queue::FileWriter;

use crate::error::CliError;
use crate::GameArgs;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Validated game installation
    context: GameContext,
}

impl CliRunner {
    /// Initialize logging and validate the game installation.
    pub fn new(args: &GameArgs, log_dir: Option<&Path>) -> Result<Self, CliError> {
        let log_dir = log_dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(default_log_dir()));
        let logging_guard = init_logging(&log_dir, default_log_file())
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        let context = GameContext::new(args.game, resolve_paths(args)?)?;

        Ok(Self {
            logging_guard,
            context,
        })
    }

    /// The validated game context.
    pub fn context(&self) -> &GameContext {
        &self.context
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("pgcore v{}", env!("CARGO_PKG_VERSION"));
        info!("pgcore CLI: {} command", command);
    }

    /// Write command output to `path` through the background writer.
    pub fn write_output(&self, path: &Path, contents: String) -> Result<(), CliError> {
        let writer = FileWriter::new()?;
        let handle = writer.enqueue_write(contents, path)?;
        writer.shutdown();

        handle.wait().map_err(|error| CliError::FileWrite {
            path: path.to_path_buf(),
            error,
        })?;

        info!(path = %path.display(), "Wrote output");
        Ok(())
    }
}

/// Explicit folders win; anything not given is detected.
fn resolve_paths(args: &GameArgs) -> Result<GamePaths, CliError> {
    let documents_dir = match &args.documents_dir {
        Some(dir) => dir.clone(),
        None => game::documents_dir(args.game).map_err(GameError::from)?,
    };
    let app_data_dir = match &args.appdata_dir {
        Some(dir) => dir.clone(),
        None => game::app_data_dir(args.game).map_err(GameError::from)?,
    };

    Ok(GamePaths::new(&args.game_dir, documents_dir, app_data_dir))
}
