//! Game profiles, installation paths and the resolution pipeline.
//!
//! # Example
//!
//! ```ignore
//! use pgcore::game::{GameContext, GamePaths, GameType};
//!
//! let paths = GamePaths::detect(GameType::SkyrimSe, "/games/Skyrim Special Edition")?
//!     .with_app_data_dir("/mo2/profiles/Default");
//! let context = GameContext::new(GameType::SkyrimSe, paths)?;
//! let plugins = context.active_plugins(true)?;
//! ```

mod context;
mod paths;
mod profile;

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::load_order::LoadOrderError;

pub use context::GameContext;
pub use paths::{app_data_dir, documents_dir, GamePaths, SystemPathError};
pub use profile::{GameType, IniNames, UnknownGameType};

/// Errors from game installation handling.
#[derive(Debug, Error)]
pub enum GameError {
    /// The game directory does not exist.
    #[error("Game directory does not exist: {0}")]
    GameDirNotFound(PathBuf),

    /// The data directory lacks the profile's check file.
    #[error("Game data location is invalid: {data_dir} does not contain {check_file}")]
    InvalidGameDir {
        data_dir: PathBuf,
        check_file: &'static str,
    },

    /// A well-known system folder could not be resolved.
    #[error(transparent)]
    SystemPath(#[from] SystemPathError),

    /// Load order files could not be read.
    #[error(transparent)]
    LoadOrder(#[from] LoadOrderError),

    /// INI files could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The data directory could not be scanned.
    #[error("Failed to scan data directory: {0}")]
    Io(#[from] std::io::Error),
}
