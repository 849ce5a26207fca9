//! Game path resolution.
//!
//! Resolves the four locations a game install is spread across:
//!
//! - `<game dir>` - installation root (holds `Skyrim.ccc`)
//! - `<game dir>/Data` - plugins and archives
//! - `<Documents>/My Games/<profile>` - INI files
//! - `<Local AppData>/<profile>` - `plugins.txt`
//!
//! The well-known user folders come from the `dirs` crate. Explicit paths
//! always take precedence over detection.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::profile::GameType;

/// Subfolder of the documents directory that holds per-game folders.
const MY_GAMES_FOLDER: &str = "My Games";

/// Data directory name under the game root.
const DATA_FOLDER: &str = "Data";

/// Errors resolving well-known system folders.
#[derive(Debug, Error)]
pub enum SystemPathError {
    /// The user's documents folder could not be determined.
    #[error("Could not determine the user's documents directory")]
    DocumentsDir,

    /// The local application data folder could not be determined.
    #[error("Could not determine the local application data directory")]
    LocalAppData,
}

/// Resolved locations of a game install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamePaths {
    game_dir: PathBuf,
    data_dir: PathBuf,
    documents_dir: PathBuf,
    app_data_dir: PathBuf,
}

impl GamePaths {
    /// Use explicit locations.
    ///
    /// `documents_dir` and `app_data_dir` are the per-game folders (for
    /// example `.../My Games/Skyrim Special Edition`), not the user roots.
    pub fn new(
        game_dir: impl Into<PathBuf>,
        documents_dir: impl Into<PathBuf>,
        app_data_dir: impl Into<PathBuf>,
    ) -> Self {
        let game_dir = game_dir.into();
        Self {
            data_dir: game_dir.join(DATA_FOLDER),
            game_dir,
            documents_dir: documents_dir.into(),
            app_data_dir: app_data_dir.into(),
        }
    }

    /// Resolve the per-game folders from the user's well-known directories.
    ///
    /// # Errors
    ///
    /// Returns [`SystemPathError`] if a well-known folder is unavailable on
    /// this platform.
    pub fn detect(
        game_type: GameType,
        game_dir: impl Into<PathBuf>,
    ) -> Result<Self, SystemPathError> {
        Ok(Self::new(
            game_dir,
            documents_dir(game_type)?,
            app_data_dir(game_type)?,
        ))
    }

    /// Replace the per-game documents folder.
    pub fn with_documents_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.documents_dir = dir.into();
        self
    }

    /// Replace the per-game application data folder.
    pub fn with_app_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_data_dir = dir.into();
        self
    }

    /// Installation root.
    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    /// `<game dir>/Data`.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Per-game documents folder (INI files).
    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Per-game application data folder (`plugins.txt`).
    pub fn app_data_dir(&self) -> &Path {
        &self.app_data_dir
    }
}

/// Per-game documents folder: `<Documents>/My Games/<profile>`.
pub fn documents_dir(game_type: GameType) -> Result<PathBuf, SystemPathError> {
    dirs::document_dir()
        .map(|docs| docs.join(MY_GAMES_FOLDER).join(game_type.documents_folder()))
        .ok_or(SystemPathError::DocumentsDir)
}

/// Per-game application data folder: `<Local AppData>/<profile>`.
pub fn app_data_dir(game_type: GameType) -> Result<PathBuf, SystemPathError> {
    dirs::data_local_dir()
        .map(|local| local.join(game_type.app_data_folder()))
        .ok_or(SystemPathError::LocalAppData)
}
