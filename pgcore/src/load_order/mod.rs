//! Plugin load order reading.
//!
//! The engine activates content packages (plugins) in a fixed order. Later
//! plugins override earlier ones. This module reads that order from the
//! text files the game and mod managers maintain.
//!
//! # Files
//!
//! ```text
//! %LOCALAPPDATA%/Skyrim Special Edition/
//! └── plugins.txt        # "*Plugin.esp" = active, "Plugin.esp" = inactive
//!
//! <game dir>/
//! └── Skyrim.ccc         # Creation Club plugins, one per line
//! ```
//!
//! [`LoadOrderFile`] is the low-level line reader. [`ActivePlugins`] combines
//! the base masters, the Creation Club list and `plugins.txt` into the list
//! the engine actually loads.

mod active;
mod reader;

use std::path::PathBuf;

use thiserror::Error;

pub use active::ActivePlugins;
pub use reader::{trim_extension, LoadOrderFile};

/// Errors that can occur while reading load order files.
#[derive(Debug, Error)]
pub enum LoadOrderError {
    /// A required load order file could not be opened or read.
    #[error("Unable to read load order file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
