//! INI source loading.

use std::io;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use thiserror::Error;
use tracing::{trace, warn};

use super::tree::ConfigTree;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file could not be opened or read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration content is malformed.
    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// A single INI file that contributes to the effective configuration.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    required: bool,
}

impl ConfigSource {
    /// A source that must exist.
    pub fn required(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
        }
    }

    /// A source that may be absent.
    pub fn optional(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: false,
        }
    }

    /// Path of the INI file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file into a [`ConfigTree`].
    ///
    /// An optional source that does not exist yields an empty tree.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if a required file is missing or unreadable
    /// - [`ConfigError::Parse`] if the content is not valid INI
    pub fn load(&self) -> Result<ConfigTree, ConfigError> {
        if !self.required && !self.path.exists() {
            warn!(path = %self.path.display(), "INI file does not exist (ignoring)");
            return Ok(ConfigTree::new());
        }

        let ini = Ini::load_from_file_opt(&self.path, parse_options()).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: self.path.clone(),
                source,
            },
            ini::Error::Parse(parse) => ConfigError::Parse {
                path: self.path.clone(),
                message: parse.to_string(),
            },
        })?;

        let tree = tree_from_ini(&ini);
        trace!(path = %self.path.display(), entries = tree.flatten().len(), "Loaded INI");
        Ok(tree)
    }

    /// Load a base source and merge an optional override source on top.
    pub fn load_layered(
        base: &ConfigSource,
        overrides: &ConfigSource,
    ) -> Result<ConfigTree, ConfigError> {
        let mut tree = base.load()?;
        tree.merge(&overrides.load()?);
        Ok(tree)
    }
}

/// Parse INI text into a tree. Used for in-memory sources and tests.
impl std::str::FromStr for ConfigTree {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ini = Ini::load_from_str_opt(s, parse_options()).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        Ok(tree_from_ini(&ini))
    }
}

/// Engine INIs use raw values: no quoting, no backslash escapes.
fn parse_options() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn tree_from_ini(ini: &Ini) -> ConfigTree {
    let mut tree = ConfigTree::new();

    for (section, properties) in ini.iter() {
        let target = match section {
            Some(name) if !name.trim().is_empty() => tree.section_mut(name.trim()),
            _ => &mut tree,
        };
        for (key, value) in properties.iter() {
            target.set(key, value.trim());
        }
    }

    tree
}
