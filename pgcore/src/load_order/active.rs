//! Active plugin list assembly.
//!
//! The engine does not load `plugins.txt` verbatim. Base game masters are
//! always loaded first, followed by Creation Club content, followed by the
//! plugins the user activated.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::reader::{trim_extension, LoadOrderFile};
use super::LoadOrderError;

/// Prefix marking an active entry in `plugins.txt`.
const ACTIVE_MARKER: char = '*';

/// Builds the list of plugins the engine activates, in load order.
///
/// # Example
///
/// ```ignore
/// use pgcore::load_order::ActivePlugins;
///
/// let plugins = ActivePlugins::new("/games/Skyrim/Data", "/appdata/Skyrim/plugins.txt")
///     .with_base_masters(["Skyrim.esm", "Update.esm"])
///     .with_creation_club_file("/games/Skyrim/Skyrim.ccc")
///     .read(true)?;
/// ```
#[derive(Debug, Clone)]
pub struct ActivePlugins {
    data_dir: PathBuf,
    plugins_file: PathBuf,
    creation_club_file: Option<PathBuf>,
    always_loaded: Vec<String>,
    base_masters: Vec<String>,
}

impl ActivePlugins {
    /// Create a builder for the given data directory and `plugins.txt`.
    pub fn new(data_dir: impl Into<PathBuf>, plugins_file: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            plugins_file: plugins_file.into(),
            creation_club_file: None,
            always_loaded: Vec::new(),
            base_masters: Vec::new(),
        }
    }

    /// Masters that are loaded unconditionally, in order.
    pub fn with_always_loaded<I, S>(mut self, masters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.always_loaded = masters.into_iter().map(Into::into).collect();
        self
    }

    /// Masters loaded only if present in the data directory, in order.
    pub fn with_base_masters<I, S>(mut self, masters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_masters = masters.into_iter().map(Into::into).collect();
        self
    }

    /// Creation Club plugin list (`Skyrim.ccc`). Optional on disk.
    pub fn with_creation_club_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.creation_club_file = Some(path.into());
        self
    }

    /// The `plugins.txt` path.
    pub fn plugins_file(&self) -> &Path {
        &self.plugins_file
    }

    /// Assemble the active load order.
    ///
    /// Entries are deduplicated case-insensitively (first seen wins) and,
    /// apart from the always-loaded masters, only kept if the plugin exists
    /// in the data directory.
    ///
    /// # Errors
    ///
    /// Returns [`LoadOrderError::Io`] if `plugins.txt` cannot be read.
    pub fn read(&self, trim: bool) -> Result<Vec<String>, LoadOrderError> {
        let mut order = PluginList::default();

        for master in &self.always_loaded {
            order.push(master);
        }

        for master in &self.base_masters {
            if self.is_present(master) {
                order.push(master);
            }
        }

        if let Some(ccc) = &self.creation_club_file {
            for plugin in LoadOrderFile::new(ccc).required(false).read()? {
                if self.is_present(&plugin) {
                    order.push(&plugin);
                }
            }
        }

        for line in LoadOrderFile::new(&self.plugins_file).read()? {
            let Some(plugin) = line.strip_prefix(ACTIVE_MARKER) else {
                continue;
            };
            if self.is_present(plugin) {
                order.push(plugin);
            }
        }

        let mut plugins = order.into_inner();
        if trim {
            for plugin in plugins.iter_mut() {
                let trimmed_len = trim_extension(plugin).len();
                plugin.truncate(trimmed_len);
            }
        }

        debug!("Active Plugin Load Order: {}", plugins.join(","));
        Ok(plugins)
    }

    fn is_present(&self, plugin: &str) -> bool {
        self.data_dir.join(plugin).is_file()
    }
}

/// Insertion-ordered plugin list with case-insensitive deduplication.
#[derive(Default)]
struct PluginList {
    plugins: Vec<String>,
    seen: std::collections::HashSet<String>,
}

impl PluginList {
    fn push(&mut self, plugin: &str) {
        if self.seen.insert(plugin.to_lowercase()) {
            self.plugins.push(plugin.to_string());
        }
    }

    fn into_inner(self) -> Vec<String> {
        self.plugins
    }
}
