//! Archive discovery in the data directory.
//!
//! The engine only loads archives that sit directly in `Data/`. Archives in
//! subdirectories are ignored.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::name::ArchiveName;
use super::DEFAULT_ARCHIVE_EXTENSION;

/// Enumerates archive files in a data directory.
#[derive(Debug, Clone)]
pub struct ArchiveDiscovery {
    /// Directory to scan.
    data_dir: PathBuf,

    /// Archive extension without the leading dot.
    extension: String,
}

impl ArchiveDiscovery {
    /// Create a discovery for `.bsa` archives in the given directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
        }
    }

    /// Use a different archive extension (for example `ba2`).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Get the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// List archives directly in the data directory.
    ///
    /// Only regular files whose extension matches case-insensitively are
    /// returned. The order is whatever the filesystem yields and must be
    /// treated as a set.
    pub fn list_archives(&self) -> Result<Vec<ArchiveName>, std::io::Error> {
        debug!(dir = %self.data_dir.display(), "Finding existing archive files in data directory");

        let mut archives = Vec::new();

        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;

            // Skip directories (symlinks to files are followed)
            if !entry.path().is_file() {
                continue;
            }

            let name = ArchiveName::new(entry.file_name().to_string_lossy().into_owned());
            if name.has_extension(&self.extension) {
                archives.push(name);
            }
        }

        debug!(count = archives.len(), "Found archive files");
        Ok(archives)
    }
}
