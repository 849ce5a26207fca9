//! Archives loaded explicitly through INI settings.
//!
//! Besides archives attached to plugins, the engine loads every archive
//! named in the `[Archive]` section's resource list fields. These are loaded
//! before any plugin archive.

use tracing::trace;

use super::tree::ConfigTree;
use crate::archive::{ArchiveName, OrderedArchiveList};

/// Section holding the archive list fields.
pub const ARCHIVE_SECTION: &str = "Archive";

/// Fields searched for archive lists, in load order.
pub const ARCHIVE_LIST_FIELDS: [&str; 3] = [
    "sResourceArchiveList",
    "sResourceArchiveList2",
    "sResourceArchiveListBeta",
];

/// Extracts the configured archive list from layered INI sources.
///
/// Sources are given in ascending precedence. For each field the last source
/// with a non-empty value wins; an empty value never clears an earlier one.
#[derive(Debug, Clone)]
pub struct ArchiveListFields {
    fields: Vec<String>,
}

impl Default for ArchiveListFields {
    fn default() -> Self {
        Self {
            fields: ARCHIVE_LIST_FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl ArchiveListFields {
    /// Use a custom set of `[Archive]` fields.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Build the configured archive list.
    ///
    /// Values are comma separated; entries are trimmed, empty entries are
    /// skipped and duplicates (case-insensitive) are dropped.
    pub fn extract(&self, sources: &[ConfigTree]) -> OrderedArchiveList {
        let mut archives = OrderedArchiveList::new();

        for field in &self.fields {
            let path = format!("{}.{}", ARCHIVE_SECTION, field);
            let value = sources
                .iter()
                .filter_map(|tree| tree.get(&path))
                .filter(|v| !v.trim().is_empty())
                .last();

            let Some(value) = value else {
                continue;
            };

            trace!("Found archive files from INI field {}: {}", field, value);

            for entry in value.split(',').map(str::trim).filter(|e| !e.is_empty()) {
                archives.push(ArchiveName::new(entry));
            }
        }

        archives
    }
}
