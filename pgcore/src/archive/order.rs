//! Deduplicated, insertion-ordered archive list.

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use super::name::ArchiveName;

/// Archives in engine load order.
///
/// Insertion order is load order, and the engine applies *last loaded wins*:
/// an archive earlier in the list is loaded first and is overridden by any
/// later archive containing the same file. Each archive appears at most once
/// (case-insensitive); the first insertion fixes its position and later
/// insertions are no-ops.
#[derive(Debug, Clone, Default)]
pub struct OrderedArchiveList {
    archives: Vec<ArchiveName>,
    seen: HashSet<ArchiveName>,
}

impl OrderedArchiveList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an archive unless already present.
    ///
    /// Returns true if the archive was added.
    pub fn push(&mut self, archive: ArchiveName) -> bool {
        if self.seen.contains(&archive) {
            return false;
        }
        self.seen.insert(archive.clone());
        self.archives.push(archive);
        true
    }

    /// Returns true if the archive is already in the list.
    pub fn contains(&self, archive: &ArchiveName) -> bool {
        self.seen.contains(archive)
    }

    /// Number of archives.
    pub fn len(&self) -> usize {
        self.archives.len()
    }

    /// Returns true if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.archives.is_empty()
    }

    /// Iterate in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, ArchiveName> {
        self.archives.iter()
    }

    /// Borrow as a slice in load order.
    pub fn as_slice(&self) -> &[ArchiveName] {
        &self.archives
    }

    /// Consume into a vector in load order.
    pub fn into_vec(self) -> Vec<ArchiveName> {
        self.archives
    }
}

impl Extend<ArchiveName> for OrderedArchiveList {
    fn extend<T: IntoIterator<Item = ArchiveName>>(&mut self, iter: T) {
        for archive in iter {
            self.push(archive);
        }
    }
}

impl FromIterator<ArchiveName> for OrderedArchiveList {
    fn from_iter<T: IntoIterator<Item = ArchiveName>>(iter: T) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a OrderedArchiveList {
    type Item = &'a ArchiveName;
    type IntoIter = std::slice::Iter<'a, ArchiveName>;

    fn into_iter(self) -> Self::IntoIter {
        self.archives.iter()
    }
}

impl PartialEq for OrderedArchiveList {
    fn eq(&self, other: &Self) -> bool {
        self.archives == other.archives
    }
}

impl Eq for OrderedArchiveList {}

impl Serialize for OrderedArchiveList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.archives.iter())
    }
}
