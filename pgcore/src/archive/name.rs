//! Case-insensitive archive identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// An archive file name such as `Skyrim - Textures0.bsa`.
///
/// The engine resolves file names case-insensitively, so equality and
/// hashing use a lowercase fold of the name while the original spelling is
/// kept for display.
///
/// ```
/// use pgcore::archive::ArchiveName;
///
/// let a = ArchiveName::new("Dawnguard.bsa");
/// let b = ArchiveName::new("DAWNGUARD.BSA");
/// assert_eq!(a, b);
/// assert_eq!(b.to_string(), "DAWNGUARD.BSA");
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveName {
    name: String,
    folded: String,
}

impl ArchiveName {
    /// Create an archive name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let folded = name.to_lowercase();
        Self { name, folded }
    }

    /// The name as spelled on disk or in configuration.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The lowercase fold used for comparisons.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Returns true if the name ends with `.<extension>` (case-insensitive).
    pub fn has_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.').to_lowercase();
        match self.folded.rsplit_once('.') {
            Some((_, ext)) => ext == extension,
            None => false,
        }
    }
}

impl PartialEq for ArchiveName {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for ArchiveName {}

impl Hash for ArchiveName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl fmt::Display for ArchiveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for ArchiveName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}

impl From<&str> for ArchiveName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ArchiveName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
