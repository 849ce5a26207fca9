//! Line-oriented load order file reader.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::LoadOrderError;

/// Byte order mark some editors prepend to `plugins.txt`.
const UTF8_BOM: char = '\u{feff}';

/// A load order file on disk, one plugin per line.
///
/// Empty lines and lines starting with `#` are skipped. Entries are returned
/// in file order and duplicates are preserved; deduplication is the caller's
/// concern.
///
/// # Example
///
/// ```
/// use pgcore::load_order::LoadOrderFile;
///
/// let dir = tempfile::tempdir().unwrap();
/// let path = dir.path().join("plugins.txt");
/// std::fs::write(&path, "# comment\nFoo.esp\n\nBar.esm\n").unwrap();
///
/// let plugins = LoadOrderFile::new(&path).trim_extension(true).read().unwrap();
/// assert_eq!(plugins, vec!["Foo", "Bar"]);
/// ```
#[derive(Debug, Clone)]
pub struct LoadOrderFile {
    path: PathBuf,
    required: bool,
    trim_extension: bool,
}

impl LoadOrderFile {
    /// Create a reader for a required file without extension trimming.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            required: true,
            trim_extension: false,
        }
    }

    /// Mark whether a missing file is an error (`true`) or an empty list.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Strip everything from the last `.` of each entry.
    pub fn trim_extension(mut self, trim: bool) -> Self {
        self.trim_extension = trim;
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the entries in file order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadOrderError::Io`] if the file is required and cannot be
    /// read, or if an optional file exists but cannot be read.
    pub fn read(&self) -> Result<Vec<String>, LoadOrderError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !self.required => {
                debug!(path = %self.path.display(), "Optional load order file not found");
                return Ok(Vec::new());
            }
            Err(source) => {
                if !self.required {
                    warn!(path = %self.path.display(), error = %source, "Unable to read load order file");
                }
                return Err(LoadOrderError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        Ok(parse_entries(&contents, self.trim_extension))
    }
}

/// Parse load order text into entries.
fn parse_entries(contents: &str, trim: bool) -> Vec<String> {
    contents
        .trim_start_matches(UTF8_BOM)
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            if trim {
                trim_extension(line).to_string()
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Remove the suffix starting at the last `.`, if any.
///
/// ```
/// use pgcore::load_order::trim_extension;
///
/// assert_eq!(trim_extension("Skyrim.esm"), "Skyrim");
/// assert_eq!(trim_extension("My.Mod.esp"), "My.Mod");
/// assert_eq!(trim_extension("NoExtension"), "NoExtension");
/// ```
pub fn trim_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[..idx],
        None => name,
    }
}
