//! Archive discovery and load order resolution.
//!
//! Archives (`.bsa`) are packed asset containers loaded by the engine. When
//! two archives contain the same file, the one loaded later wins. This module
//! computes that order from the INI archive lists, the active plugin load
//! order and the archives present in the data directory.
//!
//! # Components
//!
//! - [`ArchiveName`]: case-insensitive archive identifier
//! - [`OrderedArchiveList`]: insertion-ordered, deduplicated load order
//! - [`ArchiveDiscovery`]: lists archives in the data directory
//! - [`ArchivePriorityResolver`]: attributes archives to plugins and builds
//!   the final order

mod discovery;
mod name;
mod order;
mod resolver;

pub use discovery::ArchiveDiscovery;
pub use name::ArchiveName;
pub use order::OrderedArchiveList;
pub use resolver::{ArchivePriorityResolver, ArchiveResolution, Attribution};

/// Extension of Bethesda archive files handled by default.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "bsa";
