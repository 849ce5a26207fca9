//! Hierarchical INI configuration.
//!
//! The engine reads its settings from a base INI and a user override INI
//! (`Skyrim.ini` and `SkyrimCustom.ini`), with values in the override taking
//! precedence. This module models those files as [`ConfigTree`]s and merges
//! them the way the engine layers them.
//!
//! # Example
//!
//! ```
//! use pgcore::config::ConfigTree;
//!
//! let mut base = ConfigTree::new();
//! base.set("Archive.sResourceArchiveList", "Skyrim - Misc.bsa");
//! base.set("Display.iSize W", "1920");
//!
//! let mut custom = ConfigTree::new();
//! custom.set("Archive.sResourceArchiveList", "Skyrim - Misc.bsa, Extra.bsa");
//!
//! let merged = base.merge(&custom);
//! assert_eq!(
//!     merged.get("archive.sresourcearchivelist"),
//!     Some("Skyrim - Misc.bsa, Extra.bsa")
//! );
//! assert_eq!(merged.get("Display.iSize W"), Some("1920"));
//! ```

mod archive_list;
mod file;
mod tree;

pub use archive_list::{ArchiveListFields, ARCHIVE_LIST_FIELDS, ARCHIVE_SECTION};
pub use file::{ConfigError, ConfigSource};
pub use tree::{ConfigNode, ConfigTree};
