//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`plugins`] - Active plugin load order
//! - [`archives`] - Archive load order and orphan report
//! - [`ini`] - Effective INI settings

pub mod archives;
pub mod ini;
pub mod plugins;
