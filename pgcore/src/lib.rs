//! pgcore - Archive load order resolution and background work queues
//!
//! This library provides the engine-facing core of the patcher:
//!
//! - [`archive`]: resolves the order in which the game engine loads `.bsa`
//!   archives that overlay the base `Data` directory
//! - [`load_order`]: reads plugin load order files (`plugins.txt`, `Skyrim.ccc`)
//! - [`config`]: hierarchical INI configuration with override merging
//! - [`game`]: game profiles and path resolution
//! - [`queue`]: single-consumer background work queues for deferred I/O
//!
//! # Example
//!
//! ```ignore
//! use pgcore::game::{GameContext, GamePaths, GameType};
//!
//! let paths = GamePaths::detect(GameType::SkyrimSe, "/games/Skyrim Special Edition")?;
//! let context = GameContext::new(GameType::SkyrimSe, paths)?;
//!
//! let resolution = context.resolve_archive_order()?;
//! for archive in resolution.order.iter() {
//!     println!("{}", archive);
//! }
//! ```

pub mod archive;
pub mod config;
pub mod game;
pub mod load_order;
pub mod logging;
pub mod queue;
