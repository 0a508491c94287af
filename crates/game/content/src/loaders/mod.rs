//! Content loaders for reading game data from files.
//!
//! This module provides loaders that convert RON/TOML files into the core's
//! content types. Each loader exposes `load(path)` for files and `parse(str)`
//! for inline data.

pub mod config;
pub mod factory;
pub mod item;
pub mod monster;
pub mod shop;
pub mod zone;

pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::ItemLoader;
pub use monster::MonsterLoader;
pub use shop::ShopLoader;
pub use zone::ZoneLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
