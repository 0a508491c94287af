//! Data-driven content definitions and loaders.
//!
//! This crate houses static game content and provides loaders for RON/TOML data files:
//! - Item presets (data-driven via RON)
//! - Monster templates and spawn points (data-driven via RON)
//! - Shops per location (data-driven via RON)
//! - Zones and their peaceful flag (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! Content is consumed by the runtime when it builds a world and never
//! appears in player saves.

pub mod monster;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use monster::{MonsterBook, MonsterSpawn, MonsterTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, ItemLoader, MonsterLoader, ShopLoader, ZoneLoader,
};
