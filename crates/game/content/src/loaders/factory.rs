//! Content factory for loading every content file from a data directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rpg_core::{Env, GameConfig, ItemCatalog, Shop, ZoneOracle, ZoneTable};

use crate::loaders::{ConfigLoader, ItemLoader, LoadResult, MonsterLoader, ShopLoader, ZoneLoader};
use crate::monster::MonsterBook;

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── monsters.ron
/// ├── shops.ron
/// └── zones.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Everything a world is built from.
#[derive(Clone, Debug)]
pub struct Content {
    pub config: GameConfig,
    pub items: ItemCatalog,
    pub monsters: MonsterBook,
    pub shops: BTreeMap<String, Shop>,
    pub zones: ZoneTable,
}

impl Content {
    /// Environment backed by the loaded zones and the default resource policy.
    pub fn env(&self) -> Env {
        Env::with_zones(self.zones.clone())
    }
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load item presets from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load monster templates and spawns from `monsters.ron`.
    pub fn load_monsters(&self) -> LoadResult<MonsterBook> {
        MonsterLoader::load(&self.data_dir.join("monsters.ron"))
    }

    /// Load shops from `shops.ron`, checked against `catalog`.
    pub fn load_shops(&self, catalog: &ItemCatalog) -> LoadResult<BTreeMap<String, Shop>> {
        ShopLoader::load(&self.data_dir.join("shops.ron"), catalog)
    }

    /// Load the zone table from `zones.ron`.
    pub fn load_zones(&self) -> LoadResult<ZoneTable> {
        ZoneLoader::load(&self.data_dir.join("zones.ron"))
    }

    /// Loads every file and cross-checks spawn and shop locations against
    /// the zone table.
    pub fn load_all(&self) -> LoadResult<Content> {
        let config = self.load_config()?;
        let items = self.load_items()?;
        let monsters = self.load_monsters()?;
        let shops = self.load_shops(&items)?;
        let zones = self.load_zones()?;

        for spawn in &monsters.spawns {
            if zones.zone(&spawn.location).is_none() {
                anyhow::bail!("monster spawn at unknown location `{}`", spawn.location);
            }
        }
        if let Some(location) = shops.keys().find(|l| zones.zone(l).is_none()) {
            anyhow::bail!("shop at unknown location `{}`", location);
        }

        tracing::info!(
            items = items.len(),
            monsters = monsters.templates.len(),
            shops = shops.len(),
            zones = zones.len(),
            "content loaded"
        );
        Ok(Content {
            config,
            items,
            monsters,
            shops,
            zones,
        })
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    fn write(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    fn seed(dir: &Path, spawn_location: &str) {
        write(dir, "config.toml", "tick_interval_ms = 200\n");
        write(
            dir,
            "items.ron",
            r#"(items: [(name: "bread", kind: Consumable, consume: Some((food: 20.0)))])"#,
        );
        write(
            dir,
            "monsters.ron",
            &format!(
                r#"(templates: [(name: "slime", exp_reward: 5.0)], spawns: [(template: "slime", location: "{spawn_location}")])"#
            ),
        );
        write(
            dir,
            "shops.ron",
            r#"{ "village": (name: "bakery", entries: [(item: "bread", price: 3)]) }"#,
        );
        write(
            dir,
            "zones.ron",
            r#"{ "village": (name: "Village", peaceful: true), "meadow": (name: "Meadow") }"#,
        );
    }

    #[test]
    fn loads_a_full_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "meadow");

        let content = ContentFactory::new(dir.path()).load_all().unwrap();
        assert_eq!(content.config.tick_interval_ms, 200);
        assert!(content.items.contains("bread"));
        assert_eq!(content.monsters.spawns.len(), 1);
        assert!(content.env().zones().is_peaceful("village"));
    }

    #[test]
    fn spawn_outside_any_zone_fails() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), "swamp");
        assert!(ContentFactory::new(dir.path()).load_all().is_err());
    }

    #[test]
    fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = ContentFactory::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
