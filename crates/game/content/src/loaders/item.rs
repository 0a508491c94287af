//! Item preset loader.

use std::path::Path;

use rpg_core::{ItemCatalog, ItemPreset};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item preset file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPresetFile {
    pub items: Vec<ItemPreset>,
}

/// Loader for the item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses presets and builds the catalog. Duplicate names and malformed
    /// modifier strings fail the load.
    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let file: ItemPresetFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item presets RON: {}", e))?;

        let mut catalog = ItemCatalog::new();
        for preset in file.items {
            if catalog.contains(&preset.name) {
                anyhow::bail!("duplicate item preset `{}`", preset.name);
            }
            let name = preset.name.clone();
            catalog
                .insert_preset(preset)
                .map_err(|e| anyhow::anyhow!("item `{}`: {}", name, e))?;
        }
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{AttributeKind, AttributeSet, EquipmentKind, ItemKind};

    const ITEMS: &str = r#"(
        items: [
            (
                name: "iron sword",
                kind: Equipment(HAND),
                durability: Some(50),
                modifiers: { "ATTACK": "+12", "CRITICAL_CHANCE": "+2" },
                options: [(kind: LIFE_STEAL, level: 1.0)],
            ),
            (
                name: "bread",
                kind: Consumable,
                consume: Some((food: 40.0, effects: [(kind: REGENERATION, level: 1.0, duration: 5.0)])),
            ),
        ],
    )"#;

    #[test]
    fn parses_presets_into_catalog() {
        let catalog = ItemLoader::parse(ITEMS).unwrap();
        assert_eq!(catalog.len(), 2);

        let sword = catalog.instantiate("iron sword").unwrap();
        assert_eq!(sword.kind, ItemKind::Equipment(EquipmentKind::Hand));
        assert_eq!(sword.options.len(), 1);

        let mut attributes = AttributeSet::new();
        sword.apply_modifiers(&mut attributes);
        attributes.update_values();
        assert_eq!(attributes.get_value(AttributeKind::Attack), 22.0);

        let bread = catalog.instantiate("bread").unwrap();
        assert_eq!(bread.consume.as_ref().map(|c| c.food), Some(40.0));
    }

    #[test]
    fn bad_modifier_fails_load() {
        let broken = ITEMS.replace("+12", "twelve");
        assert!(ItemLoader::parse(&broken).is_err());
    }
}
