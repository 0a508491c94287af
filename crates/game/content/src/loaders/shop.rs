//! Shop loader.

use std::collections::BTreeMap;
use std::path::Path;

use rpg_core::{ItemCatalog, Shop};

use crate::loaders::{LoadResult, read_file};

/// Loader for shops keyed by location from RON files.
pub struct ShopLoader;

impl ShopLoader {
    pub fn load(path: &Path, catalog: &ItemCatalog) -> LoadResult<BTreeMap<String, Shop>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    /// Every listed item must exist in `catalog`.
    pub fn parse(content: &str, catalog: &ItemCatalog) -> LoadResult<BTreeMap<String, Shop>> {
        let shops: BTreeMap<String, Shop> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse shops RON: {}", e))?;

        for (location, shop) in &shops {
            if let Some(entry) = shop.entries.iter().find(|e| !catalog.contains(&e.item)) {
                anyhow::bail!(
                    "shop `{}` at `{}` sells unknown item `{}`",
                    shop.name,
                    location,
                    entry.item
                );
            }
        }
        Ok(shops)
    }
}
