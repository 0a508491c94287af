//! Zone loader.

use std::collections::BTreeMap;
use std::path::Path;

use rpg_core::{Zone, ZoneTable};

use crate::loaders::{LoadResult, read_file};

/// Loader for the zone table from RON files.
pub struct ZoneLoader;

impl ZoneLoader {
    pub fn load(path: &Path) -> LoadResult<ZoneTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// RON format: `{ "<location>": (name: "...", peaceful: bool) }`.
    pub fn parse(content: &str) -> LoadResult<ZoneTable> {
        let zones: BTreeMap<String, Zone> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse zones RON: {}", e))?;
        if zones.is_empty() {
            anyhow::bail!("zone table is empty");
        }
        Ok(zones.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::ZoneOracle;

    #[test]
    fn peaceful_defaults_to_false() {
        let zones = ZoneLoader::parse(
            r#"{ "village": (name: "Village", peaceful: true), "forest": (name: "Forest") }"#,
        )
        .unwrap();
        assert_eq!(zones.len(), 2);
        assert!(zones.is_peaceful("village"));
        assert!(!zones.is_peaceful("forest"));
    }
}
