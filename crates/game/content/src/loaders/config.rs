//! Game configuration loader.

use std::path::Path;

use rpg_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if config.tick_interval_ms == 0 {
            anyhow::bail!("tick_interval_ms must be positive");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("tick_interval_ms = 50\nhunger_rate = 0.5\n").unwrap();
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.hunger_rate, 0.5);
        assert_eq!(
            config.player_revival_secs,
            GameConfig::DEFAULT_PLAYER_REVIVAL_SECS
        );
    }

    #[test]
    fn zero_tick_is_rejected() {
        assert!(ConfigLoader::parse("tick_interval_ms = 0").is_err());
    }
}
