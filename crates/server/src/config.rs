//! Server configuration read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rpg_runtime::RuntimeConfig;

const APPLICATION: &str = "rpg";

/// Everything the host binary needs before the runtime starts.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory holding `config.toml` and the RON content files.
    pub data_dir: PathBuf,
    /// Directory of player save files.
    pub save_dir: PathBuf,
    pub log_dir: PathBuf,
    /// Overrides `tick_interval_ms` from `config.toml`.
    pub tick_ms: Option<u64>,
    pub seed: Option<u64>,
    pub start_location: String,
    pub autosave_interval: Option<Duration>,
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RPG_DATA_DIR` - Content directory (default: `./data`)
    /// - `RPG_SAVE_DIR` - Player saves (default: platform data dir + `/players`)
    /// - `RPG_LOG_DIR` - Log files (default: platform cache dir + `/logs`)
    /// - `RPG_TICK_MS` - Tick interval override in milliseconds
    /// - `RPG_SEED` - World seed (default: random)
    /// - `RPG_START_LOCATION` - Where new players appear (default: `village`)
    /// - `RPG_AUTOSAVE_SECS` - Autosave period, `0` disables (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let parse = |key: &str| read(key).and_then(|value| value.trim().parse::<u64>().ok());

        let dirs = directories::ProjectDirs::from("", "", APPLICATION);
        let default_save_dir = dirs
            .as_ref()
            .map(|dirs| dirs.data_dir().join("players"))
            .unwrap_or_else(|| PathBuf::from("./save_data/players"));
        let default_log_dir = dirs
            .as_ref()
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("/tmp/rpg/logs"));

        let autosave_secs = parse("RPG_AUTOSAVE_SECS").unwrap_or(60);

        Self {
            data_dir: read("RPG_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            save_dir: read("RPG_SAVE_DIR")
                .map(PathBuf::from)
                .unwrap_or(default_save_dir),
            log_dir: read("RPG_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(default_log_dir),
            tick_ms: parse("RPG_TICK_MS").filter(|ms| *ms > 0),
            seed: parse("RPG_SEED"),
            start_location: read("RPG_START_LOCATION").unwrap_or_else(|| "village".to_string()),
            autosave_interval: (autosave_secs > 0).then(|| Duration::from_secs(autosave_secs)),
        }
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            autosave_interval: self.autosave_interval,
            start_location: self.start_location.clone(),
            seed: self.seed,
            ..RuntimeConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.save_dir.ends_with("players"));
        assert_eq!(config.tick_ms, None);
        assert_eq!(config.seed, None);
        assert_eq!(config.start_location, "village");
        assert_eq!(config.autosave_interval, Some(Duration::from_secs(60)));
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("RPG_DATA_DIR", "/srv/rpg/data"),
            ("RPG_SAVE_DIR", "/srv/rpg/saves"),
            ("RPG_TICK_MS", "50"),
            ("RPG_SEED", "42"),
            ("RPG_AUTOSAVE_SECS", "0"),
        ]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/rpg/data"));
        assert_eq!(config.save_dir, PathBuf::from("/srv/rpg/saves"));
        assert_eq!(config.tick_ms, Some(50));
        assert_eq!(config.autosave_interval, None);

        let runtime = config.runtime_config();
        assert_eq!(runtime.seed, Some(42));
        assert!(runtime.auto_tick);
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let config = config(&[("RPG_TICK_MS", "fast"), ("RPG_SEED", "")]);
        assert_eq!(config.tick_ms, None);
        assert_eq!(config.seed, None);
    }
}
