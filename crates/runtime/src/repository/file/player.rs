//! File-based PlayerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rpg_core::PlayerData;
use serde::{Deserialize, Serialize};

use crate::repository::{PlayerRepository, RepositoryError, Result};

const SAVE_VERSION: u32 = 1;

/// On-disk envelope around a player projection.
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    version: u32,
    saved_at: DateTime<Utc>,
    player: PlayerData,
}

/// File-based implementation of PlayerRepository.
///
/// # File Format
///
/// Each player is stored as `{name}.json` (pretty-printed JSON) holding a
/// version, a save timestamp and the player projection. Writes go to a
/// temporary file first and are renamed into place, so a crash never leaves
/// a half-written save behind.
pub struct FilePlayerRepository {
    base_dir: PathBuf,
}

impl FilePlayerRepository {
    /// Create a new file-based player repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a save file. Names that could escape the directory
    /// are rejected.
    fn player_path(&self, name: &str) -> Result<PathBuf> {
        let valid = !name.is_empty()
            && !name.starts_with('.')
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || c == '_' || c == '-' || c == ' ');
        if !valid {
            return Err(RepositoryError::InvalidName(name.to_string()));
        }
        Ok(self.base_dir.join(format!("{}.json", name)))
    }
}

impl PlayerRepository for FilePlayerRepository {
    fn save(&self, data: &PlayerData) -> Result<()> {
        let path = self.player_path(&data.name)?;
        let temp_path = path.with_extension("json.tmp");

        let file = SaveFile {
            version: SAVE_VERSION,
            saved_at: Utc::now(),
            player: data.clone(),
        };
        let bytes =
            serde_json::to_vec_pretty(&file).map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, bytes).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!("Saved player `{}` to {}", data.name, path.display());

        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PlayerData>> {
        let path = self.player_path(name)?;

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(RepositoryError::Io)?;
        let file: SaveFile =
            serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!(
            "Loaded player `{}` from {} (saved {})",
            name,
            path.display(),
            file.saved_at
        );

        Ok(Some(file.player))
    }

    fn exists(&self, name: &str) -> bool {
        self.player_path(name).is_ok_and(|path| path.exists())
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.player_path(name)?;

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted player `{}`", name);
        }

        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(name) = filename.strip_suffix(".json")
            {
                names.push(name.to_string());
            }
        }

        names.sort_unstable();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpg_core::{Entity, EntityId, PlayerState};

    fn sample(name: &str) -> PlayerData {
        let mut entity = Entity::player(EntityId(1), name, PlayerState::default())
            .with_location("village");
        entity.exp = 12.0;
        entity.to_player_data().unwrap()
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        let data = sample("alice");

        repo.save(&data).unwrap();
        assert!(repo.exists("alice"));
        assert_eq!(repo.load("alice").unwrap(), Some(data));
        assert_eq!(repo.list().unwrap(), vec!["alice".to_string()]);
        assert!(!dir.path().join("alice.json.tmp").exists());

        repo.delete("alice").unwrap();
        assert_eq!(repo.load("alice").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("bob.json"), b"{ not json").unwrap();

        assert!(matches!(repo.load("bob"), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn path_like_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FilePlayerRepository::new(dir.path()).unwrap();

        assert!(matches!(
            repo.load("../etc/passwd"),
            Err(RepositoryError::InvalidName(_))
        ));
        assert!(!repo.exists(".hidden"));
    }
}
