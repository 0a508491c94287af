//! In-memory PlayerRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use rpg_core::PlayerData;

use crate::repository::{PlayerRepository, RepositoryError, Result};

/// In-memory implementation of PlayerRepository.
#[derive(Default)]
pub struct InMemoryPlayerRepository {
    players: RwLock<BTreeMap<String, PlayerData>>,
}

impl InMemoryPlayerRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create pre-populated with `players`.
    pub fn with_players(players: impl IntoIterator<Item = PlayerData>) -> Self {
        Self {
            players: RwLock::new(players.into_iter().map(|p| (p.name.clone(), p)).collect()),
        }
    }
}

impl PlayerRepository for InMemoryPlayerRepository {
    fn save(&self, data: &PlayerData) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.insert(data.name.clone(), data.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PlayerData>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.get(name).cloned())
    }

    fn exists(&self, name: &str) -> bool {
        self.players
            .read()
            .map(|players| players.contains_key(name))
            .unwrap_or(false)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let mut players = self
            .players
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        players.remove(name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let players = self
            .players
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(players.keys().cloned().collect())
    }
}
