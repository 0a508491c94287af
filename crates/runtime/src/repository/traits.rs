//! Repository contracts for saving and loading players.

use rpg_core::PlayerData;

use super::error::Result;

/// Repository for player persistence, keyed by player name.
///
/// `load` distinguishes "no save" (`Ok(None)`) from "unreadable save"
/// (`Err`): the runtime creates a fresh player for the former and refuses
/// the login for the latter.
pub trait PlayerRepository: Send + Sync {
    /// Save (or overwrite) the player's projection
    fn save(&self, data: &PlayerData) -> Result<()>;

    /// Load a player by name
    fn load(&self, name: &str) -> Result<Option<PlayerData>>;

    /// Check if a save exists
    fn exists(&self, name: &str) -> bool;

    /// Delete a save
    fn delete(&self, name: &str) -> Result<()>;

    /// List all saved player names
    fn list(&self) -> Result<Vec<String>> {
        Ok(vec![])
    }
}
