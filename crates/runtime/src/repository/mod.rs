//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during gameplay, which here means
//! player saves. Static game content (items, monsters, shops, zones) is
//! loaded by `rpg-content`, not by repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FilePlayerRepository;
pub use memory::InMemoryPlayerRepository;
pub use traits::PlayerRepository;
