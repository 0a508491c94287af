//! Event types for different topics.

use rpg_core::{AttackOutcome, EntityId};
use serde::{Deserialize, Serialize};

/// Resolved attacks, as seen from outside the world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Hit {
        attacker: EntityId,
        victim: EntityId,
        damage: f64,
        life_lost: f64,
        critical: bool,
    },
    Avoided {
        attacker: EntityId,
        victim: EntityId,
    },
    Missed {
        attacker: EntityId,
        victim: EntityId,
    },
    Refused {
        attacker: EntityId,
        victim: EntityId,
        reason: String,
    },
}

impl CombatEvent {
    pub fn from_outcome(attacker: EntityId, victim: EntityId, outcome: &AttackOutcome) -> Self {
        match outcome {
            AttackOutcome::Hit(report) => Self::Hit {
                attacker,
                victim,
                damage: report.damage.total,
                life_lost: report.life_lost,
                critical: report.critical,
            },
            AttackOutcome::Avoided => Self::Avoided { attacker, victim },
            AttackOutcome::Missed => Self::Missed { attacker, victim },
            AttackOutcome::Refused(refusal) => Self::Refused {
                attacker,
                victim,
                reason: refusal.message(),
            },
        }
    }
}

/// Session and persistence events of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    LoggedIn {
        id: EntityId,
        name: String,
        /// False when no save existed and a fresh player was created.
        restored: bool,
    },
    LoggedOut {
        id: EntityId,
        name: String,
    },
    Saved {
        name: String,
    },
    SaveFailed {
        name: String,
        error: String,
    },
    /// A line from the player's mailbox.
    Message {
        id: EntityId,
        text: String,
    },
}

/// World-wide lifecycle events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    Ticked {
        now_ms: u64,
        entities: usize,
    },
    Died {
        id: EntityId,
        name: String,
    },
    Revived {
        id: EntityId,
        name: String,
    },
}
