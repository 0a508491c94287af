//! Variant-specific entity state.

use std::collections::{BTreeSet, VecDeque};

use super::id::EntityId;
use super::living::LivingState;
use crate::combat::AttackOptions;
use crate::config::GameConfig;
use crate::item::Inventory;

/// Bounded queue of plain-text messages awaiting delivery to a player.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mailbox {
    messages: VecDeque<String>,
}

impl Mailbox {
    /// Queues `text`, dropping the oldest message once full.
    pub fn push(&mut self, text: impl Into<String>) {
        if self.messages.len() == GameConfig::MAX_MAILBOX {
            self.messages.pop_front();
        }
        self.messages.push_back(text.into());
    }

    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub living: LivingState,
    /// Leader of the player's party, if any.
    pub party_owner: Option<EntityId>,
    pub inventory: Inventory,
    pub gold: u64,
    pub mailbox: Mailbox,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MonsterState {
    pub living: LivingState,
    /// Entities this monster considers hostile.
    pub targets: BTreeSet<EntityId>,
    /// Party (by owner) currently fighting this monster.
    pub fighting_party: Option<EntityId>,
    pub exp_reward: f64,
    pub gold_reward: u64,
    /// Template the monster was spawned from.
    pub template: String,
}

impl MonsterState {
    pub fn new(template: impl Into<String>, exp_reward: f64) -> Self {
        Self {
            template: template.into(),
            exp_reward,
            ..Self::default()
        }
    }

    /// Adds `id` to the aggro set. Returns true if it was new.
    pub fn add_target(&mut self, id: EntityId) -> bool {
        self.targets.insert(id)
    }

    pub fn clear_aggro(&mut self) {
        self.targets.clear();
        self.fighting_party = None;
        self.living.current_target = None;
    }
}

/// A harvestable or destructible world object.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub owner: Option<EntityId>,
    pub harvestable: bool,
}

/// An in-flight attack fired on behalf of its owner.
#[derive(Clone, Debug)]
pub struct ProjectileState {
    pub owner: EntityId,
    pub target: EntityId,
    pub options: AttackOptions,
    /// Seconds since launch.
    pub age: f64,
    pub spent: bool,
}

impl ProjectileState {
    pub fn new(owner: EntityId, target: EntityId, options: AttackOptions) -> Self {
        Self {
            owner,
            target,
            options,
            age: 0.0,
            spent: false,
        }
    }
}

#[derive(Clone, Debug)]
pub enum EntityKind {
    Player(PlayerState),
    Monster(MonsterState),
    Resource(ResourceState),
    Projectile(ProjectileState),
}

impl EntityKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Player(_) => "player",
            Self::Monster(_) => "monster",
            Self::Resource(_) => "resource",
            Self::Projectile(_) => "projectile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_drops_oldest_when_full() {
        let mut mailbox = Mailbox::default();
        for i in 0..GameConfig::MAX_MAILBOX + 2 {
            mailbox.push(format!("m{i}"));
        }
        let messages = mailbox.drain();
        assert_eq!(messages.len(), GameConfig::MAX_MAILBOX);
        assert_eq!(messages[0], "m2");
        assert!(mailbox.is_empty());
    }
}
