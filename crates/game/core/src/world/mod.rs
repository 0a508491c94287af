//! The simulation world.
//!
//! [`World`] owns every entity in an insertion-ordered registry together
//! with the clock, the random source, the combat hooks and the read-only
//! [`Env`]. One call to [`World::tick`] runs three phases over all entities:
//!
//! ```text
//! early   stats + equipment + effects queue modifiers ─► commit
//! update  monster behavior, projectiles ─► World::attack
//! late    regen, hunger/thirst, starvation, clamp, death, revival
//! ```
//!
//! Every entity finishes a phase before any entity starts the next one.
//! Within a phase, entities run in id order.

mod attack;
mod commands;
mod lifecycle;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use commands::{CommandError, ItemUse};

use crate::combat::{CombatHook, CombatHookRegistry};
use crate::config::GameConfig;
use crate::entity::{Entity, EntityId, MonsterState, PlayerData, PlayerState};
use crate::env::Env;
use crate::error::DataError;
use crate::item::ItemCatalog;
use crate::rng::{PcgRng, RngOracle};

pub struct World {
    entities: BTreeMap<EntityId, Entity>,
    next_id: EntityId,
    now_ms: u64,
    rng: Box<dyn RngOracle>,
    hooks: CombatHookRegistry,
    env: Env,
    config: GameConfig,
}

impl World {
    pub fn new(config: GameConfig, env: Env, rng: Box<dyn RngOracle>) -> Self {
        Self {
            entities: BTreeMap::new(),
            next_id: EntityId(1),
            now_ms: 0,
            rng,
            hooks: CombatHookRegistry::new(),
            env,
            config,
        }
    }

    /// World with default config and a seeded [`PcgRng`].
    pub fn seeded(env: Env, seed: u64) -> Self {
        Self::new(GameConfig::default(), env, Box::new(PcgRng::new(seed)))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn env(&self) -> &Env {
        &self.env
    }

    /// Simulated milliseconds since the world started.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn set_rng(&mut self, rng: Box<dyn RngOracle>) {
        self.rng = rng;
    }

    pub fn register_hook(&mut self, hook: Arc<dyn CombatHook>) {
        self.hooks.register(hook);
    }

    // ===== registry =====

    /// Allocates an id and inserts the entity `build` makes for it.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        let entity = build(id);
        tracing::trace!(entity = %id, kind = entity.kind.name(), name = %entity.name, "spawned");
        self.entities.insert(id, entity);
        id
    }

    pub fn spawn_player(&mut self, name: &str, location: &str) -> EntityId {
        self.spawn(|id| Entity::player(id, name, PlayerState::default()).with_location(location))
    }

    pub fn spawn_monster(&mut self, name: &str, location: &str, state: MonsterState) -> EntityId {
        self.spawn(|id| Entity::monster(id, name, state).with_location(location))
    }

    /// Inserts a player restored from its persisted projection.
    pub fn restore_player(
        &mut self,
        data: &PlayerData,
        catalog: &ItemCatalog,
    ) -> Result<EntityId, DataError> {
        let id = self.next_id;
        let entity = Entity::from_player_data(id, data, catalog)?;
        self.next_id = id.next();
        self.entities.insert(id, entity);
        Ok(id)
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let removed = self.entities.remove(&id);
        if removed.is_some() {
            for entity in self.entities.values_mut() {
                if let Some(monster) = entity.as_monster_mut() {
                    monster.targets.remove(&id);
                    if monster.living.current_target == Some(id) {
                        monster.living.current_target = None;
                    }
                }
            }
        }
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn ids(&self) -> Vec<EntityId> {
        self.entities.keys().copied().collect()
    }

    pub fn find_player(&self, name: &str) -> Option<EntityId> {
        self.entities
            .values()
            .find(|e| e.is_player() && e.name == name)
            .map(|e| e.id)
    }

    pub fn entities_at<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities
            .values()
            .filter(move |e| e.location.as_deref() == Some(location))
    }

    /// Queued messages of `id`, emptied.
    pub fn drain_messages(&mut self, id: EntityId) -> Vec<String> {
        self.get_mut(id)
            .map(Entity::drain_messages)
            .unwrap_or_default()
    }

    fn send(&mut self, id: EntityId, text: impl Into<String>) {
        if let Some(entity) = self.get_mut(id) {
            entity.send_message(text);
        }
    }

    fn is_alive(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(Entity::is_alive)
    }
}

impl core::fmt::Debug for World {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entities.len())
            .field("now_ms", &self.now_ms)
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
