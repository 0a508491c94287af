//! Deterministic simulation core of the RPG server.
//!
//! `rpg-core` defines the canonical rules (attributes, effects, items,
//! combat and the tick lifecycle) and performs no I/O. All mutation of the
//! shared world flows through [`world::World`]; the runtime and content
//! crates depend on the types re-exported here.
pub mod combat;
pub mod config;
pub mod effect;
pub mod entity;
pub mod env;
pub mod error;
pub mod item;
pub mod rng;
pub mod stats;
pub mod world;

pub use combat::{
    AttackOptions, AttackOutcome, AttackRefusal, CombatHook, DamageBreakdown, HitReaction,
    HitReport,
};
pub use config::GameConfig;
pub use effect::{Capabilities, CapabilityKind, Effect, EffectContext, EffectData, EffectKind};
pub use entity::{
    BarMode, Entity, EntityId, EntityKind, MonsterState, PlayerData, PlayerState, ProgressBar,
    ProjectileState, ResourceKind, ResourceState, Resources, Shield, StatusFlags,
};
pub use env::{Env, OwnerOnlyPolicy, ResourcePolicy, Zone, ZoneOracle, ZoneTable};
pub use error::{CoreError, DataError, ErrorSeverity, GameError};
pub use item::{
    Consumable, EquipmentKind, Inventory, Item, ItemCatalog, ItemData, ItemError, ItemKind,
    ItemPreset, ShieldGrant, Shop, ShopEntry, ShopState,
};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
pub use stats::{AttributeKind, AttributeSet, Modifier, Stat, StatError, StatKind};
pub use world::{CommandError, ItemUse, World};
