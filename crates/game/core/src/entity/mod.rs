//! Entities and their owned state.
//!
//! An [`Entity`] owns its attribute set, stat points, equipment, shields and
//! (for living kinds) effect registry exclusively. Cross-entity references
//! are [`EntityId`]s resolved through the world registry.

pub mod data;
pub mod id;
pub mod kinds;
pub mod living;
mod model;
pub mod resources;
pub mod shield;

pub use data::PlayerData;
pub use id::EntityId;
pub use kinds::{EntityKind, Mailbox, MonsterState, PlayerState, ProjectileState, ResourceState};
pub use living::{LivingState, StatusFlags};
pub use model::{CombatCounters, Entity};
pub use resources::{BarMode, ProgressBar, ResourceKind, Resources};
pub use shield::{Shield, Shields};
