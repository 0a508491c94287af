//! Combat resolution building blocks.
//!
//! The attack sequence itself lives on [`World`](crate::world::World)
//! because it touches two entities and the world clock; this module holds
//! the pieces it is assembled from.
//!
//! ## Modules
//!
//! - [`formula`]: avoidance and damage math
//! - [`options`]: per-attack switches
//! - [`report`]: hit reports, reactions, outcomes and refusals
//! - [`hooks`]: world-wide on-hit triggers
//! - [`message`]: plain-text combat lines

pub mod formula;
pub mod hooks;
pub mod message;
pub mod options;
pub mod report;

pub use formula::{DamageBreakdown, avoid_chance, compute_damage};
pub use hooks::{CombatHook, CombatHookRegistry};
pub use options::{AttackOptions, OnHit};
pub use report::{AttackOutcome, AttackRefusal, HitReaction, HitReport};
