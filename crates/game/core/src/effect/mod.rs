//! Timed buffs and debuffs.
//!
//! Each tick the registry rebuilds the holder's capabilities and status
//! flags, runs every effect's behavior (damage over time, attribute
//! modifiers, capability denials, cures), then counts durations down and
//! drops expired effects.

mod apply;
pub mod capability;
mod instance;
pub mod kind;
pub mod registry;

pub use apply::EffectContext;
pub use capability::{Capabilities, Capability, CapabilityKind};
pub use instance::{Effect, EffectData, ExtraValue, Extras};
pub use kind::EffectKind;
pub use registry::{EffectRegistry, tick_effects};
