use bitflags::bitflags;

use super::id::EntityId;
use crate::effect::{Capabilities, EffectRegistry};

bitflags! {
    /// Effect-driven status bits, rebuilt every effect tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct StatusFlags: u8 {
        const INVISIBLE    = 1 << 0;
        const INVULNERABLE = 1 << 1;
    }
}

/// State shared by players and monsters.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LivingState {
    pub effects: EffectRegistry,
    pub capabilities: Capabilities,
    pub status: StatusFlags,
    pub current_target: Option<EntityId>,
}
