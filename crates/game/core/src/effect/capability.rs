//! Effect-driven action capabilities.
//!
//! Capabilities are recomputed from scratch at the start of every effect
//! tick. When several effects deny the same capability, the last one applied
//! provides the reason.

/// An action an entity may be prevented from taking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Move,
    Attack,
    UseSkill,
    Avoid,
}

/// Outcome of a capability check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capability {
    denied: Option<String>,
}

impl Capability {
    pub fn allowed(&self) -> bool {
        self.denied.is_none()
    }

    /// Reason shown when the action is refused.
    pub fn reason(&self) -> Option<&str> {
        self.denied.as_deref()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Capabilities {
    movement: Capability,
    attack: Capability,
    use_skill: Capability,
    avoid: Capability,
}

impl Capabilities {
    pub fn get(&self, kind: CapabilityKind) -> &Capability {
        match kind {
            CapabilityKind::Move => &self.movement,
            CapabilityKind::Attack => &self.attack,
            CapabilityKind::UseSkill => &self.use_skill,
            CapabilityKind::Avoid => &self.avoid,
        }
    }

    pub fn allows(&self, kind: CapabilityKind) -> bool {
        self.get(kind).allowed()
    }

    pub fn deny(&mut self, kind: CapabilityKind, reason: impl Into<String>) {
        let slot = match kind {
            CapabilityKind::Move => &mut self.movement,
            CapabilityKind::Attack => &mut self.attack,
            CapabilityKind::UseSkill => &mut self.use_skill,
            CapabilityKind::Avoid => &mut self.avoid,
        };
        slot.denied = Some(reason.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
