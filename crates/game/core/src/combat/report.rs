use super::formula::DamageBreakdown;
use crate::effect::Effect;
use crate::entity::EntityId;

/// Everything known about a landed hit.
#[derive(Clone, Debug, PartialEq)]
pub struct HitReport {
    /// The object that swung, fired or cast.
    pub attacker: EntityId,
    /// Who gets the credit: a projectile's owner, otherwise the attacker.
    pub abuser: EntityId,
    pub victim: EntityId,
    pub damage: DamageBreakdown,
    pub critical: bool,
    pub magic: bool,
    /// Life actually lost after shields.
    pub life_lost: f64,
}

/// Follow-up produced by an on-hit or on-hitted trigger.
#[derive(Clone, Debug, PartialEq)]
pub enum HitReaction {
    HealAbuser(f64),
    HealVictim(f64),
    DamageAbuser(f64),
    DamageVictim(f64),
    EffectOnVictim(Effect),
    EffectOnAbuser(Effect),
}

/// Why an attack was refused before anything happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackRefusal {
    MissingVictim,
    VictimDead,
    MissingAbuser,
    /// The abuser is not standing anywhere.
    NoLocation,
    ProtectedResource(String),
    Cooldown,
    PeacefulZone,
    CannotAttack(String),
}

impl AttackRefusal {
    pub fn message(&self) -> String {
        match self {
            Self::MissingVictim => "There is nothing to attack.".into(),
            Self::VictimDead => "Your target is already dead.".into(),
            Self::MissingAbuser => "Nobody is attacking.".into(),
            Self::NoLocation => "You are nowhere.".into(),
            Self::ProtectedResource(reason) => reason.clone(),
            Self::Cooldown => "You are not ready to attack yet.".into(),
            Self::PeacefulZone => "You cannot fight other players here.".into(),
            Self::CannotAttack(reason) => reason.clone(),
        }
    }
}

/// Result of [`World::attack`](crate::world::World::attack).
#[derive(Clone, Debug, PartialEq)]
pub enum AttackOutcome {
    Hit(HitReport),
    Avoided,
    /// Missed an invisible victim.
    Missed,
    Refused(AttackRefusal),
}

impl AttackOutcome {
    /// True for any landed hit, including zero-damage ones.
    pub fn landed(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn report(&self) -> Option<&HitReport> {
        match self {
            Self::Hit(report) => Some(report),
            _ => None,
        }
    }
}
