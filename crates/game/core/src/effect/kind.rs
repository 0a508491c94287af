//! The closed effect catalog.

use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Every effect an entity can carry.
///
/// Names are persisted, so variants may be added but never renamed.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EffectKind {
    // debuffs
    Poison,
    Fire,
    Bleeding,
    Frozen,
    Stun,
    Bind,
    Silence,
    Weakness,
    Fragile,
    Slowness,
    Fatigue,
    Blindness,
    Decay,
    Curse,
    Abyss,
    AbyssalCurse,

    // buffs
    Invisibility,
    Invulnerable,
    Regeneration,
    Might,
    Protection,
    Haste,
    Fury,
    Focus,
    Detoxification,
    FireResistance,
    FrozenResistance,
    Preservation,
}

impl EffectKind {
    pub fn all() -> impl Iterator<Item = EffectKind> {
        Self::iter()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    /// Kinds that damage their holder every tick on behalf of the caster.
    pub const fn deals_damage(self) -> bool {
        matches!(self, Self::Poison | Self::Fire | Self::Bleeding)
    }

    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::Poison
                | Self::Fire
                | Self::Bleeding
                | Self::Frozen
                | Self::Stun
                | Self::Bind
                | Self::Silence
                | Self::Weakness
                | Self::Fragile
                | Self::Slowness
                | Self::Fatigue
                | Self::Blindness
                | Self::Decay
                | Self::Curse
                | Self::Abyss
                | Self::AbyssalCurse
        )
    }

    /// Display ordering weight, highest first.
    pub const fn priority(self) -> f64 {
        match self {
            Self::Invulnerable => f64::INFINITY,
            Self::Abyss | Self::AbyssalCurse => 100.0,
            Self::Stun | Self::Frozen => 50.0,
            Self::Bind | Self::Silence => 40.0,
            Self::Poison | Self::Fire | Self::Bleeding => 30.0,
            Self::Invisibility => 20.0,
            _ => 0.0,
        }
    }

    /// The effect this kind removes when applied, if it is a cure.
    pub const fn cures(self) -> Option<EffectKind> {
        match self {
            Self::Detoxification => Some(Self::Poison),
            Self::FireResistance => Some(Self::Fire),
            Self::FrozenResistance => Some(Self::Frozen),
            Self::Preservation => Some(Self::Decay),
            _ => None,
        }
    }

    /// Human-readable label used in status lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Poison => "Poison",
            Self::Fire => "Burning",
            Self::Bleeding => "Bleeding",
            Self::Frozen => "Frozen",
            Self::Stun => "Stunned",
            Self::Bind => "Bound",
            Self::Silence => "Silenced",
            Self::Weakness => "Weakness",
            Self::Fragile => "Fragile",
            Self::Slowness => "Slowness",
            Self::Fatigue => "Fatigue",
            Self::Blindness => "Blindness",
            Self::Decay => "Decay",
            Self::Curse => "Curse",
            Self::Abyss => "Abyss",
            Self::AbyssalCurse => "Abyssal Curse",
            Self::Invisibility => "Invisibility",
            Self::Invulnerable => "Invulnerable",
            Self::Regeneration => "Regeneration",
            Self::Might => "Might",
            Self::Protection => "Protection",
            Self::Haste => "Haste",
            Self::Fury => "Fury",
            Self::Focus => "Focus",
            Self::Detoxification => "Detoxification",
            Self::FireResistance => "Fire Resistance",
            Self::FrozenResistance => "Frozen Resistance",
            Self::Preservation => "Preservation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in EffectKind::all() {
            assert_eq!(EffectKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EffectKind::AbyssalCurse.name(), "ABYSSAL_CURSE");
        assert_eq!(EffectKind::from_name("no_such_effect"), None);
    }

    #[test]
    fn invulnerable_sorts_first() {
        let top = EffectKind::all()
            .max_by(|a, b| a.priority().total_cmp(&b.priority()))
            .unwrap();
        assert_eq!(top, EffectKind::Invulnerable);
    }

    #[test]
    fn cures_target_debuffs() {
        for kind in EffectKind::all() {
            if let Some(target) = kind.cures() {
                assert!(!kind.is_debuff());
                assert!(target.is_debuff());
            }
        }
        assert_eq!(EffectKind::COUNT, 28);
    }
}
