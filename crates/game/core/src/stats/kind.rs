//! Attribute kind catalog.
//!
//! The catalog is closed: every numeric stat an entity can carry is one
//! variant of [`AttributeKind`]. Persisted data refers to kinds by their
//! stable `SCREAMING_SNAKE_CASE` name, never by ordinal.

use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Identifier of one numeric attribute.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumCount, EnumString,
    IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AttributeKind {
    MaxLife,
    MaxMana,
    MaxAir,
    MaxWater,
    MaxFood,
    LifeRegen,
    ManaRegen,
    Attack,
    MagicAttack,
    Defend,
    MagicResistance,
    Penetration,
    MagicPenetration,
    AttackSpeed,
    MoveSpeed,
    CriticalChance,
    CriticalDamage,
    HealEfficiency,
}

/// Static description of one attribute kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AttributeSpec {
    /// Base value a fresh entity starts with.
    pub default: f64,
    /// Inclusive lower clamp bound of the additive layer.
    pub min: f64,
    /// Inclusive upper clamp bound of the additive layer.
    pub max: f64,
    /// Display suffix (presentation only).
    pub suffix: &'static str,
    /// Decimal places used when displaying (presentation only).
    pub precision: usize,
}

const UNBOUNDED: f64 = 1.0e12;

impl AttributeKind {
    /// Returns every kind in declaration order.
    pub fn all() -> impl Iterator<Item = AttributeKind> {
        Self::iter()
    }

    /// Dense index used by per-entity storage.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable persisted name (`MAX_LIFE`, `CRITICAL_CHANCE`, ...).
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Parses a persisted name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub const fn spec(self) -> AttributeSpec {
        match self {
            Self::MaxLife => spec(100.0, 1.0, UNBOUNDED, "", 0),
            Self::MaxMana => spec(50.0, 0.0, UNBOUNDED, "", 0),
            Self::MaxAir => spec(100.0, 0.0, UNBOUNDED, "", 0),
            Self::MaxWater => spec(100.0, 0.0, UNBOUNDED, "", 0),
            Self::MaxFood => spec(100.0, 0.0, UNBOUNDED, "", 0),
            Self::LifeRegen => spec(0.5, -UNBOUNDED, UNBOUNDED, "/s", 2),
            Self::ManaRegen => spec(0.5, -UNBOUNDED, UNBOUNDED, "/s", 2),
            Self::Attack => spec(10.0, 0.0, UNBOUNDED, "", 0),
            Self::MagicAttack => spec(10.0, 0.0, UNBOUNDED, "", 0),
            Self::Defend => spec(0.0, 0.0, UNBOUNDED, "", 0),
            Self::MagicResistance => spec(0.0, 0.0, UNBOUNDED, "", 0),
            Self::Penetration => spec(0.0, 0.0, UNBOUNDED, "", 0),
            Self::MagicPenetration => spec(0.0, 0.0, UNBOUNDED, "", 0),
            Self::AttackSpeed => spec(1.0, 0.1, 20.0, "/s", 2),
            Self::MoveSpeed => spec(100.0, 0.0, 1000.0, "", 0),
            Self::CriticalChance => spec(5.0, 0.0, 100.0, "%", 1),
            Self::CriticalDamage => spec(50.0, 0.0, 1000.0, "%", 0),
            Self::HealEfficiency => spec(100.0, 0.0, 1000.0, "%", 0),
        }
    }

    pub const fn default_value(self) -> f64 {
        self.spec().default
    }

    pub const fn min(self) -> f64 {
        self.spec().min
    }

    pub const fn max(self) -> f64 {
        self.spec().max
    }

    /// Formats a value with this kind's precision and suffix.
    pub fn display_value(self, value: f64) -> String {
        let spec = self.spec();
        format!("{:.*}{}", spec.precision, value, spec.suffix)
    }
}

const fn spec(default: f64, min: f64, max: f64, suffix: &'static str, precision: usize) -> AttributeSpec {
    AttributeSpec {
        default,
        min,
        max,
        suffix,
        precision,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for kind in AttributeKind::all() {
            assert_eq!(AttributeKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(AttributeKind::MaxLife.name(), "MAX_LIFE");
        assert_eq!(
            AttributeKind::from_name("critical_chance"),
            Some(AttributeKind::CriticalChance)
        );
        assert_eq!(AttributeKind::from_name("MANA_SHIELD"), None);
    }

    #[test]
    fn defaults_sit_inside_their_range() {
        for kind in AttributeKind::all() {
            let spec = kind.spec();
            assert!(spec.min <= spec.default && spec.default <= spec.max, "{kind}");
        }
    }

    #[test]
    fn index_is_dense() {
        for (i, kind) in AttributeKind::all().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(AttributeKind::all().count(), AttributeKind::COUNT);
    }

    #[test]
    fn display_uses_precision_and_suffix() {
        assert_eq!(AttributeKind::CriticalChance.display_value(12.345), "12.3%");
        assert_eq!(AttributeKind::Attack.display_value(99.6), "100");
    }
}
