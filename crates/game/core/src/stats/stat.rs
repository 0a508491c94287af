//! Allocatable stat points.
//!
//! Stats are the only attribute source a player controls directly. Each
//! allocated point contributes fixed additive deltas to derived attributes,
//! re-queued into the [`AttributeSet`] during every early phase.

use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::kind::AttributeKind;
use super::set::AttributeSet;
use crate::error::{ErrorSeverity, GameError};

/// The five allocatable stats.
///
/// - **Strength**: physical attack
/// - **Vitality**: life pool and regeneration
/// - **Agility**: speed, attack rate, critical chance
/// - **Spell**: magic attack and mana pool
/// - **Sense**: critical damage and penetration
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatKind {
    Strength,
    Vitality,
    Agility,
    Spell,
    Sense,
}

impl StatKind {
    pub fn all() -> impl Iterator<Item = StatKind> {
        Self::iter()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Attribute deltas granted by one point of this stat.
    pub const fn contributions(self) -> &'static [(AttributeKind, f64)] {
        use AttributeKind::*;
        match self {
            Self::Strength => &[(Attack, 2.0), (MaxLife, 2.0)],
            Self::Vitality => &[(MaxLife, 10.0), (LifeRegen, 0.05), (Defend, 1.0)],
            Self::Agility => &[(MoveSpeed, 0.5), (AttackSpeed, 0.01), (CriticalChance, 0.05)],
            Self::Spell => &[(MagicAttack, 2.0), (MaxMana, 5.0), (ManaRegen, 0.05)],
            Self::Sense => &[(CriticalDamage, 0.5), (Penetration, 0.5), (MagicPenetration, 0.5)],
        }
    }
}

/// Refusals raised by stat allocation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StatError {
    #[error("not enough stat points: {available} available, {requested} requested")]
    NotEnoughPoints { available: u32, requested: u32 },

    #[error("cannot allocate zero points")]
    ZeroAmount,
}

impl GameError for StatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEnoughPoints { .. } => "NOT_ENOUGH_POINTS",
            Self::ZeroAmount => "ZERO_AMOUNT",
        }
    }
}

/// Raw allocated stat points plus the unspent pool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stat {
    pub strength: u32,
    pub vitality: u32,
    pub agility: u32,
    pub spell: u32,
    pub sense: u32,
    /// Points earned but not yet allocated.
    pub unspent: u32,
}

impl Stat {
    pub fn new(strength: u32, vitality: u32, agility: u32, spell: u32, sense: u32) -> Self {
        Self {
            strength,
            vitality,
            agility,
            spell,
            sense,
            unspent: 0,
        }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Vitality => self.vitality,
            StatKind::Agility => self.agility,
            StatKind::Spell => self.spell,
            StatKind::Sense => self.sense,
        }
    }

    fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Vitality => &mut self.vitality,
            StatKind::Agility => &mut self.agility,
            StatKind::Spell => &mut self.spell,
            StatKind::Sense => &mut self.sense,
        }
    }

    /// Moves `amount` unspent points into `kind`.
    pub fn allocate(&mut self, kind: StatKind, amount: u32) -> Result<(), StatError> {
        if amount == 0 {
            return Err(StatError::ZeroAmount);
        }
        if amount > self.unspent {
            return Err(StatError::NotEnoughPoints {
                available: self.unspent,
                requested: amount,
            });
        }
        self.unspent -= amount;
        let points = self.get_mut(kind);
        *points = points.saturating_add(amount);
        Ok(())
    }

    pub fn grant(&mut self, points: u32) {
        self.unspent = self.unspent.saturating_add(points);
    }

    /// Queues the stat-derived contributions for this tick.
    pub fn apply_to(&self, attributes: &mut AttributeSet) {
        for kind in StatKind::all() {
            let points = self.get(kind);
            if points == 0 {
                continue;
            }
            for (attribute, per_point) in kind.contributions() {
                attributes.add_value(*attribute, per_point * points as f64);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_spends_unspent_points() {
        let mut stat = Stat::default();
        stat.grant(5);

        stat.allocate(StatKind::Strength, 3).unwrap();
        assert_eq!(stat.strength, 3);
        assert_eq!(stat.unspent, 2);

        let err = stat.allocate(StatKind::Sense, 4).unwrap_err();
        assert_eq!(
            err,
            StatError::NotEnoughPoints {
                available: 2,
                requested: 4
            }
        );
        assert_eq!(stat.sense, 0);
        assert_eq!(stat.unspent, 2);
    }

    #[test]
    fn allocation_saturates_at_the_cap() {
        let mut stat = Stat::new(u32::MAX - 1, 0, 0, 0, 0);
        stat.grant(5);

        stat.allocate(StatKind::Strength, 5).unwrap();
        assert_eq!(stat.strength, u32::MAX);
        assert_eq!(stat.unspent, 0);
    }

    #[test]
    fn zero_allocation_is_refused() {
        let mut stat = Stat::default();
        stat.grant(1);
        assert_eq!(stat.allocate(StatKind::Agility, 0), Err(StatError::ZeroAmount));
    }

    #[test]
    fn contributions_feed_the_attribute_set() {
        let stat = Stat::new(5, 2, 0, 0, 0);
        let mut attributes = AttributeSet::new();

        stat.apply_to(&mut attributes);
        attributes.update_values();

        // ATTACK: 10 + 5×2
        assert_eq!(attributes.get_value(AttributeKind::Attack), 20.0);
        // MAX_LIFE: 100 + 5×2 + 2×10
        assert_eq!(attributes.get_value(AttributeKind::MaxLife), 130.0);
        // DEFEND: 0 + 2×1
        assert_eq!(attributes.get_value(AttributeKind::Defend), 2.0);
    }

    #[test]
    fn stat_names_parse() {
        assert_eq!("vitality".parse::<StatKind>(), Ok(StatKind::Vitality));
        assert_eq!(StatKind::Sense.name(), "SENSE");
    }
}
