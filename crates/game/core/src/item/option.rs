//! Temporary on-item effects ("options").
//!
//! An option reacts to hits dealt by its holder (`on_hit`), hits taken
//! (`on_hitted`), and contributes attribute modifiers every tick while the
//! item is equipped. A timed option is pruned once its timer elapses.

use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::combat::{HitReaction, HitReport};
use crate::effect::{Effect, EffectKind};
use crate::stats::{AttributeKind, Modifier};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ItemOptionKind {
    /// Heals the holder for a share of damage dealt.
    LifeSteal,
    /// Reflects a share of damage taken back to the abuser.
    Thorns,
    /// Sets the victim on fire.
    Ignite,
    /// Poisons the victim.
    Venom,
    /// Raises life regeneration while equipped.
    Mending,
    /// Raises attack while equipped.
    Sharpness,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemOption {
    pub kind: ItemOptionKind,
    pub level: f64,
    /// Seconds left, or `None` for a permanent option.
    #[cfg_attr(feature = "serde", serde(default))]
    pub remaining: Option<f64>,
}

impl ItemOption {
    pub fn new(kind: ItemOptionKind, level: f64) -> Self {
        Self {
            kind,
            level,
            remaining: None,
        }
    }

    pub fn timed(kind: ItemOptionKind, level: f64, seconds: f64) -> Self {
        Self {
            kind,
            level,
            remaining: Some(seconds),
        }
    }

    pub fn tick(&mut self, dt: f64) {
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= dt;
        }
    }

    pub fn is_expired(&self) -> bool {
        self.remaining.is_some_and(|r| r <= 0.0)
    }

    /// Reactions when the holder lands a hit.
    pub fn on_hit(&self, report: &HitReport) -> Option<HitReaction> {
        match self.kind {
            ItemOptionKind::LifeSteal if report.damage.total > 0.0 => Some(
                HitReaction::HealAbuser(report.damage.total * 0.05 * self.level),
            ),
            ItemOptionKind::Ignite => Some(HitReaction::EffectOnVictim(
                Effect::new(EffectKind::Fire, self.level, 3.0).with_caster(report.abuser),
            )),
            ItemOptionKind::Venom => Some(HitReaction::EffectOnVictim(
                Effect::new(EffectKind::Poison, self.level, 5.0).with_caster(report.abuser),
            )),
            _ => None,
        }
    }

    /// Reactions when the holder is hit.
    pub fn on_hitted(&self, report: &HitReport) -> Option<HitReaction> {
        match self.kind {
            ItemOptionKind::Thorns if report.damage.total > 0.0 => Some(
                HitReaction::DamageAbuser(report.damage.total * 0.1 * self.level),
            ),
            _ => None,
        }
    }

    pub fn update_modifier(&self) -> Option<Modifier> {
        match self.kind {
            ItemOptionKind::Mending => Some(Modifier::add(AttributeKind::LifeRegen, 0.5 * self.level)),
            ItemOptionKind::Sharpness => Some(Modifier::add(AttributeKind::Attack, 3.0 * self.level)),
            _ => None,
        }
    }

    pub fn describe(&self) -> String {
        let name: &'static str = self.kind.into();
        match self.remaining {
            Some(remaining) => format!("[{} Lv.{}] {:.0}s", name, self.level, remaining.max(0.0)),
            None => format!("[{} Lv.{}]", name, self.level),
        }
    }
}
