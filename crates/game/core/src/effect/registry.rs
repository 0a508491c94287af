use std::cmp::Ordering;

use super::apply::{EffectContext, apply};
use super::instance::{Effect, EffectData};
use super::kind::EffectKind;
use crate::entity::{Entity, EntityId, StatusFlags};
use crate::error::DataError;

/// Active effects of one living entity, in insertion order.
///
/// Adding an effect never merges with an existing one of the same kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectRegistry {
    effects: Vec<Effect>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter()
    }

    pub fn find(&self, kind: EffectKind) -> Option<&Effect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.find(kind).is_some()
    }

    /// Removes the first effect of `kind`.
    pub fn remove_kind(&mut self, kind: EffectKind) -> Option<Effect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Effects ordered for status display, highest priority first.
    pub fn sorted_for_display(&self) -> Vec<&Effect> {
        let mut sorted: Vec<&Effect> = self.effects.iter().collect();
        sorted.sort_by(|a, b| {
            b.kind
                .priority()
                .partial_cmp(&a.kind.priority())
                .unwrap_or(Ordering::Equal)
        });
        sorted
    }

    pub fn to_data(&self) -> Vec<EffectData> {
        self.effects.iter().map(Effect::to_data).collect()
    }

    pub fn from_data(data: &[EffectData]) -> Result<Self, DataError> {
        let mut registry = Self::new();
        for entry in data {
            if let Some(effect) = Effect::from_data(entry)? {
                registry.push(effect);
            }
        }
        Ok(registry)
    }
}

/// Runs one effect tick on `entity`.
///
/// Capabilities and status flags are rebuilt from scratch, every active
/// effect applies once, then durations drop by `ctx.dt` and expired effects
/// are removed. Effects added while applying join the registry untouched
/// this tick.
///
/// Returns the casters whose effects dealt damage this tick.
pub fn tick_effects(entity: &mut Entity, ctx: &EffectContext) -> Vec<EntityId> {
    let mut active = match entity.living_mut() {
        Some(living) => {
            living.capabilities.reset();
            living.status = StatusFlags::empty();
            std::mem::take(&mut living.effects.effects)
        }
        None => return Vec::new(),
    };
    let mut abusers = Vec::new();

    let mut cured = vec![false; active.len()];
    for index in 0..active.len() {
        if cured[index] {
            continue;
        }
        if active[index].kind.deals_damage()
            && let Some(caster) = active[index].caster
            && !abusers.contains(&caster)
        {
            abusers.push(caster);
        }
        let Some(cure) = apply(&mut active[index], entity, ctx) else {
            continue;
        };
        let found = active
            .iter()
            .enumerate()
            .position(|(other, e)| other != index && !cured[other] && e.kind == cure.target);
        if let Some(other) = found
            && cure.level >= active[other].level
        {
            tracing::debug!(
                entity = %entity.id,
                cured = %cure.target,
                by = %active[index].kind,
                "effect cured"
            );
            cured[other] = true;
        }
    }

    let mut survivors = Vec::with_capacity(active.len());
    for (mut effect, gone) in active.into_iter().zip(cured) {
        if gone {
            continue;
        }
        effect.duration -= ctx.dt;
        if effect.is_expired() {
            tracing::trace!(entity = %entity.id, effect = %effect.kind, "effect expired");
        } else {
            survivors.push(effect);
        }
    }

    if let Some(living) = entity.living_mut() {
        survivors.append(&mut living.effects.effects);
        living.effects.effects = survivors;
    }
    abusers
}
