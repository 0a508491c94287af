//! Per-kind tick behavior.
//!
//! Every active effect runs once per tick, before its duration is decremented.
//! Effects that touch life apply in registry order; an abyss ramp overrides
//! whatever earlier effects did to life in the same tick and is itself
//! overridden by later ones.

use super::capability::CapabilityKind;
use super::instance::{Effect, ExtraValue};
use super::kind::EffectKind;
use crate::entity::{Entity, StatusFlags};
use crate::stats::AttributeKind;

const LAST_NOTICE: &str = "last_notice_ms";
const ORIGINAL_LIFE: &str = "original_life";

/// Clock data handed to every effect callback.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectContext {
    pub now_ms: u64,
    /// Seconds elapsed this tick.
    pub dt: f64,
    pub message_cooldown_ms: u64,
}

impl EffectContext {
    pub fn new(now_ms: u64, dt: f64, message_cooldown_secs: f64) -> Self {
        Self {
            now_ms,
            dt,
            message_cooldown_ms: (message_cooldown_secs * 1000.0) as u64,
        }
    }
}

/// A cure requested by an applied effect: remove the first other effect of
/// `target` whose level does not exceed `level`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CureRequest {
    pub target: EffectKind,
    pub level: f64,
}

/// Multiplier for stat debuffs, never below 10%.
fn reduction(level: f64) -> f64 {
    (1.0 - 0.1 * level).max(0.1)
}

fn boost(level: f64) -> f64 {
    1.0 + 0.1 * level
}

/// Sends `text` to a player holder at most once per message cooldown.
fn notice(effect: &mut Effect, entity: &mut Entity, ctx: &EffectContext, text: &str) {
    if !entity.is_player() {
        return;
    }
    let now = ctx.now_ms as f64;
    let due = effect
        .extra_number(LAST_NOTICE)
        .is_none_or(|last| now - last >= ctx.message_cooldown_ms as f64);
    if due {
        entity.send_message(text);
        effect.set_extra(LAST_NOTICE, ExtraValue::Number(now));
    }
}

fn deny(entity: &mut Entity, kinds: &[CapabilityKind], reason: &str) {
    if let Some(living) = entity.living_mut() {
        for kind in kinds {
            living.capabilities.deny(*kind, reason);
        }
    }
}

fn set_status(entity: &mut Entity, flag: StatusFlags) {
    if let Some(living) = entity.living_mut() {
        living.status.insert(flag);
    }
}

/// Forces life onto a linear ramp from the life held on the first tick down
/// to zero at expiry.
fn abyss_ramp(effect: &mut Effect, entity: &mut Entity) {
    let original = match effect.extra_number(ORIGINAL_LIFE) {
        Some(life) => life,
        None => {
            let life = entity.resources.life;
            effect.set_extra(ORIGINAL_LIFE, ExtraValue::Number(life));
            life
        }
    };
    if effect.max_duration.is_finite() && effect.max_duration > 0.0 {
        entity.resources.life = original * (effect.duration / effect.max_duration);
    }
}

pub(crate) fn apply(
    effect: &mut Effect,
    entity: &mut Entity,
    ctx: &EffectContext,
) -> Option<CureRequest> {
    use AttributeKind as A;
    use CapabilityKind as C;

    let level = effect.level;
    let dt = ctx.dt;

    match effect.kind {
        EffectKind::Poison => {
            entity.damage(2.0 * level * dt, effect.caster);
            notice(effect, entity, ctx, "You are poisoned.");
        }
        EffectKind::Fire => {
            entity.damage(3.0 * level * dt, effect.caster);
            notice(effect, entity, ctx, "You are burning!");
        }
        EffectKind::Bleeding => {
            entity.damage(1.5 * level * dt, effect.caster);
            notice(effect, entity, ctx, "You are bleeding.");
        }
        EffectKind::Frozen => {
            deny(entity, &[C::Move, C::Avoid], "You are frozen.");
            entity.attribute.multiply_value(A::AttackSpeed, 0.5);
        }
        EffectKind::Stun => {
            deny(
                entity,
                &[C::Move, C::Attack, C::UseSkill, C::Avoid],
                "You are stunned.",
            );
        }
        EffectKind::Bind => deny(entity, &[C::Move], "You are bound."),
        EffectKind::Silence => deny(entity, &[C::UseSkill], "You are silenced."),
        EffectKind::Weakness => {
            entity.attribute.multiply_value(A::Attack, reduction(level));
            entity.attribute.multiply_value(A::MagicAttack, reduction(level));
        }
        EffectKind::Fragile => {
            entity.attribute.multiply_value(A::Defend, reduction(level));
            entity.attribute.multiply_value(A::MagicResistance, reduction(level));
        }
        EffectKind::Slowness => entity.attribute.multiply_value(A::MoveSpeed, reduction(level)),
        EffectKind::Fatigue => entity.attribute.multiply_value(A::AttackSpeed, reduction(level)),
        EffectKind::Blindness => {
            entity.attribute.add_value(A::CriticalChance, -10.0 * level);
            notice(effect, entity, ctx, "You cannot see.");
        }
        EffectKind::Decay => {
            entity.attribute.add_value(A::HealEfficiency, -10.0 * level);
            notice(effect, entity, ctx, "Your body is decaying.");
        }
        EffectKind::Curse => {
            entity.attribute.multiply_value(A::LifeRegen, 0.0);
            entity.attribute.multiply_value(A::ManaRegen, 0.0);
        }
        EffectKind::Abyss => {
            abyss_ramp(effect, entity);
            notice(effect, entity, ctx, "The abyss is pulling you in.");
        }
        EffectKind::AbyssalCurse => {
            abyss_ramp(effect, entity);
            deny(entity, &[C::UseSkill], "The abyss silences you.");
            notice(effect, entity, ctx, "The abyss is pulling you in.");
        }
        EffectKind::Invisibility => set_status(entity, StatusFlags::INVISIBLE),
        EffectKind::Invulnerable => set_status(entity, StatusFlags::INVULNERABLE),
        EffectKind::Regeneration => {
            entity.heal(2.0 * level * dt);
        }
        EffectKind::Might => {
            entity.attribute.multiply_value(A::Attack, boost(level));
            entity.attribute.multiply_value(A::MagicAttack, boost(level));
        }
        EffectKind::Protection => {
            entity.attribute.add_value(A::Defend, 10.0 * level);
            entity.attribute.add_value(A::MagicResistance, 10.0 * level);
        }
        EffectKind::Haste => entity.attribute.multiply_value(A::MoveSpeed, boost(level)),
        EffectKind::Fury => entity.attribute.multiply_value(A::AttackSpeed, boost(level)),
        EffectKind::Focus => entity.attribute.add_value(A::CriticalChance, 5.0 * level),
        EffectKind::Detoxification
        | EffectKind::FireResistance
        | EffectKind::FrozenResistance
        | EffectKind::Preservation => {}
    }

    effect
        .kind
        .cures()
        .map(|target| CureRequest { target, level })
}
