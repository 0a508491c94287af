//! Tick phases, death and revival.

use super::World;
use crate::combat::AttackOptions;
use crate::effect::{EffectContext, tick_effects};
use crate::entity::{Entity, EntityId, EntityKind, ResourceKind};
use crate::stats::AttributeKind;

impl World {
    /// Advances the simulation by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        let ids = self.ids();
        let ctx = EffectContext::new(self.now_ms, dt, self.config.message_cooldown_secs);

        for id in &ids {
            let abusers = match self.get_mut(*id) {
                Some(entity) => early_update(entity, &ctx),
                None => continue,
            };
            for abuser in abusers {
                self.mark_abused(abuser, *id);
            }
        }
        for id in &ids {
            self.update(*id, dt);
        }
        for id in &ids {
            self.late_update(*id, dt);
        }

        let spent: Vec<EntityId> = self
            .iter()
            .filter(|e| e.as_projectile().is_some_and(|p| p.spent))
            .map(|e| e.id)
            .collect();
        for id in spent {
            self.remove(id);
        }

        self.now_ms += (dt * 1000.0).round() as u64;
    }

    /// Advances by one configured tick interval.
    pub fn step(&mut self) {
        let dt = self.config.tick_secs();
        self.tick(dt);
    }

    fn update(&mut self, id: EntityId, dt: f64) {
        let Some(entity) = self.get(id) else {
            return;
        };
        let active_monster = entity.is_monster() && entity.is_alive();
        let projectile = entity.as_projectile().is_some();
        if active_monster {
            self.monster_behavior(id);
        } else if projectile {
            self.projectile_behavior(id, dt);
        }
    }

    /// Picks a live target in the same location and attacks it, gated by
    /// attack speed.
    fn monster_behavior(&mut self, id: EntityId) {
        let Some(monster) = self.get(id) else {
            return;
        };
        let location = monster.location.clone();
        let reachable = |world: &World, target: EntityId| {
            target != id
                && world
                    .get(target)
                    .is_some_and(|t| t.is_alive() && t.location == location)
        };

        let mut candidates: Vec<EntityId> = monster.current_target().into_iter().collect();
        if let Some(state) = monster.as_monster() {
            candidates.extend(state.targets.iter().copied());
        }
        let Some(target) = candidates.into_iter().find(|t| reachable(self, *t)) else {
            return;
        };

        let now = self.now_ms;
        if let Some(monster) = self.get_mut(id) {
            monster.set_current_target(Some(target));
            let ready = match monster.latest_attack_ms {
                None => true,
                Some(last) => {
                    let cooldown = 1000.0 / monster.attribute.get_value(AttributeKind::AttackSpeed);
                    (now.saturating_sub(last) as f64) >= cooldown
                }
            };
            if !ready {
                return;
            }
        }
        self.attack(id, target, AttackOptions::new().gated());
    }

    /// Fires the projectile once, or retires it after its lifetime.
    fn projectile_behavior(&mut self, id: EntityId, dt: f64) {
        let lifetime = self.config.projectile_lifetime_secs;
        let Some(projectile) = self.get_mut(id).and_then(Entity::as_projectile_mut) else {
            return;
        };
        if projectile.spent {
            return;
        }
        projectile.age += dt;
        if projectile.age > lifetime {
            projectile.spent = true;
            return;
        }
        let target = projectile.target;
        let options = projectile.options.clone();
        projectile.spent = true;
        self.attack(id, target, options);
    }

    fn late_update(&mut self, id: EntityId, dt: f64) {
        let hunger = self.config.hunger_rate * dt;
        let thirst = self.config.thirst_rate * dt;
        let starvation = self.config.starvation_damage * dt;
        let Some(entity) = self.get_mut(id) else {
            return;
        };
        if matches!(entity.kind, EntityKind::Projectile(_)) {
            return;
        }

        if entity.dead_time > 0.0 {
            entity.dead_time -= dt;
            if entity.dead_time <= 0.0 {
                entity.revive();
                tracing::debug!(entity = %id, "revived");
                entity.send_message("You have been revived.");
            }
            return;
        }

        if entity.is_living() && entity.resources.life > 0.0 {
            let life_regen = entity.attribute.get_value(AttributeKind::LifeRegen);
            let mana_regen = entity.attribute.get_value(AttributeKind::ManaRegen);
            entity.resources.life += life_regen * dt;
            entity.resources.mana += mana_regen * dt;
            entity.resources.air = entity.max(ResourceKind::Air);
        }
        if entity.is_player() && entity.resources.life > 0.0 {
            entity.resources.food -= hunger;
            entity.resources.water -= thirst;
            if entity.resources.food <= 0.0 || entity.resources.water <= 0.0 {
                entity.resources.life -= starvation;
            }
        }
        entity.resources.clamp_to(&entity.attribute);

        if entity.resources.life <= 0.0 {
            self.handle_death(id);
        }
    }

    fn handle_death(&mut self, id: EntityId) {
        let revival = if self.get(id).is_some_and(Entity::is_player) {
            self.config.player_revival_secs
        } else {
            self.config.monster_revival_secs
        };
        let Some(entity) = self.get_mut(id) else {
            return;
        };
        let killer = entity.latest_abuser;
        let name = entity.name.clone();
        let rewards = entity.as_monster().map(|m| (m.exp_reward, m.gold_reward));
        entity.die(revival);
        entity.send_message("You died.");
        tracing::debug!(entity = %id, killer = ?killer, "died");

        let (Some(killer), Some((exp, gold))) = (killer, rewards) else {
            return;
        };
        let config = self.config.clone();
        if let Some(player) = self.get_mut(killer).filter(|k| k.is_player()) {
            player.send_message(format!("You defeated {name}. (+{exp:.0} exp, +{gold} gold)"));
            player.gain_exp(exp, &config);
            if let Some(state) = player.as_player_mut() {
                state.gold = state.gold.saturating_add(gold);
            }
        }
    }
}

/// Queues stat, equipment and effect modifiers, then commits them.
///
/// Returns the casters whose effects damaged `entity`.
fn early_update(entity: &mut Entity, ctx: &EffectContext) -> Vec<EntityId> {
    let Entity {
        attribute,
        stat,
        slot,
        shields,
        ..
    } = &mut *entity;
    stat.apply_to(attribute);
    for item in slot.iter_mut() {
        item.tick_options(ctx.dt);
        item.apply_modifiers(attribute);
    }
    shields.tick(ctx.dt);
    let abusers = tick_effects(entity, ctx);
    entity.attribute.update_values();
    abusers
}
