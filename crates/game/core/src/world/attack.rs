//! The attack sequence and the other cross-entity interactions.

use super::World;
use crate::combat::{
    AttackOptions, AttackOutcome, AttackRefusal, HitReaction, HitReport, avoid_chance,
    compute_damage, message,
};
use crate::effect::{CapabilityKind, Effect};
use crate::entity::{Entity, EntityId, EntityKind};
use crate::item::EquipmentKind;
use crate::stats::AttributeKind;

/// Chance to miss an invisible victim.
const INVISIBLE_MISS_CHANCE: f64 = 0.95;

impl World {
    /// Resolves one attack of `attacker_id` on `victim_id`.
    ///
    /// Preconditions are checked in a fixed order and the first failing one
    /// refuses the attack. Avoidance and invisibility turn the attack into a
    /// miss. Anything else lands, zero-damage hits included.
    pub fn attack(
        &mut self,
        attacker_id: EntityId,
        victim_id: EntityId,
        options: AttackOptions,
    ) -> AttackOutcome {
        match self.resolve_attack(attacker_id, victim_id, &options) {
            Ok(outcome) => outcome,
            Err(refusal) => {
                tracing::trace!(attacker = %attacker_id, victim = %victim_id, ?refusal, "attack refused");
                let abuser = self.abuser_of(attacker_id).unwrap_or(attacker_id);
                self.send(abuser, refusal.message());
                AttackOutcome::Refused(refusal)
            }
        }
    }

    /// A projectile attacks on behalf of its owner.
    fn abuser_of(&self, attacker_id: EntityId) -> Option<EntityId> {
        let attacker = self.get(attacker_id)?;
        Some(match &attacker.kind {
            EntityKind::Projectile(p) => p.owner,
            _ => attacker_id,
        })
    }

    fn resolve_attack(
        &mut self,
        attacker_id: EntityId,
        victim_id: EntityId,
        options: &AttackOptions,
    ) -> Result<AttackOutcome, AttackRefusal> {
        let now = self.now_ms;

        // 1. victim
        let victim = self.get(victim_id).ok_or(AttackRefusal::MissingVictim)?;
        if victim.is_dead() {
            return Err(AttackRefusal::VictimDead);
        }

        // 2. abuser and its location
        if !self.contains(attacker_id) {
            return Err(AttackRefusal::MissingAbuser);
        }
        let abuser_id = self
            .abuser_of(attacker_id)
            .ok_or(AttackRefusal::MissingAbuser)?;
        let abuser = self.get(abuser_id).ok_or(AttackRefusal::MissingAbuser)?;
        let zone = abuser
            .location
            .as_deref()
            .and_then(|location| self.env.zones().zone(location))
            .ok_or(AttackRefusal::NoLocation)?;

        // 3. target bookkeeping
        if let Some(abuser) = self.get_mut(abuser_id) {
            abuser.set_current_target(Some(victim_id));
        }
        let victim_target_alive = self
            .get(victim_id)
            .and_then(Entity::current_target)
            .is_some_and(|target| self.is_alive(target));
        if let Some(victim) = self.get_mut(victim_id) {
            if !victim_target_alive {
                victim.set_current_target(Some(abuser_id));
            }
            if let Some(monster) = victim.as_monster_mut()
                && abuser_id != victim_id
            {
                monster.add_target(abuser_id);
            }
        }

        // 4. harvestable resource ownership
        let (Some(abuser), Some(victim)) = (self.get(abuser_id), self.get(victim_id)) else {
            return Err(AttackRefusal::MissingVictim);
        };
        if matches!(&victim.kind, EntityKind::Resource(state) if state.harvestable) {
            self.env
                .resources()
                .can_destroy(abuser, victim)
                .map_err(AttackRefusal::ProtectedResource)?;
        }

        // 5. attack speed
        let attacker_is_player = self.get(attacker_id).is_some_and(Entity::is_player);
        let gated = attacker_is_player || options.apply_attack_speed;
        if gated && let Some(last) = abuser.latest_attack_ms {
            let cooldown = 1000.0 / abuser.attribute.get_value(AttributeKind::AttackSpeed);
            if (now.saturating_sub(last) as f64) < cooldown {
                return Err(AttackRefusal::Cooldown);
            }
        }

        // 6. peaceful zones
        if zone.peaceful && abuser.is_player() && victim.is_player() && abuser_id != victim_id {
            return Err(AttackRefusal::PeacefulZone);
        }

        // 7. capabilities
        if let Some(reason) = abuser.capability_denial(CapabilityKind::Attack) {
            return Err(AttackRefusal::CannotAttack(reason.to_string()));
        }

        // 8. monster aggro transfer
        let party = abuser.party_owner();
        if let Some(monster) = self.get_mut(victim_id).and_then(Entity::as_monster_mut) {
            if monster.fighting_party.is_none() {
                monster.fighting_party = party;
            }
            if abuser_id != victim_id {
                monster.add_target(abuser_id);
            }
        }

        // 9. timestamps
        if let Some(attacker) = self.get_mut(attacker_id) {
            attacker.latest_attack_ms = Some(now);
            attacker.latest_attacked_entity = Some(victim_id);
        }
        if let Some(abuser) = self.get_mut(abuser_id) {
            if gated {
                abuser.latest_attack_ms = Some(now);
            }
            abuser.latest_abused = Some(victim_id);
        }

        let (Some(attacker), Some(victim)) = (self.get(attacker_id), self.get(victim_id)) else {
            return Err(AttackRefusal::MissingVictim);
        };

        // 10. avoidance and invisibility
        if !options.absolute_hit {
            let chance = avoid_chance(
                attacker.attribute.get_value(AttributeKind::MoveSpeed),
                victim.attribute.get_value(AttributeKind::MoveSpeed),
            );
            let can_avoid = victim.is_living()
                && victim.can(CapabilityKind::Move)
                && victim.can(CapabilityKind::Avoid);
            let invisible = victim.is_invisible();
            let draw = self.rng.next_f64();
            if draw < chance && can_avoid {
                let (abuser_name, victim_name) = self.names(abuser_id, victim_id);
                self.send(abuser_id, message::avoided_for_abuser(&victim_name));
                self.send(victim_id, message::avoided_for_victim(&abuser_name));
                return Ok(AttackOutcome::Avoided);
            }
            if invisible && self.rng.next_f64() < INVISIBLE_MISS_CHANCE {
                let (_, victim_name) = self.names(abuser_id, victim_id);
                self.send(abuser_id, message::missed_for_abuser(&victim_name));
                return Ok(AttackOutcome::Missed);
            }
        }

        // 11. critical
        let crit_source = if options.use_abuser_critical {
            abuser_id
        } else {
            attacker_id
        };
        let (crit_chance, crit_damage) = self
            .get(crit_source)
            .map(|e| {
                (
                    e.attribute.get_value(AttributeKind::CriticalChance),
                    e.attribute.get_value(AttributeKind::CriticalDamage),
                )
            })
            .unwrap_or_default();
        let critical = self.rng.next_f64() < crit_chance / 100.0;

        // 12. damage
        let (attack_kind, penetration_kind, resistance_kind) = if options.is_magic_attack {
            (
                AttributeKind::MagicAttack,
                AttributeKind::MagicPenetration,
                AttributeKind::MagicResistance,
            )
        } else {
            (
                AttributeKind::Attack,
                AttributeKind::Penetration,
                AttributeKind::Defend,
            )
        };
        let (Some(attacker), Some(victim)) = (self.get(attacker_id), self.get(victim_id)) else {
            return Err(AttackRefusal::MissingVictim);
        };
        let damage = compute_damage(
            attacker.attribute.get_value(attack_kind),
            victim.attribute.get_value(resistance_kind),
            attacker.attribute.get_value(penetration_kind),
            options.damage_multiplier,
            critical.then_some(crit_damage),
        );

        // 13. apply, then triggers
        let life_lost = self.damage(victim_id, damage.total, Some(abuser_id));
        let report = HitReport {
            attacker: attacker_id,
            abuser: abuser_id,
            victim: victim_id,
            damage,
            critical,
            magic: options.is_magic_attack,
            life_lost,
        };
        let mut reactions = Vec::new();
        if let Some(abuser) = self.get(abuser_id) {
            for (_, item) in abuser.slot.iter().filter(|(_, i)| !i.is_broken()) {
                reactions.extend(item.options.iter().filter_map(|o| o.on_hit(&report)));
            }
        }
        if let Some(victim) = self.get(victim_id) {
            for (_, item) in victim.slot.iter().filter(|(_, i)| !i.is_broken()) {
                reactions.extend(item.options.iter().filter_map(|o| o.on_hitted(&report)));
            }
        }
        reactions.extend(self.hooks.react(&report));
        if let Some(on_hit) = options.on_hit.as_ref() {
            reactions.extend(on_hit(&report));
        }
        for reaction in reactions {
            self.apply_reaction(&report, reaction);
        }

        // 14. durability
        self.wear_equipment(attacker_id, &[EquipmentKind::Hand]);
        self.wear_equipment(victim_id, &EquipmentKind::ARMOR);

        // 15. counters
        if let Some(attacker) = self.get_mut(attacker_id) {
            attacker.counters.attacks += 1;
            if critical {
                attacker.counters.criticals += 1;
            }
            if options.is_magic_attack {
                attacker.counters.magic += 1;
            } else {
                attacker.counters.physical += 1;
            }
        }

        // 16. messages
        let (abuser_name, victim_name) = self.names(abuser_id, victim_id);
        if let Some(victim_bar) = self.get(victim_id).map(Entity::life_bar) {
            self.send(
                abuser_id,
                message::hit_for_abuser(&report, &victim_name, &victim_bar),
            );
            if victim_id != abuser_id {
                self.send(
                    victim_id,
                    message::hit_for_victim(&report, &abuser_name, &victim_bar),
                );
            }
        }

        Ok(AttackOutcome::Hit(report))
    }

    fn names(&self, a: EntityId, b: EntityId) -> (String, String) {
        let name = |id| {
            self.get(id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| "someone".to_string())
        };
        (name(a), name(b))
    }

    fn apply_reaction(&mut self, report: &HitReport, reaction: HitReaction) {
        match reaction {
            HitReaction::HealAbuser(amount) => {
                self.heal(report.abuser, Some(report.abuser), amount);
            }
            HitReaction::HealVictim(amount) => {
                self.heal(report.victim, Some(report.abuser), amount);
            }
            HitReaction::DamageAbuser(amount) => {
                self.damage(report.abuser, amount, Some(report.victim));
            }
            HitReaction::DamageVictim(amount) => {
                self.damage(report.victim, amount, Some(report.abuser));
            }
            HitReaction::EffectOnVictim(effect) => {
                self.add_effect(report.victim, effect);
            }
            HitReaction::EffectOnAbuser(effect) => {
                self.add_effect(report.abuser, effect);
            }
        }
    }

    /// Wears the items in `kinds` by one point; broken items are unequipped
    /// and discarded.
    fn wear_equipment(&mut self, id: EntityId, kinds: &[EquipmentKind]) {
        let Some(entity) = self.get_mut(id) else {
            return;
        };
        for kind in kinds {
            if let Some(item) = entity.slot.get_mut(*kind) {
                item.wear();
            }
        }
        for item in entity.slot.remove_broken() {
            tracing::debug!(entity = %id, item = %item.name, "item broke");
            entity.send_message(format!("Your {} broke.", item.name));
        }
    }

    /// Damages `target` and records the pair on both sides: the target's
    /// `latest_abuser` and the abuser's `latest_abused`.
    pub fn damage(&mut self, target: EntityId, amount: f64, abuser: Option<EntityId>) -> f64 {
        let Some(entity) = self.get_mut(target) else {
            return 0.0;
        };
        let lost = entity.damage(amount, abuser);
        if let Some(abuser) = abuser {
            self.mark_abused(abuser, target);
        }
        lost
    }

    pub(crate) fn mark_abused(&mut self, abuser: EntityId, victim: EntityId) {
        if let Some(entity) = self.get_mut(abuser) {
            entity.latest_abused = Some(victim);
        }
    }

    /// Heals `target`, scaled by its heal efficiency.
    ///
    /// When both sides are living, monsters already hostile to the target
    /// also turn on the healer.
    pub fn heal(&mut self, target: EntityId, healer: Option<EntityId>, amount: f64) -> f64 {
        let Some(entity) = self.get_mut(target) else {
            return 0.0;
        };
        let healed = entity.heal(amount);
        let target_living = entity.is_living();

        let Some(healer) = healer else {
            return healed;
        };
        if healer == target || !target_living || !self.get(healer).is_some_and(Entity::is_living) {
            return healed;
        }
        for entity in self.entities.values_mut() {
            let Some(monster) = entity.as_monster_mut() else {
                continue;
            };
            let hostile_to_target = monster.targets.contains(&target)
                || monster.living.current_target == Some(target);
            if hostile_to_target && !monster.targets.contains(&healer) {
                monster.add_target(healer);
            }
        }
        healed
    }

    /// Adds an effect to a living entity. Returns false when refused.
    ///
    /// Players refuse debuffs cast by another player while standing in a
    /// peaceful zone.
    pub fn add_effect(&mut self, target: EntityId, effect: Effect) -> bool {
        let Some(entity) = self.get(target) else {
            return false;
        };
        if !entity.is_living() {
            return false;
        }
        if entity.is_player() && effect.kind.is_debuff() {
            let from_other_player = effect
                .caster
                .filter(|caster| *caster != target)
                .and_then(|caster| self.get(caster))
                .is_some_and(Entity::is_player);
            let peaceful = entity
                .location
                .as_deref()
                .is_some_and(|location| self.env.zones().is_peaceful(location));
            if from_other_player && peaceful {
                tracing::trace!(entity = %target, effect = %effect.kind, "debuff vetoed in peaceful zone");
                return false;
            }
        }
        self.get_mut(target)
            .is_some_and(|entity| entity.add_effect_unchecked(effect))
    }
}
