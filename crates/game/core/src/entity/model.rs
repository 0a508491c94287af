use super::id::EntityId;
use super::kinds::{EntityKind, MonsterState, PlayerState, ProjectileState, ResourceState};
use super::living::{LivingState, StatusFlags};
use super::resources::{BarMode, ProgressBar, ResourceKind, Resources};
use super::shield::{Shield, Shields};
use crate::config::GameConfig;
use crate::effect::{CapabilityKind, Effect, EffectKind};
use crate::item::EquipmentSlot;
use crate::stats::{AttributeKind, AttributeSet, Stat};

/// Running totals kept for statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatCounters {
    pub attacks: u64,
    pub criticals: u64,
    pub physical: u64,
    pub magic: u64,
}

/// The base simulation unit.
///
/// An entity is never destroyed by dying: death is the soft state
/// `life <= 0 || dead_time > 0`, and a revival timer brings it back.
#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub kind: EntityKind,
    pub location: Option<String>,
    pub level: u32,
    pub exp: f64,
    pub resources: Resources,
    pub attribute: AttributeSet,
    pub shields: Shields,
    pub slot: EquipmentSlot,
    pub stat: Stat,
    /// Seconds until revival; zero while alive.
    pub dead_time: f64,
    pub latest_attack_ms: Option<u64>,
    pub latest_attacked_entity: Option<EntityId>,
    pub latest_abuser: Option<EntityId>,
    pub latest_abused: Option<EntityId>,
    pub counters: CombatCounters,
}

impl Entity {
    pub fn new(id: EntityId, name: impl Into<String>, kind: EntityKind) -> Self {
        let attribute = AttributeSet::new();
        Self {
            id,
            name: name.into(),
            kind,
            location: None,
            level: 1,
            exp: 0.0,
            resources: Resources::at_max(&attribute),
            attribute,
            shields: Shields::new(),
            slot: EquipmentSlot::new(),
            stat: Stat::default(),
            dead_time: 0.0,
            latest_attack_ms: None,
            latest_attacked_entity: None,
            latest_abuser: None,
            latest_abused: None,
            counters: CombatCounters::default(),
        }
    }

    pub fn player(id: EntityId, name: impl Into<String>, state: PlayerState) -> Self {
        Self::new(id, name, EntityKind::Player(state))
    }

    pub fn monster(id: EntityId, name: impl Into<String>, state: MonsterState) -> Self {
        Self::new(id, name, EntityKind::Monster(state))
    }

    pub fn resource(id: EntityId, name: impl Into<String>, state: ResourceState) -> Self {
        Self::new(id, name, EntityKind::Resource(state))
    }

    pub fn projectile(id: EntityId, name: impl Into<String>, state: ProjectileState) -> Self {
        Self::new(id, name, EntityKind::Projectile(state))
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    // ===== variant access =====

    pub fn living(&self) -> Option<&LivingState> {
        match &self.kind {
            EntityKind::Player(p) => Some(&p.living),
            EntityKind::Monster(m) => Some(&m.living),
            _ => None,
        }
    }

    pub fn living_mut(&mut self) -> Option<&mut LivingState> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(&mut p.living),
            EntityKind::Monster(m) => Some(&mut m.living),
            _ => None,
        }
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            EntityKind::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_monster(&self) -> Option<&MonsterState> {
        match &self.kind {
            EntityKind::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_monster_mut(&mut self) -> Option<&mut MonsterState> {
        match &mut self.kind {
            EntityKind::Monster(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&ProjectileState> {
        match &self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_projectile_mut(&mut self) -> Option<&mut ProjectileState> {
        match &mut self.kind {
            EntityKind::Projectile(p) => Some(p),
            _ => None,
        }
    }

    pub fn is_living(&self) -> bool {
        self.living().is_some()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn is_monster(&self) -> bool {
        matches!(self.kind, EntityKind::Monster(_))
    }

    /// The party this player fights for: its party owner, or itself.
    pub fn party_owner(&self) -> Option<EntityId> {
        self.as_player().map(|p| p.party_owner.unwrap_or(self.id))
    }

    // ===== life =====

    pub fn is_dead(&self) -> bool {
        self.resources.life <= 0.0 || self.dead_time > 0.0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn max(&self, kind: ResourceKind) -> f64 {
        self.attribute.get_value(kind.max_attribute())
    }

    /// Applies `amount` damage, shields first, and returns the life lost.
    ///
    /// The abuser is recorded even when nothing gets through. Life may go
    /// negative; invulnerable entities ignore damage entirely. The abuser's
    /// own `latest_abused` is kept by [`World::damage`](crate::World::damage).
    pub fn damage(&mut self, amount: f64, abuser: Option<EntityId>) -> f64 {
        if let Some(abuser) = abuser {
            self.latest_abuser = Some(abuser);
        }
        if self.is_invulnerable() || amount <= 0.0 {
            return 0.0;
        }
        let remaining = self.shields.absorb(amount);
        self.resources.life -= remaining;
        remaining
    }

    /// Raises a shield under `key`, replacing one of the same name. Returns
    /// false when the shield set is already full.
    pub fn add_shield(&mut self, key: impl Into<String>, shield: Shield) -> bool {
        let key = key.into();
        let added = self.shields.insert(key.clone(), shield);
        if !added {
            tracing::trace!(entity = %self.id, shield = %key, "shield refused, set is full");
        }
        added
    }

    /// Adds `amount` scaled by `HEAL_EFFICIENCY` percent to life and returns
    /// the healed amount. Life may exceed its maximum until the next clamp.
    pub fn heal(&mut self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let healed = amount * self.attribute.get_value(AttributeKind::HealEfficiency) / 100.0;
        self.resources.life += healed;
        healed
    }

    // ===== messaging =====

    /// Queues a message for a player; other entities have nobody to tell.
    pub fn send_message(&mut self, text: impl Into<String>) {
        if let Some(player) = self.as_player_mut() {
            player.mailbox.push(text);
        }
    }

    pub fn drain_messages(&mut self) -> Vec<String> {
        self.as_player_mut()
            .map(|p| p.mailbox.drain())
            .unwrap_or_default()
    }

    // ===== effects & capabilities =====

    /// Adds an effect without any veto. Returns false for non-living entities.
    pub fn add_effect_unchecked(&mut self, effect: Effect) -> bool {
        match self.living_mut() {
            Some(living) => {
                living.effects.push(effect);
                true
            }
            None => false,
        }
    }

    pub fn has_effect(&self, kind: EffectKind) -> bool {
        self.living().is_some_and(|l| l.effects.contains(kind))
    }

    /// Reason the capability is currently denied, if it is.
    pub fn capability_denial(&self, kind: CapabilityKind) -> Option<&str> {
        self.living()
            .and_then(|l| l.capabilities.get(kind).reason())
    }

    pub fn can(&self, kind: CapabilityKind) -> bool {
        self.capability_denial(kind).is_none()
    }

    pub fn is_invisible(&self) -> bool {
        self.living()
            .is_some_and(|l| l.status.contains(StatusFlags::INVISIBLE))
    }

    pub fn is_invulnerable(&self) -> bool {
        self.living()
            .is_some_and(|l| l.status.contains(StatusFlags::INVULNERABLE))
    }

    pub fn current_target(&self) -> Option<EntityId> {
        self.living().and_then(|l| l.current_target)
    }

    pub fn set_current_target(&mut self, target: Option<EntityId>) {
        if let Some(living) = self.living_mut() {
            living.current_target = target;
        }
    }

    // ===== progression =====

    /// Adds experience and levels up as many times as it covers. Each level
    /// grants stat points. Returns the number of levels gained.
    pub fn gain_exp(&mut self, amount: f64, config: &GameConfig) -> u32 {
        if amount <= 0.0 {
            return 0;
        }
        self.exp += amount;
        let mut gained = 0;
        loop {
            let required = config.required_exp(self.level);
            if self.exp < required || required <= 0.0 {
                break;
            }
            self.exp -= required;
            self.level += 1;
            self.stat.grant(config.stat_points_per_level);
            gained += 1;
        }
        if gained > 0 {
            tracing::debug!(entity = %self.id, level = self.level, "level up");
            self.send_message(format!("Level up! You are now level {}.", self.level));
        }
        gained
    }

    /// Enters the dead state: timer set, effects and shields cleared, aggro
    /// dropped.
    pub fn die(&mut self, revival_secs: f64) {
        self.dead_time = revival_secs.max(f64::MIN_POSITIVE);
        self.shields.clear();
        if let Some(living) = self.living_mut() {
            living.effects.clear();
            living.current_target = None;
        }
        if let Some(monster) = self.as_monster_mut() {
            monster.clear_aggro();
        }
    }

    /// Leaves the dead state with every pool refilled.
    pub fn revive(&mut self) {
        self.dead_time = 0.0;
        self.resources = Resources::at_max(&self.attribute);
    }

    // ===== presentation =====

    pub fn bar(&self, kind: ResourceKind, mode: BarMode) -> ProgressBar {
        ProgressBar::new(kind.label(), self.resources.get(kind), self.max(kind), mode)
    }

    pub fn life_bar(&self) -> ProgressBar {
        self.bar(ResourceKind::Life, BarMode::Absolute)
    }

    /// One-paragraph status: bars, shields and displayed effects.
    pub fn status_text(&self) -> String {
        let mut lines = vec![format!("{} (Lv.{})", self.name, self.level)];
        lines.push(self.life_bar().render());
        lines.push(self.bar(ResourceKind::Mana, BarMode::Absolute).render());
        for kind in [ResourceKind::Air, ResourceKind::Water, ResourceKind::Food] {
            lines.push(self.bar(kind, BarMode::Percent).render());
        }
        if !self.shields.is_empty() {
            lines.push(format!("Shield {:.0}", self.shields.total()));
        }
        if let Some(living) = self.living() {
            for effect in living.effects.sorted_for_display() {
                lines.push(effect.describe());
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Entity {
        Entity::player(EntityId(1), "alice", PlayerState::default())
    }

    #[test]
    fn shield_absorbs_before_life() {
        let mut entity = alice();
        entity.shields.insert("barrier", Shield::new(30.0, 10.0));

        entity.damage(10.0, None);
        assert_eq!(entity.resources.life, 100.0);
        assert_eq!(entity.shields.get("barrier").map(|s| s.amount), Some(20.0));

        let mut entity = alice();
        entity.shields.insert("barrier", Shield::new(30.0, 10.0));
        let lost = entity.damage(50.0, Some(EntityId(2)));
        assert_eq!(lost, 20.0);
        assert_eq!(entity.resources.life, 80.0);
        assert!(entity.shields.is_empty());
        assert_eq!(entity.latest_abuser, Some(EntityId(2)));
    }

    #[test]
    fn invulnerable_still_records_abuser() {
        let mut entity = alice();
        if let Some(living) = entity.living_mut() {
            living.status.insert(StatusFlags::INVULNERABLE);
        }

        assert_eq!(entity.damage(40.0, Some(EntityId(5))), 0.0);
        assert_eq!(entity.resources.life, 100.0);
        assert_eq!(entity.latest_abuser, Some(EntityId(5)));
    }

    #[test]
    fn damage_can_push_life_negative() {
        let mut entity = alice();
        entity.damage(150.0, None);
        assert_eq!(entity.resources.life, -50.0);
        assert!(entity.is_dead());
    }

    #[test]
    fn heal_scales_by_efficiency() {
        let mut entity = alice();
        entity.resources.life = 10.0;
        entity.attribute.set_default(AttributeKind::HealEfficiency, 50.0);
        entity.attribute.update_values();

        assert_eq!(entity.heal(40.0), 20.0);
        assert_eq!(entity.resources.life, 30.0);
    }

    #[test]
    fn gain_exp_levels_up_repeatedly() {
        let config = GameConfig::default();
        let mut entity = alice();

        // 50 for level 1, 200 for level 2
        let gained = entity.gain_exp(260.0, &config);
        assert_eq!(gained, 2);
        assert_eq!(entity.level, 3);
        assert_eq!(entity.exp, 10.0);
        assert_eq!(entity.stat.unspent, 2 * config.stat_points_per_level);
    }

    #[test]
    fn die_and_revive() {
        let mut entity = alice();
        entity.add_effect_unchecked(Effect::new(EffectKind::Poison, 1.0, 10.0));
        entity.shields.insert("barrier", Shield::new(5.0, 5.0));
        entity.resources.life = -3.0;

        entity.die(10.0);
        assert!(entity.is_dead());
        assert!(!entity.has_effect(EffectKind::Poison));
        assert!(entity.shields.is_empty());

        entity.revive();
        assert!(entity.is_alive());
        assert_eq!(entity.resources.life, 100.0);
    }

    #[test]
    fn messages_only_reach_players() {
        let mut monster = Entity::monster(EntityId(2), "wolf", MonsterState::new("wolf", 5.0));
        monster.send_message("hello");
        assert!(monster.drain_messages().is_empty());

        let mut player = alice();
        player.send_message("hello");
        assert_eq!(player.drain_messages(), vec!["hello"]);
    }
}
