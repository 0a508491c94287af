//! Player-facing commands.
//!
//! Expected refusals come back as values (`ShopState`) or as recoverable
//! errors (`StatError`, `ItemError`); only content and programmer bugs
//! surface as [`CoreError`].

use super::World;
use crate::combat::AttackOptions;
use crate::entity::{Entity, EntityId, ProjectileState};
use crate::error::{CoreError, ErrorSeverity, GameError};
use crate::item::{EquipmentKind, ItemCatalog, ItemError, ItemKind, Shop, ShopState};
use crate::stats::{AttributeKind, StatError, StatKind};

/// Attributes a projectile copies from its owner at launch.
const PROJECTILE_SNAPSHOT: [AttributeKind; 7] = [
    AttributeKind::Attack,
    AttributeKind::MagicAttack,
    AttributeKind::Penetration,
    AttributeKind::MagicPenetration,
    AttributeKind::CriticalChance,
    AttributeKind::CriticalDamage,
    AttributeKind::MoveSpeed,
];

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Stat(#[from] StatError),

    #[error(transparent)]
    Item(#[from] ItemError),
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Core(e) => e.severity(),
            Self::Stat(e) => e.severity(),
            Self::Item(e) => e.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Core(e) => e.error_code(),
            Self::Stat(e) => e.error_code(),
            Self::Item(e) => e.error_code(),
        }
    }
}

/// What using an inventory item did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ItemUse {
    Equipped {
        item: String,
        replaced: Option<String>,
    },
    Consumed {
        item: String,
    },
}

impl World {
    fn entity_or_err(&mut self, id: EntityId) -> Result<&mut Entity, CoreError> {
        self.get_mut(id).ok_or(CoreError::UnknownEntity(id))
    }

    /// Moves unspent stat points into `kind`.
    pub fn allocate_stat(
        &mut self,
        id: EntityId,
        kind: StatKind,
        amount: u32,
    ) -> Result<(), CommandError> {
        let entity = self.entity_or_err(id)?;
        entity.stat.allocate(kind, amount)?;
        entity.send_message(format!("{kind} +{amount}"));
        Ok(())
    }

    /// Uses the inventory item at `index`: equipment is equipped (the
    /// replaced item goes back to the inventory), consumables are consumed.
    pub fn use_item(&mut self, id: EntityId, index: usize) -> Result<ItemUse, CommandError> {
        let entity = self.entity_or_err(id)?;
        if entity.is_dead() {
            return Err(ItemError::Dead.into());
        }
        let player = entity.as_player().ok_or(ItemError::NoInventory)?;
        let item = player.inventory.get(index).ok_or(ItemError::EmptySlot(index))?;
        let (kind, consumable) = (item.kind, item.consume.is_some());
        let name = item.name.clone();

        match kind {
            ItemKind::Equipment(_) => self.equip_from_inventory(id, index),
            ItemKind::Consumable if consumable => self.consume(id, index),
            _ => Err(ItemError::NotConsumable(name).into()),
        }
    }

    fn equip_from_inventory(&mut self, id: EntityId, index: usize) -> Result<ItemUse, CommandError> {
        let entity = self.entity_or_err(id)?;
        let Entity { kind, slot, .. } = &mut *entity;
        let player = match kind {
            crate::entity::EntityKind::Player(player) => player,
            _ => return Err(ItemError::NoInventory.into()),
        };
        let item = player
            .inventory
            .take(index)
            .ok_or(ItemError::EmptySlot(index))?;
        let name = item.name.clone();
        let replaced = slot.equip(item)?;
        let replaced_name = replaced.as_ref().map(|r| r.name.clone());
        if let Some(previous) = replaced
            && let Err(previous) = player.inventory.add(previous)
        {
            // a slot was just freed, so this only happens on a corrupted inventory
            tracing::warn!(entity = %id, item = %previous.name, "no room for unequipped item");
        }
        entity.send_message(format!("You equipped {name}."));
        Ok(ItemUse::Equipped {
            item: name,
            replaced: replaced_name,
        })
    }

    fn consume(&mut self, id: EntityId, index: usize) -> Result<ItemUse, CommandError> {
        let entity = self.entity_or_err(id)?;
        let item = entity
            .as_player_mut()
            .and_then(|p| p.inventory.take_one(index))
            .ok_or(ItemError::EmptySlot(index))?;
        let Some(consume) = item.consume.as_ref() else {
            return Err(ItemError::NotConsumable(item.name.clone()).into());
        };

        entity.heal(consume.life);
        entity.resources.mana += consume.mana;
        entity.resources.water += consume.water;
        entity.resources.food += consume.food;
        entity.resources.clamp_to(&entity.attribute);
        entity.send_message(format!("You used {}.", item.name));
        if let Some(grant) = consume.shield
            && !entity.add_shield(item.name.clone(), grant.to_shield())
        {
            entity.send_message("You cannot hold another shield.");
        }

        for grant in &consume.effects {
            self.add_effect(id, grant.to_effect());
        }
        Ok(ItemUse::Consumed { item: item.name })
    }

    /// Moves the item in `kind` back to the inventory.
    pub fn unequip(&mut self, id: EntityId, kind: EquipmentKind) -> Result<(), CommandError> {
        let entity = self.entity_or_err(id)?;
        let Entity {
            kind: entity_kind,
            slot,
            ..
        } = &mut *entity;
        let player = match entity_kind {
            crate::entity::EntityKind::Player(player) => player,
            _ => return Err(ItemError::NoInventory.into()),
        };
        let Some(item) = slot.get(kind) else {
            return Err(ItemError::NotEquipment(kind.name().to_string()).into());
        };
        if !player.inventory.can_accept(item) {
            return Err(ItemError::InventoryFull.into());
        }
        if let Some(item) = slot.unequip(kind)
            && let Err(item) = player.inventory.add(item)
        {
            slot.equip(item)?;
            return Err(ItemError::InventoryFull.into());
        }
        Ok(())
    }

    /// Buys one unit of `item` from `shop` for player `id`.
    pub fn buy(
        &mut self,
        id: EntityId,
        shop: &mut Shop,
        catalog: &ItemCatalog,
        item: &str,
    ) -> Result<ShopState, CommandError> {
        let entity = self.entity_or_err(id)?;
        let player = entity
            .as_player_mut()
            .ok_or(CoreError::WrongEntityKind(id, "player"))?;
        let state = shop.buy(catalog, item, &mut player.gold, &mut player.inventory)?;
        entity.send_message(state.message());
        Ok(state)
    }

    pub fn sell(&mut self, id: EntityId, shop: &mut Shop, item: &str) -> Result<ShopState, CommandError> {
        let entity = self.entity_or_err(id)?;
        let player = entity
            .as_player_mut()
            .ok_or(CoreError::WrongEntityKind(id, "player"))?;
        let state = shop.sell(item, &mut player.gold, &mut player.inventory);
        entity.send_message(state.message());
        Ok(state)
    }

    /// Launches a projectile from `owner` at `target`. It strikes during the
    /// next update phase using the owner's offensive attributes as they are
    /// now.
    pub fn spawn_projectile(
        &mut self,
        owner: EntityId,
        target: EntityId,
        options: AttackOptions,
    ) -> Result<EntityId, CoreError> {
        let source = self.get(owner).ok_or(CoreError::UnknownEntity(owner))?;
        let name = format!("{}'s projectile", source.name);
        let location = source.location.clone();
        let snapshot: Vec<(AttributeKind, f64)> = PROJECTILE_SNAPSHOT
            .iter()
            .map(|kind| (*kind, source.attribute.get_value(*kind)))
            .collect();

        Ok(self.spawn(|id| {
            let mut projectile =
                Entity::projectile(id, name, ProjectileState::new(owner, target, options));
            projectile.location = location;
            for (kind, value) in snapshot {
                projectile.attribute.set_default(kind, value);
            }
            projectile.attribute.update_values();
            projectile
        }))
    }

    /// Multi-line status of an entity.
    pub fn status(&self, id: EntityId) -> Option<String> {
        self.get(id).map(Entity::status_text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::effect::EffectKind;
    use crate::env::{Env, Zone, ZoneTable};
    use crate::config::GameConfig;
    use crate::entity::Shield;
    use crate::item::{Consumable, EffectGrant, ItemPreset, ShieldGrant, ShopEntry};
    use crate::rng::ScriptedRng;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_presets([
            ItemPreset {
                name: "stew".into(),
                kind: ItemKind::Consumable,
                durability: None,
                modifiers: BTreeMap::new(),
                options: Vec::new(),
                consume: Some(Consumable {
                    life: 30.0,
                    food: 50.0,
                    effects: vec![EffectGrant {
                        kind: EffectKind::Regeneration,
                        level: 1.0,
                        duration: 5.0,
                    }],
                    ..Consumable::default()
                }),
            },
            ItemPreset {
                name: "ward scroll".into(),
                kind: ItemKind::Consumable,
                durability: None,
                modifiers: BTreeMap::new(),
                options: Vec::new(),
                consume: Some(Consumable {
                    shield: Some(ShieldGrant {
                        amount: 40.0,
                        duration: 20.0,
                    }),
                    ..Consumable::default()
                }),
            },
            ItemPreset {
                name: "club".into(),
                kind: ItemKind::Equipment(EquipmentKind::Hand),
                durability: Some(20),
                modifiers: BTreeMap::from([("ATTACK".to_string(), "+5".to_string())]),
                options: Vec::new(),
                consume: None,
            },
        ])
        .unwrap()
    }

    fn world() -> World {
        let env = Env::with_zones(ZoneTable::new().with("field", Zone::new("Field", false)));
        let mut world = World::seeded(env, 1);
        world.set_rng(Box::new(ScriptedRng::constant(0.5)));
        world
    }

    fn give(world: &mut World, id: EntityId, item: &str) {
        let item = catalog().instantiate(item).unwrap();
        let player = world.get_mut(id).and_then(Entity::as_player_mut).unwrap();
        player.inventory.add(item).unwrap();
    }

    #[test]
    fn consuming_restores_and_grants_effects() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        give(&mut world, id, "stew");
        {
            let entity = world.get_mut(id).unwrap();
            entity.resources.life = 40.0;
            entity.resources.food = 10.0;
        }

        let used = world.use_item(id, 0).unwrap();
        assert_eq!(used, ItemUse::Consumed { item: "stew".into() });

        let entity = world.get(id).unwrap();
        assert_eq!(entity.resources.life, 70.0);
        assert_eq!(entity.resources.food, 60.0);
        assert!(entity.has_effect(EffectKind::Regeneration));
        assert!(entity.as_player().unwrap().inventory.is_empty());
    }

    #[test]
    fn ward_scroll_raises_a_shield() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        give(&mut world, id, "ward scroll");

        world.use_item(id, 0).unwrap();
        let entity = world.get(id).unwrap();
        assert_eq!(
            entity.shields.get("ward scroll"),
            Some(&Shield::new(40.0, 20.0))
        );

        world.get_mut(id).unwrap().damage(15.0, None);
        assert_eq!(world.get(id).unwrap().resources.life, 100.0);
    }

    #[test]
    fn ward_scroll_is_spent_even_when_shields_are_full() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        {
            let entity = world.get_mut(id).unwrap();
            for i in 0..GameConfig::MAX_SHIELDS {
                assert!(entity.add_shield(format!("old{i}"), Shield::new(1.0, 60.0)));
            }
            entity.drain_messages();
        }
        give(&mut world, id, "ward scroll");

        world.use_item(id, 0).unwrap();
        let entity = world.get_mut(id).unwrap();
        assert_eq!(entity.shields.len(), GameConfig::MAX_SHIELDS);
        assert!(entity.shields.get("ward scroll").is_none());
        assert!(entity.as_player().unwrap().inventory.is_empty());
        assert!(
            entity
                .drain_messages()
                .iter()
                .any(|m| m == "You cannot hold another shield.")
        );
    }

    #[test]
    fn equipping_swaps_with_inventory() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        give(&mut world, id, "club");
        give(&mut world, id, "club");

        world.use_item(id, 0).unwrap();
        let second = world.use_item(id, 0).unwrap();
        assert_eq!(
            second,
            ItemUse::Equipped {
                item: "club".into(),
                replaced: Some("club".into())
            }
        );
        let entity = world.get(id).unwrap();
        assert_eq!(entity.as_player().unwrap().inventory.len(), 1);

        world.step();
        assert_eq!(
            world.get(id).unwrap().attribute.get_value(AttributeKind::Attack),
            15.0
        );

        world.unequip(id, EquipmentKind::Hand).unwrap();
        assert_eq!(world.get(id).unwrap().as_player().unwrap().inventory.len(), 2);
    }

    #[test]
    fn item_refusals() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        assert_eq!(
            world.use_item(id, 3),
            Err(CommandError::Item(ItemError::EmptySlot(3)))
        );

        give(&mut world, id, "stew");
        world.get_mut(id).unwrap().resources.life = -1.0;
        assert_eq!(world.use_item(id, 0), Err(CommandError::Item(ItemError::Dead)));

        assert_eq!(
            world.use_item(EntityId(99), 0),
            Err(CommandError::Core(CoreError::UnknownEntity(EntityId(99))))
        );
    }

    #[test]
    fn allocation_applies_next_tick() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        world.get_mut(id).unwrap().stat.grant(3);

        world.allocate_stat(id, StatKind::Strength, 3).unwrap();
        assert_eq!(
            world.get(id).unwrap().attribute.get_value(AttributeKind::Attack),
            10.0
        );
        world.step();
        assert_eq!(
            world.get(id).unwrap().attribute.get_value(AttributeKind::Attack),
            16.0
        );

        let err = world.allocate_stat(id, StatKind::Sense, 1).unwrap_err();
        assert_eq!(err.error_code(), "NOT_ENOUGH_POINTS");
        assert!(err.severity().is_recoverable());
    }

    #[test]
    fn shop_through_world() {
        let mut world = world();
        let id = world.spawn_player("alice", "field");
        let mut shop = Shop::new(
            "tavern",
            vec![ShopEntry {
                item: "stew".into(),
                price: 8,
                stock: None,
            }],
        );
        let catalog = catalog();

        assert_eq!(
            world.buy(id, &mut shop, &catalog, "stew"),
            Ok(ShopState::GoldNotEnough)
        );
        world.get_mut(id).and_then(Entity::as_player_mut).unwrap().gold = 10;
        assert_eq!(world.buy(id, &mut shop, &catalog, "stew"), Ok(ShopState::Success));
        assert_eq!(world.sell(id, &mut shop, "stew"), Ok(ShopState::Success));
        assert_eq!(world.get(id).unwrap().as_player().unwrap().gold, 6);
    }

    #[test]
    fn projectile_snapshots_owner_and_expires() {
        let mut world = world();
        let owner = world.spawn_player("alice", "field");
        let target = world.spawn_player("bob", "field");
        world
            .get_mut(owner)
            .unwrap()
            .attribute
            .set_default(AttributeKind::Attack, 42.0);
        world.get_mut(owner).unwrap().attribute.update_values();

        let arrow = world
            .spawn_projectile(owner, target, AttackOptions::new().absolute())
            .unwrap();
        assert_eq!(
            world.get(arrow).unwrap().attribute.get_value(AttributeKind::Attack),
            42.0
        );

        world.step();
        assert!(!world.contains(arrow));
        assert!(world.get(target).unwrap().resources.life < 100.0);
        assert_eq!(world.get(target).unwrap().latest_abuser, Some(owner));
    }
}
