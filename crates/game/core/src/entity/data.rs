//! Plain-data projection of a player for persistence.
//!
//! Everything is keyed by stable names. Restoring is all-or-nothing: the
//! first malformed field fails the whole load, while unknown attribute,
//! effect and item names are dropped.

use std::collections::BTreeMap;

use super::id::EntityId;
use super::kinds::PlayerState;
use super::model::Entity;
use super::resources::Resources;
use super::shield::{Shield, Shields};
use crate::effect::{EffectData, EffectRegistry};
use crate::error::{CoreError, DataError, ensure_finite};
use crate::item::{EquipmentKind, Inventory, ItemCatalog, ItemData};
use crate::stats::{AttributeSet, Stat};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerData {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    pub level: u32,
    pub exp: f64,
    pub resources: Resources,
    pub attributes: BTreeMap<String, f64>,
    pub stat: Stat,
    #[cfg_attr(feature = "serde", serde(default))]
    pub shields: BTreeMap<String, Shield>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<EffectData>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: BTreeMap<String, ItemData>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<ItemData>,
    pub gold: u64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dead_time: f64,
}

impl Entity {
    pub fn to_player_data(&self) -> Result<PlayerData, CoreError> {
        let player = self
            .as_player()
            .ok_or(CoreError::WrongEntityKind(self.id, "player"))?;
        Ok(PlayerData {
            name: self.name.clone(),
            location: self.location.clone(),
            level: self.level,
            exp: self.exp,
            resources: self.resources.clone(),
            attributes: self.attribute.to_data(),
            stat: self.stat.clone(),
            shields: self.shields.to_data(),
            effects: player.living.effects.to_data(),
            equipment: self
                .slot
                .iter()
                .map(|(kind, item)| (kind.name().to_string(), item.to_data()))
                .collect(),
            inventory: player.inventory.to_data(),
            gold: player.gold,
            dead_time: self.dead_time,
        })
    }

    pub fn from_player_data(
        id: EntityId,
        data: &PlayerData,
        catalog: &ItemCatalog,
    ) -> Result<Self, DataError> {
        let resources = Resources {
            life: ensure_finite("resources.life", data.resources.life)?,
            mana: ensure_finite("resources.mana", data.resources.mana)?,
            air: ensure_finite("resources.air", data.resources.air)?,
            water: ensure_finite("resources.water", data.resources.water)?,
            food: ensure_finite("resources.food", data.resources.food)?,
        };
        let exp = ensure_finite("exp", data.exp)?;
        if exp < 0.0 {
            return Err(DataError::OutOfRange { field: "exp", value: exp });
        }
        let dead_time = ensure_finite("dead_time", data.dead_time)?;
        let attribute = AttributeSet::from_data(&data.attributes)?;
        let shields = Shields::from_data(&data.shields)?;
        let effects = EffectRegistry::from_data(&data.effects)?;

        let mut entity = Entity::player(id, data.name.clone(), PlayerState::default());
        for (slot_name, item_data) in &data.equipment {
            let kind: EquipmentKind = slot_name
                .parse()
                .map_err(|_| DataError::UnknownEquipmentKind(slot_name.clone()))?;
            let Some(item) = catalog.restore(item_data) else {
                continue;
            };
            if item.equipment_kind() != Some(kind) {
                return Err(DataError::SlotMismatch {
                    name: item.name,
                    slot: slot_name.clone(),
                });
            }
            entity
                .slot
                .equip(item)
                .map_err(|_| DataError::SlotMismatch {
                    name: item_data.name.clone(),
                    slot: slot_name.clone(),
                })?;
        }
        let items = data
            .inventory
            .iter()
            .filter_map(|item| catalog.restore(item))
            .collect();
        let inventory = Inventory::from_items(items)?;

        entity.location = data.location.clone();
        entity.level = data.level.max(1);
        entity.exp = exp;
        entity.resources = resources;
        entity.attribute = attribute;
        entity.stat = data.stat.clone();
        entity.shields = shields;
        entity.dead_time = dead_time.max(0.0);
        if let Some(player) = entity.as_player_mut() {
            player.living.effects = effects;
            player.inventory = inventory;
            player.gold = data.gold;
        }
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Effect, EffectKind};
    use crate::item::{ItemKind, ItemPreset};
    use crate::stats::AttributeKind;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_presets([
            ItemPreset {
                name: "cap".into(),
                kind: ItemKind::Equipment(EquipmentKind::Head),
                durability: Some(10),
                modifiers: BTreeMap::from([("DEFEND".to_string(), "+3".to_string())]),
                options: Vec::new(),
                consume: None,
            },
            ItemPreset {
                name: "apple".into(),
                kind: ItemKind::Consumable,
                durability: None,
                modifiers: BTreeMap::new(),
                options: Vec::new(),
                consume: None,
            },
        ])
        .unwrap()
    }

    fn sample(catalog: &ItemCatalog) -> Entity {
        let mut entity = Entity::player(EntityId(4), "alice", PlayerState::default())
            .with_location("village");
        entity.level = 3;
        entity.exp = 12.5;
        entity.resources.life = 61.0;
        entity.attribute.set_default(AttributeKind::Attack, 15.0);
        entity.stat.strength = 2;
        entity.shields.insert("ward", Shield::new(10.0, 4.0));
        entity.add_effect_unchecked(Effect::new(EffectKind::Might, 1.0, 30.0));
        entity.slot.equip(catalog.instantiate("cap").unwrap()).unwrap();
        if let Some(player) = entity.as_player_mut() {
            player.gold = 77;
            let mut apples = catalog.instantiate("apple").unwrap();
            apples.count = 3;
            player.inventory.add(apples).unwrap();
        }
        entity
    }

    #[test]
    fn round_trip_restores_player() {
        let catalog = catalog();
        let entity = sample(&catalog);

        let data = entity.to_player_data().unwrap();
        let restored = Entity::from_player_data(EntityId(9), &data, &catalog).unwrap();

        assert_eq!(restored.to_player_data().unwrap(), data);
        assert_eq!(restored.attribute.get_default(AttributeKind::Attack), 15.0);
        assert_eq!(restored.location.as_deref(), Some("village"));
    }

    #[test]
    fn corrupt_record_fails_whole_load() {
        let catalog = catalog();
        let mut data = sample(&catalog).to_player_data().unwrap();
        data.resources.mana = f64::NAN;
        assert!(Entity::from_player_data(EntityId(1), &data, &catalog).is_err());

        let mut data = sample(&catalog).to_player_data().unwrap();
        let cap = data.equipment.remove("HEAD").unwrap();
        data.equipment.insert("FEET".into(), cap);
        assert!(matches!(
            Entity::from_player_data(EntityId(1), &data, &catalog),
            Err(DataError::SlotMismatch { .. })
        ));
    }

    #[test]
    fn unknown_names_are_dropped() {
        let catalog = catalog();
        let mut data = sample(&catalog).to_player_data().unwrap();
        data.attributes.insert("LUCK".into(), 7.0);
        data.inventory[0].name = "mystery".into();

        let restored = Entity::from_player_data(EntityId(1), &data, &catalog).unwrap();
        let player = restored.as_player().unwrap();
        assert!(player.inventory.is_empty());
        assert_eq!(player.gold, 77);
    }

    #[test]
    fn monsters_have_no_player_projection() {
        let monster = Entity::monster(
            EntityId(3),
            "wolf",
            crate::entity::MonsterState::new("wolf", 1.0),
        );
        assert_eq!(
            monster.to_player_data(),
            Err(CoreError::WrongEntityKind(EntityId(3), "player"))
        );
    }
}
