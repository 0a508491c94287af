//! Equipment kinds and the per-entity equipment slot.

use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::instance::Item;
use super::ItemError;

/// Where an equipment item is worn.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumCount,
    EnumString,
    IntoStaticStr,
    strum::Display,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum EquipmentKind {
    Hand,
    Head,
    Body,
    Legs,
    Feet,
    Accessory,
}

impl EquipmentKind {
    /// Slots whose items wear down when their holder is hit.
    pub const ARMOR: [EquipmentKind; 5] = [
        Self::Head,
        Self::Body,
        Self::Legs,
        Self::Feet,
        Self::Accessory,
    ];

    pub fn all() -> impl Iterator<Item = EquipmentKind> {
        Self::iter()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One item per equipment kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EquipmentSlot {
    items: [Option<Item>; EquipmentKind::COUNT],
}

impl EquipmentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: EquipmentKind) -> Option<&Item> {
        self.items[kind.index()].as_ref()
    }

    pub fn get_mut(&mut self, kind: EquipmentKind) -> Option<&mut Item> {
        self.items[kind.index()].as_mut()
    }

    /// Equips `item` into its own kind's slot, returning the item it replaces.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, ItemError> {
        let kind = item
            .equipment_kind()
            .ok_or_else(|| ItemError::NotEquipment(item.name.clone()))?;
        Ok(self.items[kind.index()].replace(item))
    }

    pub fn unequip(&mut self, kind: EquipmentKind) -> Option<Item> {
        self.items[kind.index()].take()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EquipmentKind, &Item)> {
        EquipmentKind::all().filter_map(|kind| self.get(kind).map(|item| (kind, item)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.items.iter().all(Option::is_none)
    }

    /// Takes out every broken item.
    pub fn remove_broken(&mut self) -> Vec<Item> {
        let mut broken = Vec::new();
        for slot in self.items.iter_mut() {
            if slot.as_ref().is_some_and(Item::is_broken)
                && let Some(item) = slot.take()
            {
                broken.push(item);
            }
        }
        broken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Durability, ItemKind};

    fn sword() -> Item {
        Item::new("sword", ItemKind::Equipment(EquipmentKind::Hand))
    }

    #[test]
    fn equip_replaces_previous() {
        let mut slot = EquipmentSlot::new();
        assert_eq!(slot.equip(sword()), Ok(None));

        let mut axe = sword();
        axe.name = "axe".into();
        let previous = slot.equip(axe).unwrap();
        assert_eq!(previous.map(|i| i.name), Some("sword".to_string()));
        assert_eq!(slot.get(EquipmentKind::Hand).map(|i| i.name.as_str()), Some("axe"));
    }

    #[test]
    fn non_equipment_is_refused() {
        let mut slot = EquipmentSlot::new();
        let bread = Item::new("bread", ItemKind::Consumable);
        assert_eq!(
            slot.equip(bread),
            Err(ItemError::NotEquipment("bread".into()))
        );
    }

    #[test]
    fn broken_items_are_removed() {
        let mut slot = EquipmentSlot::new();
        let mut blade = sword();
        blade.durability = Some(Durability::new(1));
        slot.equip(blade).unwrap();

        assert!(slot.remove_broken().is_empty());
        if let Some(item) = slot.get_mut(EquipmentKind::Hand) {
            item.wear();
        }
        assert_eq!(slot.remove_broken().len(), 1);
        assert!(slot.is_empty());
    }
}
