use arrayvec::ArrayVec;

use super::instance::{Item, ItemData};
use crate::config::GameConfig;

/// Fixed-capacity item storage of a player. Stackable items with the same
/// name share one slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inventory {
    slots: ArrayVec<Item, { GameConfig::MAX_INVENTORY_SLOTS }>,
}

impl Inventory {
    pub const CAPACITY: usize = GameConfig::MAX_INVENTORY_SLOTS;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.is_full()
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Item> {
        self.slots.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.slots.iter()
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.slots.iter().position(|item| item.name == name)
    }

    /// Total units held under `name`.
    pub fn count_of(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .filter(|item| item.name == name)
            .map(|item| item.count)
            .sum()
    }

    /// True if `item` would fit, either by stacking or in a free slot.
    pub fn can_accept(&self, item: &Item) -> bool {
        !self.is_full() || self.slots.iter().any(|held| held.stacks_with(item))
    }

    /// Adds `item`, handing it back when there is no room.
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if let Some(held) = self.slots.iter_mut().find(|held| held.stacks_with(&item)) {
            held.count = held.count.saturating_add(item.count);
            return Ok(());
        }
        self.slots.try_push(item).map_err(|err| err.element())
    }

    /// Removes the whole stack at `index`.
    pub fn take(&mut self, index: usize) -> Option<Item> {
        (index < self.slots.len()).then(|| self.slots.remove(index))
    }

    /// Removes a single unit from the stack at `index`.
    pub fn take_one(&mut self, index: usize) -> Option<Item> {
        let held = self.slots.get_mut(index)?;
        if held.count > 1 {
            held.count -= 1;
            let mut unit = held.clone();
            unit.count = 1;
            Some(unit)
        } else {
            self.take(index)
        }
    }

    pub fn to_data(&self) -> Vec<ItemData> {
        self.slots.iter().map(Item::to_data).collect()
    }

    /// Rebuilds an inventory from already restored items.
    pub(crate) fn from_items(items: Vec<Item>) -> Result<Self, crate::error::DataError> {
        if items.len() > Self::CAPACITY {
            return Err(crate::error::DataError::InventoryOverflow {
                count: items.len(),
                capacity: Self::CAPACITY,
            });
        }
        let mut inventory = Self::new();
        inventory.slots.extend(items);
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{EquipmentKind, ItemKind};

    fn potion() -> Item {
        Item::new("potion", ItemKind::Consumable)
    }

    #[test]
    fn stackables_share_a_slot() {
        let mut inventory = Inventory::new();
        inventory.add(potion()).unwrap();
        inventory.add(potion()).unwrap();

        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory.count_of("potion"), 2);

        let unit = inventory.take_one(0).unwrap();
        assert_eq!(unit.count, 1);
        assert_eq!(inventory.count_of("potion"), 1);
        inventory.take_one(0).unwrap();
        assert!(inventory.is_empty());
    }

    #[test]
    fn equipment_never_stacks_and_overflow_is_returned() {
        let mut inventory = Inventory::new();
        for _ in 0..Inventory::CAPACITY {
            inventory
                .add(Item::new("ring", ItemKind::Equipment(EquipmentKind::Accessory)))
                .unwrap();
        }
        assert!(inventory.is_full());

        let extra = Item::new("ring", ItemKind::Equipment(EquipmentKind::Accessory));
        assert!(!inventory.can_accept(&extra));
        let back = inventory.add(extra).unwrap_err();
        assert_eq!(back.name, "ring");
    }
}
