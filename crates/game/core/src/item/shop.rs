//! Buying and selling.

use super::catalog::ItemCatalog;
use super::inventory::Inventory;
use crate::error::CoreError;

/// Outcome of a shop transaction. Every variant other than `Success` leaves
/// gold, stock and inventory untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShopState {
    Success,
    ItemNotFound,
    GoldNotEnough,
    FullInventorySpace,
    OutOfStock,
}

impl ShopState {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Success => "Thank you for your business.",
            Self::ItemNotFound => "That item is not sold here.",
            Self::GoldNotEnough => "You do not have enough gold.",
            Self::FullInventorySpace => "Your inventory is full.",
            Self::OutOfStock => "That item is out of stock.",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopEntry {
    pub item: String,
    pub price: u64,
    /// Units left, or `None` for unlimited stock.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stock: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shop {
    pub name: String,
    pub entries: Vec<ShopEntry>,
}

impl Shop {
    pub fn new(name: impl Into<String>, entries: Vec<ShopEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn entry(&self, item: &str) -> Option<&ShopEntry> {
        self.entries.iter().find(|e| e.item == item)
    }

    /// Sells one unit of `item` to a player.
    ///
    /// Checks run in a fixed order: listing, stock, gold, inventory space.
    /// An entry whose item is missing from the catalog is a content bug.
    pub fn buy(
        &mut self,
        catalog: &ItemCatalog,
        item: &str,
        gold: &mut u64,
        inventory: &mut Inventory,
    ) -> Result<ShopState, CoreError> {
        let Some(entry) = self.entries.iter_mut().find(|e| e.item == item) else {
            return Ok(ShopState::ItemNotFound);
        };
        if entry.stock == Some(0) {
            return Ok(ShopState::OutOfStock);
        }
        if *gold < entry.price {
            return Ok(ShopState::GoldNotEnough);
        }
        let instance = catalog.instantiate(&entry.item)?;
        if !inventory.can_accept(&instance) {
            return Ok(ShopState::FullInventorySpace);
        }
        if inventory.add(instance).is_err() {
            return Ok(ShopState::FullInventorySpace);
        }
        *gold -= entry.price;
        if let Some(stock) = entry.stock.as_mut() {
            *stock -= 1;
        }
        Ok(ShopState::Success)
    }

    /// Buys one unit of `item` back from a player for half its price.
    pub fn sell(&mut self, item: &str, gold: &mut u64, inventory: &mut Inventory) -> ShopState {
        let Some(entry) = self.entries.iter_mut().find(|e| e.item == item) else {
            return ShopState::ItemNotFound;
        };
        let Some(index) = inventory.find(item) else {
            return ShopState::ItemNotFound;
        };
        if inventory.take_one(index).is_none() {
            return ShopState::ItemNotFound;
        }
        *gold = gold.saturating_add(entry.price / 2);
        if let Some(stock) = entry.stock.as_mut() {
            *stock = stock.saturating_add(1);
        }
        ShopState::Success
    }
}
