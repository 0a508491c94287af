//! Items, equipment, inventories and shops.

pub mod catalog;
pub mod equipment;
mod instance;
pub mod inventory;
pub mod option;
pub mod shop;

pub use catalog::{ItemCatalog, ItemPreset};
pub use equipment::{EquipmentKind, EquipmentSlot};
pub use instance::{Consumable, Durability, EffectGrant, Item, ItemData, ItemKind, ShieldGrant};
pub use inventory::Inventory;
pub use option::{ItemOption, ItemOptionKind};
pub use shop::{Shop, ShopEntry, ShopState};

use crate::error::{ErrorSeverity, GameError};

/// Refusals raised by item handling.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("`{0}` cannot be equipped")]
    NotEquipment(String),

    #[error("`{0}` cannot be used")]
    NotConsumable(String),

    #[error("inventory slot {0} is empty")]
    EmptySlot(usize),

    #[error("inventory is full")]
    InventoryFull,

    #[error("the dead cannot use items")]
    Dead,

    #[error("entity has no inventory")]
    NoInventory,
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoInventory => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotEquipment(_) => "NOT_EQUIPMENT",
            Self::NotConsumable(_) => "NOT_CONSUMABLE",
            Self::EmptySlot(_) => "EMPTY_SLOT",
            Self::InventoryFull => "INVENTORY_FULL",
            Self::Dead => "DEAD",
            Self::NoInventory => "NO_INVENTORY",
        }
    }
}
