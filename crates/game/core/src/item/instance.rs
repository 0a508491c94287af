use super::equipment::EquipmentKind;
use super::option::ItemOption;
use crate::effect::{Effect, EffectKind};
use crate::entity::Shield;
use crate::stats::{AttributeSet, Modifier};

/// What an item is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemKind {
    Equipment(EquipmentKind),
    Consumable,
    Material,
}

/// Wear counter of an equipment item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Durability {
    pub current: u32,
    pub max: u32,
}

impl Durability {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }
}

/// An effect granted when a consumable is used.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectGrant {
    pub kind: EffectKind,
    pub level: f64,
    pub duration: f64,
}

impl EffectGrant {
    pub fn to_effect(&self) -> Effect {
        Effect::new(self.kind, self.level, self.duration)
    }
}

/// A shield raised when a consumable is used, keyed by the item's name.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShieldGrant {
    pub amount: f64,
    pub duration: f64,
}

impl ShieldGrant {
    pub fn to_shield(&self) -> Shield {
        Shield::new(self.amount, self.duration)
    }
}

/// Restoration and effects applied by using a consumable.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumable {
    pub life: f64,
    pub mana: f64,
    pub water: f64,
    pub food: f64,
    pub effects: Vec<EffectGrant>,
    pub shield: Option<ShieldGrant>,
}

/// A live item instance, independently owned by whatever container holds it.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
    pub durability: Option<Durability>,
    pub modifiers: Vec<Modifier>,
    pub options: Vec<ItemOption>,
    pub consume: Option<Consumable>,
    pub count: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
            durability: None,
            modifiers: Vec::new(),
            options: Vec::new(),
            consume: None,
            count: 1,
        }
    }

    pub fn equipment_kind(&self) -> Option<EquipmentKind> {
        match self.kind {
            ItemKind::Equipment(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        self.durability.is_some_and(|d| d.current == 0)
    }

    /// Loses one durability point. Returns true if this broke the item.
    pub fn wear(&mut self) -> bool {
        match self.durability.as_mut() {
            Some(durability) if durability.current > 0 => {
                durability.current -= 1;
                durability.current == 0
            }
            _ => false,
        }
    }

    /// Equipment never stacks.
    pub fn is_stackable(&self) -> bool {
        !matches!(self.kind, ItemKind::Equipment(_))
    }

    pub fn stacks_with(&self, other: &Item) -> bool {
        self.is_stackable() && self.name == other.name && self.kind == other.kind
    }

    /// Counts down timed options and drops the expired ones.
    pub fn tick_options(&mut self, dt: f64) {
        for option in self.options.iter_mut() {
            option.tick(dt);
        }
        self.options.retain(|option| !option.is_expired());
    }

    /// Queues this item's modifiers. Broken items contribute nothing.
    pub fn apply_modifiers(&self, attributes: &mut AttributeSet) {
        if self.is_broken() {
            return;
        }
        attributes.extend_modifiers(&self.modifiers);
        for option in &self.options {
            if let Some(modifier) = option.update_modifier() {
                attributes.add_modifier(modifier);
            }
        }
    }

    /// Multi-line description listing durability and modifiers.
    pub fn describe(&self) -> String {
        let mut lines = vec![if self.count > 1 {
            format!("{} x{}", self.name, self.count)
        } else {
            self.name.clone()
        }];
        if let Some(durability) = self.durability {
            lines.push(format!("Durability {}/{}", durability.current, durability.max));
        }
        for modifier in &self.modifiers {
            lines.push(format!("{} {}", modifier.kind, modifier.to_token()));
        }
        for option in &self.options {
            lines.push(option.describe());
        }
        lines.join("\n")
    }

    pub fn to_data(&self) -> ItemData {
        ItemData {
            name: self.name.clone(),
            count: self.count,
            durability: self.durability.map(|d| d.current),
            options: self.options.clone(),
        }
    }
}

/// Plain-data projection of an [`Item`].
///
/// Only per-instance state is stored; everything else is rebuilt from the
/// item catalog by name.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemData {
    pub name: String,
    pub count: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<ItemOption>,
}
