//! Item presets and instantiation.

use std::collections::BTreeMap;

use super::instance::{Consumable, Durability, Item, ItemData, ItemKind};
use super::option::ItemOption;
use crate::error::CoreError;
use crate::stats::{ModifierParseError, parse_modifiers};

/// Content-side description of an item, with modifiers still in their
/// textual form.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemPreset {
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub durability: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: BTreeMap<String, String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: Vec<ItemOption>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub consume: Option<Consumable>,
}

/// Immutable item templates keyed by name.
///
/// Every instance handed out is a deep copy; nothing a player does to an item
/// can reach back into its template.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    templates: BTreeMap<String, Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_presets(
        presets: impl IntoIterator<Item = ItemPreset>,
    ) -> Result<Self, ModifierParseError> {
        let mut catalog = Self::new();
        for preset in presets {
            catalog.insert_preset(preset)?;
        }
        Ok(catalog)
    }

    pub fn insert_preset(&mut self, preset: ItemPreset) -> Result<(), ModifierParseError> {
        let modifiers = parse_modifiers(
            preset
                .modifiers
                .iter()
                .map(|(kind, raw)| (kind.as_str(), raw.as_str())),
        )?;
        let item = Item {
            name: preset.name.clone(),
            kind: preset.kind,
            durability: preset.durability.map(Durability::new),
            modifiers,
            options: preset.options,
            consume: preset.consume,
            count: 1,
        };
        self.templates.insert(preset.name, item);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    /// Creates a fresh instance of the named preset.
    ///
    /// An unknown name is a content bug and fails loudly.
    pub fn instantiate(&self, name: &str) -> Result<Item, CoreError> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::UnknownItem {
                name: name.to_string(),
            })
    }

    /// Rebuilds a persisted item on top of its current template. Items whose
    /// preset no longer exists are dropped.
    pub fn restore(&self, data: &ItemData) -> Option<Item> {
        let Some(mut item) = self.templates.get(&data.name).cloned() else {
            tracing::debug!(item = %data.name, "dropping item with unknown preset");
            return None;
        };
        item.count = data.count.max(1);
        if let (Some(durability), Some(current)) = (item.durability.as_mut(), data.durability) {
            durability.current = current.min(durability.max);
        }
        item.options = data.options.clone();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::EquipmentKind;
    use crate::stats::AttributeKind;

    fn catalog() -> ItemCatalog {
        let sword = ItemPreset {
            name: "iron sword".into(),
            kind: ItemKind::Equipment(EquipmentKind::Hand),
            durability: Some(50),
            modifiers: BTreeMap::from([("ATTACK".to_string(), "+12 10%".to_string())]),
            options: Vec::new(),
            consume: None,
        };
        ItemCatalog::from_presets([sword]).unwrap()
    }

    #[test]
    fn instantiate_parses_modifiers() {
        let item = catalog().instantiate("iron sword").unwrap();
        assert_eq!(item.modifiers.len(), 2);
        assert_eq!(item.modifiers[0].kind, AttributeKind::Attack);
        assert!(item.modifiers[1].is_multiplier);
        assert_eq!(item.durability, Some(Durability::new(50)));
    }

    #[test]
    fn unknown_name_fails_loudly() {
        let err = catalog().instantiate("excalibur").unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownItem {
                name: "excalibur".into()
            }
        );
    }

    #[test]
    fn restore_applies_instance_state() {
        let catalog = catalog();
        let mut item = catalog.instantiate("iron sword").unwrap();
        item.wear();

        let restored = catalog.restore(&item.to_data()).unwrap();
        assert_eq!(restored, item);

        let mut data = item.to_data();
        data.name = "retired blade".into();
        assert!(catalog.restore(&data).is_none());
    }

    #[test]
    fn bad_modifier_rejects_the_preset() {
        let preset = ItemPreset {
            name: "broken".into(),
            kind: ItemKind::Material,
            durability: None,
            modifiers: BTreeMap::from([("LUCK".to_string(), "+1".to_string())]),
            options: Vec::new(),
            consume: None,
        };
        assert!(ItemCatalog::from_presets([preset]).is_err());
    }
}
