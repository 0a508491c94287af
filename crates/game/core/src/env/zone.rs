use std::collections::BTreeMap;

/// Rules attached to a location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub name: String,
    /// Player-vs-player combat and hostile player debuffs are refused here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub peaceful: bool,
}

impl Zone {
    pub fn new(name: impl Into<String>, peaceful: bool) -> Self {
        Self {
            name: name.into(),
            peaceful,
        }
    }
}

/// Resolves a location name to its zone.
pub trait ZoneOracle: Send + Sync {
    fn zone(&self, location: &str) -> Option<Zone>;

    fn is_peaceful(&self, location: &str) -> bool {
        self.zone(location).is_some_and(|z| z.peaceful)
    }
}

/// In-memory zone table keyed by location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZoneTable {
    zones: BTreeMap<String, Zone>,
}

impl ZoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, zone: Zone) {
        self.zones.insert(location.into(), zone);
    }

    pub fn with(mut self, location: impl Into<String>, zone: Zone) -> Self {
        self.insert(location, zone);
        self
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<(String, Zone)> for ZoneTable {
    fn from_iter<T: IntoIterator<Item = (String, Zone)>>(iter: T) -> Self {
        Self {
            zones: iter.into_iter().collect(),
        }
    }
}

impl ZoneOracle for ZoneTable {
    fn zone(&self, location: &str) -> Option<Zone> {
        self.zones.get(location).cloned()
    }
}
