//! Named damage-absorbing shields.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::error::{DataError, ensure_finite};

/// A timed pool of absorption.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shield {
    pub amount: f64,
    /// Remaining seconds.
    pub duration: f64,
}

impl Shield {
    pub fn new(amount: f64, duration: f64) -> Self {
        Self { amount, duration }
    }

    fn is_spent(&self) -> bool {
        self.amount <= 0.0 || self.duration <= 0.0
    }
}

/// Shields keyed by source name. Iteration (and therefore drain) order is
/// key order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shields {
    entries: BTreeMap<String, Shield>,
}

impl Shields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the shield stored under `key`.
    ///
    /// Returns false, leaving the set untouched, when `key` is new and
    /// [`GameConfig::MAX_SHIELDS`] shields are already active.
    pub fn insert(&mut self, key: impl Into<String>, shield: Shield) -> bool {
        let key = key.into();
        if !self.entries.contains_key(&key) && self.entries.len() >= GameConfig::MAX_SHIELDS {
            return false;
        }
        self.entries.insert(key, shield);
        true
    }

    pub fn get(&self, key: &str) -> Option<&Shield> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Shield> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Shield)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Total absorption left across all shields.
    pub fn total(&self) -> f64 {
        self.entries.values().map(|s| s.amount.max(0.0)).sum()
    }

    /// Drains `damage` through the shields and returns what is left over.
    ///
    /// Each shield absorbs up to its remaining amount; exhausted shields are
    /// deleted.
    pub fn absorb(&mut self, damage: f64) -> f64 {
        let mut remaining = damage;
        for shield in self.entries.values_mut() {
            if remaining <= 0.0 {
                break;
            }
            let absorbed = remaining.min(shield.amount);
            shield.amount -= absorbed;
            remaining -= absorbed;
        }
        self.entries.retain(|_, shield| shield.amount > 0.0);
        remaining
    }

    /// Counts down every shield and drops expired or empty ones.
    pub fn tick(&mut self, dt: f64) {
        for shield in self.entries.values_mut() {
            shield.duration -= dt;
        }
        self.entries.retain(|_, shield| !shield.is_spent());
    }

    pub fn to_data(&self) -> BTreeMap<String, Shield> {
        self.entries.clone()
    }

    pub fn from_data(data: &BTreeMap<String, Shield>) -> Result<Self, DataError> {
        if data.len() > GameConfig::MAX_SHIELDS {
            return Err(DataError::OutOfRange {
                field: "shields",
                value: data.len() as f64,
            });
        }
        let mut shields = Self::new();
        for (key, shield) in data {
            let amount = ensure_finite("shield.amount", shield.amount)?;
            let duration = ensure_finite("shield.duration", shield.duration)?;
            shields
                .entries
                .insert(key.clone(), Shield::new(amount, duration));
        }
        Ok(shields)
    }
}
