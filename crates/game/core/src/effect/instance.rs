use std::collections::BTreeMap;

use super::kind::EffectKind;
use crate::entity::EntityId;
use crate::error::{DataError, ensure_finite};

/// A value in an effect's per-instance state bag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ExtraValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ExtraValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Free-form per-instance state. Cloning an effect deep-copies its extras.
pub type Extras = BTreeMap<String, ExtraValue>;

/// A timed, levelled status carried by a living entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    pub level: f64,
    /// Remaining seconds.
    pub duration: f64,
    pub max_duration: f64,
    /// Weak back-reference to whoever cast the effect.
    pub caster: Option<EntityId>,
    pub extras: Extras,
}

impl Effect {
    /// Creates an effect at full duration. `Invulnerable` never expires.
    pub fn new(kind: EffectKind, level: f64, duration: f64) -> Self {
        let duration = if kind == EffectKind::Invulnerable {
            f64::INFINITY
        } else {
            duration
        };
        Self {
            kind,
            level,
            duration,
            max_duration: duration,
            caster: None,
            extras: Extras::new(),
        }
    }

    pub fn with_caster(mut self, caster: EntityId) -> Self {
        self.caster = Some(caster);
        self
    }

    pub fn is_expired(&self) -> bool {
        self.duration <= 0.0
    }

    pub fn extra_number(&self, key: &str) -> Option<f64> {
        self.extras.get(key).and_then(ExtraValue::as_number)
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: ExtraValue) {
        self.extras.insert(key.into(), value);
    }

    /// One-line status, e.g. `Poison Lv.2 (3.5s)`.
    pub fn describe(&self) -> String {
        if self.duration.is_infinite() {
            format!("{} Lv.{}", self.kind.label(), self.level)
        } else {
            format!(
                "{} Lv.{} ({:.1}s)",
                self.kind.label(),
                self.level,
                self.duration.max(0.0)
            )
        }
    }

    /// Projects the effect for persistence. Entity ids are local to one
    /// world, so the caster is not kept.
    pub fn to_data(&self) -> EffectData {
        EffectData {
            kind: self.kind.name().to_string(),
            level: self.level,
            duration: self.duration.is_finite().then_some(self.duration),
            max_duration: self.max_duration.is_finite().then_some(self.max_duration),
            extras: self.extras.clone(),
        }
    }

    /// Restores an effect. An unknown kind name yields `Ok(None)` so that
    /// older saves survive catalog changes.
    pub fn from_data(data: &EffectData) -> Result<Option<Self>, DataError> {
        let Some(kind) = EffectKind::from_name(&data.kind) else {
            tracing::debug!(kind = %data.kind, "dropping unknown effect kind");
            return Ok(None);
        };
        let level = ensure_finite("effect.level", data.level)?;
        let duration = match data.duration {
            Some(d) => ensure_finite("effect.duration", d)?,
            None => f64::INFINITY,
        };
        let max_duration = match data.max_duration {
            Some(d) => ensure_finite("effect.max_duration", d)?,
            None => f64::INFINITY,
        };
        Ok(Some(Self {
            kind,
            level,
            duration,
            max_duration,
            caster: None,
            extras: data.extras.clone(),
        }))
    }
}

/// Plain-data projection of an [`Effect`]. Infinite durations are stored as
/// `None`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectData {
    pub kind: String,
    pub level: f64,
    pub duration: Option<f64>,
    pub max_duration: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extras: Extras,
}
