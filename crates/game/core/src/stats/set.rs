//! Per-entity attribute storage with a once-per-tick commit.
//!
//! # Layers
//!
//! ```text
//! defaults (persistent)        ──┐
//! additions  (Σ, reset to 0)   ──┼─► clamp(default + Σadd, min, max) × Πmul ─► committed value
//! multipliers (Π, reset to 1)  ──┘
//! ```
//!
//! Producers (stats, equipment, effects, skills) enqueue [`Modifier`]s during
//! the tick. [`AttributeSet::update_values`] folds the queue into the layers
//! and recomputes every committed value. Readers only ever see committed
//! values, so nothing enqueued mid-tick is observable before the commit.
//!
//! The multiplier product is applied to the already clamped additive result
//! and is not clamped again: a multiplier may push a value outside the
//! nominal range of its kind.

use std::collections::BTreeMap;

use strum::EnumCount;

use super::kind::AttributeKind;
use super::modifier::Modifier;
use crate::error::{DataError, ensure_finite};

const KINDS: usize = AttributeKind::COUNT;

/// Mitigation ratio produced by an effective defense value.
///
/// `0` for negative defense, otherwise `def / (def + 20000) * 0.8`, a
/// diminishing-returns curve that approaches but never reaches 80%.
pub fn defend_ratio(def: f64) -> f64 {
    if def < 0.0 {
        0.0
    } else {
        (def / (def + 20000.0)) * 0.8
    }
}

/// Attribute values owned by one entity.
#[derive(Clone, Debug, PartialEq)]
pub struct AttributeSet {
    defaults: [f64; KINDS],
    additions: [f64; KINDS],
    multipliers: [f64; KINDS],
    values: [f64; KINDS],
    pending: Vec<Modifier>,
}

impl AttributeSet {
    /// Creates a set at catalog defaults with committed values already computed.
    pub fn new() -> Self {
        let mut defaults = [0.0; KINDS];
        for kind in AttributeKind::all() {
            defaults[kind.index()] = kind.default_value();
        }
        let mut set = Self {
            defaults,
            additions: [0.0; KINDS],
            multipliers: [1.0; KINDS],
            values: [0.0; KINDS],
            pending: Vec::new(),
        };
        set.recompute();
        set
    }

    // ========================================================================
    // Persistent base layer
    // ========================================================================

    pub fn get_default(&self, kind: AttributeKind) -> f64 {
        self.defaults[kind.index()]
    }

    /// Overwrites the base value. Takes effect at the next commit.
    pub fn set_default(&mut self, kind: AttributeKind, value: f64) {
        self.defaults[kind.index()] = value;
    }

    // ========================================================================
    // Modifier queue
    // ========================================================================

    /// Queues an additive delta.
    pub fn add_value(&mut self, kind: AttributeKind, delta: f64) {
        self.pending.push(Modifier::add(kind, delta));
    }

    /// Queues a multiplicative factor.
    pub fn multiply_value(&mut self, kind: AttributeKind, factor: f64) {
        self.pending.push(Modifier::multiply(kind, factor));
    }

    /// Queues a pre-built modifier verbatim.
    pub fn add_modifier(&mut self, modifier: Modifier) {
        self.pending.push(modifier);
    }

    pub fn extend_modifiers<'a>(&mut self, modifiers: impl IntoIterator<Item = &'a Modifier>) {
        self.pending.extend(modifiers.into_iter().copied());
    }

    /// Number of modifiers waiting for the next commit.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Last committed value of `kind`.
    #[inline]
    pub fn get_value(&self, kind: AttributeKind) -> f64 {
        self.values[kind.index()]
    }

    /// Resets the transient layers to neutral (0 additive, 1 multiplicative).
    pub fn reset_values(&mut self) {
        self.additions = [0.0; KINDS];
        self.multipliers = [1.0; KINDS];
    }

    /// Folds every queued modifier into fresh layers and recomputes the
    /// committed values. Must run exactly once per tick.
    pub fn update_values(&mut self) {
        self.reset_values();
        for modifier in self.pending.drain(..) {
            let i = modifier.kind.index();
            if modifier.is_multiplier {
                self.multipliers[i] *= modifier.value;
            } else {
                self.additions[i] += modifier.value;
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        for kind in AttributeKind::all() {
            let i = kind.index();
            let additive = (self.defaults[i] + self.additions[i]).clamp(kind.min(), kind.max());
            self.values[i] = additive * self.multipliers[i];
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Base layer keyed by stable attribute names.
    pub fn to_data(&self) -> BTreeMap<String, f64> {
        AttributeKind::all()
            .map(|kind| (kind.name().to_string(), self.get_default(kind)))
            .collect()
    }

    /// Restores a base layer. Unknown names are dropped; kinds missing from
    /// the data keep their catalog default.
    pub fn from_data(data: &BTreeMap<String, f64>) -> Result<Self, DataError> {
        let mut set = Self::new();
        for (name, value) in data {
            let Some(kind) = AttributeKind::from_name(name) else {
                tracing::debug!(attribute = %name, "dropping unknown attribute on load");
                continue;
            };
            set.set_default(kind, ensure_finite("attribute", *value)?);
        }
        set.recompute();
        Ok(set)
    }
}

impl Default for AttributeSet {
    fn default() -> Self {
        Self::new()
    }
}
