use core::fmt;
use std::sync::Arc;

use super::report::{HitReaction, HitReport};

/// Caller-supplied reaction to a landed hit.
pub type OnHit = Arc<dyn Fn(&HitReport) -> Vec<HitReaction> + Send + Sync>;

/// Per-attack switches.
#[derive(Clone)]
pub struct AttackOptions {
    /// Skips avoidance and the invisibility miss.
    pub absolute_hit: bool,
    /// Uses the magic attack/penetration/resistance triple.
    pub is_magic_attack: bool,
    /// Reads critical stats from the abuser instead of the attacker.
    pub use_abuser_critical: bool,
    /// Gates and stamps the abuser's attack cooldown even when it is not a
    /// player.
    pub apply_attack_speed: bool,
    /// Scales normal damage before the critical bonus.
    pub damage_multiplier: f64,
    pub on_hit: Option<OnHit>,
}

impl AttackOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absolute(mut self) -> Self {
        self.absolute_hit = true;
        self
    }

    pub fn magic(mut self) -> Self {
        self.is_magic_attack = true;
        self
    }

    pub fn abuser_critical(mut self) -> Self {
        self.use_abuser_critical = true;
        self
    }

    pub fn gated(mut self) -> Self {
        self.apply_attack_speed = true;
        self
    }

    pub fn multiplied(mut self, factor: f64) -> Self {
        self.damage_multiplier = factor;
        self
    }

    pub fn on_hit(
        mut self,
        callback: impl Fn(&HitReport) -> Vec<HitReaction> + Send + Sync + 'static,
    ) -> Self {
        self.on_hit = Some(Arc::new(callback));
        self
    }
}

impl Default for AttackOptions {
    fn default() -> Self {
        Self {
            absolute_hit: false,
            is_magic_attack: false,
            use_abuser_critical: false,
            apply_attack_speed: false,
            damage_multiplier: 1.0,
            on_hit: None,
        }
    }
}

impl fmt::Debug for AttackOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackOptions")
            .field("absolute_hit", &self.absolute_hit)
            .field("is_magic_attack", &self.is_magic_attack)
            .field("use_abuser_critical", &self.use_abuser_critical)
            .field("apply_attack_speed", &self.apply_attack_speed)
            .field("damage_multiplier", &self.damage_multiplier)
            .field("on_hit", &self.on_hit.is_some())
            .finish()
    }
}
