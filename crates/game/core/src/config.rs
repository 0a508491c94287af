/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Fixed simulation step in milliseconds.
    pub tick_interval_ms: u64,

    /// Minimum simulated seconds between two repeated status notices of one effect.
    pub message_cooldown_secs: f64,

    /// Seconds a dead player waits before revival.
    pub player_revival_secs: f64,

    /// Seconds a dead monster waits before revival.
    pub monster_revival_secs: f64,

    /// Life lost per second while food or water is empty.
    pub starvation_damage: f64,

    /// Food consumed per second.
    pub hunger_rate: f64,

    /// Water consumed per second.
    pub thirst_rate: f64,

    /// Unspent stat points granted per level up.
    pub stat_points_per_level: u32,

    /// Base of the experience curve: `required_exp(level) = base * level^2`.
    pub exp_curve_base: f64,

    /// Seconds a projectile may live before it is discarded without hitting.
    pub projectile_lifetime_secs: f64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const MAX_INVENTORY_SLOTS: usize = 32;
    pub const MAX_SHIELDS: usize = 8;
    pub const MAX_MAILBOX: usize = 64;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
    pub const DEFAULT_MESSAGE_COOLDOWN_SECS: f64 = 5.0;
    pub const DEFAULT_PLAYER_REVIVAL_SECS: f64 = 10.0;
    pub const DEFAULT_MONSTER_REVIVAL_SECS: f64 = 30.0;

    pub fn new() -> Self {
        Self {
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            message_cooldown_secs: Self::DEFAULT_MESSAGE_COOLDOWN_SECS,
            player_revival_secs: Self::DEFAULT_PLAYER_REVIVAL_SECS,
            monster_revival_secs: Self::DEFAULT_MONSTER_REVIVAL_SECS,
            starvation_damage: 1.0,
            hunger_rate: 0.01,
            thirst_rate: 0.02,
            stat_points_per_level: 3,
            exp_curve_base: 50.0,
            projectile_lifetime_secs: 5.0,
        }
    }

    /// Tick interval expressed in seconds.
    pub fn tick_secs(&self) -> f64 {
        self.tick_interval_ms as f64 / 1000.0
    }

    /// Experience needed to advance from `level` to `level + 1`.
    pub fn required_exp(&self, level: u32) -> f64 {
        let level = level.max(1) as f64;
        self.exp_curve_base * level * level
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_secs_matches_interval() {
        let config = GameConfig::default();
        assert_eq!(config.tick_secs(), 0.1);
    }

    #[test]
    fn exp_curve_grows_quadratically() {
        let config = GameConfig::default();
        assert_eq!(config.required_exp(1), 50.0);
        assert_eq!(config.required_exp(3), 450.0);
        assert_eq!(config.required_exp(0), 50.0);
    }
}
