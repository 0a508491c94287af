//! World-wide combat triggers.
//!
//! Hooks see every landed hit after damage is applied and may answer with
//! [`HitReaction`]s. They run after equipment options and before the
//! caller's own `on_hit` callback.

use std::sync::Arc;

use super::report::{HitReaction, HitReport};

pub trait CombatHook: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    /// Reactions for the abuser's side of a hit.
    fn on_hit(&self, _report: &HitReport) -> Vec<HitReaction> {
        Vec::new()
    }

    /// Reactions for the victim's side of a hit.
    fn on_hitted(&self, _report: &HitReport) -> Vec<HitReaction> {
        Vec::new()
    }
}

/// Priority-ordered set of [`CombatHook`]s.
#[derive(Clone, Default)]
pub struct CombatHookRegistry {
    hooks: Vec<Arc<dyn CombatHook>>,
}

impl CombatHookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hook: Arc<dyn CombatHook>) {
        self.hooks.push(hook);
        self.hooks.sort_by_key(|h| h.priority());
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Collects on-hit then on-hitted reactions of every hook, in priority order.
    pub fn react(&self, report: &HitReport) -> Vec<HitReaction> {
        let mut reactions = Vec::new();
        for hook in &self.hooks {
            let hit = hook.on_hit(report);
            let hitted = hook.on_hitted(report);
            if !hit.is_empty() || !hitted.is_empty() {
                tracing::trace!(hook = hook.name(), "combat hook reacted");
            }
            reactions.extend(hit);
            reactions.extend(hitted);
        }
        reactions
    }
}

impl core::fmt::Debug for CombatHookRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(|h| h.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageBreakdown;
    use crate::entity::EntityId;

    struct Vampire;
    impl CombatHook for Vampire {
        fn name(&self) -> &'static str {
            "vampire"
        }
        fn priority(&self) -> i32 {
            10
        }
        fn on_hit(&self, report: &HitReport) -> Vec<HitReaction> {
            vec![HitReaction::HealAbuser(report.damage.total)]
        }
    }

    struct Spikes;
    impl CombatHook for Spikes {
        fn name(&self) -> &'static str {
            "spikes"
        }
        fn priority(&self) -> i32 {
            -5
        }
        fn on_hitted(&self, _report: &HitReport) -> Vec<HitReaction> {
            vec![HitReaction::DamageAbuser(1.0)]
        }
    }

    #[test]
    fn hooks_run_in_priority_order() {
        let mut registry = CombatHookRegistry::new();
        registry.register(Arc::new(Vampire));
        registry.register(Arc::new(Spikes));

        let report = HitReport {
            attacker: EntityId(1),
            abuser: EntityId(1),
            victim: EntityId(2),
            damage: DamageBreakdown {
                total: 4.0,
                normal: 4.0,
                ..Default::default()
            },
            critical: false,
            magic: false,
            life_lost: 4.0,
        };

        assert_eq!(
            registry.react(&report),
            vec![HitReaction::DamageAbuser(1.0), HitReaction::HealAbuser(4.0)]
        );
    }
}
