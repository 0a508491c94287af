//! Pure combat math.

use crate::stats::defend_ratio;

/// Probability that a victim moving at `victim_speed` avoids an attacker
/// moving at `attacker_speed`.
///
/// ```text
/// min( max((vs - as) / max(as, 0) * 0.5, min(0.002 * vs / 100, 0.12)),
///      vs > 10 && as > 0 ? 0.9 : 1 )
/// ```
///
/// Two stationary entities (`0 / 0`) never avoid each other.
pub fn avoid_chance(attacker_speed: f64, victim_speed: f64) -> f64 {
    let relative = (victim_speed - attacker_speed) / attacker_speed.max(0.0) * 0.5;
    if relative.is_nan() {
        return 0.0;
    }
    let floor = (0.002 * victim_speed / 100.0).min(0.12);
    let cap = if victim_speed > 10.0 && attacker_speed > 0.0 {
        0.9
    } else {
        1.0
    };
    relative.max(floor).min(cap)
}

/// Damage split of one landed hit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBreakdown {
    /// `max(0, resistance - penetration)`.
    pub final_defend: f64,
    pub normal: f64,
    pub critical: f64,
    pub total: f64,
}

/// Resolves hit damage.
///
/// `normal = max(0, attack - final_defend) * (1 - defend_ratio(final_defend))`,
/// scaled by `multiplier`; a critical adds `normal * crit_damage / 100`.
pub fn compute_damage(
    attack: f64,
    resistance: f64,
    penetration: f64,
    multiplier: f64,
    critical: Option<f64>,
) -> DamageBreakdown {
    let final_defend = (resistance - penetration).max(0.0);
    let normal =
        (attack - final_defend).max(0.0) * (1.0 - defend_ratio(final_defend)) * multiplier;
    let critical = critical.map_or(0.0, |crit_damage| normal * crit_damage / 100.0);
    DamageBreakdown {
        final_defend,
        normal,
        critical,
        total: normal + critical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_speeds_use_the_floor() {
        // relative term is 0, floor is 0.002
        assert!((avoid_chance(100.0, 100.0) - 0.002).abs() < 1e-12);
    }

    #[test]
    fn faster_victim_is_capped() {
        assert_eq!(avoid_chance(10.0, 1000.0), 0.9);
        assert_eq!(avoid_chance(50.0, 75.0), 0.25);
    }

    #[test]
    fn stationary_extremes() {
        assert_eq!(avoid_chance(0.0, 0.0), 0.0);
        // an immobile attacker cannot touch a moving victim
        assert_eq!(avoid_chance(0.0, 50.0), 1.0);
    }

    #[test]
    fn defended_hit() {
        let damage = compute_damage(200.0, 100.0, 0.0, 1.0, None);
        assert_eq!(damage.final_defend, 100.0);
        let expected = 100.0 * (1.0 - 100.0 / 20100.0 * 0.8);
        assert!((damage.total - expected).abs() < 1e-9);
        assert!((damage.total - 99.602).abs() < 1e-3);
    }

    #[test]
    fn penetration_and_crit() {
        let damage = compute_damage(50.0, 10.0, 30.0, 1.0, Some(50.0));
        assert_eq!(damage.final_defend, 0.0);
        assert_eq!(damage.normal, 50.0);
        assert_eq!(damage.critical, 25.0);
        assert_eq!(damage.total, 75.0);
    }

    #[test]
    fn overwhelming_defense_deals_nothing() {
        let damage = compute_damage(10.0, 500.0, 0.0, 1.0, Some(100.0));
        assert_eq!(damage.total, 0.0);
    }

    proptest::proptest! {
        #[test]
        fn avoid_chance_is_a_probability(a in 0.0f64..1000.0, v in 0.0f64..1000.0) {
            let chance = avoid_chance(a, v);
            proptest::prop_assert!((0.0..=1.0).contains(&chance));
        }

        #[test]
        fn more_defense_never_hurts_more(
            attack in 0.0f64..10_000.0,
            def in 0.0f64..10_000.0,
            extra in 0.0f64..10_000.0,
        ) {
            let weak = compute_damage(attack, def, 0.0, 1.0, None);
            let strong = compute_damage(attack, def + extra, 0.0, 1.0, None);
            proptest::prop_assert!(strong.total <= weak.total + 1e-9);
            proptest::prop_assert!(weak.total <= attack);
        }
    }
}
