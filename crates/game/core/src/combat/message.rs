//! Plain-text combat lines. Formatting for a particular transport is left
//! to the presentation layer.

use super::report::HitReport;
use crate::entity::ProgressBar;

fn breakdown(report: &HitReport) -> String {
    if report.critical {
        format!(
            "{:.1} ({:.1} + {:.1} critical)",
            report.damage.total, report.damage.normal, report.damage.critical
        )
    } else {
        format!("{:.1}", report.damage.total)
    }
}

/// Line shown to the abuser.
pub fn hit_for_abuser(report: &HitReport, victim: &str, victim_bar: &ProgressBar) -> String {
    let verb = if report.critical { "critically hit" } else { "hit" };
    format!(
        "You {verb} {victim} for {} damage.\n{}",
        breakdown(report),
        victim_bar.render()
    )
}

/// Line shown to the victim.
pub fn hit_for_victim(report: &HitReport, abuser: &str, own_bar: &ProgressBar) -> String {
    let verb = if report.critical { "critically hit" } else { "hit" };
    format!(
        "{abuser} {verb} you for {} damage.\n{}",
        breakdown(report),
        own_bar.render()
    )
}

pub fn avoided_for_abuser(victim: &str) -> String {
    format!("{victim} avoided your attack.")
}

pub fn avoided_for_victim(abuser: &str) -> String {
    format!("You avoided {abuser}'s attack.")
}

pub fn missed_for_abuser(victim: &str) -> String {
    format!("You missed {victim}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageBreakdown;
    use crate::entity::{BarMode, EntityId};

    #[test]
    fn critical_lines_show_breakdown() {
        let report = HitReport {
            attacker: EntityId(1),
            abuser: EntityId(1),
            victim: EntityId(2),
            damage: DamageBreakdown {
                final_defend: 0.0,
                normal: 20.0,
                critical: 10.0,
                total: 30.0,
            },
            critical: true,
            magic: false,
            life_lost: 30.0,
        };
        let bar = ProgressBar::new("Life", 70.0, 100.0, BarMode::Absolute);

        assert_eq!(
            hit_for_abuser(&report, "wolf", &bar),
            "You critically hit wolf for 30.0 (20.0 + 10.0 critical) damage.\nLife [#######---] 70/100"
        );
        assert!(hit_for_victim(&report, "alice", &bar).starts_with("alice critically hit you"));
    }
}
