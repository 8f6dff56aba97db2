use serde::{Deserialize, Serialize};

use super::Snapshot;

/// Change of one metric from a baseline `a` to `b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub a: f64,
    pub b: f64,
    /// `b - a`
    pub delta: f64,
    /// Change relative to `a` in percent, 0 when `a` is 0
    pub percent: f64,
}

impl MetricDelta {
    pub fn new(a: f64, b: f64) -> Self {
        let delta = b - a;
        let percent = if a == 0.0 { 0.0 } else { delta / a * 100.0 };
        Self { a, b, delta, percent }
    }
}

/// A metric shown side by side without a delta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SideBySide {
    pub a: f64,
    pub b: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub name_a: String,
    pub name_b: String,
    pub dps: MetricDelta,
    pub total_damage: MetricDelta,
    pub melee_hit_rate: SideBySide,
    pub melee_crit_rate: SideBySide,
    pub spell_hit_rate: SideBySide,
    pub spell_crit_rate: SideBySide,
}

impl ComparisonReport {
    pub fn new(name_a: &str, a: &Snapshot, name_b: &str, b: &Snapshot) -> Self {
        Self {
            name_a: name_a.to_string(),
            name_b: name_b.to_string(),
            dps: MetricDelta::new(a.dps(), b.dps()),
            total_damage: MetricDelta::new(a.total_damage() as f64, b.total_damage() as f64),
            melee_hit_rate: SideBySide {
                a: a.melee().hit_rate(),
                b: b.melee().hit_rate(),
            },
            melee_crit_rate: SideBySide {
                a: a.melee().crit_rate(),
                b: b.melee().crit_rate(),
            },
            spell_hit_rate: SideBySide {
                a: a.spell().hit_rate(),
                b: b.spell().hit_rate(),
            },
            spell_crit_rate: SideBySide {
                a: a.spell().crit_rate(),
                b: b.spell().crit_rate(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat_log::CombatEvent;
    use crate::metrics::LiveSession;
    use chrono::Utc;
    use std::time::{Duration, Instant};

    fn snapshot(melee_damage: u64, seconds: u64) -> Snapshot {
        let start = Instant::now();
        let mut live = LiveSession::new(start, Utc::now());
        live.timer.enter(start);
        live.apply_event(&CombatEvent::MeleeHit {
            damage: melee_damage,
            is_crit: false,
            is_glancing: false,
        });
        live.apply_event(&CombatEvent::MeleeAvoidance {
            kind: crate::combat_log::AvoidanceKind::Miss,
        });
        Snapshot::freeze(&live, start + Duration::from_secs(seconds), Utc::now())
    }

    #[test]
    fn identical_snapshots_have_zero_delta() {
        let a = snapshot(500, 10);
        let report = ComparisonReport::new("a", &a, "b", &a.clone());

        assert_eq!(report.dps.delta, 0.0);
        assert_eq!(report.dps.percent, 0.0);
        assert_eq!(report.total_damage.delta, 0.0);
        assert_eq!(report.total_damage.percent, 0.0);
        assert_eq!(report.melee_hit_rate.a, report.melee_hit_rate.b);
        assert_eq!(report.spell_crit_rate.a, report.spell_crit_rate.b);
    }

    #[test]
    fn percent_is_relative_to_baseline() {
        let a = snapshot(500, 10);
        let b = snapshot(750, 10);
        let report = ComparisonReport::new("a", &a, "b", &b);

        assert_eq!(report.dps.a, 50.0);
        assert_eq!(report.dps.b, 75.0);
        assert_eq!(report.dps.delta, 25.0);
        assert_eq!(report.dps.percent, 50.0);
        assert_eq!(report.total_damage.delta, 250.0);
        assert_eq!(report.melee_hit_rate.a, 50.0);
    }

    #[test]
    fn zero_baseline_reports_zero_percent() {
        let delta = MetricDelta::new(0.0, 120.0);
        assert_eq!(delta.delta, 120.0);
        assert_eq!(delta.percent, 0.0);

        let delta = MetricDelta::new(200.0, 150.0);
        assert_eq!(delta.delta, -50.0);
        assert_eq!(delta.percent, -25.0);
    }
}
