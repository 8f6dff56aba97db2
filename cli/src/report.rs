//! Plain-text rendering of meter output.

use std::fmt::Write;

use swingmeter_core::{ComparisonReport, LifetimeTotals, MetricDelta, SideBySide, Snapshot};

pub fn snapshot(title: &str, snap: &Snapshot) -> String {
    let melee = snap.melee();
    let spell = snap.spell();
    let mut out = String::new();

    let _ = writeln!(out, "{title} ({})", snap.timestamp().format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(
        out,
        "  damage {:>10}   combat {:>8.1}s   dps {:>8.1}",
        snap.total_damage(),
        snap.combat_seconds(),
        snap.dps()
    );
    let _ = writeln!(
        out,
        "  melee  {:>10}   hit {:>5.1}%  crit {:>5.1}%  glancing {:>5.1}%  avg {:>7.1}",
        melee.damage,
        melee.hit_rate(),
        melee.crit_rate(),
        melee.glancing_rate(),
        melee.average_hit()
    );
    let _ = writeln!(
        out,
        "         swings {}  hits {}  crits {}  miss {}  dodge {}  parry {}  block {}",
        melee.swings(),
        melee.hits,
        melee.crits,
        melee.misses,
        melee.dodges,
        melee.parries,
        melee.blocks
    );
    let _ = writeln!(
        out,
        "  spell  {:>10}   hit {:>5.1}%  crit {:>5.1}%  resisted {}  avg {:>7.1}",
        spell.damage,
        spell.hit_rate(),
        spell.crit_rate(),
        spell.resisted_damage,
        spell.average_hit()
    );
    out
}

pub fn spells(snap: &Snapshot) -> String {
    let breakdown = snap.spell_breakdown();
    if breakdown.is_empty() {
        return "No spells cast\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:>10} {:>6} {:>6} {:>7} {:>7}",
        "Spell", "Damage", "Casts", "Fails", "Hit%", "Crit%"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));
    for (name, counters) in breakdown {
        let _ = writeln!(
            out,
            "{:<28} {:>10} {:>6} {:>6} {:>6.1}% {:>6.1}%",
            name,
            counters.damage,
            counters.casts(),
            counters.full_resists,
            counters.hit_rate(),
            counters.crit_rate()
        );
    }
    out
}

pub fn lifetime(character: &str, totals: &LifetimeTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Lifetime for {character}: {} sessions", totals.sessions);
    let _ = writeln!(
        out,
        "  damage {:>12}   combat {:>10.1}s   dps {:>8.1}",
        totals.total_damage,
        totals.combat_seconds,
        totals.dps()
    );
    let _ = writeln!(
        out,
        "  melee hit {:>5.1}%  crit {:>5.1}%   spell hit {:>5.1}%  crit {:>5.1}%",
        totals.melee.hit_rate(),
        totals.melee.crit_rate(),
        totals.spell.hit_rate(),
        totals.spell.crit_rate()
    );
    out
}

pub fn comparison(report: &ComparisonReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<14} {:>12} {:>12} {:>12} {:>9}",
        "", report.name_a, report.name_b, "delta", "change"
    );
    delta_row(&mut out, "dps", &report.dps);
    delta_row(&mut out, "total damage", &report.total_damage);
    rate_row(&mut out, "melee hit%", &report.melee_hit_rate);
    rate_row(&mut out, "melee crit%", &report.melee_crit_rate);
    rate_row(&mut out, "spell hit%", &report.spell_hit_rate);
    rate_row(&mut out, "spell crit%", &report.spell_crit_rate);
    out
}

fn delta_row(out: &mut String, label: &str, metric: &MetricDelta) {
    let _ = writeln!(
        out,
        "{:<14} {:>12.1} {:>12.1} {:>+12.1} {:>+8.1}%",
        label, metric.a, metric.b, metric.delta, metric.percent
    );
}

fn rate_row(out: &mut String, label: &str, metric: &SideBySide) {
    let _ = writeln!(out, "{:<14} {:>12.1} {:>12.1}", label, metric.a, metric.b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingmeter_core::{ManualClock, Tracker};

    fn played() -> Tracker<ManualClock> {
        let mut tracker = Tracker::new(ManualClock::new());
        tracker.enter_combat();
        tracker.process_line("You hit Training Dummy for 120.");
        tracker.process_line("Your Fireball hits Training Dummy for 300. (100 resisted)");
        tracker.process_line("Your Frostbolt was resisted by Training Dummy.");
        tracker.clock().advance_secs(10);
        tracker
    }

    #[test]
    fn snapshot_report_shows_totals() {
        let text = snapshot("Current session", &played().freeze());
        assert!(text.starts_with("Current session ("));
        assert!(text.contains("damage        420"));
        assert!(text.contains("dps     42.0"));
    }

    #[test]
    fn spell_report_lists_by_damage() {
        let text = spells(&played().freeze());
        let fireball = text.find("Fireball").unwrap();
        let frostbolt = text.find("Frostbolt").unwrap();
        assert!(fireball < frostbolt);
    }

    #[test]
    fn empty_spell_report() {
        let tracker = Tracker::new(ManualClock::new());
        assert_eq!(spells(&tracker.freeze()), "No spells cast\n");
    }

    #[test]
    fn identical_comparison_shows_no_change() {
        let mut tracker = played();
        tracker.save_named("a").unwrap();
        tracker.save_named("b").unwrap();
        let text = comparison(&tracker.compare("a", "b").unwrap());
        assert!(text.contains("+0.0%"));
        assert!(!text.contains("-"));
    }
}
