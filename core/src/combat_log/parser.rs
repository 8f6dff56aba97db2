use super::template::{Piece::*, Rule, Template, parse_amount};
use super::{AvoidanceKind, CombatEvent};
use memchr::memmem;


// Glancing is listed ahead of the plain hit. With anchored matching the plain
// template cannot swallow a glancing line, but the order keeps that explicit.
static MELEE_HIT_RULES: &[Rule] = &[
    Rule {
        template: Template::new(
            "melee-glancing",
            &[Lit("You hit "), Text, Lit(" for "), Number, Lit(". (glancing)")],
        ),
        extract: melee_glancing,
    },
    Rule {
        template: Template::new(
            "melee-hit",
            &[Lit("You hit "), Text, Lit(" for "), Number, Lit(".")],
        ),
        extract: melee_hit,
    },
    Rule {
        template: Template::new(
            "melee-crit",
            &[Lit("You crit "), Text, Lit(" for "), Number, Lit(".")],
        ),
        extract: melee_crit,
    },
];

static SPELL_DAMAGE_RULES: &[Rule] = &[
    Rule {
        template: Template::new(
            "spell-hit-resist",
            &[
                Lit("Your "),
                Text,
                Lit(" hits "),
                Text,
                Lit(" for "),
                Number,
                Lit(". ("),
                Number,
                Lit(" resisted)"),
            ],
        ),
        extract: spell_hit,
    },
    Rule {
        template: Template::new(
            "spell-crit-resist",
            &[
                Lit("Your "),
                Text,
                Lit(" crits "),
                Text,
                Lit(" for "),
                Number,
                Lit(". ("),
                Number,
                Lit(" resisted)"),
            ],
        ),
        extract: spell_crit,
    },
    Rule {
        template: Template::new(
            "spell-hit",
            &[Lit("Your "), Text, Lit(" hits "), Text, Lit(" for "), Number, Lit(".")],
        ),
        extract: spell_hit,
    },
    Rule {
        template: Template::new(
            "spell-crit",
            &[Lit("Your "), Text, Lit(" crits "), Text, Lit(" for "), Number, Lit(".")],
        ),
        extract: spell_crit,
    },
];

static SPELL_FAILURE_RULES: &[Rule] = &[
    Rule {
        template: Template::new(
            "spell-resisted",
            &[Lit("Your "), Text, Lit(" was resisted by "), Text, Lit(".")],
        ),
        extract: spell_failure,
    },
    Rule {
        template: Template::new("spell-failed", &[Lit("Your "), Text, Lit(" failed"), Rest]),
        extract: spell_failure,
    },
];

#[derive(Debug, Clone, Copy)]
enum Keyword {
    Prefix(&'static str),
    Contains(&'static [&'static str]),
}

impl Keyword {
    fn matches(&self, line: &str) -> bool {
        match self {
            Keyword::Prefix(prefix) => line.starts_with(prefix),
            Keyword::Contains(words) => words
                .iter()
                .any(|w| memmem::find(line.as_bytes(), w.as_bytes()).is_some()),
        }
    }
}

static AVOIDANCE_RULES: &[(Keyword, AvoidanceKind)] = &[
    (Keyword::Prefix("You miss"), AvoidanceKind::Miss),
    (Keyword::Contains(&["dodged", "dodges"]), AvoidanceKind::Dodge),
    (Keyword::Contains(&["parried", "parries"]), AvoidanceKind::Parry),
    (Keyword::Contains(&["blocked", "blocks"]), AvoidanceKind::Block),
];

/// Classifies self-inflicted combat log messages.
///
/// Each category holds an ordered rule list; the first rule whose template
/// matches decides the outcome for the whole line. Categories are tried in the
/// order melee hit, spell damage, spell failure, avoidance.
#[derive(Debug, Clone)]
pub struct LineParser {
    categories: Vec<&'static [Rule]>,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    pub fn new() -> Self {
        Self {
            categories: vec![MELEE_HIT_RULES, SPELL_DAMAGE_RULES, SPELL_FAILURE_RULES],
        }
    }

    /// Returns `None` for lines that are not a recognized combat message,
    /// including recognized messages whose amounts do not parse.
    pub fn classify_line(&self, line: &str) -> Option<CombatEvent> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        for rules in &self.categories {
            for rule in rules.iter() {
                if let Some(caps) = rule.template.captures(line) {
                    let event = (rule.extract)(&caps);
                    if event.is_none() {
                        tracing::debug!(template = rule.template.name, line, "malformed amount");
                    }
                    return event;
                }
            }
        }

        LineParser::classify_avoidance(line)
    }

    fn classify_avoidance(line: &str) -> Option<CombatEvent> {
        AVOIDANCE_RULES
            .iter()
            .find(|(keyword, _)| keyword.matches(line))
            .map(|(_, kind)| CombatEvent::MeleeAvoidance { kind: *kind })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Extractors
// ─────────────────────────────────────────────────────────────────────────────

fn melee(caps: &[&str], is_crit: bool, is_glancing: bool) -> Option<CombatEvent> {
    Some(CombatEvent::MeleeHit {
        damage: parse_amount(caps.get(1)?)?,
        is_crit,
        is_glancing,
    })
}

fn melee_hit(caps: &[&str]) -> Option<CombatEvent> {
    melee(caps, false, false)
}

fn melee_crit(caps: &[&str]) -> Option<CombatEvent> {
    melee(caps, true, false)
}

fn melee_glancing(caps: &[&str]) -> Option<CombatEvent> {
    melee(caps, false, true)
}

fn spell(caps: &[&str], is_crit: bool) -> Option<CombatEvent> {
    let resisted = match caps.get(3) {
        Some(amount) => parse_amount(amount)?,
        None => 0,
    };
    Some(CombatEvent::SpellDamage {
        spell_name: caps.first()?.to_string(),
        damage: parse_amount(caps.get(2)?)?,
        is_crit,
        resisted,
    })
}

fn spell_hit(caps: &[&str]) -> Option<CombatEvent> {
    spell(caps, false)
}

fn spell_crit(caps: &[&str]) -> Option<CombatEvent> {
    spell(caps, true)
}

fn spell_failure(caps: &[&str]) -> Option<CombatEvent> {
    Some(CombatEvent::SpellFailure {
        spell_name: caps.first()?.to_string(),
    })
}
