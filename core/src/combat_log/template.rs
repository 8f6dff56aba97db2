//! Anchored text templates for combat log messages
//!
//! A template is a sequence of literal pieces and capture slots. Matching is
//! anchored to both ends of the line. A capture first tries to end at the
//! nearest occurrence of the literal that follows it and backtracks to later
//! occurrences when the rest of the template does not match, so names that
//! contain a delimiter (`Dr. Weavil`, `Guardian for Hire`) still capture.

use memchr::memmem;

use super::CombatEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    /// Exact text
    Lit(&'static str),
    /// Non-empty free text (target or spell name)
    Text,
    /// Non-empty run of ASCII digits
    Number,
    /// Any trailing text, possibly empty. Only valid as the last piece.
    Rest,
}

impl Piece {
    fn accepts(&self, value: &str) -> bool {
        match self {
            Piece::Text => !value.is_empty(),
            Piece::Number => !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()),
            Piece::Lit(_) | Piece::Rest => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pieces: &'static [Piece],
}

impl Template {
    pub const fn new(name: &'static str, pieces: &'static [Piece]) -> Self {
        Self { name, pieces }
    }

    /// Match the whole line, returning the captured slots in template order.
    pub fn captures<'a>(&self, line: &'a str) -> Option<Vec<&'a str>> {
        let mut caps = Vec::with_capacity(self.pieces.len());
        match_pieces(self.pieces, line, 0, &mut caps).then_some(caps)
    }
}

fn match_pieces<'a>(pieces: &[Piece], line: &'a str, pos: usize, caps: &mut Vec<&'a str>) -> bool {
    let rest = &line[pos..];
    match pieces {
        [] => rest.is_empty(),
        [Piece::Rest] => true,
        [Piece::Rest, ..] => false,
        [Piece::Lit(lit), tail @ ..] => {
            rest.starts_with(*lit) && match_pieces(tail, line, pos + lit.len(), caps)
        }
        [slot, tail @ ..] => match tail.first() {
            None => {
                if !slot.accepts(rest) {
                    return false;
                }
                caps.push(rest);
                true
            }
            Some(Piece::Lit(lit)) => {
                // a match of a UTF-8 needle always starts on a char boundary
                for found in memmem::find_iter(rest.as_bytes(), lit.as_bytes()) {
                    let value = &rest[..found];
                    if !slot.accepts(value) {
                        continue;
                    }
                    caps.push(value);
                    if match_pieces(tail, line, pos + found, caps) {
                        return true;
                    }
                    caps.pop();
                }
                false
            }
            // two adjacent captures have no boundary between them
            Some(_) => false,
        },
    }
}

/// Builds an event from a template's captures. `None` rejects the line.
pub type Extractor = fn(&[&str]) -> Option<CombatEvent>;

/// A template paired with the extractor that turns its captures into an event.
#[derive(Clone, Copy)]
pub struct Rule {
    pub template: Template,
    pub extract: Extractor,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("template", &self.template.name)
            .finish()
    }
}

/// Parse a captured amount. Only plain ASCII digits are accepted.
pub fn parse_amount(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u64>().ok()
}

#[cfg(test)]
mod tests {
    use super::Piece::*;
    use super::*;

    const HIT: Template = Template::new(
        "hit",
        &[Lit("You hit "), Text, Lit(" for "), Number, Lit(".")],
    );
    const FAILED: Template = Template::new("failed", &[Lit("Your "), Text, Lit(" failed"), Rest]);

    #[test]
    fn captures_anchored_line() {
        let caps = HIT.captures("You hit Training Dummy for 120.").unwrap();
        assert_eq!(caps, vec!["Training Dummy", "120"]);
    }

    #[test]
    fn trailing_text_does_not_match() {
        assert!(HIT.captures("You hit Training Dummy for 120. (glancing)").is_none());
    }

    #[test]
    fn empty_capture_does_not_match() {
        assert!(HIT.captures("You hit  for 120.").is_none());
        assert!(HIT.captures("You hit Dummy for .").is_none());
    }

    #[test]
    fn rest_accepts_anything() {
        let caps = FAILED.captures("Your Fireball failed. Training Dummy is immune.").unwrap();
        assert_eq!(caps, vec!["Fireball"]);
        assert!(FAILED.captures("Your Fireball failed").is_some());
    }

    #[test]
    fn capture_backtracks_past_delimiters_in_names() {
        let caps = HIT.captures("You hit Guardian for Hire for 120.").unwrap();
        assert_eq!(caps, vec!["Guardian for Hire", "120"]);

        const RESISTED: Template = Template::new(
            "resisted",
            &[Lit("Your "), Text, Lit(" was resisted by "), Text, Lit(".")],
        );
        let caps = RESISTED.captures("Your Frostbolt was resisted by Dr. Weavil.").unwrap();
        assert_eq!(caps, vec!["Frostbolt", "Dr. Weavil"]);
    }

    #[test]
    fn number_slot_only_takes_digits() {
        assert!(HIT.captures("You hit Training Dummy for lots.").is_none());
        assert!(HIT.captures("You hit Training Dummy for 1.5.").is_none());
    }

    #[test]
    fn parse_amount_rejects_non_digits() {
        assert_eq!(parse_amount("340"), Some(340));
        assert_eq!(parse_amount("+3"), None);
        assert_eq!(parse_amount("12a"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }
}
