// src/signals.rs
//! Text signal detectors: small, total functions over free-form narrative
//! text. Every detector returns a default (false/0/empty) on empty or
//! malformed input and never panics, so the sub-scorers can stack them
//! without guards.
//!
//! Phrase lists are embedded from `config/phrases.json` and parsed once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Phrase lists shared by the detectors and the narrative sub-scorers.
/// One central table keeps the scoring contract auditable in one place.
#[derive(Debug, Clone, Deserialize)]
pub struct Phrases {
    pub personal_experience: Vec<String>,
    pub observation: Vec<String>,
    pub validation: Vec<String>,
    pub learning: Vec<String>,
    pub pain: Vec<String>,
    pub commitment_strong: Vec<String>,
    pub commitment_intent: Vec<String>,
    pub commitment_weak: Vec<String>,
    pub adversity: Vec<String>,
    pub intrinsic: Vec<String>,
    pub comparison: Vec<String>,
    pub concrete_change: Vec<String>,
    pub time_markers: Vec<String>,
    pub money_markers: Vec<String>,
    pub legal_commitment: Vec<String>,
}

static PHRASES: Lazy<Phrases> = Lazy::new(|| {
    let raw = include_str!("../config/phrases.json");
    serde_json::from_str::<Phrases>(raw).expect("valid embedded phrase lists")
});

/// Access the embedded phrase tables.
pub fn phrases() -> &'static Phrases {
    &PHRASES
}

static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number regex"));
static DURATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(year|month|week|day)").expect("duration regex"));
// The time-depth bonus only considers year/month/week phrases; "3 days"
// must not shadow a later "2 years" mention.
static TENURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d+)\s*(year|month|week)").expect("tenure regex"));
static DEMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*(people|customers|companies|users|requests|asked)")
        .expect("demand regex")
});

/// True if `text` contains any of `needles`, case-insensitive substring match.
pub fn contains_any(text: &str, needles: &[String]) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    needles.iter().any(|n| lower.contains(n.as_str()))
}

/// How many of `needles` appear in `text` (each counted at most once).
pub fn count_matches(text: &str, needles: &[String]) -> usize {
    if text.is_empty() {
        return 0;
    }
    let lower = text.to_lowercase();
    needles.iter().filter(|n| lower.contains(n.as_str())).count()
}

/// First-person experience language ("i spent", "my team", ...). Gates the
/// lived-experience branch of the problem-origin scorer.
pub fn has_personal_experience(text: &str) -> bool {
    contains_any(text, &PHRASES.personal_experience)
}

/// Weaker observed-problem language ("i saw", "i noticed", ...).
pub fn has_observation_language(text: &str) -> bool {
    contains_any(text, &PHRASES.observation)
}

/// External-demand language ("asked", "customers", "talked to", ...).
pub fn has_validation_indicators(text: &str) -> bool {
    contains_any(text, &PHRASES.validation)
}

/// Insight-change language ("realized", "turns out", ...).
pub fn has_learning_indicators(text: &str) -> bool {
    contains_any(text, &PHRASES.learning)
}

/// Every numeric token in `text` ("$50K" yields 50, "40+" yields 40,
/// "3x" yields 3). Order follows the text.
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .map(|m| m.as_str().parse::<f64>().unwrap_or(0.0))
        .collect()
}

/// A number co-occurring with a time or money marker. Stricter than
/// "has any number".
pub fn has_quantification(text: &str) -> bool {
    if !NUMBER_RE.is_match(text) {
        return false;
    }
    contains_any(text, &PHRASES.time_markers) || contains_any(text, &PHRASES.money_markers)
}

/// Quantified-demand pattern: a digit next to people/customers/companies/
/// users/requests/asked.
pub fn has_quantified_demand(text: &str) -> bool {
    DEMAND_RE.is_match(text)
}

/// Parse the first `<N> year|month|week|day` phrase into months.
/// Returns 0.0 when no duration phrase is present.
pub fn parse_duration(text: &str) -> f64 {
    let caps = match DURATION_RE.captures(text) {
        Some(c) => c,
        None => return 0.0,
    };
    let value: f64 = caps[1].parse().unwrap_or(0.0);
    match caps[2].to_lowercase().as_str() {
        "year" => value * 12.0,
        "month" => value,
        "week" => value / 4.0,
        "day" => value / 30.0,
        _ => 0.0,
    }
}

/// Tenure depth in months, considering only year/month/week phrases.
pub fn parse_tenure(text: &str) -> f64 {
    match TENURE_RE.find(text) {
        Some(m) => parse_duration(m.as_str()),
        None => 0.0,
    }
}

/// Whitespace-tokenized word count; 0 for empty/blank input.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn personal_experience_detected() {
        assert!(has_personal_experience("I spent 5 years as a CTO"));
        assert!(has_personal_experience("MY TEAM struggled daily"));
        assert!(!has_personal_experience("People have this problem"));
        assert!(!has_personal_experience(""));
    }

    #[test]
    fn numbers_extracted_in_order() {
        assert_eq!(extract_numbers("$50K, 40+ hours, 3x"), vec![50.0, 40.0, 3.0]);
        assert_eq!(extract_numbers("no digits here"), Vec::<f64>::new());
        assert_eq!(extract_numbers(""), Vec::<f64>::new());
    }

    #[test]
    fn quantification_needs_a_unit_marker() {
        assert!(has_quantification("wasted 40 hours"));
        assert!(has_quantification("costing $50,000 annually"));
        assert!(!has_quantification("123 456 789"), "bare numbers are not quantification");
        assert!(!has_quantification("many hours wasted"), "units without numbers");
    }

    #[test]
    fn duration_normalizes_to_months() {
        assert_eq!(parse_duration("2 years of pain"), 24.0);
        assert_eq!(parse_duration("6 months"), 6.0);
        assert_eq!(parse_duration("8 weeks"), 2.0);
        assert_eq!(parse_duration("60 days"), 2.0);
        assert_eq!(parse_duration("a long time"), 0.0);
        assert_eq!(parse_duration(""), 0.0);
    }

    #[test]
    fn tenure_skips_day_phrases() {
        // "3 days" is a duration but not tenure; the tenure scan finds "2 years".
        assert_eq!(parse_tenure("3 days ago I hit 2 years on the project"), 24.0);
        assert_eq!(parse_duration("3 days ago I hit 2 years on the project"), 0.1);
    }

    #[test]
    fn quantified_demand_pattern() {
        assert!(has_quantified_demand("30 customers wanted this"));
        assert!(has_quantified_demand("15 people asked for it"));
        assert!(!has_quantified_demand("customers wanted this"));
    }

    #[test]
    fn word_count_handles_blank_input() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
        assert_eq!(word_count("one two  three"), 3);
    }

    #[test]
    fn detectors_survive_garbage() {
        let garbage = "🔥🔥🔥 ∞ \u{0} 你好 ---";
        assert!(!has_personal_experience(garbage));
        assert!(!has_quantification(garbage));
        assert_eq!(parse_duration(garbage), 0.0);
        assert_eq!(extract_numbers(garbage), Vec::<f64>::new());
    }
}
