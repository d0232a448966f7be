// src/score/narrative.rs
//! Narrative sub-scorers: additive point branches with per-branch caps over
//! the text signal detectors. Branch values are contract constants; the
//! regression harness asserts them at zero tolerance, so any edit here must
//! go through the golden vectors.
//!
//! Pattern shared by every topic:
//!   base branch (gated, if/else) + stacking bonus branches, each capped,
//!   summed, then clamped to [floor, 100].

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::record::AssessmentRecord;
use crate::signals::{
    contains_any, count_matches, extract_numbers, has_learning_indicators,
    has_observation_language, has_personal_experience, has_quantification, has_quantified_demand,
    has_validation_indicators, parse_tenure, phrases, word_count,
};

/// One narrative topic of the assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    ProblemOrigin,
    UniqueAdvantage,
    CustomerEvidence,
    LearningVelocity,
    Resilience,
}

/// A 0-100 point value for one narrative topic. Never mutated after
/// creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubScore {
    pub topic: Topic,
    pub points: u8,
}

fn finish(topic: Topic, raw: u32, cfg: &ScoringConfig) -> SubScore {
    let points = raw.clamp(cfg.sub_score_floor as u32, 100) as u8;
    debug!(?topic, raw, points, "narrative sub-score");
    SubScore { topic, points }
}

/// Score every narrative topic of a record, in fixed topic order.
pub fn score_all(record: &AssessmentRecord, cfg: &ScoringConfig) -> [SubScore; 5] {
    [
        score_problem_origin(&record.problem_story, cfg),
        score_unique_advantage(&record.advantages, &record.advantage_explanation, cfg),
        score_customer_evidence(record, cfg),
        score_learning_velocity(record, cfg),
        score_resilience(record, cfg),
    ]
}

/// Problem origin story: lived experience beats observed problems, and
/// quantified, validated, detailed stories stack bonuses on top.
pub fn score_problem_origin(story: &str, cfg: &ScoringConfig) -> SubScore {
    let mut score: u32 = 0;

    // Base branch (0-40): personal experience with time-depth tiers,
    // or the weaker observed-problem fallback.
    let base = if has_personal_experience(story) {
        let mut b = 25;
        let months = parse_tenure(story);
        if months >= 12.0 {
            b += 15;
        } else if months >= 6.0 {
            b += 10;
        } else if months >= 3.0 {
            b += 5;
        }
        b
    } else if has_observation_language(story) {
        10
    } else {
        5
    };
    score += base.min(40);

    // Quantification branch (0-30).
    let number_count = extract_numbers(story).len() as u32;
    let quant = if has_quantification(story) {
        20 + (number_count * 2).min(10)
    } else if number_count > 0 {
        10
    } else {
        0
    };
    score += quant.min(30);

    // Validation branch (0-20).
    let validation = if has_validation_indicators(story) {
        12 + if has_quantified_demand(story) { 8 } else { 0 }
    } else {
        0
    };
    score += validation.min(20);

    // Length/detail branch (0-10).
    score += detail_band(word_count(story), &[(200, 10), (150, 7), (100, 5), (50, 2)]);

    finish(Topic::ProblemOrigin, score, cfg)
}

static EMPLOYMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(at|worked|joined|from)\s+[A-Z]\w+").expect("employment regex"));
static ROLE_COUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\s*(year|customer|user|client|partner|company)").expect("role-count regex")
});
static PROPER_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-z]+\s+[A-Z][a-z]+\b").expect("proper-name regex"));

/// Unique advantage: tag selection table, explanation depth, concrete
/// specificity signals, and a cross-validation bonus when claimed customer
/// relationships come with commitment language.
pub fn score_unique_advantage(
    selections: &[String],
    explanation: &str,
    cfg: &ScoringConfig,
) -> SubScore {
    let mut score: u32 = 0;

    // Selection branch (0-50): per-tag weights, summed then capped.
    let selected: u32 = selections
        .iter()
        .map(|s| cfg.advantage_weights.get(s).copied().unwrap_or(0))
        .sum();
    score += selected.min(50);

    // Explanation depth branch (0-20).
    score += detail_band(word_count(explanation), &[(150, 20), (100, 15), (50, 10), (25, 5)]);

    // Specificity branch (0-20): concrete employers, counts with role nouns,
    // person names, legal commitments.
    let mut specificity = 0u32;
    if EMPLOYMENT_RE.is_match(explanation) {
        specificity += 5;
    }
    if ROLE_COUNT_RE.is_match(explanation) {
        specificity += 7;
    }
    if PROPER_NAME_RE.is_match(explanation) {
        specificity += 3;
    }
    if contains_any(explanation, &phrases().legal_commitment) {
        specificity += 5;
    }
    score += specificity.min(20);

    // Cross-validation bonus (0-10): claimed relationships need evidence.
    if selections.iter().any(|s| s == "customer-relationships") {
        if contains_any(explanation, &phrases().legal_commitment) {
            score += 10;
        } else if has_validation_indicators(explanation) {
            score += 5;
        }
    }

    finish(Topic::UniqueAdvantage, score, cfg)
}

/// Customer evidence: quote depth and pain intensity, commitment strength,
/// conversation volume, surprise/learning depth, plus a small credibility
/// bonus for a verifiable named-customer list.
pub fn score_customer_evidence(record: &AssessmentRecord, cfg: &ScoringConfig) -> SubScore {
    let mut score: u32 = 0;
    let p = phrases();

    // Quote quality (0-40).
    let quote_words = word_count(&record.customer_quote);
    score += if quote_words >= 50 {
        25 + if contains_any(&record.customer_quote, &p.pain) {
            15
        } else {
            0
        }
    } else if quote_words >= 30 {
        15
    } else if quote_words >= 15 {
        8
    } else {
        0
    };

    // Commitment strength (0-30): signed/paid beats intent beats interest.
    score += if contains_any(&record.customer_commitment, &p.commitment_strong) {
        30
    } else if contains_any(&record.customer_commitment, &p.commitment_intent) {
        20
    } else if contains_any(&record.customer_commitment, &p.commitment_weak) {
        8
    } else {
        2
    };

    // Conversation volume (0-20).
    score += match record.conversation_count {
        n if n >= 50 => 20,
        n if n >= 30 => 16,
        n if n >= 20 => 12,
        n if n >= 10 => 8,
        n if n >= 5 => 5,
        n if n >= 1 => 2,
        _ => 0,
    };

    // Surprise / learning depth (0-10).
    let surprise_words = word_count(&record.customer_surprise);
    score += if surprise_words >= 50 {
        7 + if has_learning_indicators(&record.customer_surprise) {
            3
        } else {
            0
        }
    } else if surprise_words >= 25 {
        5
    } else if surprise_words >= 10 {
        2
    } else {
        0
    };

    // Named-customer credibility bonus (clamped into the 100 cap).
    score += match record.customer_list.len() {
        n if n >= 3 => 5,
        n if n >= 1 => 2,
        _ => 0,
    };

    finish(Topic::CustomerEvidence, score, cfg)
}

/// Learning velocity: how fast the founder builds, how rigorously they
/// measure, and whether learning turned into concrete change.
pub fn score_learning_velocity(record: &AssessmentRecord, cfg: &ScoringConfig) -> SubScore {
    let mut score: u32 = 0;
    let p = phrases();

    // Build speed (0-30); 0 days means no iteration disclosed, not a
    // same-day build.
    score += match record.build_time_days {
        0 => 3,
        d if d <= 7 => 30,
        d if d <= 14 => 24,
        d if d <= 30 => 18,
        d if d <= 60 => 9,
        _ => 3,
    };

    // Measurement rigor (0-30): quantified and benchmarked beats either
    // alone.
    let has_metric = !extract_numbers(&record.measurement).is_empty()
        || !extract_numbers(&record.results).is_empty();
    let has_comparison = contains_any(&record.measurement, &p.comparison)
        || contains_any(&record.results, &p.comparison);
    score += match (has_metric, has_comparison) {
        (true, true) => 30,
        (true, false) => 21,
        (false, true) => 12,
        (false, false) => 3,
    };

    // Learning depth (0-20).
    score += detail_band(word_count(&record.learned), &[(40, 20), (25, 14), (15, 8), (5, 3)]);

    // Action taken (0-20): long enough and concrete.
    let changed_words = word_count(&record.changed);
    score += if changed_words >= 30 && contains_any(&record.changed, &p.concrete_change) {
        20
    } else if changed_words >= 20 {
        14
    } else if changed_words >= 10 {
        8
    } else if changed_words >= 5 {
        4
    } else {
        0
    };

    finish(Topic::LearningVelocity, score, cfg)
}

/// Resilience: real adversity, the near-quit sweet spot, and intrinsic
/// motivation.
pub fn score_resilience(record: &AssessmentRecord, cfg: &ScoringConfig) -> SubScore {
    let mut score: u32 = 0;
    let p = phrases();

    // Adversity severity (0-35).
    let adversity_hits = count_matches(&record.hardship_story, &p.adversity);
    score += if adversity_hits >= 3 {
        25 + if word_count(&record.hardship_story) >= 100 {
            10
        } else {
            0
        }
    } else if adversity_hits >= 1 {
        15
    } else {
        5
    };

    // Quit-scale sweet spot (0-35): 7-9 means they nearly quit and pushed
    // through; 10 means they did quit; 0 is undisclosed.
    score += match record.quit_scale {
        7..=9 => 35,
        5 | 6 => 25,
        3 | 4 => 15,
        1 | 2 => 10,
        _ => 5,
    };

    // Intrinsic motivation (0-30).
    let motivation_hits = count_matches(&record.hardship_reason, &p.intrinsic);
    score += if motivation_hits >= 3 {
        30
    } else if motivation_hits == 2 {
        22
    } else if motivation_hits == 1 {
        15
    } else if word_count(&record.hardship_reason) >= 50 {
        10
    } else {
        5
    };

    finish(Topic::Resilience, score, cfg)
}

/// Descending (threshold, points) bands over a word count; 0 below the
/// lowest band.
fn detail_band(words: usize, bands: &[(usize, u32)]) -> u32 {
    for &(threshold, points) in bands {
        if words >= threshold {
            return points;
        }
    }
    0
}
