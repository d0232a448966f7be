// src/score/composite.rs
//! Composite assembly: fold the six dimensions into a weighted 0-100
//! overall score, attach a letter grade and an optional cohort percentile,
//! and stamp the result. `calculated_at` is a provenance stamp only and is
//! excluded from equality, so regression comparisons stay byte-stable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{DimensionWeights, GradeCutoffs};
use crate::score::dimensions::{Dimension, DimensionScore};
use crate::score::metrics::MetricsSnapshot;
use crate::score::narrative::{SubScore, Topic};

/// Letter grade over the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// Per-dimension breakdown in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBreakdown {
    pub market: u8,
    pub product: u8,
    pub go_to_market: u8,
    pub financial: u8,
    pub team: u8,
    pub traction: u8,
}

impl DimensionBreakdown {
    pub fn from_scores(dims: &[DimensionScore; 6]) -> Self {
        let get = |d: Dimension| {
            dims.iter()
                .find(|s| s.dimension == d)
                .map(|s| s.points)
                .unwrap_or(0)
        };
        Self {
            market: get(Dimension::Market),
            product: get(Dimension::Product),
            go_to_market: get(Dimension::GoToMarket),
            financial: get(Dimension::Financial),
            team: get(Dimension::Team),
            traction: get(Dimension::Traction),
        }
    }
}

/// Per-topic narrative breakdown in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeBreakdown {
    pub problem_origin: u8,
    pub unique_advantage: u8,
    pub customer_evidence: u8,
    pub learning_velocity: u8,
    pub resilience: u8,
}

impl NarrativeBreakdown {
    pub fn from_scores(subs: &[SubScore; 5]) -> Self {
        let get = |t: Topic| {
            subs.iter()
                .find(|s| s.topic == t)
                .map(|s| s.points)
                .unwrap_or(0)
        };
        Self {
            problem_origin: get(Topic::ProblemOrigin),
            unique_advantage: get(Topic::UniqueAdvantage),
            customer_evidence: get(Topic::CustomerEvidence),
            learning_velocity: get(Topic::LearningVelocity),
            resilience: get(Topic::Resilience),
        }
    }
}

/// The full scoring result for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositeScore {
    pub overall: u8,
    pub grade: Grade,
    pub dimensions: DimensionBreakdown,
    /// The weights the fold applied, so the breakdown is self-describing.
    pub weights: DimensionWeights,
    pub narrative: NarrativeBreakdown,
    pub metrics: MetricsSnapshot,
    /// Present only when a cohort was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentile: Option<u8>,
    pub calculated_at: DateTime<Utc>,
}

// Equality ignores the timestamp: two runs over the same record are the
// same result.
impl PartialEq for CompositeScore {
    fn eq(&self, other: &Self) -> bool {
        self.overall == other.overall
            && self.grade == other.grade
            && self.dimensions == other.dimensions
            && self.weights == other.weights
            && self.narrative == other.narrative
            && self.metrics == other.metrics
            && self.percentile == other.percentile
    }
}

/// Weighted fold of the six dimensions, rounded half-up like the rest of
/// the pipeline.
pub fn overall_score(dims: &[DimensionScore; 6], w: &DimensionWeights) -> u8 {
    let b = DimensionBreakdown::from_scores(dims);
    let sum = b.market as f64 * w.market
        + b.product as f64 * w.product
        + b.go_to_market as f64 * w.go_to_market
        + b.financial as f64 * w.financial
        + b.team as f64 * w.team
        + b.traction as f64 * w.traction;
    sum.round().min(100.0) as u8
}

/// Letter grade for an overall score.
pub fn grade_for(overall: u8, cutoffs: &GradeCutoffs) -> Grade {
    if overall >= cutoffs.a {
        Grade::A
    } else if overall >= cutoffs.b {
        Grade::B
    } else if overall >= cutoffs.c {
        Grade::C
    } else if overall >= cutoffs.d {
        Grade::D
    } else {
        Grade::F
    }
}

/// Percent of cohort scores strictly below `overall`; `None` for an empty
/// cohort rather than a fabricated 0th or 100th.
pub fn percentile_of(overall: u8, cohort: &[u8]) -> Option<u8> {
    if cohort.is_empty() {
        return None;
    }
    let below = cohort.iter().filter(|&&s| s < overall).count();
    Some(((below as f64 / cohort.len() as f64) * 100.0).round() as u8)
}
