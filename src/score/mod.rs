// src/score/mod.rs
//! Scoring pipeline: pure, testable logic that maps an `AssessmentRecord`
//! to a `CompositeScore`. No I/O, no stored state; the same record scores
//! identically on every call, on any thread.

pub mod composite;
pub mod dimensions;
pub mod metrics;
pub mod narrative;

use chrono::Utc;
use tracing::info;

use crate::config::ScoringConfig;
use crate::record::AssessmentRecord;

pub use composite::{grade_for, overall_score, percentile_of, CompositeScore, Grade};
pub use dimensions::{Dimension, DimensionScore};
pub use metrics::{HealthLevel, HealthStatus, MetricsSnapshot};
pub use narrative::{SubScore, Topic};

/// The scoring pipeline with its constant table bound.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    cfg: ScoringConfig,
}

impl ScoringEngine {
    /// Bind a validated configuration.
    pub fn new(cfg: ScoringConfig) -> anyhow::Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.cfg
    }

    /// Score one record without cohort context.
    pub fn score(&self, record: &AssessmentRecord) -> CompositeScore {
        self.score_in_cohort(record, &[])
    }

    /// Score one record and rank it against a cohort of overall scores.
    /// An empty cohort yields no percentile.
    pub fn score_in_cohort(&self, record: &AssessmentRecord, cohort: &[u8]) -> CompositeScore {
        let subs = narrative::score_all(record, &self.cfg);
        let metrics = metrics::derive(record, &self.cfg);
        let dims = dimensions::score_all(record, &subs, &metrics, &self.cfg);
        let overall = overall_score(&dims, &self.cfg.weights);
        let grade = grade_for(overall, &self.cfg.grades);
        let percentile = percentile_of(overall, cohort);
        info!(overall, ?grade, "scored assessment");
        CompositeScore {
            overall,
            grade,
            dimensions: composite::DimensionBreakdown::from_scores(&dims),
            weights: self.cfg.weights,
            narrative: composite::NarrativeBreakdown::from_scores(&subs),
            metrics,
            percentile,
            calculated_at: Utc::now(),
        }
    }

    /// Narrative sub-scores alone, for callers that surface per-topic
    /// feedback without the full composite.
    pub fn sub_scores(&self, record: &AssessmentRecord) -> [SubScore; 5] {
        narrative::score_all(record, &self.cfg)
    }

    /// Derived metrics alone.
    pub fn metrics(&self, record: &AssessmentRecord) -> MetricsSnapshot {
        metrics::derive(record, &self.cfg)
    }

    /// Health verdict over the derived metrics.
    pub fn health(&self, record: &AssessmentRecord) -> HealthStatus {
        metrics::health_status(&metrics::derive(record, &self.cfg), &self.cfg)
    }
}

/// One-shot scoring with the reference configuration.
pub fn score_assessment(record: &AssessmentRecord) -> CompositeScore {
    ScoringEngine::default().score(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_record_composite() {
        let score = score_assessment(&AssessmentRecord::default());
        // 0*.20 + 6*.18 + 50*.17 + 7*.18 + 7*.15 + 5*.12 = 12.49 -> 12
        assert_eq!(score.dimensions.market, 0);
        assert_eq!(score.dimensions.product, 6);
        assert_eq!(score.dimensions.go_to_market, 50);
        assert_eq!(score.dimensions.financial, 7);
        assert_eq!(score.dimensions.team, 7);
        assert_eq!(score.dimensions.traction, 5);
        assert_eq!(score.overall, 12);
        assert_eq!(score.grade, Grade::F);
        assert_eq!(score.percentile, None);
    }

    #[test]
    fn cohort_adds_a_percentile() {
        let engine = ScoringEngine::default();
        let score = engine.score_in_cohort(&AssessmentRecord::default(), &[5, 10, 20, 40]);
        // overall 12 beats 5 and 10 -> 50th
        assert_eq!(score.percentile, Some(50));
    }

    #[test]
    fn rejects_invalid_config() {
        let mut cfg = ScoringConfig::default();
        cfg.weights.market = 0.9;
        assert!(ScoringEngine::new(cfg).is_err());
    }

    #[test]
    fn scoring_is_deterministic() {
        let rec = AssessmentRecord {
            problem_story: "I spent 5 years fighting this problem at my company.".into(),
            conversation_count: 30,
            mrr: 12_000.0,
            previous_mrr: 10_000.0,
            ..AssessmentRecord::default()
        };
        let engine = ScoringEngine::default();
        let a = engine.score(&rec);
        let b = engine.score(&rec);
        assert_eq!(a, b, "same record, same result, timestamps aside");
    }
}
