// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod record;
pub mod score;
pub mod signals;

// ---- Re-exports for stable public API ----
pub use crate::config::ScoringConfig;
pub use crate::record::AssessmentRecord;
pub use crate::score::{
    score_assessment, CompositeScore, Grade, HealthLevel, HealthStatus, MetricsSnapshot,
    ScoringEngine, SubScore, Topic,
};
