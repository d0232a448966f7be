//! Demo that scores a record from a JSON file (or an empty record when no
//! path is given) and prints the composite as pretty JSON.
//!
//! Usage: `qscore_demo [record.json] [cohort.json]` where the optional
//! cohort file is a JSON array of overall scores.

use std::fs;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use qscore_engine::{AssessmentRecord, ScoringEngine};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);

    let record: AssessmentRecord = match args.next() {
        Some(path) => {
            let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?
        }
        None => AssessmentRecord::default(),
    };

    let cohort: Vec<u8> = match args.next() {
        Some(path) => {
            let raw = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?
        }
        None => Vec::new(),
    };

    let engine = ScoringEngine::default();
    let score = engine.score_in_cohort(&record, &cohort);
    let health = engine.health(&record);

    println!("{}", serde_json::to_string_pretty(&score)?);
    println!("health: {}", serde_json::to_string(&health)?);
    Ok(())
}
