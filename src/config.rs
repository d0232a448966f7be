// src/config.rs
//! Central scoring constants: dimension weights, grade cutoffs, the advantage
//! tag table, health-band targets, and the sub-score floor. These are the
//! contract values the regression harness locks down; they live here once
//! and are injected into the scorers, never scattered as literals.
//!
//! `ScoringConfig::default()` is the reference rule set. `from_toml_str`
//! accepts a (possibly partial) TOML override and validates it, mirroring
//! how the relevance config is loaded elsewhere in this family of tools.

use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed dimension weights; must sum to 1.0. Echoed on the composite wire
/// form so presentation collaborators can reconstruct the weighting
/// without the config. TOML overrides keep snake_case keys; the wire key
/// is camelCase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionWeights {
    pub market: f64,
    pub product: f64,
    #[serde(rename(serialize = "goToMarket"), alias = "goToMarket")]
    pub go_to_market: f64,
    pub financial: f64,
    pub team: f64,
    pub traction: f64,
}

impl Default for DimensionWeights {
    fn default() -> Self {
        Self {
            market: 0.20,
            product: 0.18,
            go_to_market: 0.17,
            financial: 0.18,
            team: 0.15,
            traction: 0.12,
        }
    }
}

impl DimensionWeights {
    pub fn sum(&self) -> f64 {
        self.market + self.product + self.go_to_market + self.financial + self.team + self.traction
    }
}

/// Letter-grade cutoffs on the overall 0-100 score. Scores below `d` are F.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GradeCutoffs {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

impl Default for GradeCutoffs {
    fn default() -> Self {
        Self {
            a: 80,
            b: 65,
            c: 50,
            d: 35,
        }
    }
}

/// Health-band targets shared by the metrics health check and the
/// financial/traction dimension bands. Keeping them in one table means the
/// dimensions can never drift from what downstream health consumers report.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct HealthTargets {
    pub ltv_cac_target: f64,
    pub runway_at_risk_months: f64,
    pub gross_margin_target_pct: f64,
    pub mrr_growth_target_pct: f64,
}

impl Default for HealthTargets {
    fn default() -> Self {
        Self {
            ltv_cac_target: 3.0,
            runway_at_risk_months: 6.0,
            gross_margin_target_pct: 70.0,
            mrr_growth_target_pct: 10.0,
        }
    }
}

/// The full constant table injected into the scoring pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: DimensionWeights,
    pub grades: GradeCutoffs,
    pub health: HealthTargets,
    /// Per-tag points for the unique-advantage selection branch
    /// (summed, then capped at 50 by the scorer).
    pub advantage_weights: BTreeMap<String, u32>,
    /// Minimum sub-score for any narrative topic. The historical rule set's
    /// empty-input floors emerged from stacked base constants; here the
    /// floor is an explicit, auditable value.
    pub sub_score_floor: u8,
    /// Substituted when a founder discloses no customer lifetime.
    pub customer_lifetime_default_months: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let advantage_weights = BTreeMap::from([
            ("industry-experience".to_string(), 15),
            ("technical-skills".to_string(), 12),
            // Strongest signal.
            ("customer-relationships".to_string(), 20),
            ("proprietary-insight".to_string(), 18),
            ("relevant-failure".to_string(), 12),
            ("distribution-advantage".to_string(), 15),
        ]);
        Self {
            weights: DimensionWeights::default(),
            grades: GradeCutoffs::default(),
            health: HealthTargets::default(),
            advantage_weights,
            sub_score_floor: 3,
            customer_lifetime_default_months: 36.0,
        }
    }
}

impl ScoringConfig {
    /// Load from a TOML string; missing sections keep reference defaults.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: ScoringConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject weight sets and cutoffs that would break the score contract.
    pub fn validate(&self) -> anyhow::Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            bail!("dimension weights must sum to 1.0, got {sum}");
        }
        let g = &self.grades;
        if !(g.a > g.b && g.b > g.c && g.c > g.d) {
            bail!(
                "grade cutoffs must be strictly descending, got A>={} B>={} C>={} D>={}",
                g.a,
                g.b,
                g.c,
                g.d
            );
        }
        if g.a > 100 {
            bail!("grade cutoff A must be within 0-100, got {}", g.a);
        }
        if self.sub_score_floor > 100 {
            bail!("sub-score floor must be within 0-100, got {}", self.sub_score_floor);
        }
        Ok(())
    }
}
