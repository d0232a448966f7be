// src/score/metrics.rs
//! Numeric metrics calculator: pure arithmetic over the record's financial
//! disclosures, recomputed fresh each call. Every denominator is guarded;
//! absent inputs produce documented defaults, never NaN and never a panic.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::record::AssessmentRecord;

/// Derived financial and operating metrics.
///
/// Monetary fields are rounded to the nearest whole unit, percentages and
/// ratios to one decimal. `runway_months` is `f64::INFINITY` when burn is
/// zero and no runway was disclosed; a company that spends nothing never
/// runs out. JSON serialization renders that sentinel as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub mrr: f64,
    pub arr: f64,
    pub burn_rate: f64,
    #[serde(with = "runway_wire")]
    pub runway_months: f64,
    pub gross_margin_pct: f64,
    pub ltv: f64,
    pub cac: f64,
    pub ltv_cac_ratio: f64,
    pub payback_months: f64,
    pub customer_count: u32,
    pub mrr_growth_pct: f64,
    pub net_new_mrr: f64,
    pub burn_multiple: f64,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Wire form for the runway sentinel: infinity crosses JSON as `null`.
mod runway_wire {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(months: &f64, ser: S) -> Result<S::Ok, S::Error> {
        if months.is_finite() {
            ser.serialize_some(months)
        } else {
            ser.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(de)?.unwrap_or(f64::INFINITY))
    }
}

/// Derive the full snapshot from a record.
pub fn derive(record: &AssessmentRecord, cfg: &ScoringConfig) -> MetricsSnapshot {
    let mrr = record.mrr;
    let arr = if record.arr > 0.0 {
        record.arr
    } else {
        mrr * 12.0
    };
    let burn = record.monthly_burn;

    let customer_count = if record.average_deal_size > 0.0 {
        (mrr / record.average_deal_size).round() as u32
    } else {
        0
    };

    let total_cogs = customer_count as f64 * record.cogs;
    let gross_margin_pct = if mrr > 0.0 {
        ((mrr - total_cogs) / mrr) * 100.0
    } else {
        0.0
    };

    let lifetime_months = if record.customer_lifetime_months > 0.0 {
        record.customer_lifetime_months
    } else {
        cfg.customer_lifetime_default_months
    };
    let ltv = record.avg_contract_value * (lifetime_months / 12.0);

    let cac = record.current_cac;
    let ltv_cac_ratio = if cac > 0.0 { ltv / cac } else { 0.0 };

    let contribution = record.average_deal_size - record.cogs;
    let payback_months = if contribution > 0.0 {
        cac / contribution
    } else {
        0.0
    };

    let mrr_growth_pct = if record.previous_mrr > 0.0 {
        ((mrr - record.previous_mrr) / record.previous_mrr) * 100.0
    } else {
        0.0
    };

    let net_new_mrr = mrr - record.previous_mrr;
    let burn_multiple = if net_new_mrr > 0.0 {
        burn / net_new_mrr
    } else {
        0.0
    };

    // Disclosed runway wins; otherwise zero burn means indefinite runway.
    let runway_months = record.runway_months.unwrap_or(if burn > 0.0 {
        0.0
    } else {
        f64::INFINITY
    });

    let snapshot = MetricsSnapshot {
        mrr: mrr.round(),
        arr: arr.round(),
        burn_rate: burn.round(),
        runway_months,
        gross_margin_pct: round1(gross_margin_pct),
        ltv: ltv.round(),
        cac: cac.round(),
        ltv_cac_ratio: round1(ltv_cac_ratio),
        payback_months: round1(payback_months),
        customer_count,
        mrr_growth_pct: round1(mrr_growth_pct),
        net_new_mrr: net_new_mrr.round(),
        burn_multiple: round1(burn_multiple),
    };
    debug!(?snapshot, "derived metrics");
    snapshot
}

/// Coarse health verdict consumed by downstream dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    Healthy,
    Warning,
    Critical,
}

/// Issues and strengths against the shared health targets. The financial
/// and traction dimensions band on the same targets, so the two surfaces
/// can never disagree about what "at risk" means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub overall: HealthLevel,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
}

pub fn health_status(m: &MetricsSnapshot, cfg: &ScoringConfig) -> HealthStatus {
    let t = &cfg.health;
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    if m.ltv_cac_ratio < t.ltv_cac_target {
        issues.push(format!(
            "LTV:CAC ratio below {}:1 target",
            t.ltv_cac_target
        ));
    } else if m.ltv_cac_ratio > 5.0 {
        strengths.push("Excellent LTV:CAC ratio".to_string());
    }

    if m.runway_months < t.runway_at_risk_months {
        issues.push(format!(
            "Less than {} months runway",
            t.runway_at_risk_months
        ));
    } else if m.runway_months > 12.0 {
        strengths.push("Strong runway (12+ months)".to_string());
    }

    if m.gross_margin_pct < t.gross_margin_target_pct {
        issues.push(format!(
            "Gross margin below {}% target",
            t.gross_margin_target_pct
        ));
    } else {
        strengths.push("Healthy gross margin".to_string());
    }

    if m.mrr_growth_pct < t.mrr_growth_target_pct {
        issues.push(format!(
            "MRR growth below {}% MoM",
            t.mrr_growth_target_pct
        ));
    } else if m.mrr_growth_pct > 20.0 {
        strengths.push("Strong MRR growth".to_string());
    }

    let overall = if issues.len() > 2 {
        HealthLevel::Critical
    } else if !issues.is_empty() {
        HealthLevel::Warning
    } else {
        HealthLevel::Healthy
    };

    HealthStatus {
        overall,
        issues,
        strengths,
    }
}
