// src/score/dimensions.rs
//! Six investor-facing dimensions, each banded 0-100 from the record, the
//! narrative sub-scores, and the derived metrics. Band edges are contract
//! constants locked by the regression harness.
//!
//! Two sections have explicit no-disclosure behavior: an untouched market
//! section scores 0 (a TAM nobody stated is not a TAM), while an untouched
//! go-to-market section scores a neutral 50 so pre-launch founders are not
//! punished for a stage they have not reached.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ScoringConfig;
use crate::record::AssessmentRecord;
use crate::score::metrics::MetricsSnapshot;
use crate::score::narrative::{SubScore, Topic};
use crate::signals::word_count;

/// One of the six weighted assessment dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Market,
    Product,
    GoToMarket,
    Financial,
    Team,
    Traction,
}

/// A 0-100 point value for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub dimension: Dimension,
    pub points: u8,
}

fn finish(dimension: Dimension, raw: u32) -> DimensionScore {
    let points = raw.min(100) as u8;
    debug!(?dimension, raw, points, "dimension score");
    DimensionScore { dimension, points }
}

/// Score all six dimensions, in fixed dimension order.
pub fn score_all(
    record: &AssessmentRecord,
    subs: &[SubScore; 5],
    metrics: &MetricsSnapshot,
    cfg: &ScoringConfig,
) -> [DimensionScore; 6] {
    [
        score_market(record, metrics),
        score_product(record),
        score_go_to_market(record),
        score_financial(record, metrics, cfg),
        score_team(subs),
        score_traction(record, metrics),
    ]
}

fn topic_points(subs: &[SubScore; 5], topic: Topic) -> u8 {
    subs.iter()
        .find(|s| s.topic == topic)
        .map(|s| s.points)
        .unwrap_or(0)
}

/// Market: TAM size, realistic conversion assumptions, unit-economics
/// headroom. Zero when the founder disclosed nothing here.
pub fn score_market(record: &AssessmentRecord, metrics: &MetricsSnapshot) -> DimensionScore {
    if record.market_section_empty() {
        return finish(Dimension::Market, 0);
    }
    let mut score: u32 = 0;

    // TAM branch (0-40).
    let tam = record.target_customers * record.avg_contract_value;
    score += if tam >= 1_000_000_000.0 {
        40
    } else if tam >= 100_000_000.0 {
        35
    } else if tam >= 10_000_000.0 {
        28
    } else if tam >= 1_000_000.0 {
        20
    } else {
        10
    };

    // Conversion realism branch (0-30): the believable middle beats both
    // a fantasy rate and a rounding-error rate.
    let rate = record.conversion_rate_pct;
    score += if (0.5..=5.0).contains(&rate) {
        30
    } else if (0.1..=10.0).contains(&rate) {
        20
    } else if rate > 0.0 {
        10
    } else {
        5
    };

    // Unit-economics headroom branch (0-30).
    score += if metrics.ltv_cac_ratio >= 3.0 {
        30
    } else if metrics.ltv_cac_ratio >= 2.0 {
        21
    } else if metrics.ltv_cac_ratio >= 1.0 {
        12
    } else {
        0
    };

    finish(Dimension::Market, score)
}

/// Product: validation depth, iteration speed, measurement discipline, and
/// whether a failed assumption was actually processed.
pub fn score_product(record: &AssessmentRecord) -> DimensionScore {
    let mut score: u32 = 0;

    // Validation volume branch (0-20).
    score += match record.conversation_count {
        n if n >= 50 => 20,
        n if n >= 30 => 16,
        n if n >= 20 => 12,
        n if n >= 10 => 8,
        _ => 4,
    };

    // Evidence texture branch (0-20): substantive quote, commitment,
    // surprise. Character lengths, not word counts; short answers here are
    // checkbox answers.
    if record.customer_quote.len() > 50 {
        score += 8;
    }
    if record.customer_commitment.len() > 30 {
        score += 7;
    }
    if record.customer_surprise.len() > 30 {
        score += 5;
    }

    // Iteration speed branch (0-10); 0 days means no iteration disclosed.
    score += match record.build_time_days {
        0 => 2,
        d if d <= 7 => 10,
        d if d <= 14 => 8,
        d if d <= 30 => 6,
        d if d <= 60 => 4,
        _ => 2,
    };

    // Build-measure-learn loop branch (0-20).
    if record.tested.len() > 50 {
        score += 5;
    }
    if record.measurement.len() > 30 {
        score += 5;
    }
    if record.learned.len() > 50 {
        score += 5;
    }
    if record.changed.len() > 30 {
        score += 5;
    }

    // Processed-failure branch (0-30).
    if record.failed_belief.len() > 30 {
        score += 8;
    }
    if record.failed_discovery.len() > 50 {
        score += 8;
    }
    if record.failed_change.len() > 50 {
        score += 8;
    }
    if record.failed_reasoning.len() > 30 {
        score += 6;
    }

    finish(Dimension::Product, score)
}

/// Go-to-market: ICP sharpness, channel experimentation, CAC discipline,
/// messaging iteration. Neutral 50 when the section is untouched.
pub fn score_go_to_market(record: &AssessmentRecord) -> DimensionScore {
    if record.gtm_section_empty() {
        return finish(Dimension::GoToMarket, 50);
    }
    let mut score: u32 = 0;

    // ICP sharpness branch (0-35).
    let icp_len = record.icp_description.len();
    score += if icp_len >= 200 {
        35
    } else if icp_len >= 100 {
        25
    } else if icp_len >= 50 {
        15
    } else {
        5
    };

    // Channel experimentation branch (0-15).
    score += match record.channels_tried.len() {
        n if n >= 3 => 15,
        2 => 12,
        1 => 8,
        _ => 3,
    };

    // Results tracking branch (0-10): results for every channel beats
    // partial notes beats untracked experiments.
    let tried = record.channels_tried.len();
    let tracked = record.channel_results.len();
    score += if tracked >= tried && tracked > 0 {
        10
    } else if tracked > 0 {
        8
    } else if tried > 0 {
        5
    } else {
        0
    };

    // CAC discipline branch (0-10): actual vs target.
    score += if record.current_cac > 0.0 && record.target_cac > 0.0 {
        let ratio = record.current_cac / record.target_cac;
        if ratio <= 1.0 {
            10
        } else if ratio <= 1.5 {
            7
        } else if ratio <= 2.0 {
            4
        } else {
            2
        }
    } else if record.current_cac > 0.0 {
        5
    } else {
        0
    };

    // Messaging iteration branch (0-30).
    score += if record.messaging_tested && word_count(&record.messaging_results) >= 20 {
        30
    } else if record.messaging_tested {
        20
    } else {
        10
    };

    finish(Dimension::GoToMarket, score)
}

/// Financial: unit economics, runway, gross margin. Runway bands apply
/// only to a disclosed figure; an undisclosed runway with active burn is
/// a tracking failure, without burn merely an early-stage unknown.
pub fn score_financial(
    record: &AssessmentRecord,
    metrics: &MetricsSnapshot,
    cfg: &ScoringConfig,
) -> DimensionScore {
    let mut score: u32 = 0;

    // LTV:CAC branch (0-40), banded around the shared 3:1 target.
    let target = cfg.health.ltv_cac_target;
    let ratio = metrics.ltv_cac_ratio;
    score += if ratio >= 5.0 {
        40
    } else if ratio >= target {
        32
    } else if ratio >= 2.0 {
        22
    } else if ratio >= 1.0 {
        12
    } else if ratio > 0.0 {
        6
    } else {
        0
    };

    // Runway branch (0-30).
    score += match record.runway_months {
        Some(m) if m >= 18.0 => 30,
        Some(m) if m >= 12.0 => 25,
        Some(m) if m >= 9.0 => 20,
        Some(m) if m >= cfg.health.runway_at_risk_months => 15,
        Some(m) if m >= 3.0 => 8,
        Some(_) => 3,
        None if record.monthly_burn > 0.0 => 10,
        None => 5,
    };

    // Gross margin branch (0-30), banded around the shared 70% target.
    let margin = metrics.gross_margin_pct;
    score += if margin >= 80.0 {
        30
    } else if margin >= cfg.health.gross_margin_target_pct {
        25
    } else if margin >= 60.0 {
        18
    } else if margin >= 50.0 {
        12
    } else if margin >= 40.0 {
        6
    } else {
        2
    };

    finish(Dimension::Financial, score)
}

/// Team: a weighted blend of the founder-quality narrative topics. No
/// fresh banding; the narrative scorers already did the work.
pub fn score_team(subs: &[SubScore; 5]) -> DimensionScore {
    let origin = topic_points(subs, Topic::ProblemOrigin) as f64;
    let advantage = topic_points(subs, Topic::UniqueAdvantage) as f64;
    let resilience = topic_points(subs, Topic::Resilience) as f64;
    let blended = 0.40 * origin + 0.30 * advantage + 0.30 * resilience;
    finish(Dimension::Team, blended.round() as u32)
}

/// Traction: customer conversations, revenue scale, revenue momentum.
pub fn score_traction(record: &AssessmentRecord, metrics: &MetricsSnapshot) -> DimensionScore {
    let mut score: u32 = 0;

    // Conversation volume branch (0-40).
    score += match record.conversation_count {
        n if n >= 100 => 40,
        n if n >= 50 => 36,
        n if n >= 30 => 30,
        n if n >= 20 => 24,
        n if n >= 10 => 16,
        n if n >= 5 => 8,
        _ => 0,
    };

    // Revenue scale branch (0-30).
    let arr = metrics.arr;
    score += if arr >= 1_000_000.0 {
        30
    } else if arr >= 500_000.0 {
        28
    } else if arr >= 250_000.0 {
        25
    } else if arr >= 100_000.0 {
        22
    } else if arr >= 50_000.0 {
        18
    } else if arr >= 25_000.0 {
        14
    } else if arr >= 10_000.0 {
        10
    } else if arr >= 5_000.0 {
        6
    } else if arr > 0.0 {
        3
    } else {
        0
    };

    // Momentum branch (0-30). Without a growth figure, real validation or
    // revenue still earns a flat-momentum consolation.
    let growth = metrics.mrr_growth_pct;
    score += if growth >= 20.0 {
        30
    } else if growth >= 10.0 {
        24
    } else if growth >= 5.0 {
        16
    } else if growth > 0.0 {
        10
    } else if record.conversation_count >= 20 || arr >= 10_000.0 {
        10
    } else {
        5
    };

    finish(Dimension::Traction, score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{metrics, narrative};

    fn cfg() -> ScoringConfig {
        ScoringConfig::default()
    }

    fn snapshot(record: &AssessmentRecord) -> MetricsSnapshot {
        metrics::derive(record, &cfg())
    }

    #[test]
    fn empty_market_section_scores_zero() {
        let rec = AssessmentRecord::default();
        let s = score_market(&rec, &snapshot(&rec));
        assert_eq!(s.points, 0);
    }

    #[test]
    fn market_bands_stack() {
        let rec = AssessmentRecord {
            target_customers: 50_000.0,
            avg_contract_value: 6_000.0,
            conversion_rate_pct: 2.0,
            current_cac: 2_000.0,
            customer_lifetime_months: 24.0,
            ..AssessmentRecord::default()
        };
        let s = score_market(&rec, &snapshot(&rec));
        // TAM 300M -> 35, conversion 2% -> 30, ratio 6.0 -> 30
        assert_eq!(s.points, 95);
    }

    #[test]
    fn unrealistic_conversion_rate_is_penalized() {
        let base = AssessmentRecord {
            target_customers: 50_000.0,
            avg_contract_value: 6_000.0,
            conversion_rate_pct: 2.0,
            ..AssessmentRecord::default()
        };
        let fantasy = AssessmentRecord {
            conversion_rate_pct: 40.0,
            ..base.clone()
        };
        let realistic = score_market(&base, &snapshot(&base));
        let penalized = score_market(&fantasy, &snapshot(&fantasy));
        assert_eq!(realistic.points - penalized.points, 20);
    }

    #[test]
    fn empty_gtm_section_is_neutral() {
        let rec = AssessmentRecord::default();
        assert_eq!(score_go_to_market(&rec).points, 50);
    }

    #[test]
    fn gtm_full_discipline() {
        let rec = AssessmentRecord {
            icp_description: "Mid-market logistics coordinators at companies with 50-500 \
                              trucks who dispatch manually and lose loads to missed calls, \
                              reachable through industry associations and trade shows."
                .into(),
            channels_tried: vec!["cold email".into(), "linkedin".into(), "webinars".into()],
            channel_results: vec!["2% reply".into(), "8 demos".into(), "40 signups".into()],
            current_cac: 900.0,
            target_cac: 1_000.0,
            messaging_tested: true,
            messaging_results: "Tested three subject lines across two hundred prospects and \
                                the pain-first variant doubled replies over the feature-first \
                                one within the first week of sends."
                .into(),
            ..AssessmentRecord::default()
        };
        // 25 icp + 15 channels + 10 tracked + 10 cac + 30 messaging
        assert_eq!(score_go_to_market(&rec).points, 90);
    }

    #[test]
    fn financial_distinguishes_untracked_from_unneeded_runway() {
        let cfg = cfg();
        let idle = AssessmentRecord::default();
        let burning = AssessmentRecord {
            monthly_burn: 20_000.0,
            ..AssessmentRecord::default()
        };
        let idle_s = score_financial(&idle, &snapshot(&idle), &cfg);
        let burning_s = score_financial(&burning, &snapshot(&burning), &cfg);
        // 0 + 5 + 2 vs 0 + 10 + 2
        assert_eq!(idle_s.points, 7);
        assert_eq!(burning_s.points, 12);
    }

    #[test]
    fn financial_rewards_disclosed_long_runway() {
        let rec = AssessmentRecord {
            runway_months: Some(20.0),
            mrr: 10_000.0,
            average_deal_size: 500.0,
            cogs: 50.0,
            avg_contract_value: 6_000.0,
            customer_lifetime_months: 24.0,
            current_cac: 2_000.0,
            ..AssessmentRecord::default()
        };
        let s = score_financial(&rec, &snapshot(&rec), &cfg());
        // ratio 6.0 -> 40, runway 20 -> 30, margin 90% -> 30
        assert_eq!(s.points, 100);
    }

    #[test]
    fn team_blends_the_narrative_topics() {
        let rec = AssessmentRecord::default();
        let subs = narrative::score_all(&rec, &cfg());
        // 0.4*5 + 0.3*3 + 0.3*15 = 7.4 -> 7
        assert_eq!(score_team(&subs).points, 7);
    }

    #[test]
    fn traction_consolation_needs_real_signal() {
        let validated = AssessmentRecord {
            conversation_count: 25,
            ..AssessmentRecord::default()
        };
        let nothing = AssessmentRecord::default();
        let v = score_traction(&validated, &snapshot(&validated));
        let n = score_traction(&nothing, &snapshot(&nothing));
        // 24 conversations-band + 10 consolation vs 0 + 5
        assert_eq!(v.points, 34);
        assert_eq!(n.points, 5);
    }

    #[test]
    fn traction_growth_bands() {
        let rec = AssessmentRecord {
            mrr: 12_000.0,
            previous_mrr: 10_000.0,
            ..AssessmentRecord::default()
        };
        let s = score_traction(&rec, &snapshot(&rec));
        // 0 conversations + 22 arr (144K) + 30 growth (20%)
        assert_eq!(s.points, 52);
    }

    #[test]
    fn product_empty_record_bottom_bands() {
        let s = score_product(&AssessmentRecord::default());
        // 4 validation + 2 iteration
        assert_eq!(s.points, 6);
    }

    #[test]
    fn all_dimensions_stay_in_range() {
        let rec = AssessmentRecord {
            conversation_count: 1_000,
            mrr: 5_000_000.0,
            previous_mrr: 1_000.0,
            target_customers: 1e12,
            avg_contract_value: 1e9,
            conversion_rate_pct: 2.0,
            current_cac: 1.0,
            runway_months: Some(999.0),
            ..AssessmentRecord::default()
        };
        let subs = narrative::score_all(&rec, &cfg());
        let m = snapshot(&rec);
        for d in score_all(&rec, &subs, &m, &cfg()) {
            assert!(d.points <= 100);
        }
    }
}
