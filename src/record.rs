// src/record.rs
//! Input contract: the flat bag of optional narrative and numeric fields
//! assembled by outside collaborators (onboarding flow, document extraction,
//! founder-initiated recalculation). Absent fields deserialize to empty
//! string / zero / empty list: "no signal", never an error.

use serde::{Deserialize, Serialize};

/// One founder's disclosures, immutable per scoring call.
///
/// The engine never mutates a record and holds no state between calls, so a
/// single record can be scored concurrently from any number of threads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentRecord {
    // --- Narrative: problem origin & unique advantage ---
    pub problem_story: String,
    pub advantages: Vec<String>,
    pub advantage_explanation: String,

    // --- Narrative: customer evidence ---
    pub customer_quote: String,
    pub customer_surprise: String,
    pub customer_commitment: String,
    pub customer_list: Vec<String>,
    pub conversation_count: u32,

    // --- Narrative: learning velocity (build-measure-learn) ---
    pub tested: String,
    pub build_time_days: u32,
    pub measurement: String,
    pub results: String,
    pub learned: String,
    pub changed: String,

    // --- Narrative: failed assumptions ---
    pub failed_belief: String,
    pub failed_reasoning: String,
    pub failed_discovery: String,
    pub failed_change: String,

    // --- Narrative: resilience ---
    pub hardship_story: String,
    /// 1-10 self-report of how close the founder came to quitting.
    pub quit_scale: u32,
    pub hardship_reason: String,

    // --- Market disclosures ---
    pub target_customers: f64,
    /// Lead-to-customer conversion, in percent (2.0 == 2%).
    pub conversion_rate_pct: f64,
    pub avg_contract_value: f64,
    /// 0 means undisclosed; the metrics calculator substitutes its default.
    pub customer_lifetime_months: f64,

    // --- Go-to-market disclosures ---
    pub icp_description: String,
    pub channels_tried: Vec<String>,
    pub channel_results: Vec<String>,
    pub current_cac: f64,
    pub target_cac: f64,
    pub messaging_tested: bool,
    pub messaging_results: String,

    // --- Financial disclosures ---
    pub mrr: f64,
    pub previous_mrr: f64,
    /// 0 means undisclosed; ARR is then derived as 12 x MRR.
    pub arr: f64,
    pub monthly_burn: f64,
    /// Disclosed runway in months. `None` lets the metrics calculator derive
    /// the value (or its no-burn sentinel).
    pub runway_months: Option<f64>,
    pub cogs: f64,
    pub average_deal_size: f64,
}

impl AssessmentRecord {
    /// True when the founder disclosed nothing in the market section.
    /// The market dimension scores 0 in that case instead of guessing.
    pub fn market_section_empty(&self) -> bool {
        self.target_customers == 0.0
            && self.avg_contract_value == 0.0
            && self.conversion_rate_pct == 0.0
            && self.current_cac == 0.0
    }

    /// True when the go-to-market section was never touched; the GTM
    /// dimension falls back to a neutral midpoint rather than a zero.
    pub fn gtm_section_empty(&self) -> bool {
        self.icp_description.is_empty()
            && self.channels_tried.is_empty()
            && self.channel_results.is_empty()
            && self.current_cac == 0.0
            && !self.messaging_tested
    }
}
