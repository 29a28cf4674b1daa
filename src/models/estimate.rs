//! Estimate result models: score, time and price.
//!
//! These are the values persisted verbatim onto a proposal line item when
//! a proposal is created.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{AuditStep, AuditTrace, ServiceType};

/// The output of a work score calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// The service that was scored.
    pub service_type: ServiceType,
    /// Score before the complexity multiplier.
    pub base_score: Decimal,
    /// Job-level complexity multiplier (AFISS, or 1 for stump grinding).
    pub complexity_multiplier: Decimal,
    /// `base_score * complexity_multiplier`.
    pub adjusted_score: Decimal,
    /// Tag naming the formula that produced the base score.
    pub formula_used: String,
    /// Echo of the measurements that were scored.
    pub work_volume_inputs: serde_json::Value,
    /// False when inputs are below the declared minimums (e.g. acreage).
    pub minimums_met: bool,
}

impl ScoreResult {
    /// Returns true if the score may be added to a proposal.
    ///
    /// A zero score or inputs below the declared minimums must block
    /// "add to proposal" in the calculators.
    pub fn is_proposable(&self) -> bool {
        self.minimums_met && self.adjusted_score > Decimal::ZERO
    }

    /// Describes this score as an audit step.
    pub fn audit_step(&self, step_number: u32) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "work_score".to_string(),
            rule_name: format!("Work Score ({})", self.service_type),
            input: self.work_volume_inputs.clone(),
            output: serde_json::json!({
                "base_score": self.base_score.normalize().to_string(),
                "complexity_multiplier": self.complexity_multiplier.normalize().to_string(),
                "adjusted_score": self.adjusted_score.normalize().to_string(),
                "formula_used": self.formula_used,
                "minimums_met": self.minimums_met
            }),
            reasoning: format!(
                "{} base score {} x multiplier {} = {} points",
                self.formula_used,
                self.base_score.round_dp(2).normalize(),
                self.complexity_multiplier.normalize(),
                self.adjusted_score.round_dp(2).normalize()
            ),
        }
    }
}

/// Estimated hours for a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimate {
    /// Adjusted score the estimate was made from.
    pub adjusted_score: Decimal,
    /// Production rate used, in points per hour.
    pub production_rate_pph: Decimal,
    /// One-way drive time in minutes.
    pub drive_time_minutes: Decimal,
    /// Weight applied to transport hours when costing (1 = full rate).
    pub transport_rate: Decimal,
    /// Hours spent producing: `adjusted_score / production_rate_pph`.
    pub production_hours: Decimal,
    /// Round-trip drive hours.
    pub transport_hours: Decimal,
    /// Contingency hours, a fixed share of production hours.
    pub buffer_hours: Decimal,
    /// Service minimum, if one applies.
    pub minimum_hours: Option<Decimal>,
    /// True when the minimum raised the total.
    pub minimum_applied: bool,
    /// `max(production + transport + buffer, minimum_hours)`.
    pub total_estimated_hours: Decimal,
}

impl TimeEstimate {
    /// Describes this estimate as an audit step.
    pub fn audit_step(&self, step_number: u32) -> AuditStep {
        let reasoning = if self.minimum_applied {
            format!(
                "{}h production + {}h transport + {}h buffer is below the {}h minimum; billing {}h",
                self.production_hours.round_dp(2).normalize(),
                self.transport_hours.round_dp(2).normalize(),
                self.buffer_hours.round_dp(2).normalize(),
                self.minimum_hours.unwrap_or_default().normalize(),
                self.total_estimated_hours.round_dp(2).normalize()
            )
        } else {
            format!(
                "{}h production + {}h transport + {}h buffer = {}h",
                self.production_hours.round_dp(2).normalize(),
                self.transport_hours.round_dp(2).normalize(),
                self.buffer_hours.round_dp(2).normalize(),
                self.total_estimated_hours.round_dp(2).normalize()
            )
        };

        AuditStep {
            step_number,
            rule_id: "time_estimate".to_string(),
            rule_name: "Time Estimate".to_string(),
            input: serde_json::json!({
                "adjusted_score": self.adjusted_score.normalize().to_string(),
                "production_rate_pph": self.production_rate_pph.normalize().to_string(),
                "drive_time_minutes": self.drive_time_minutes.normalize().to_string(),
                "minimum_hours": self.minimum_hours.map(|h| h.normalize().to_string())
            }),
            output: serde_json::json!({
                "production_hours": self.production_hours.normalize().to_string(),
                "transport_hours": self.transport_hours.normalize().to_string(),
                "buffer_hours": self.buffer_hours.normalize().to_string(),
                "total_estimated_hours": self.total_estimated_hours.normalize().to_string(),
                "minimum_applied": self.minimum_applied
            }),
            reasoning,
        }
    }
}

/// Client price derived from an estimate at a target margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Hours the price was built from.
    pub total_estimated_hours: Decimal,
    /// Cost basis per hour.
    pub cost_per_hour: Decimal,
    /// Requested margin as a percentage of price.
    pub target_margin_percent: Decimal,
    /// Total cost of the job.
    pub total_cost: Decimal,
    /// Price quoted to the client: `total_cost / (1 - margin)`.
    pub total_price: Decimal,
    /// `total_price - total_cost`.
    pub profit: Decimal,
    /// Achieved margin: `profit / total_price * 100`.
    pub margin_percent: Decimal,
}

impl PricingResult {
    /// Describes this price as an audit step.
    pub fn audit_step(&self, step_number: u32) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "margin_pricing".to_string(),
            rule_name: "Margin Pricing".to_string(),
            input: serde_json::json!({
                "total_estimated_hours": self.total_estimated_hours.normalize().to_string(),
                "cost_per_hour": self.cost_per_hour.normalize().to_string(),
                "target_margin_percent": self.target_margin_percent.normalize().to_string()
            }),
            output: serde_json::json!({
                "total_cost": self.total_cost.normalize().to_string(),
                "total_price": self.total_price.normalize().to_string(),
                "profit": self.profit.normalize().to_string(),
                "margin_percent": self.margin_percent.normalize().to_string()
            }),
            reasoning: format!(
                "${} cost / (1 - {}%) = ${} price",
                self.total_cost.round_dp(2).normalize(),
                self.target_margin_percent.normalize(),
                self.total_price.round_dp(2).normalize()
            ),
        }
    }
}

/// The complete result of an on-demand estimate.
///
/// Returned by the calculators before anything is locked; see
/// [`super::ProposalLineItem`] for the persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The service that was estimated.
    pub service_type: ServiceType,
    /// Work score.
    pub score: ScoreResult,
    /// Time estimate.
    pub time_estimate: TimeEstimate,
    /// Price at the requested margin.
    pub pricing: PricingResult,
    /// Explainable record of the calculation.
    pub audit_trace: AuditTrace,
}
