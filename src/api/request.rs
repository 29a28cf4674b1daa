//! Request and response bodies for the pricing engine API.
//!
//! Most endpoints accept an engine model directly (equipment inputs,
//! compensation inputs, loadouts). The types here cover the endpoints that
//! combine several inputs or add display-oriented fields to a result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::AfissResult;
use crate::models::{
    JobSummary, Loadout, ProposalLineItem, ScoreResult, TimeEntry, VarianceOutcome,
    WorkVolumeInput,
};

fn default_transport_rate() -> Decimal {
    Decimal::ONE
}

/// Request body for `POST /score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// Job measurements, tagged by `service_type`.
    pub work: WorkVolumeInput,
    /// Selected AFISS factor ids. When present, the multiplier computed
    /// from them replaces any `afiss_multiplier` on `work`.
    #[serde(default)]
    pub afiss_factor_ids: Vec<String>,
}

/// Response body for `POST /score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResponse {
    /// The work score.
    pub score: ScoreResult,
    /// The AFISS multiplier, when factors were selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub afiss: Option<AfissResult>,
    /// Whether the score may be added to a proposal.
    pub proposable: bool,
}

/// Request body for `POST /estimate`.
///
/// Without a loadout the estimate uses the service template's standard
/// PPH and cost per hour; with one it uses the loadout's production rate
/// and computed hourly cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateRequest {
    /// Job measurements, tagged by `service_type`.
    pub work: WorkVolumeInput,
    /// Selected AFISS factor ids.
    #[serde(default)]
    pub afiss_factor_ids: Vec<String>,
    /// One-way drive time in minutes.
    #[serde(default)]
    pub drive_time_minutes: Decimal,
    /// Cost weight for transport hours (1 = full hourly cost).
    #[serde(default = "default_transport_rate")]
    pub transport_rate: Decimal,
    /// Optional loadout to cost the job with.
    #[serde(default)]
    pub loadout: Option<Loadout>,
    /// Optional margin override; defaults to the template's target.
    #[serde(default)]
    pub target_margin_percent: Option<Decimal>,
}

/// Request body for `POST /price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Cost to price.
    pub cost: Decimal,
    /// Target margin as a percentage of price.
    pub target_margin_percent: Decimal,
}

/// Request body for `POST /line-items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// Job measurements, tagged by `service_type`.
    pub work: WorkVolumeInput,
    /// Selected AFISS factor ids.
    #[serde(default)]
    pub afiss_factor_ids: Vec<String>,
    /// One-way drive time in minutes.
    #[serde(default)]
    pub drive_time_minutes: Decimal,
}

/// Request body for `POST /reconcile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRequest {
    /// The line item as it was locked.
    pub line_item: ProposalLineItem,
    /// Time logged against the job.
    #[serde(default)]
    pub time_entries: Vec<TimeEntry>,
}

/// Classification of each variance in a [`JobSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarianceOutcomes {
    /// Production speed; absent until production hours are logged.
    pub pph: Option<VarianceOutcome>,
    /// Hours against estimate.
    pub hours: VarianceOutcome,
    /// Cost against estimate.
    pub cost: VarianceOutcome,
    /// Profit against estimate.
    pub profit: VarianceOutcome,
    /// Margin against estimate.
    pub margin: VarianceOutcome,
}

impl From<&JobSummary> for VarianceOutcomes {
    fn from(summary: &JobSummary) -> Self {
        Self {
            pph: summary.pph_outcome(),
            hours: summary.hours_outcome(),
            cost: summary.cost_outcome(),
            profit: summary.profit_outcome(),
            margin: summary.margin_outcome(),
        }
    }
}

/// Response body for `POST /reconcile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileResponse {
    /// Estimated vs. actual figures.
    pub summary: JobSummary,
    /// Whether each variance is good or bad for the business.
    pub outcomes: VarianceOutcomes,
}
