//! Job reconciliation summary.
//!
//! A [`JobSummary`] compares a locked proposal against actual field
//! performance. Every field is derived; summaries are recomputed from
//! time entries each time rather than stored.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a variance is good or bad for the business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarianceOutcome {
    /// The job did better than projected on this dimension.
    Favorable,
    /// The job did worse than projected on this dimension.
    Unfavorable,
    /// Exactly on projection.
    OnTarget,
}

impl VarianceOutcome {
    /// Classifies a variance where a positive value is good.
    pub fn positive_is_favorable(variance: Decimal) -> Self {
        if variance > Decimal::ZERO {
            VarianceOutcome::Favorable
        } else if variance < Decimal::ZERO {
            VarianceOutcome::Unfavorable
        } else {
            VarianceOutcome::OnTarget
        }
    }

    /// Classifies a variance where a negative value is good.
    pub fn negative_is_favorable(variance: Decimal) -> Self {
        Self::positive_is_favorable(-variance)
    }
}

/// Estimated vs. actual economics for one job.
///
/// Sign conventions:
/// - `pph_variance = actual_pph - standard_pph`: positive means the crew
///   was faster than standard (favorable).
/// - `cost_variance = actual_total_cost - estimated_cost`: positive means
///   over budget (unfavorable).
/// - `profit_variance = estimated_profit - actual_profit`: the sign is
///   inverted relative to the others. A NEGATIVE value means profit beat
///   the projection (favorable). Use [`JobSummary::profit_outcome`] rather
///   than testing the sign directly.
/// - `margin_variance = actual_margin - estimated_margin`: positive is
///   favorable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// The locked price billed to the customer.
    pub client_price: Decimal,
    /// Adjusted score of the locked proposal.
    pub adjusted_score: Decimal,
    /// Estimated hours at lock time.
    pub estimated_hours: Decimal,
    /// Estimated cost at lock time.
    pub estimated_cost: Decimal,
    /// Estimated profit at lock time.
    pub estimated_profit: Decimal,
    /// Estimated margin percentage at lock time.
    pub estimated_margin: Decimal,
    /// Logged production hours.
    pub actual_production_hours: Decimal,
    /// Logged site-support hours.
    pub actual_site_support_hours: Decimal,
    /// Logged general-support hours.
    pub actual_general_support_hours: Decimal,
    /// All logged hours.
    pub actual_total_hours: Decimal,
    /// Actual labor cost.
    pub actual_labor_cost: Decimal,
    /// Actual equipment cost.
    pub actual_equipment_cost: Decimal,
    /// `actual_labor_cost + actual_equipment_cost`.
    pub actual_total_cost: Decimal,
    /// `client_price - actual_total_cost`.
    pub actual_profit: Decimal,
    /// `actual_profit / client_price * 100`.
    pub actual_margin: Decimal,
    /// Standard PPH from the captured service template.
    pub standard_pph: Decimal,
    /// Achieved points per production hour; `None` until production
    /// hours have been logged.
    pub actual_pph: Option<Decimal>,
    /// `actual_pph - standard_pph`.
    pub pph_variance: Option<Decimal>,
    /// `actual_total_hours - estimated_hours`.
    pub hours_variance: Decimal,
    /// `actual_total_cost - estimated_cost`.
    pub cost_variance: Decimal,
    /// `estimated_profit - actual_profit` (inverted sign, see above).
    pub profit_variance: Decimal,
    /// `actual_margin - estimated_margin`.
    pub margin_variance: Decimal,
}

impl JobSummary {
    /// Production speed outcome; `None` until production hours exist.
    pub fn pph_outcome(&self) -> Option<VarianceOutcome> {
        self.pph_variance.map(VarianceOutcome::positive_is_favorable)
    }

    /// Hours outcome: fewer hours than estimated is favorable.
    pub fn hours_outcome(&self) -> VarianceOutcome {
        VarianceOutcome::negative_is_favorable(self.hours_variance)
    }

    /// Cost outcome: under budget is favorable.
    pub fn cost_outcome(&self) -> VarianceOutcome {
        VarianceOutcome::negative_is_favorable(self.cost_variance)
    }

    /// Profit outcome: a negative profit variance is favorable.
    pub fn profit_outcome(&self) -> VarianceOutcome {
        VarianceOutcome::negative_is_favorable(self.profit_variance)
    }

    /// Margin outcome: a higher margin than estimated is favorable.
    pub fn margin_outcome(&self) -> VarianceOutcome {
        VarianceOutcome::positive_is_favorable(self.margin_variance)
    }
}
