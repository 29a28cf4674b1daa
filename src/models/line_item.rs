//! Locked proposal line items.
//!
//! A [`ProposalLineItem`] freezes the score, time estimate, price and the
//! service template they were computed from. It has read accessors only:
//! once created, the client price cannot be changed through the engine.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PricingResult, ScoreResult, ServiceTemplate, ServiceType, TimeEstimate};

/// A proposal line item with a locked client price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalLineItem {
    id: Uuid,
    locked_at: DateTime<Utc>,
    template: ServiceTemplate,
    score: ScoreResult,
    time_estimate: TimeEstimate,
    pricing: PricingResult,
}

impl ProposalLineItem {
    pub(crate) fn new(
        template: ServiceTemplate,
        score: ScoreResult,
        time_estimate: TimeEstimate,
        pricing: PricingResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            locked_at: Utc::now(),
            template,
            score,
            time_estimate,
            pricing,
        }
    }

    /// Unique identifier of the line item.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the price was locked.
    pub fn locked_at(&self) -> DateTime<Utc> {
        self.locked_at
    }

    /// The service priced by this line item.
    pub fn service_type(&self) -> ServiceType {
        self.template.service_type
    }

    /// The service template captured at lock time.
    pub fn template(&self) -> &ServiceTemplate {
        &self.template
    }

    /// The locked work score.
    pub fn score(&self) -> &ScoreResult {
        &self.score
    }

    /// The locked time estimate.
    pub fn time_estimate(&self) -> &TimeEstimate {
        &self.time_estimate
    }

    /// The locked pricing.
    pub fn pricing(&self) -> &PricingResult {
        &self.pricing
    }

    /// The price billed to the customer.
    pub fn client_price(&self) -> Decimal {
        self.pricing.total_price
    }

    /// Estimated cost at lock time.
    pub fn estimated_cost(&self) -> Decimal {
        self.pricing.total_cost
    }

    /// Estimated profit at lock time.
    pub fn estimated_profit(&self) -> Decimal {
        self.pricing.profit
    }
}
