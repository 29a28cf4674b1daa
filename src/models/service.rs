//! Service types and company-wide service templates.
//!
//! A [`ServiceTemplate`] is the Tier-1 pricing standard for a service type:
//! the production rate, cost and margin used to lock proposal prices
//! regardless of which loadout eventually performs the work.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The kinds of work the engine can score and price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    /// Grinding stumps below grade.
    StumpGrinding,
    /// Mulching standing vegetation with a forestry mulcher.
    ForestryMulching,
    /// Clearing land of trees and brush.
    LandClearing,
    /// Felling and removing whole trees.
    TreeRemoval,
    /// Pruning a percentage of a tree's canopy.
    TreeTrimming,
}

impl ServiceType {
    /// All service types, in display order.
    pub const ALL: [ServiceType; 5] = [
        ServiceType::StumpGrinding,
        ServiceType::ForestryMulching,
        ServiceType::LandClearing,
        ServiceType::TreeRemoval,
        ServiceType::TreeTrimming,
    ];

    /// Returns the snake_case identifier used in configuration and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::StumpGrinding => "stump_grinding",
            ServiceType::ForestryMulching => "forestry_mulching",
            ServiceType::LandClearing => "land_clearing",
            ServiceType::TreeRemoval => "tree_removal",
            ServiceType::TreeTrimming => "tree_trimming",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Company-wide pricing standard for one service type.
///
/// Templates are captured by value into a proposal line item when the
/// proposal is created, so later edits to the configured template never
/// change a price a customer has already been quoted.
///
/// # Example
///
/// ```
/// use treeshop_engine::models::{ServiceTemplate, ServiceType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let template = ServiceTemplate {
///     service_type: ServiceType::ForestryMulching,
///     standard_pph: Decimal::from_str("1.3").unwrap(),
///     standard_cost_per_hour: Decimal::from_str("246.43").unwrap(),
///     standard_billing_rate: Decimal::from_str("492.86").unwrap(),
///     target_margin_percent: Decimal::from(50),
/// };
/// assert!(template.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTemplate {
    /// The service this template prices.
    pub service_type: ServiceType,
    /// Standard production rate in TreeShop points per hour.
    pub standard_pph: Decimal,
    /// Standard fully-loaded crew cost per hour.
    pub standard_cost_per_hour: Decimal,
    /// Standard hourly billing rate quoted to customers.
    pub standard_billing_rate: Decimal,
    /// Target margin as a percentage of price (e.g. 50 for 50%).
    pub target_margin_percent: Decimal,
}

impl ServiceTemplate {
    /// Checks that the template can be used to price work.
    pub fn validate(&self) -> EngineResult<()> {
        if self.standard_pph <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "standard_pph",
                format!("must be greater than zero for {}", self.service_type),
            ));
        }
        if self.standard_cost_per_hour < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "standard_cost_per_hour",
                format!("must not be negative for {}", self.service_type),
            ));
        }
        if self.standard_billing_rate < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "standard_billing_rate",
                format!("must not be negative for {}", self.service_type),
            ));
        }
        if self.target_margin_percent < Decimal::ZERO
            || self.target_margin_percent >= Decimal::ONE_HUNDRED
        {
            return Err(EngineError::invalid_input(
                "target_margin_percent",
                format!(
                    "must be in [0, 100) for {}, got {}",
                    self.service_type, self.target_margin_percent
                ),
            ));
        }
        Ok(())
    }
}
