//! Margin-based pricing.
//!
//! Margin is always profit as a share of PRICE:
//!
//! ```text
//! price  = cost / (1 - margin / 100)
//! margin = (price - cost) / price * 100
//! ```
//!
//! A markup (`cost * (1 + pct)`) is never used. At 50% the two differ by a
//! third of the price ($246.43 costs $492.86 at 50% margin but only $369.65
//! at 50% markup), so confusing them under-prices every job.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{PricingResult, TimeEstimate};

use super::checked;

/// A cost converted to a price at a target margin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginPricing {
    /// The cost basis.
    pub cost: Decimal,
    /// The price: `cost / (1 - target_margin_percent / 100)`.
    pub price: Decimal,
    /// `price - cost`.
    pub profit: Decimal,
    /// `profit / price * 100`; equals the requested margin.
    pub margin_percent: Decimal,
}

/// A billing rate at one margin of a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRate {
    /// Margin as a percentage of price.
    pub margin_percent: Decimal,
    /// Hourly rate that achieves the margin.
    pub rate: Decimal,
}

fn validate_margin(target_margin_percent: Decimal) -> EngineResult<()> {
    if target_margin_percent < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "target_margin_percent",
            format!("must not be negative, got {}", target_margin_percent),
        ));
    }
    if target_margin_percent >= Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid_input(
            "target_margin_percent",
            format!("must be below 100, got {}", target_margin_percent),
        ));
    }
    Ok(())
}

/// Converts a cost into a price at a target margin.
///
/// # Errors
///
/// `InvalidInput` if the margin is outside [0, 100) or the cost is negative.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::price_with_margin;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let pricing = price_with_margin(
///     Decimal::from_str("246.43").unwrap(),
///     Decimal::from(50),
/// ).unwrap();
///
/// assert_eq!(pricing.price, Decimal::from_str("492.86").unwrap());
/// assert_eq!(pricing.margin_percent, Decimal::from(50));
/// ```
pub fn price_with_margin(cost: Decimal, target_margin_percent: Decimal) -> EngineResult<MarginPricing> {
    validate_margin(target_margin_percent)?;
    if cost < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "cost",
            format!("must not be negative, got {}", cost),
        ));
    }

    let retained = Decimal::ONE - target_margin_percent / Decimal::ONE_HUNDRED;
    let price = checked::div("price", cost, retained)?;
    let profit = price - cost;
    let margin_percent = if price.is_zero() {
        target_margin_percent
    } else {
        profit / price * Decimal::ONE_HUNDRED
    };

    Ok(MarginPricing {
        cost,
        price,
        profit,
        margin_percent,
    })
}

/// Derives the margin percentage achieved by selling at `price`.
///
/// # Errors
///
/// `InvalidInput` if the price is not positive.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::derive_margin_percent;
/// use rust_decimal::Decimal;
///
/// let margin = derive_margin_percent(Decimal::from(60), Decimal::from(100)).unwrap();
/// assert_eq!(margin, Decimal::from(40));
/// ```
pub fn derive_margin_percent(cost: Decimal, price: Decimal) -> EngineResult<Decimal> {
    if price <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "price",
            format!("must be greater than zero, got {}", price),
        ));
    }
    let profit = checked::sub("profit", price, cost)?;
    let share = checked::div("margin", profit, price)?;
    checked::mul("margin", share, Decimal::ONE_HUNDRED)
}

/// Computes one billing rate per margin in the ladder.
pub fn billing_rates(cost_per_hour: Decimal, margin_ladder: &[Decimal]) -> EngineResult<Vec<BillingRate>> {
    margin_ladder
        .iter()
        .map(|margin| {
            let pricing = price_with_margin(cost_per_hour, *margin)?;
            Ok(BillingRate {
                margin_percent: *margin,
                rate: pricing.price,
            })
        })
        .collect()
}

/// Prices a time estimate at a cost per hour and target margin.
///
/// Total cost is `total_estimated_hours * cost_per_hour`, with the
/// transport share of those hours weighted by the estimate's transport
/// rate (a rate of 1 charges transport at the full hourly cost).
///
/// # Errors
///
/// `InvalidInput` if the margin is outside [0, 100) or the cost per hour
/// is negative.
pub fn price_job(
    estimate: &TimeEstimate,
    cost_per_hour: Decimal,
    target_margin_percent: Decimal,
) -> EngineResult<PricingResult> {
    if cost_per_hour < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "cost_per_hour",
            format!("must not be negative, got {}", cost_per_hour),
        ));
    }

    let transport_cost = checked::mul("transport cost", estimate.transport_hours, cost_per_hour)?;
    let transport_discount = checked::mul(
        "transport cost",
        transport_cost,
        Decimal::ONE - estimate.transport_rate,
    )?;
    let hours_cost = checked::mul("job cost", estimate.total_estimated_hours, cost_per_hour)?;
    let total_cost = checked::sub("job cost", hours_cost, transport_discount)?;
    let pricing = price_with_margin(total_cost, target_margin_percent)?;

    Ok(PricingResult {
        total_estimated_hours: estimate.total_estimated_hours,
        cost_per_hour,
        target_margin_percent,
        total_cost: pricing.cost,
        total_price: pricing.price,
        profit: pricing.profit,
        margin_percent: pricing.margin_percent,
    })
}
