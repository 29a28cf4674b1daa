//! Time estimation from a work score.
//!
//! ```text
//! production = adjusted_score / production_rate_pph
//! transport  = drive_time_minutes / 60 * 2        (round trip)
//! buffer     = buffer_fraction * production
//! total      = max(production + transport + buffer, service minimum)
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::TimeSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{ServiceType, TimeEstimate};

use super::checked;

const MINUTES_PER_HOUR: Decimal = dec!(60);

fn default_transport_rate() -> Decimal {
    Decimal::ONE
}

/// Inputs to a time estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEstimateInput {
    /// Service being estimated; selects the minimum hours.
    pub service_type: ServiceType,
    /// Adjusted work score in points.
    pub adjusted_score: Decimal,
    /// Production rate in points per hour.
    pub production_rate_pph: Decimal,
    /// One-way drive time in minutes.
    #[serde(default)]
    pub drive_time_minutes: Decimal,
    /// Cost weight for transport hours; carried through to pricing.
    #[serde(default = "default_transport_rate")]
    pub transport_rate: Decimal,
}

/// Estimates job hours.
///
/// # Returns
///
/// Returns the estimate, or `InvalidInput` if the production rate is not
/// positive or the score, drive time or transport rate is negative.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::{TimeEstimateInput, estimate_time};
/// use treeshop_engine::config::TimeSettings;
/// use treeshop_engine::models::ServiceType;
/// use rust_decimal::Decimal;
///
/// let input = TimeEstimateInput {
///     service_type: ServiceType::TreeRemoval,
///     adjusted_score: Decimal::from(4000),
///     production_rate_pph: Decimal::from(500),
///     drive_time_minutes: Decimal::from(30),
///     transport_rate: Decimal::ONE,
/// };
///
/// let estimate = estimate_time(&input, &TimeSettings::default()).unwrap();
/// // 8h production + 1h transport + 0.8h buffer
/// assert_eq!(estimate.total_estimated_hours, Decimal::new(98, 1));
/// ```
pub fn estimate_time(input: &TimeEstimateInput, settings: &TimeSettings) -> EngineResult<TimeEstimate> {
    if input.production_rate_pph <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "production_rate_pph",
            format!("must be greater than zero, got {}", input.production_rate_pph),
        ));
    }
    for (field, value) in [
        ("adjusted_score", input.adjusted_score),
        ("drive_time_minutes", input.drive_time_minutes),
        ("transport_rate", input.transport_rate),
    ] {
        if value < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                field,
                format!("must not be negative, got {}", value),
            ));
        }
    }

    let production_hours =
        checked::div("production hours", input.adjusted_score, input.production_rate_pph)?;
    let transport_hours = checked::mul(
        "transport hours",
        input.drive_time_minutes / MINUTES_PER_HOUR,
        Decimal::TWO,
    )?;
    let buffer_hours = checked::mul("buffer hours", settings.buffer_fraction, production_hours)?;
    let subtotal = checked::sum(
        "estimated hours",
        [production_hours, transport_hours, buffer_hours],
    )?;

    let minimum_hours = settings.minimum_hours_for(input.service_type);
    let minimum_applied = minimum_hours.is_some_and(|minimum| minimum > subtotal);
    let total_estimated_hours = match minimum_hours {
        Some(minimum) if minimum_applied => minimum,
        _ => subtotal,
    };

    Ok(TimeEstimate {
        adjusted_score: input.adjusted_score,
        production_rate_pph: input.production_rate_pph,
        drive_time_minutes: input.drive_time_minutes,
        transport_rate: input.transport_rate,
        production_hours,
        transport_hours,
        buffer_hours,
        minimum_hours,
        minimum_applied,
        total_estimated_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn input(service_type: ServiceType, score: &str, pph: &str, drive: &str) -> TimeEstimateInput {
        TimeEstimateInput {
            service_type,
            adjusted_score: dec(score),
            production_rate_pph: dec(pph),
            drive_time_minutes: dec(drive),
            transport_rate: Decimal::ONE,
        }
    }

    #[test]
    fn test_mulching_production_hours() {
        let estimate = estimate_time(
            &input(ServiceType::ForestryMulching, "19.2", "1.3", "0"),
            &TimeSettings::default(),
        )
        .unwrap();

        assert_eq!(estimate.production_hours.round_dp(2), dec("14.77"));
        assert_eq!(estimate.transport_hours, Decimal::ZERO);
        assert_eq!(estimate.buffer_hours.round_dp(2), dec("1.48"));
        assert!(!estimate.minimum_applied);
    }

    #[test]
    fn test_round_trip_transport() {
        let estimate = estimate_time(
            &input(ServiceType::TreeRemoval, "5000", "500", "45"),
            &TimeSettings::default(),
        )
        .unwrap();

        assert_eq!(estimate.production_hours, dec("10"));
        assert_eq!(estimate.transport_hours, dec("1.5"));
        assert_eq!(estimate.buffer_hours, dec("1"));
        assert_eq!(estimate.total_estimated_hours, dec("12.5"));
    }

    #[test]
    fn test_minimum_hours_applied() {
        let estimate = estimate_time(
            &input(ServiceType::StumpGrinding, "200", "400", "0"),
            &TimeSettings::default(),
        )
        .unwrap();

        assert_eq!(estimate.minimum_hours, Some(dec("2")));
        assert!(estimate.minimum_applied);
        assert_eq!(estimate.total_estimated_hours, dec("2"));
    }

    #[test]
    fn test_no_minimum_configured() {
        let settings = TimeSettings {
            minimum_hours: Default::default(),
            ..TimeSettings::default()
        };
        let estimate = estimate_time(&input(ServiceType::StumpGrinding, "200", "400", "0"), &settings)
            .unwrap();

        assert_eq!(estimate.minimum_hours, None);
        assert_eq!(estimate.total_estimated_hours, dec("0.55"));
    }

    #[test]
    fn test_transport_rate_does_not_change_hours() {
        let settings = TimeSettings::default();
        let full = estimate_time(&input(ServiceType::TreeRemoval, "5000", "500", "60"), &settings)
            .unwrap();

        let mut half_rate = input(ServiceType::TreeRemoval, "5000", "500", "60");
        half_rate.transport_rate = dec("0.5");
        let half = estimate_time(&half_rate, &settings).unwrap();

        assert_eq!(full.total_estimated_hours, half.total_estimated_hours);
        assert_eq!(half.transport_rate, dec("0.5"));
    }

    #[test]
    fn test_zero_production_rate_rejected() {
        let result = estimate_time(
            &input(ServiceType::TreeRemoval, "100", "0", "0"),
            &TimeSettings::default(),
        );

        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "production_rate_pph"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_drive_time_rejected() {
        let result = estimate_time(
            &input(ServiceType::TreeRemoval, "100", "500", "-10"),
            &TimeSettings::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_hours_beyond_decimal_range_is_a_calculation_error() {
        let result = estimate_time(
            &input(ServiceType::TreeRemoval, "1000000000000000", "0.0000000000000001", "0"),
            &TimeSettings::default(),
        );

        match result {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.contains("production hours"));
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }
}
