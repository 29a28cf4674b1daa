//! Employee labor cost calculation.
//!
//! An employee's true hourly cost is their base wage scaled by experience
//! tier, plus flat hourly premiums for leadership, equipment, driver and
//! certification codes, all multiplied by the burden multiplier (payroll
//! taxes, insurance and benefits).

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LaborSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeCompensationInputs};

use super::checked;

/// How an employee's hourly cost was built up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensationBreakdown {
    /// Base hourly wage.
    pub base_hourly_rate: Decimal,
    /// Experience tier.
    pub tier: u8,
    /// Multiplier for the tier (1.0 for an unknown tier).
    pub tier_multiplier: Decimal,
    /// `base_hourly_rate * tier_multiplier`.
    pub tiered_rate: Decimal,
    /// Leadership premium per hour.
    pub leadership_premium: Decimal,
    /// Sum of equipment operator premiums per hour.
    pub equipment_premium: Decimal,
    /// Sum of driver license premiums per hour.
    pub driver_premium: Decimal,
    /// Sum of certification premiums per hour.
    pub certification_premium: Decimal,
    /// Sum of all premiums per hour.
    pub total_premiums: Decimal,
    /// `tiered_rate + total_premiums`: what the employee is paid per hour.
    pub total_hourly_compensation: Decimal,
    /// Burden multiplier applied.
    pub burden_multiplier: Decimal,
    /// `total_hourly_compensation * burden_multiplier`.
    pub true_cost_per_hour: Decimal,
}

impl EmployeeCompensationBreakdown {
    /// Describes this breakdown as an audit step.
    pub fn audit_step(&self, step_number: u32, employee_name: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "labor_cost".to_string(),
            rule_name: format!("Labor Cost ({})", employee_name),
            input: serde_json::json!({
                "base_hourly_rate": self.base_hourly_rate.normalize().to_string(),
                "tier": self.tier,
                "total_premiums": self.total_premiums.normalize().to_string()
            }),
            output: serde_json::json!({
                "total_hourly_compensation": self.total_hourly_compensation.normalize().to_string(),
                "true_cost_per_hour": self.true_cost_per_hour.normalize().to_string()
            }),
            reasoning: format!(
                "(${} x {} + ${} premiums) x {} burden = ${}/hr",
                self.base_hourly_rate.normalize(),
                self.tier_multiplier.normalize(),
                self.total_premiums.normalize(),
                self.burden_multiplier.normalize(),
                self.true_cost_per_hour.round_dp(2).normalize()
            ),
        }
    }
}

fn premium_for(table: &HashMap<String, Decimal>, table_name: &str, code: &str) -> Decimal {
    match table.get(code) {
        Some(premium) => *premium,
        None => {
            debug!(table = table_name, code, "Unknown premium code, using zero");
            Decimal::ZERO
        }
    }
}

fn sum_premiums(table: &HashMap<String, Decimal>, table_name: &str, codes: &[String]) -> Decimal {
    codes
        .iter()
        .map(|code| premium_for(table, table_name, code))
        .sum()
}

/// Calculates an employee's fully-burdened hourly cost.
///
/// # Arguments
///
/// * `inputs` - Wage, tier and premium codes
/// * `settings` - Tier table, premium tables and burden multiplier
///
/// # Returns
///
/// Returns the breakdown, `InvalidInput` if the base wage is not
/// positive, or `CalculationError` if the burdened rate overflows. Unknown tiers and codes are tolerated (multiplier 1.0,
/// premium 0) and logged at debug level.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::calculate_labor_cost;
/// use treeshop_engine::config::LaborSettings;
/// use treeshop_engine::models::EmployeeCompensationInputs;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let inputs = EmployeeCompensationInputs {
///     base_hourly_rate: Decimal::from(20),
///     tier: 2,
///     leadership: None,
///     equipment_certifications: vec![],
///     driver_classes: vec![],
///     certifications: vec![],
/// };
///
/// let breakdown = calculate_labor_cost(&inputs, &LaborSettings::default()).unwrap();
/// assert_eq!(breakdown.true_cost_per_hour, Decimal::from_str("54.4").unwrap());
/// ```
pub fn calculate_labor_cost(
    inputs: &EmployeeCompensationInputs,
    settings: &LaborSettings,
) -> EngineResult<EmployeeCompensationBreakdown> {
    if inputs.base_hourly_rate <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "base_hourly_rate",
            format!("must be greater than zero, got {}", inputs.base_hourly_rate),
        ));
    }

    let tier_multiplier = match settings.tier_multipliers.get(&inputs.tier) {
        Some(multiplier) => *multiplier,
        None => {
            debug!(tier = inputs.tier, "Unknown experience tier, using multiplier 1.0");
            Decimal::ONE
        }
    };
    let tiered_rate = checked::mul("tiered rate", inputs.base_hourly_rate, tier_multiplier)?;

    let leadership_premium = inputs
        .leadership
        .as_deref()
        .map(|code| premium_for(&settings.leadership_premiums, "leadership", code))
        .unwrap_or(Decimal::ZERO);
    let equipment_premium = sum_premiums(
        &settings.equipment_premiums,
        "equipment",
        &inputs.equipment_certifications,
    );
    let driver_premium = sum_premiums(&settings.driver_premiums, "driver", &inputs.driver_classes);
    let certification_premium = sum_premiums(
        &settings.certification_premiums,
        "certification",
        &inputs.certifications,
    );

    let total_premiums =
        leadership_premium + equipment_premium + driver_premium + certification_premium;
    let total_hourly_compensation = checked::add("hourly compensation", tiered_rate, total_premiums)?;
    let true_cost_per_hour = checked::mul(
        "burdened cost",
        total_hourly_compensation,
        settings.burden_multiplier,
    )?;

    Ok(EmployeeCompensationBreakdown {
        base_hourly_rate: inputs.base_hourly_rate,
        tier: inputs.tier,
        tier_multiplier,
        tiered_rate,
        leadership_premium,
        equipment_premium,
        driver_premium,
        certification_premium,
        total_premiums,
        total_hourly_compensation,
        burden_multiplier: settings.burden_multiplier,
        true_cost_per_hour,
    })
}
