//! Equipment hourly cost calculation.
//!
//! Ownership cost (straight-line depreciation, simple-interest finance,
//! insurance and registration) and operating cost (fuel, maintenance and
//! repairs) are computed per year and spread over the machine's annual
//! operating hours.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EquipmentCostInputs};

use super::checked;

/// The seven per-hour cost components of a machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostComponents {
    /// `purchase_price / useful_life_years / annual_hours`.
    pub depreciation: Decimal,
    /// `purchase_price * finance_rate / annual_hours`.
    pub finance: Decimal,
    /// Insurance per hour.
    pub insurance: Decimal,
    /// Registration per hour.
    pub registration: Decimal,
    /// `fuel_consumption_gph * fuel_price_per_gallon`.
    pub fuel: Decimal,
    /// Maintenance per hour.
    pub maintenance: Decimal,
    /// Repairs per hour.
    pub repairs: Decimal,
}

impl EquipmentCostComponents {
    /// Ownership share: depreciation, finance, insurance and registration.
    pub fn ownership(&self) -> Decimal {
        self.depreciation + self.finance + self.insurance + self.registration
    }

    /// Operating share: fuel, maintenance and repairs.
    pub fn operating(&self) -> Decimal {
        self.fuel + self.maintenance + self.repairs
    }

    /// Sum of all seven components.
    pub fn total(&self) -> Decimal {
        self.ownership() + self.operating()
    }
}

/// The hourly and yearly cost of one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostBreakdown {
    /// Ownership cost per year.
    pub ownership_per_year: Decimal,
    /// Operating cost per year.
    pub operating_per_year: Decimal,
    /// `ownership_per_year + operating_per_year`.
    pub total_per_year: Decimal,
    /// Ownership cost per operating hour.
    ///
    /// Summed from the hourly components. This equals
    /// `ownership_per_year / annual_hours` but keeps the components adding
    /// up to the total exactly at Decimal precision.
    pub ownership_per_hour: Decimal,
    /// Operating cost per operating hour, summed the same way.
    pub operating_per_hour: Decimal,
    /// `ownership_per_hour + operating_per_hour`.
    pub total_per_hour: Decimal,
    /// Per-hour components that make up the total.
    pub components: EquipmentCostComponents,
}

impl EquipmentCostBreakdown {
    /// Describes this breakdown as an audit step.
    pub fn audit_step(&self, step_number: u32, equipment_name: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: "equipment_cost".to_string(),
            rule_name: format!("Equipment Cost ({})", equipment_name),
            input: serde_json::json!({
                "ownership_per_year": self.ownership_per_year.normalize().to_string(),
                "operating_per_year": self.operating_per_year.normalize().to_string()
            }),
            output: serde_json::json!({
                "ownership_per_hour": self.ownership_per_hour.normalize().to_string(),
                "operating_per_hour": self.operating_per_hour.normalize().to_string(),
                "total_per_hour": self.total_per_hour.normalize().to_string()
            }),
            reasoning: format!(
                "${}/hr ownership + ${}/hr operating = ${}/hr",
                self.ownership_per_hour.round_dp(2).normalize(),
                self.operating_per_hour.round_dp(2).normalize(),
                self.total_per_hour.round_dp(2).normalize()
            ),
        }
    }
}

fn require_positive(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must be greater than zero, got {}", value),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

fn validate(inputs: &EquipmentCostInputs) -> EngineResult<()> {
    require_positive("annual_hours", inputs.annual_hours)?;
    require_positive("useful_life_years", inputs.useful_life_years)?;
    for (field, value) in [
        ("purchase_price", inputs.purchase_price),
        ("finance_rate", inputs.finance_rate),
        ("insurance_cost", inputs.insurance_cost),
        ("registration_cost", inputs.registration_cost),
        ("fuel_consumption_gph", inputs.fuel_consumption_gph),
        ("fuel_price_per_gallon", inputs.fuel_price_per_gallon),
        ("maintenance_cost_annual", inputs.maintenance_cost_annual),
        ("repair_cost_annual", inputs.repair_cost_annual),
    ] {
        require_non_negative(field, value)?;
    }
    Ok(())
}

/// Calculates the hourly cost of owning and operating a machine.
///
/// # Arguments
///
/// * `inputs` - Acquisition and operating parameters
///
/// # Returns
///
/// Returns the per-year and per-hour breakdown, or `InvalidInput` if
/// `annual_hours` or `useful_life_years` is not positive or any cost is
/// negative.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::calculate_equipment_cost;
/// use treeshop_engine::models::EquipmentCostInputs;
/// use rust_decimal::Decimal;
///
/// let inputs = EquipmentCostInputs {
///     purchase_price: Decimal::from(100_000),
///     useful_life_years: Decimal::from(5),
///     finance_rate: Decimal::ZERO,
///     insurance_cost: Decimal::ZERO,
///     registration_cost: Decimal::ZERO,
///     fuel_consumption_gph: Decimal::ZERO,
///     fuel_price_per_gallon: Decimal::ZERO,
///     maintenance_cost_annual: Decimal::ZERO,
///     repair_cost_annual: Decimal::ZERO,
///     annual_hours: Decimal::from(1000),
/// };
///
/// let breakdown = calculate_equipment_cost(&inputs).unwrap();
/// assert_eq!(breakdown.total_per_hour, Decimal::from(20));
/// ```
pub fn calculate_equipment_cost(inputs: &EquipmentCostInputs) -> EngineResult<EquipmentCostBreakdown> {
    validate(inputs)?;

    let hours = inputs.annual_hours;
    let per_hour = |annual: Decimal| checked::div("equipment hourly cost", annual, hours);

    let depreciation_per_year =
        checked::div("depreciation", inputs.purchase_price, inputs.useful_life_years)?;
    let finance_per_year = checked::mul("finance", inputs.purchase_price, inputs.finance_rate)?;
    let fuel_per_hour =
        checked::mul("fuel", inputs.fuel_consumption_gph, inputs.fuel_price_per_gallon)?;

    let components = EquipmentCostComponents {
        depreciation: per_hour(depreciation_per_year)?,
        finance: per_hour(finance_per_year)?,
        insurance: per_hour(inputs.insurance_cost)?,
        registration: per_hour(inputs.registration_cost)?,
        fuel: fuel_per_hour,
        maintenance: per_hour(inputs.maintenance_cost_annual)?,
        repairs: per_hour(inputs.repair_cost_annual)?,
    };

    let ownership_per_year = checked::sum(
        "ownership cost",
        [
            depreciation_per_year,
            finance_per_year,
            inputs.insurance_cost,
            inputs.registration_cost,
        ],
    )?;
    let operating_per_year = checked::sum(
        "operating cost",
        [
            checked::mul("fuel", fuel_per_hour, hours)?,
            inputs.maintenance_cost_annual,
            inputs.repair_cost_annual,
        ],
    )?;
    let total_per_year = checked::add("equipment cost", ownership_per_year, operating_per_year)?;

    let ownership_per_hour = checked::sum(
        "ownership cost",
        [
            components.depreciation,
            components.finance,
            components.insurance,
            components.registration,
        ],
    )?;
    let operating_per_hour = checked::sum(
        "operating cost",
        [components.fuel, components.maintenance, components.repairs],
    )?;
    let total_per_hour = checked::add("equipment cost", ownership_per_hour, operating_per_hour)?;

    Ok(EquipmentCostBreakdown {
        ownership_per_year,
        operating_per_year,
        total_per_year,
        ownership_per_hour,
        operating_per_hour,
        total_per_hour,
        components,
    })
}
