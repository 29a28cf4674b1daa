//! Loadout hourly cost and billing rates.
//!
//! A loadout's cost per hour is the sum of its machines' hourly costs and
//! its crew's burdened hourly costs. Billing rates are quoted at each margin
//! of the configured ladder.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::EngineSettings;
use crate::error::EngineResult;
use crate::models::Loadout;

use super::checked;
use super::equipment_cost::{EquipmentCostBreakdown, calculate_equipment_cost};
use super::labor_cost::{EmployeeCompensationBreakdown, calculate_labor_cost};
use super::margin::{BillingRate, billing_rates};

/// Hourly cost of one machine in a loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostLine {
    /// Equipment id.
    pub equipment_id: String,
    /// Equipment name.
    pub name: String,
    /// Full cost breakdown.
    pub breakdown: EquipmentCostBreakdown,
}

/// Hourly cost of one crew member in a loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborCostLine {
    /// Employee id.
    pub employee_id: String,
    /// Employee name.
    pub name: String,
    /// Full compensation breakdown.
    pub breakdown: EmployeeCompensationBreakdown,
}

/// The hourly cost of running a loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadoutCost {
    /// Loadout id.
    pub loadout_id: String,
    /// Per-machine costs.
    pub equipment: Vec<EquipmentCostLine>,
    /// Per-employee costs.
    pub labor: Vec<LaborCostLine>,
    /// Sum of equipment `total_per_hour`.
    pub equipment_cost_per_hour: Decimal,
    /// Sum of crew `true_cost_per_hour`.
    pub labor_cost_per_hour: Decimal,
    /// `equipment_cost_per_hour + labor_cost_per_hour`.
    pub total_cost_per_hour: Decimal,
    /// Billing rate at each margin of the ladder.
    pub billing_rates: Vec<BillingRate>,
}

/// Calculates a loadout's hourly cost and billing rates.
///
/// An empty loadout costs 0 per hour; it is valid and used for scoring
/// only.
///
/// # Errors
///
/// Propagates `InvalidInput` from any machine or crew member.
pub fn calculate_loadout_cost(loadout: &Loadout, settings: &EngineSettings) -> EngineResult<LoadoutCost> {
    let equipment = loadout
        .equipment
        .iter()
        .map(|item| {
            Ok(EquipmentCostLine {
                equipment_id: item.id.clone(),
                name: item.name.clone(),
                breakdown: calculate_equipment_cost(&item.cost_inputs)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let labor = loadout
        .employees
        .iter()
        .map(|employee| {
            Ok(LaborCostLine {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                breakdown: calculate_labor_cost(&employee.compensation, &settings.labor)?,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let equipment_cost_per_hour = checked::sum(
        "loadout equipment cost",
        equipment.iter().map(|line| line.breakdown.total_per_hour),
    )?;
    let labor_cost_per_hour = checked::sum(
        "loadout labor cost",
        labor.iter().map(|line| line.breakdown.true_cost_per_hour),
    )?;
    let total_cost_per_hour =
        checked::add("loadout cost", equipment_cost_per_hour, labor_cost_per_hour)?;

    Ok(LoadoutCost {
        loadout_id: loadout.id.clone(),
        equipment,
        labor,
        equipment_cost_per_hour,
        labor_cost_per_hour,
        total_cost_per_hour,
        billing_rates: billing_rates(total_cost_per_hour, &settings.pricing.margin_ladder)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        Employee, EmployeeCompensationInputs, Equipment, EquipmentCostInputs, ServiceType,
    };
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn machine(id: &str, purchase_price: &str) -> Equipment {
        Equipment {
            id: id.to_string(),
            name: format!("Machine {}", id),
            cost_inputs: EquipmentCostInputs {
                purchase_price: dec(purchase_price),
                useful_life_years: dec("5"),
                finance_rate: Decimal::ZERO,
                insurance_cost: Decimal::ZERO,
                registration_cost: Decimal::ZERO,
                fuel_consumption_gph: Decimal::ZERO,
                fuel_price_per_gallon: Decimal::ZERO,
                maintenance_cost_annual: Decimal::ZERO,
                repair_cost_annual: Decimal::ZERO,
                annual_hours: dec("1000"),
            },
        }
    }

    fn worker(id: &str, base: &str, tier: u8) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Worker {}", id),
            compensation: EmployeeCompensationInputs {
                base_hourly_rate: dec(base),
                tier,
                leadership: None,
                equipment_certifications: vec![],
                driver_classes: vec![],
                certifications: vec![],
            },
        }
    }

    fn loadout(equipment: Vec<Equipment>, employees: Vec<Employee>) -> Loadout {
        Loadout {
            id: "lo_001".to_string(),
            name: "Mulching crew".to_string(),
            service_type: ServiceType::ForestryMulching,
            equipment,
            employees,
            production_rate_pph: dec("1.3"),
        }
    }

    #[test]
    fn test_sums_equipment_and_labor() {
        let cost = calculate_loadout_cost(
            &loadout(
                vec![machine("eq1", "100000"), machine("eq2", "50000")],
                vec![worker("e1", "20", 1), worker("e2", "20", 4)],
            ),
            &EngineSettings::default(),
        )
        .unwrap();

        // 20 + 10 equipment; 34 + 68 labor
        assert_eq!(cost.equipment_cost_per_hour, dec("30"));
        assert_eq!(cost.labor_cost_per_hour, dec("102"));
        assert_eq!(cost.total_cost_per_hour, dec("132"));
        assert_eq!(cost.equipment.len(), 2);
        assert_eq!(cost.labor[1].employee_id, "e2");
    }

    #[test]
    fn test_billing_rates_use_ladder() {
        let cost = calculate_loadout_cost(
            &loadout(vec![machine("eq1", "100000")], vec![worker("e1", "20", 1)]),
            &EngineSettings::default(),
        )
        .unwrap();

        // 54/hr cost
        assert_eq!(cost.billing_rates.len(), 5);
        assert_eq!(cost.billing_rates[0].margin_percent, dec("30"));
        assert_eq!(cost.billing_rates[2].rate, dec("108"));
    }

    #[test]
    fn test_empty_loadout_costs_zero() {
        let cost = calculate_loadout_cost(&loadout(vec![], vec![]), &EngineSettings::default()).unwrap();

        assert_eq!(cost.total_cost_per_hour, Decimal::ZERO);
        assert!(cost.billing_rates.iter().all(|r| r.rate.is_zero()));
    }

    #[test]
    fn test_invalid_member_fails_whole_loadout() {
        let mut broken = machine("eq1", "100000");
        broken.cost_inputs.annual_hours = Decimal::ZERO;

        let result = calculate_loadout_cost(&loadout(vec![broken], vec![]), &EngineSettings::default());
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }
}
