//! Equipment asset model.
//!
//! This module defines the acquisition and operating parameters that the
//! equipment cost model turns into an hourly cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Acquisition and operating parameters for one piece of equipment.
///
/// All costs are annual USD amounts unless the field name says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentCostInputs {
    /// Purchase price of the asset.
    pub purchase_price: Decimal,
    /// Useful life used for straight-line depreciation.
    pub useful_life_years: Decimal,
    /// Annual finance rate as a fraction of the purchase price (e.g. 0.06).
    #[serde(default)]
    pub finance_rate: Decimal,
    /// Insurance cost per year.
    #[serde(default)]
    pub insurance_cost: Decimal,
    /// Registration cost per year.
    #[serde(default)]
    pub registration_cost: Decimal,
    /// Fuel burned per operating hour, in gallons.
    #[serde(default)]
    pub fuel_consumption_gph: Decimal,
    /// Fuel price per gallon.
    #[serde(default)]
    pub fuel_price_per_gallon: Decimal,
    /// Scheduled maintenance cost per year.
    #[serde(default)]
    pub maintenance_cost_annual: Decimal,
    /// Repair cost per year.
    #[serde(default)]
    pub repair_cost_annual: Decimal,
    /// Hours the asset is expected to operate per year.
    pub annual_hours: Decimal,
}

/// A piece of equipment that can be assigned to a loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    /// Unique identifier for the asset.
    pub id: String,
    /// Display name (e.g. "Fecon FTX128 mulcher").
    pub name: String,
    /// Parameters the hourly cost is derived from.
    pub cost_inputs: EquipmentCostInputs,
}
