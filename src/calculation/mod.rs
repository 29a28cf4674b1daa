//! Calculation logic for the TreeShop pricing engine.
//!
//! This module contains the cost models (equipment, labor, loadout), the
//! AFISS site-complexity multiplier, one work score calculator per service,
//! time estimation, margin pricing, proposal locking and job
//! reconciliation. Every function is pure over its inputs.

mod afiss;
mod checked;
mod equipment_cost;
mod forestry_mulching;
mod labor_cost;
mod land_clearing;
mod loadout_cost;
mod margin;
mod proposal;
mod reconciliation;
mod stump_grinding;
mod time_estimate;
mod tree_removal;
mod tree_trimming;
mod work_score;

pub use afiss::{AfissResult, afiss_from_catalog, calculate_afiss_multiplier};
pub use equipment_cost::{EquipmentCostBreakdown, EquipmentCostComponents, calculate_equipment_cost};
pub use labor_cost::{EmployeeCompensationBreakdown, calculate_labor_cost};
pub use loadout_cost::{EquipmentCostLine, LaborCostLine, LoadoutCost, calculate_loadout_cost};
pub use margin::{
    BillingRate, MarginPricing, billing_rates, derive_margin_percent, price_job, price_with_margin,
};
pub use proposal::lock_line_item;
pub use reconciliation::reconcile;
pub use stump_grinding::stump_score;
pub use time_estimate::{TimeEstimateInput, estimate_time};
pub use tree_removal::tree_score;
pub use work_score::{ScoreCalculator, score};
