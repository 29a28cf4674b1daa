//! Core data models for the TreeShop pricing engine.
//!
//! This module contains the plain data records the engine consumes and the
//! results it produces.

mod afiss;
mod audit;
mod employee;
mod equipment;
mod estimate;
mod job_summary;
mod line_item;
mod loadout;
mod service;
mod time_entry;
mod work_volume;

pub use afiss::{AfissCategory, AfissFactor};
pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use employee::{Employee, EmployeeCompensationInputs};
pub use equipment::{Equipment, EquipmentCostInputs};
pub use estimate::{EstimateResult, PricingResult, ScoreResult, TimeEstimate};
pub use job_summary::{JobSummary, VarianceOutcome};
pub use line_item::ProposalLineItem;
pub use loadout::Loadout;
pub use service::{ServiceTemplate, ServiceType};
pub use time_entry::{ActualTotals, TimeCategory, TimeEntry};
pub use work_volume::{
    ClearingDensity, DbhPackage, ForestryMulchingInput, LandClearingInput, Stump,
    StumpGrindingInput, TreeMeasurement, TreeRemovalInput, TreeTrimmingInput, TrimIntensity,
    WorkVolumeInput,
};
