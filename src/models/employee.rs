//! Employee model and compensation inputs.
//!
//! This module defines the Employee struct and the compensation inputs the
//! labor cost model turns into a burdened hourly cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Wage, tier and qualification codes for one crew member.
///
/// Codes are free-form strings looked up in the configured premium tables;
/// codes the tables do not know contribute no premium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeCompensationInputs {
    /// Base hourly wage before tier multiplier and premiums.
    pub base_hourly_rate: Decimal,
    /// Experience tier, 1 (entry) through 5 (senior).
    pub tier: u8,
    /// Optional leadership code (e.g. "L2").
    #[serde(default)]
    pub leadership: Option<String>,
    /// Equipment operator codes (e.g. "E3").
    #[serde(default)]
    pub equipment_certifications: Vec<String>,
    /// Driver license codes (e.g. "D2").
    #[serde(default)]
    pub driver_classes: Vec<String>,
    /// Professional certification codes (e.g. "ISA").
    #[serde(default)]
    pub certifications: Vec<String>,
}

/// Represents a crew member who can be assigned to a loadout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Inputs to the labor cost model.
    pub compensation: EmployeeCompensationInputs,
}

impl EmployeeCompensationInputs {
    /// Returns true if the employee holds no premium-bearing codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use treeshop_engine::models::EmployeeCompensationInputs;
    /// use rust_decimal::Decimal;
    ///
    /// let inputs = EmployeeCompensationInputs {
    ///     base_hourly_rate: Decimal::from(20),
    ///     tier: 2,
    ///     leadership: None,
    ///     equipment_certifications: vec![],
    ///     driver_classes: vec![],
    ///     certifications: vec![],
    /// };
    /// assert!(inputs.has_no_premiums());
    /// ```
    pub fn has_no_premiums(&self) -> bool {
        self.leadership.is_none()
            && self.equipment_certifications.is_empty()
            && self.driver_classes.is_empty()
            && self.certifications.is_empty()
    }
}
