//! Logged field time.
//!
//! Time entries are supplied by the external time-tracking system and
//! aggregated into [`ActualTotals`] for job reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The bucket a logged hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeCategory {
    /// Hours spent producing the scored work.
    Production,
    /// On-site hours that are not production (setup, cleanup, hauling).
    SiteSupport,
    /// Off-site hours attributable to the job (shop, fueling, travel).
    GeneralSupport,
}

/// One logged block of time for one crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// The crew member who logged the time.
    pub employee_id: String,
    /// The day the work was performed.
    pub work_date: NaiveDate,
    /// The bucket the hours belong to.
    pub category: TimeCategory,
    /// Hours logged.
    pub hours: Decimal,
    /// Burdened labor cost per hour for this entry.
    pub labor_cost_per_hour: Decimal,
    /// Equipment cost per hour attributed to this entry.
    #[serde(default)]
    pub equipment_cost_per_hour: Decimal,
}

/// Actual hours and costs for a job, summed across time entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualTotals {
    /// Production hours.
    pub production_hours: Decimal,
    /// Site-support hours.
    pub site_support_hours: Decimal,
    /// General-support hours.
    pub general_support_hours: Decimal,
    /// Labor cost across all buckets.
    pub labor_cost: Decimal,
    /// Equipment cost across all buckets.
    pub equipment_cost: Decimal,
}

impl ActualTotals {
    /// Total hours across all buckets.
    pub fn total_hours(&self) -> Decimal {
        self.production_hours + self.site_support_hours + self.general_support_hours
    }

    /// Total labor and equipment cost.
    pub fn total_cost(&self) -> Decimal {
        self.labor_cost + self.equipment_cost
    }
}
