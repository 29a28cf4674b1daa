//! AFISS site-complexity factors.
//!
//! AFISS groups complexity factors into Access, Facilities, Irregularities,
//! Site and Safety. Each factor carries a signed percentage impact.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The five AFISS categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfissCategory {
    /// Getting crew and equipment to the work.
    Access,
    /// Buildings, utilities and other structures near the work.
    Facilities,
    /// Unusual tree or ground conditions.
    Irregularities,
    /// Site conditions such as slope, soil and debris handling.
    Site,
    /// Hazards that slow the crew down.
    Safety,
}

impl fmt::Display for AfissCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AfissCategory::Access => "access",
            AfissCategory::Facilities => "facilities",
            AfissCategory::Irregularities => "irregularities",
            AfissCategory::Site => "site",
            AfissCategory::Safety => "safety",
        };
        f.write_str(name)
    }
}

/// One selectable complexity factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfissFactor {
    /// Stable identifier (e.g. "power_lines_touching").
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category the factor belongs to.
    pub category: AfissCategory,
    /// Signed impact as a fraction (0.12 adds 12% effort, -0.05 removes 5%).
    pub impact: Decimal,
}
