//! AFISS site-complexity multiplier.
//!
//! AFISS (Access, Facilities, Irregularities, Site, Safety) factors each
//! carry a signed impact. The job multiplier is `1 + sum(impacts)`, floored
//! so that a run of favorable factors cannot zero out a score. There is no
//! ceiling: hazardous sites are flagged instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{AfissCatalog, AfissSettings};
use crate::error::EngineResult;
use crate::models::{AuditStep, AuditWarning};

/// The combined effect of a set of AFISS factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfissResult {
    /// Sum of the selected impacts.
    pub total_impact: Decimal,
    /// `max(1 + total_impact, floor)`.
    pub multiplier: Decimal,
    /// True when the floor raised the multiplier.
    pub floored: bool,
    /// True when the multiplier is above the warning threshold.
    pub exceeds_warning_threshold: bool,
}

impl AfissResult {
    /// Describes this multiplier as an audit step.
    pub fn audit_step(&self, step_number: u32, factor_ids: &[String]) -> AuditStep {
        let mut reasoning = format!(
            "1 + {} impact = {} multiplier",
            self.total_impact.normalize(),
            self.multiplier.normalize()
        );
        if self.floored {
            reasoning.push_str(" (floored)");
        }

        AuditStep {
            step_number,
            rule_id: "afiss_multiplier".to_string(),
            rule_name: "AFISS Multiplier".to_string(),
            input: serde_json::json!({
                "factor_ids": factor_ids,
                "total_impact": self.total_impact.normalize().to_string()
            }),
            output: serde_json::json!({
                "multiplier": self.multiplier.normalize().to_string(),
                "floored": self.floored,
                "exceeds_warning_threshold": self.exceeds_warning_threshold
            }),
            reasoning,
        }
    }

    /// Returns a review warning when the multiplier is above the threshold.
    pub fn warning(&self) -> Option<AuditWarning> {
        self.exceeds_warning_threshold.then(|| {
            AuditWarning::new(
                "afiss_above_threshold",
                format!(
                    "AFISS multiplier {} is unusually high; review the site factors",
                    self.multiplier.normalize()
                ),
                "medium",
            )
        })
    }
}

/// Combines AFISS factor impacts into a job multiplier.
///
/// The result does not depend on the order of `impacts`. An empty slice
/// yields exactly 1.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::calculate_afiss_multiplier;
/// use treeshop_engine::config::AfissSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let impacts = [Decimal::from_str("0.15").unwrap(), Decimal::from_str("0.05").unwrap()];
/// let result = calculate_afiss_multiplier(&impacts, &AfissSettings::default());
/// assert_eq!(result.multiplier, Decimal::from_str("1.2").unwrap());
/// ```
pub fn calculate_afiss_multiplier(impacts: &[Decimal], settings: &AfissSettings) -> AfissResult {
    let total_impact: Decimal = impacts.iter().copied().sum();
    let raw = Decimal::ONE + total_impact;

    let floored = raw < settings.floor;
    let multiplier = if floored { settings.floor } else { raw };

    let exceeds_warning_threshold = multiplier > settings.warning_threshold;
    if exceeds_warning_threshold {
        warn!(
            multiplier = %multiplier,
            threshold = %settings.warning_threshold,
            "AFISS multiplier above warning threshold"
        );
    }

    AfissResult {
        total_impact,
        multiplier,
        floored,
        exceeds_warning_threshold,
    }
}

/// Resolves factor ids against the catalog and combines their impacts.
///
/// # Errors
///
/// `InvalidInput` if any id is not in the catalog.
pub fn afiss_from_catalog(
    catalog: &AfissCatalog,
    factor_ids: &[String],
    settings: &AfissSettings,
) -> EngineResult<AfissResult> {
    let impacts: Vec<Decimal> = catalog
        .select(factor_ids)?
        .into_iter()
        .map(|factor| factor.impact)
        .collect();
    Ok(calculate_afiss_multiplier(&impacts, settings))
}
