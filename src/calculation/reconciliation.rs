//! Job reconciliation: estimated vs. actual.
//!
//! Logged time entries are summed into [`ActualTotals`] and compared with
//! the figures frozen on a [`ProposalLineItem`]. The client price is taken
//! from the line item as locked and is never recomputed.

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ActualTotals, JobSummary, ProposalLineItem, TimeCategory, TimeEntry};

use super::checked;

impl ActualTotals {
    /// Sums time entries into hour buckets and costs.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if an entry has negative hours or a negative cost
    /// rate, `CalculationError` if a cost or running total overflows.
    pub fn from_entries(entries: &[TimeEntry]) -> EngineResult<Self> {
        let mut totals = ActualTotals::default();

        for entry in entries {
            for (field, value) in [
                ("hours", entry.hours),
                ("labor_cost_per_hour", entry.labor_cost_per_hour),
                ("equipment_cost_per_hour", entry.equipment_cost_per_hour),
            ] {
                if value < Decimal::ZERO {
                    return Err(EngineError::invalid_input(
                        field,
                        format!(
                            "entry for '{}' on {} must not be negative, got {}",
                            entry.employee_id, entry.work_date, value
                        ),
                    ));
                }
            }

            let bucket = match entry.category {
                TimeCategory::Production => &mut totals.production_hours,
                TimeCategory::SiteSupport => &mut totals.site_support_hours,
                TimeCategory::GeneralSupport => &mut totals.general_support_hours,
            };
            *bucket = checked::add("logged hours", *bucket, entry.hours)?;

            let labor = checked::mul("labor cost", entry.hours, entry.labor_cost_per_hour)?;
            totals.labor_cost = checked::add("labor cost", totals.labor_cost, labor)?;
            let equipment =
                checked::mul("equipment cost", entry.hours, entry.equipment_cost_per_hour)?;
            totals.equipment_cost = checked::add("equipment cost", totals.equipment_cost, equipment)?;
        }

        Ok(totals)
    }
}

/// Compares a locked line item with actual field performance.
///
/// # Returns
///
/// Returns the [`JobSummary`], `InvalidInput` if the locked client price
/// is not positive, or `CalculationError` if the actuals overflow. `actual_pph` and `pph_variance` are `None` until
/// production hours have been logged.
///
/// # Examples
///
/// ```no_run
/// use treeshop_engine::calculation::{lock_line_item, reconcile};
/// use treeshop_engine::config::ConfigLoader;
/// use treeshop_engine::models::{ActualTotals, WorkVolumeInput};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/treeshop").unwrap();
/// let json = r#"{"service_type": "forestry_mulching", "acres": "2", "dbh_package": "large"}"#;
/// let work: WorkVolumeInput = serde_json::from_str(json).unwrap();
/// let template = loader.get_service_template(work.service_type()).unwrap();
///
/// let item = lock_line_item(&work, template, Decimal::ZERO, loader.settings()).unwrap();
/// let summary = reconcile(&item, &ActualTotals::from_entries(&[]).unwrap()).unwrap();
/// assert_eq!(summary.actual_pph, None);
/// ```
pub fn reconcile(item: &ProposalLineItem, actual: &ActualTotals) -> EngineResult<JobSummary> {
    let client_price = item.client_price();
    if client_price <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "client_price",
            format!("locked price must be greater than zero, got {}", client_price),
        ));
    }

    let adjusted_score = item.score().adjusted_score;
    let estimated_hours = item.time_estimate().total_estimated_hours;
    let estimated_cost = item.estimated_cost();
    let estimated_profit = item.estimated_profit();
    let estimated_margin = item.pricing().margin_percent;
    let standard_pph = item.template().standard_pph;

    let actual_total_hours = checked::sum(
        "actual hours",
        [
            actual.production_hours,
            actual.site_support_hours,
            actual.general_support_hours,
        ],
    )?;
    let actual_total_cost = checked::add("actual cost", actual.labor_cost, actual.equipment_cost)?;
    let actual_profit = checked::sub("actual profit", client_price, actual_total_cost)?;
    let actual_margin = checked::mul(
        "actual margin",
        checked::div("actual margin", actual_profit, client_price)?,
        Decimal::ONE_HUNDRED,
    )?;

    let actual_pph = if actual.production_hours.is_zero() {
        debug!(line_item = %item.id(), "No production hours logged; PPH not available");
        None
    } else {
        Some(checked::div("actual pph", adjusted_score, actual.production_hours)?)
    };
    let pph_variance = actual_pph
        .map(|pph| checked::sub("pph variance", pph, standard_pph))
        .transpose()?;

    Ok(JobSummary {
        client_price,
        adjusted_score,
        estimated_hours,
        estimated_cost,
        estimated_profit,
        estimated_margin,
        actual_production_hours: actual.production_hours,
        actual_site_support_hours: actual.site_support_hours,
        actual_general_support_hours: actual.general_support_hours,
        actual_total_hours,
        actual_labor_cost: actual.labor_cost,
        actual_equipment_cost: actual.equipment_cost,
        actual_total_cost,
        actual_profit,
        actual_margin,
        standard_pph,
        actual_pph,
        pph_variance,
        hours_variance: checked::sub("hours variance", actual_total_hours, estimated_hours)?,
        cost_variance: checked::sub("cost variance", actual_total_cost, estimated_cost)?,
        profit_variance: checked::sub("profit variance", estimated_profit, actual_profit)?,
        margin_variance: checked::sub("margin variance", actual_margin, estimated_margin)?,
    })
}
