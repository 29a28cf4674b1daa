//! Locking an estimate into a proposal line item.
//!
//! Line items are always priced from the company-wide service template,
//! never from a loadout, so two estimators quoting the same work produce
//! the same price.

use rust_decimal::Decimal;

use crate::config::EngineSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{ProposalLineItem, ServiceTemplate, WorkVolumeInput};

use super::margin::price_job;
use super::time_estimate::{TimeEstimateInput, estimate_time};
use super::work_score::score;

/// Scores, estimates and prices a job, then freezes the result.
///
/// # Arguments
///
/// * `work` - Job measurements, with any AFISS multiplier already set
/// * `template` - Service template supplying PPH, cost per hour and margin
/// * `drive_time_minutes` - One-way drive time
/// * `settings` - Engine settings (scoring, buffer and minimum hours)
///
/// # Returns
///
/// Returns a new [`ProposalLineItem`] with a fresh id and lock timestamp,
/// or `InvalidInput` if the template is for another service, the score is
/// not proposable, or any step rejects its inputs.
pub fn lock_line_item(
    work: &WorkVolumeInput,
    template: &ServiceTemplate,
    drive_time_minutes: Decimal,
    settings: &EngineSettings,
) -> EngineResult<ProposalLineItem> {
    let service_type = work.service_type();
    if template.service_type != service_type {
        return Err(EngineError::invalid_input(
            "template",
            format!(
                "template is for '{}' but the work is '{}'",
                template.service_type, service_type
            ),
        ));
    }

    let score = score(work, &settings.scoring)?;
    if !score.is_proposable() {
        return Err(EngineError::invalid_input(
            "work",
            format!(
                "score {} does not meet the minimums for a proposal",
                score.adjusted_score.normalize()
            ),
        ));
    }

    let time_estimate = estimate_time(
        &TimeEstimateInput {
            service_type,
            adjusted_score: score.adjusted_score,
            production_rate_pph: template.standard_pph,
            drive_time_minutes,
            transport_rate: Decimal::ONE,
        },
        &settings.time,
    )?;

    let pricing = price_job(
        &time_estimate,
        template.standard_cost_per_hour,
        template.target_margin_percent,
    )?;

    Ok(ProposalLineItem::new(
        template.clone(),
        score,
        time_estimate,
        pricing,
    ))
}
