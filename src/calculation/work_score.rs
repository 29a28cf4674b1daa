//! Work score dispatch.
//!
//! Each service measures work differently, but all of them produce a
//! [`ScoreResult`] in "points" that a production rate (points per hour)
//! turns into hours. The [`ScoreCalculator`] trait is implemented once per
//! [`WorkVolumeInput`] variant and [`score`] selects the implementation from
//! the input's `service_type` tag.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ScoringSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{ScoreResult, ServiceType, WorkVolumeInput};

use super::checked;

/// A service-specific work score formula.
pub trait ScoreCalculator {
    /// The service this calculator scores.
    fn service_type(&self) -> ServiceType;

    /// Computes the score for these measurements.
    fn calculate(&self, settings: &ScoringSettings) -> EngineResult<ScoreResult>;
}

impl WorkVolumeInput {
    /// Returns the calculator for this input's service type.
    pub fn calculator(&self) -> &dyn ScoreCalculator {
        match self {
            WorkVolumeInput::StumpGrinding(input) => input,
            WorkVolumeInput::ForestryMulching(input) => input,
            WorkVolumeInput::LandClearing(input) => input,
            WorkVolumeInput::TreeRemoval(input) => input,
            WorkVolumeInput::TreeTrimming(input) => input,
        }
    }
}

/// Scores a job's physical measurements.
///
/// # Returns
///
/// Returns the score, or `InvalidInput` for negative dimensions or a
/// non-positive AFISS multiplier. Zero stumps or trees score 0 and are
/// reported as not proposable rather than as an error.
///
/// # Examples
///
/// ```
/// use treeshop_engine::calculation::score;
/// use treeshop_engine::config::ScoringSettings;
/// use treeshop_engine::models::WorkVolumeInput;
/// use rust_decimal::Decimal;
///
/// let json = r#"{"service_type": "forestry_mulching", "acres": "2", "dbh_package": "large"}"#;
/// let input: WorkVolumeInput = serde_json::from_str(json).unwrap();
///
/// let result = score(&input, &ScoringSettings::default()).unwrap();
/// assert_eq!(result.adjusted_score, Decimal::from(16));
/// ```
pub fn score(input: &WorkVolumeInput, settings: &ScoringSettings) -> EngineResult<ScoreResult> {
    input.calculator().calculate(settings)
}

pub(crate) fn require_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}

pub(crate) fn require_positive_multiplier(multiplier: Decimal) -> EngineResult<()> {
    if multiplier <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "afiss_multiplier",
            format!("must be greater than zero, got {}", multiplier),
        ));
    }
    Ok(())
}

/// Assembles a score result from a base score and multiplier.
///
/// `minimums_met` is forced false when the adjusted score is zero.
pub(crate) fn build_result<T: Serialize>(
    service_type: ServiceType,
    base_score: Decimal,
    complexity_multiplier: Decimal,
    inputs: &T,
    minimums_met: bool,
) -> EngineResult<ScoreResult> {
    let adjusted_score = checked::mul("adjusted score", base_score, complexity_multiplier)?;
    let work_volume_inputs =
        serde_json::to_value(inputs).map_err(|e| EngineError::CalculationError {
            message: format!("failed to record work volume inputs: {}", e),
        })?;

    Ok(ScoreResult {
        service_type,
        base_score,
        complexity_multiplier,
        adjusted_score,
        formula_used: service_type.as_str().to_string(),
        work_volume_inputs,
        minimums_met: minimums_met && adjusted_score > Decimal::ZERO,
    })
}
