//! Tree trimming work score: a share of the equivalent removal score.

use rust_decimal::Decimal;

use crate::config::{ScoringSettings, TrimPercentages};
use crate::error::EngineResult;
use crate::models::{ScoreResult, ServiceType, TreeTrimmingInput, TrimIntensity};

use super::checked;
use super::tree_removal::total_tree_score;
use super::work_score::{ScoreCalculator, build_result, require_positive_multiplier};

fn trim_percentage(intensity: TrimIntensity, percentages: &TrimPercentages) -> Decimal {
    match intensity {
        TrimIntensity::Light => percentages.light,
        TrimIntensity::Medium => percentages.medium,
        TrimIntensity::Heavy => percentages.heavy,
    }
}

impl ScoreCalculator for TreeTrimmingInput {
    fn service_type(&self) -> ServiceType {
        ServiceType::TreeTrimming
    }

    fn calculate(&self, settings: &ScoringSettings) -> EngineResult<ScoreResult> {
        require_positive_multiplier(self.afiss_multiplier)?;

        let removal_equivalent = total_tree_score(&self.trees)?;
        let percentage = trim_percentage(self.intensity, &settings.trim_percentages);
        let base_score = checked::mul("trimming score", removal_equivalent, percentage)?;

        build_result(
            self.service_type(),
            base_score,
            self.afiss_multiplier,
            self,
            true,
        )
    }
}
