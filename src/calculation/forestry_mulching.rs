//! Forestry mulching work score: `acres * DBH package inches`.

use crate::config::ScoringSettings;
use crate::error::EngineResult;
use crate::models::{ForestryMulchingInput, ScoreResult, ServiceType};

use super::checked;
use super::work_score::{
    ScoreCalculator, build_result, require_non_negative, require_positive_multiplier,
};

impl ScoreCalculator for ForestryMulchingInput {
    fn service_type(&self) -> ServiceType {
        ServiceType::ForestryMulching
    }

    fn calculate(&self, settings: &ScoringSettings) -> EngineResult<ScoreResult> {
        require_non_negative("acres", self.acres)?;
        require_positive_multiplier(self.afiss_multiplier)?;

        let base_score = checked::mul("mulching score", self.acres, self.dbh_package.inches())?;
        let minimums_met = self.acres >= settings.minimum_acres;

        build_result(
            self.service_type(),
            base_score,
            self.afiss_multiplier,
            self,
            minimums_met,
        )
    }
}
