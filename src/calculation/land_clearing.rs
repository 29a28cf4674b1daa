//! Land clearing work score: `acres * density factor`.

use rust_decimal::Decimal;

use crate::config::{DensityFactors, ScoringSettings};
use crate::error::EngineResult;
use crate::models::{ClearingDensity, LandClearingInput, ScoreResult, ServiceType};

use super::checked;
use super::work_score::{
    ScoreCalculator, build_result, require_non_negative, require_positive_multiplier,
};

fn density_factor(density: ClearingDensity, factors: &DensityFactors) -> Decimal {
    match density {
        ClearingDensity::Light => factors.light,
        ClearingDensity::Average => factors.average,
        ClearingDensity::Heavy => factors.heavy,
    }
}

impl ScoreCalculator for LandClearingInput {
    fn service_type(&self) -> ServiceType {
        ServiceType::LandClearing
    }

    fn calculate(&self, settings: &ScoringSettings) -> EngineResult<ScoreResult> {
        require_non_negative("acres", self.acres)?;
        require_positive_multiplier(self.afiss_multiplier)?;

        let factor = density_factor(self.density, &settings.density_factors);
        let base_score = checked::mul("clearing score", self.acres, factor)?;
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
