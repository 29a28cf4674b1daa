//! Stump grinding work score.
//!
//! Each stump scores `diameter^2 * (height_above + depth_below)`, scaled by
//! `1 + sum(modifier deltas)` for the conditions present on that stump. The
//! job score is the sum over all stumps. Stump modifiers are per stump, so
//! there is no job-level multiplier.

use rust_decimal::Decimal;

use crate::config::{ScoringSettings, StumpModifiers};
use crate::error::EngineResult;
use crate::models::{ScoreResult, ServiceType, Stump, StumpGrindingInput};

use super::checked;
use super::work_score::{ScoreCalculator, build_result, require_non_negative};

/// Combined modifier factor for one stump.
fn modifier_factor(stump: &Stump, modifiers: &StumpModifiers) -> Decimal {
    let deltas = [
        (stump.hardwood, modifiers.hardwood),
        (stump.root_flare, modifiers.root_flare),
        (stump.rotten, modifiers.rotten),
        (stump.rocks, modifiers.rocks),
        (stump.tight_space, modifiers.tight_space),
    ];

    Decimal::ONE
        + deltas
            .into_iter()
            .filter(|(present, _)| *present)
            .map(|(_, delta)| delta)
            .sum::<Decimal>()
}

/// Scores a single stump.
pub fn stump_score(stump: &Stump, modifiers: &StumpModifiers) -> EngineResult<Decimal> {
    require_non_negative("diameter", stump.diameter)?;
    require_non_negative("height_above", stump.height_above)?;
    require_non_negative("depth_below", stump.depth_below)?;

    let depth = checked::add("stump depth", stump.height_above, stump.depth_below)?;
    let area = checked::mul("stump score", stump.diameter, stump.diameter)?;
    let base = checked::mul("stump score", area, depth)?;
    checked::mul("stump score", base, modifier_factor(stump, modifiers))
}

impl ScoreCalculator for StumpGrindingInput {
    fn service_type(&self) -> ServiceType {
        ServiceType::StumpGrinding
    }

    fn calculate(&self, settings: &ScoringSettings) -> EngineResult<ScoreResult> {
        let mut base_score = Decimal::ZERO;
        for stump in &self.stumps {
            let score = stump_score(stump, &settings.stump_modifiers)?;
            base_score = checked::add("stump grinding score", base_score, score)?;
        }

        build_result(self.service_type(), base_score, Decimal::ONE, self, true)
    }
}
