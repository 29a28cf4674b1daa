//! Tree removal work score.
//!
//! Each tree scores `height * canopy_radius * 2 * dbh / 12` (height in
//! feet, canopy radius in feet, DBH in inches). Trees are summed and the
//! job-level AFISS multiplier is applied once.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::ScoringSettings;
use crate::error::EngineResult;
use crate::models::{ScoreResult, ServiceType, TreeMeasurement, TreeRemovalInput};

use super::checked;
use super::work_score::{
    ScoreCalculator, build_result, require_non_negative, require_positive_multiplier,
};

const INCHES_PER_FOOT: Decimal = dec!(12);

/// Scores a single tree for removal.
pub fn tree_score(tree: &TreeMeasurement) -> EngineResult<Decimal> {
    require_non_negative("height", tree.height)?;
    require_non_negative("dbh", tree.dbh)?;
    require_non_negative("canopy_radius", tree.canopy_radius)?;

    let crown = checked::mul("tree score", tree.height, tree.canopy_radius)?;
    let crown = checked::mul("tree score", crown, Decimal::TWO)?;
    let volume = checked::mul("tree score", crown, tree.dbh)?;
    checked::div("tree score", volume, INCHES_PER_FOOT)
}

/// Sums removal scores over a set of trees.
pub(crate) fn total_tree_score(trees: &[TreeMeasurement]) -> EngineResult<Decimal> {
    let mut total = Decimal::ZERO;
    for tree in trees {
        total = checked::add("tree score total", total, tree_score(tree)?)?;
    }
    Ok(total)
}

impl ScoreCalculator for TreeRemovalInput {
    fn service_type(&self) -> ServiceType {
        ServiceType::TreeRemoval
    }

    fn calculate(&self, _settings: &ScoringSettings) -> EngineResult<ScoreResult> {
        require_positive_multiplier(self.afiss_multiplier)?;
        let base_score = total_tree_score(&self.trees)?;

        build_result(
            self.service_type(),
            base_score,
            self.afiss_multiplier,
            self,
            true,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::WorkVolumeInput;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tree(height: &str, dbh: &str, canopy_radius: &str) -> TreeMeasurement {
        TreeMeasurement {
            height: dec(height),
            dbh: dec(dbh),
            canopy_radius: dec(canopy_radius),
        }
    }

    #[test]
    fn test_single_tree() {
        // 60 * 15 * 2 * 24 / 12
        assert_eq!(tree_score(&tree("60", "24", "15")).unwrap(), dec("3600"));
    }

    #[test]
    fn test_trees_summed_then_multiplied() {
        let input = TreeRemovalInput {
            trees: vec![tree("60", "24", "15"), tree("30", "12", "10")],
            afiss_multiplier: dec("1.5"),
        };

        let result = input.calculate(&ScoringSettings::default()).unwrap();
        assert_eq!(result.base_score, dec("4200"));
        assert_eq!(result.adjusted_score, dec("6300"));
        assert!(result.is_proposable());
    }

    #[test]
    fn test_negative_height_rejected() {
        match tree_score(&tree("-1", "10", "5")) {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "height"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_afiss_rejected() {
        let input = TreeRemovalInput {
            trees: vec![tree("60", "24", "15")],
            afiss_multiplier: dec("-1"),
        };
        assert!(input.calculate(&ScoringSettings::default()).is_err());
    }

    #[test]
    fn test_oversized_tree_is_a_calculation_error() {
        let work = WorkVolumeInput::TreeRemoval(TreeRemovalInput {
            trees: vec![TreeMeasurement {
                height: dec("100000000000000000000"),
                dbh: dec("100000000000"),
                canopy_radius: dec("15"),
            }],
            afiss_multiplier: Decimal::ONE,
        });

        assert!(matches!(
            crate::calculation::score(&work, &ScoringSettings::default()),
            Err(EngineError::CalculationError { .. })
        ));
    }
}
