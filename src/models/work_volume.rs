//! Physical job measurements, one input shape per service type.
//!
//! [`WorkVolumeInput`] is a tagged union: the `service_type` field selects
//! the variant and therefore the scoring formula.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ServiceType;

fn default_afiss_multiplier() -> Decimal {
    Decimal::ONE
}

/// A single stump to be ground.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stump {
    /// Stump diameter in inches.
    pub diameter: Decimal,
    /// Height of the stump above grade.
    pub height_above: Decimal,
    /// Grinding depth below grade.
    pub depth_below: Decimal,
    /// Dense hardwood species.
    #[serde(default)]
    pub hardwood: bool,
    /// Large root flare that must be chased.
    #[serde(default)]
    pub root_flare: bool,
    /// Rotten wood, which grinds faster.
    #[serde(default)]
    pub rotten: bool,
    /// Rocks in or around the stump.
    #[serde(default)]
    pub rocks: bool,
    /// Limited room to position the grinder.
    #[serde(default)]
    pub tight_space: bool,
}

/// Stump grinding job: any number of stumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StumpGrindingInput {
    /// The stumps on the job.
    #[serde(default)]
    pub stumps: Vec<Stump>,
}

/// The largest stem diameter a mulching package covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DbhPackage {
    /// Up to 4 inch DBH.
    Small,
    /// Up to 6 inch DBH.
    Medium,
    /// Up to 8 inch DBH.
    Large,
    /// Up to 10 inch DBH.
    ExtraLarge,
    /// Up to 15 inch DBH.
    Max,
}

impl DbhPackage {
    /// Returns the package's DBH value in inches.
    pub fn inches(&self) -> Decimal {
        match self {
            DbhPackage::Small => Decimal::from(4),
            DbhPackage::Medium => Decimal::from(6),
            DbhPackage::Large => Decimal::from(8),
            DbhPackage::ExtraLarge => Decimal::from(10),
            DbhPackage::Max => Decimal::from(15),
        }
    }
}

/// Forestry mulching job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestryMulchingInput {
    /// Area to mulch.
    pub acres: Decimal,
    /// Largest stem diameter included in the quote.
    pub dbh_package: DbhPackage,
    /// Site-complexity multiplier from the AFISS factor selection.
    #[serde(default = "default_afiss_multiplier")]
    pub afiss_multiplier: Decimal,
}

/// Vegetation density for land clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearingDensity {
    /// Sparse trees and brush.
    Light,
    /// Typical wooded lot.
    Average,
    /// Dense stand.
    Heavy,
}

/// Land clearing job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandClearingInput {
    /// Area to clear.
    pub acres: Decimal,
    /// Vegetation density.
    pub density: ClearingDensity,
    /// Site-complexity multiplier from the AFISS factor selection.
    #[serde(default = "default_afiss_multiplier")]
    pub afiss_multiplier: Decimal,
}

/// Dimensions of one tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeMeasurement {
    /// Height in feet.
    pub height: Decimal,
    /// Diameter at breast height in inches.
    pub dbh: Decimal,
    /// Canopy radius in feet.
    pub canopy_radius: Decimal,
}

/// Tree removal job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeRemovalInput {
    /// Trees to remove.
    #[serde(default)]
    pub trees: Vec<TreeMeasurement>,
    /// Job-level site-complexity multiplier.
    #[serde(default = "default_afiss_multiplier")]
    pub afiss_multiplier: Decimal,
}

/// How much of the canopy a trim removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimIntensity {
    /// Light trim (15% by default).
    Light,
    /// Medium trim (25% by default).
    Medium,
    /// Heavy trim (45% by default).
    Heavy,
}

/// Tree trimming job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeTrimmingInput {
    /// Trees to trim.
    #[serde(default)]
    pub trees: Vec<TreeMeasurement>,
    /// Trim intensity tier.
    pub intensity: TrimIntensity,
    /// Job-level site-complexity multiplier.
    #[serde(default = "default_afiss_multiplier")]
    pub afiss_multiplier: Decimal,
}

/// Physical job inputs, tagged by service type.
///
/// # Example
///
/// ```
/// use treeshop_engine::models::{ServiceType, WorkVolumeInput};
///
/// let json = r#"{"service_type": "forestry_mulching", "acres": "2", "dbh_package": "large"}"#;
/// let input: WorkVolumeInput = serde_json::from_str(json).unwrap();
/// assert_eq!(input.service_type(), ServiceType::ForestryMulching);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service_type", rename_all = "snake_case")]
pub enum WorkVolumeInput {
    /// Stump grinding measurements.
    StumpGrinding(StumpGrindingInput),
    /// Forestry mulching measurements.
    ForestryMulching(ForestryMulchingInput),
    /// Land clearing measurements.
    LandClearing(LandClearingInput),
    /// Tree removal measurements.
    TreeRemoval(TreeRemovalInput),
    /// Tree trimming measurements.
    TreeTrimming(TreeTrimmingInput),
}

impl WorkVolumeInput {
    /// Returns the service type this input describes.
    pub fn service_type(&self) -> ServiceType {
        match self {
            WorkVolumeInput::StumpGrinding(_) => ServiceType::StumpGrinding,
            WorkVolumeInput::ForestryMulching(_) => ServiceType::ForestryMulching,
            WorkVolumeInput::LandClearing(_) => ServiceType::LandClearing,
            WorkVolumeInput::TreeRemoval(_) => ServiceType::TreeRemoval,
            WorkVolumeInput::TreeTrimming(_) => ServiceType::TreeTrimming,
        }
    }

    /// Returns the AFISS multiplier carried by the input.
    ///
    /// Stump grinding folds its modifiers into the base score and carries
    /// no AFISS multiplier, so it returns `None`.
    pub fn afiss_multiplier(&self) -> Option<Decimal> {
        match self {
            WorkVolumeInput::StumpGrinding(_) => None,
            WorkVolumeInput::ForestryMulching(input) => Some(input.afiss_multiplier),
            WorkVolumeInput::LandClearing(input) => Some(input.afiss_multiplier),
            WorkVolumeInput::TreeRemoval(input) => Some(input.afiss_multiplier),
            WorkVolumeInput::TreeTrimming(input) => Some(input.afiss_multiplier),
        }
    }

    /// Returns the input with its AFISS multiplier replaced.
    ///
    /// Stump grinding inputs are returned unchanged.
    pub fn with_afiss_multiplier(self, multiplier: Decimal) -> Self {
        match self {
            WorkVolumeInput::StumpGrinding(input) => WorkVolumeInput::StumpGrinding(input),
            WorkVolumeInput::ForestryMulching(input) => {
                WorkVolumeInput::ForestryMulching(ForestryMulchingInput {
                    afiss_multiplier: multiplier,
                    ..input
                })
            }
            WorkVolumeInput::LandClearing(input) => WorkVolumeInput::LandClearing(LandClearingInput {
                afiss_multiplier: multiplier,
                ..input
            }),
            WorkVolumeInput::TreeRemoval(input) => WorkVolumeInput::TreeRemoval(TreeRemovalInput {
                afiss_multiplier: multiplier,
                ..input
            }),
            WorkVolumeInput::TreeTrimming(input) => WorkVolumeInput::TreeTrimming(TreeTrimmingInput {
                afiss_multiplier: multiplier,
                ..input
            }),
        }
    }
}
