//! Configuration types for the pricing engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every settings struct
//! has a `Default` carrying the engine's standard constants, so a YAML file
//! only needs to list the values an organization overrides.

use std::collections::{BTreeMap, HashMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AfissCategory, AfissFactor, ServiceTemplate, ServiceType};

/// Multiplier from total hourly pay to fully-burdened true cost.
pub const DEFAULT_BURDEN_MULTIPLIER: Decimal = dec!(1.7);

/// Share of production hours added as contingency.
pub const DEFAULT_BUFFER_FRACTION: Decimal = dec!(0.10);

/// Margins (percent of price) at which loadout billing rates are quoted.
pub const DEFAULT_MARGIN_LADDER: [Decimal; 5] = [dec!(30), dec!(40), dec!(50), dec!(60), dec!(70)];

/// Labor cost settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaborSettings {
    /// Multiplier from total hourly pay to true cost (taxes, insurance, benefits).
    pub burden_multiplier: Decimal,
    /// Wage multiplier per experience tier.
    pub tier_multipliers: BTreeMap<u8, Decimal>,
    /// Hourly premium per leadership code.
    pub leadership_premiums: HashMap<String, Decimal>,
    /// Hourly premium per equipment operator code.
    pub equipment_premiums: HashMap<String, Decimal>,
    /// Hourly premium per driver license code.
    pub driver_premiums: HashMap<String, Decimal>,
    /// Hourly premium per professional certification code.
    pub certification_premiums: HashMap<String, Decimal>,
}

impl Default for LaborSettings {
    fn default() -> Self {
        let tier_multipliers = BTreeMap::from([
            (1, dec!(1.0)),
            (2, dec!(1.6)),
            (3, dec!(1.8)),
            (4, dec!(2.0)),
            (5, dec!(2.2)),
        ]);

        Self {
            burden_multiplier: DEFAULT_BURDEN_MULTIPLIER,
            tier_multipliers,
            leadership_premiums: premium_table(&[("L1", dec!(2.00)), ("L2", dec!(4.00)), ("L3", dec!(6.00))]),
            equipment_premiums: premium_table(&[
                ("E1", dec!(0.50)),
                ("E2", dec!(1.00)),
                ("E3", dec!(2.00)),
                ("E4", dec!(3.00)),
            ]),
            driver_premiums: premium_table(&[("D1", dec!(0.50)), ("D2", dec!(1.00)), ("D3", dec!(2.00))]),
            certification_premiums: premium_table(&[
                ("ISA", dec!(2.00)),
                ("ISA_TRAM", dec!(1.50)),
                ("CTSP", dec!(1.50)),
                ("CRANE", dec!(3.00)),
                ("FIRST_AID", dec!(0.50)),
            ]),
        }
    }
}

fn premium_table(entries: &[(&str, Decimal)]) -> HashMap<String, Decimal> {
    entries
        .iter()
        .map(|(code, premium)| (code.to_string(), *premium))
        .collect()
}

/// Pricing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Margins (percent of price) at which billing rates are quoted.
    pub margin_ladder: Vec<Decimal>,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            margin_ladder: DEFAULT_MARGIN_LADDER.to_vec(),
        }
    }
}

/// Time estimation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    /// Share of production hours added as contingency.
    pub buffer_fraction: Decimal,
    /// Billable hour floor per service.
    pub minimum_hours: HashMap<ServiceType, Decimal>,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            buffer_fraction: DEFAULT_BUFFER_FRACTION,
            minimum_hours: HashMap::from([
                (ServiceType::StumpGrinding, dec!(2)),
                (ServiceType::ForestryMulching, dec!(4)),
                (ServiceType::LandClearing, dec!(8)),
                (ServiceType::TreeRemoval, dec!(2)),
                (ServiceType::TreeTrimming, dec!(2)),
            ]),
        }
    }
}

impl TimeSettings {
    /// Returns the minimum billable hours for a service, if one is set.
    pub fn minimum_hours_for(&self, service_type: ServiceType) -> Option<Decimal> {
        self.minimum_hours.get(&service_type).copied()
    }
}

/// Per-stump percentage adjustments, applied as `1 + sum(selected)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StumpModifiers {
    /// Dense hardwood species.
    pub hardwood: Decimal,
    /// Large root flare.
    pub root_flare: Decimal,
    /// Rotten wood (negative: grinds faster).
    pub rotten: Decimal,
    /// Rocks in the grinding zone.
    pub rocks: Decimal,
    /// Restricted positioning.
    pub tight_space: Decimal,
}

impl Default for StumpModifiers {
    fn default() -> Self {
        Self {
            hardwood: dec!(0.15),
            root_flare: dec!(0.20),
            rotten: dec!(-0.15),
            rocks: dec!(0.10),
            tight_space: dec!(0.15),
        }
    }
}

/// Land clearing density factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityFactors {
    /// Light density.
    pub light: Decimal,
    /// Average density.
    pub average: Decimal,
    /// Heavy density.
    pub heavy: Decimal,
}

impl Default for DensityFactors {
    fn default() -> Self {
        Self {
            light: dec!(0.7),
            average: dec!(1.0),
            heavy: dec!(1.3),
        }
    }
}

/// Share of an equivalent removal score charged per trim intensity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimPercentages {
    /// Light trim.
    pub light: Decimal,
    /// Medium trim.
    pub medium: Decimal,
    /// Heavy trim.
    pub heavy: Decimal,
}

impl Default for TrimPercentages {
    fn default() -> Self {
        Self {
            light: dec!(0.15),
            medium: dec!(0.25),
            heavy: dec!(0.45),
        }
    }
}

/// Work score settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSettings {
    /// Stump grinding modifiers.
    pub stump_modifiers: StumpModifiers,
    /// Land clearing density factors.
    pub density_factors: DensityFactors,
    /// Tree trimming percentages.
    pub trim_percentages: TrimPercentages,
    /// Smallest acreage that may be proposed for mulching or clearing.
    pub minimum_acres: Decimal,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            stump_modifiers: StumpModifiers::default(),
            density_factors: DensityFactors::default(),
            trim_percentages: TrimPercentages::default(),
            minimum_acres: dec!(0.5),
        }
    }
}

/// AFISS multiplier settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AfissSettings {
    /// Lowest multiplier a factor selection can produce.
    pub floor: Decimal,
    /// Multipliers above this are logged and flagged, never capped.
    pub warning_threshold: Decimal,
}

impl Default for AfissSettings {
    fn default() -> Self {
        Self {
            floor: dec!(0.10),
            warning_threshold: dec!(3.0),
        }
    }
}

/// All tunable engine settings for one organization.
///
/// # Example
///
/// ```
/// use treeshop_engine::config::EngineSettings;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = EngineSettings::default();
/// assert_eq!(settings.labor.burden_multiplier, Decimal::from_str("1.7").unwrap());
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Labor cost settings.
    pub labor: LaborSettings,
    /// Pricing settings.
    pub pricing: PricingSettings,
    /// Time estimation settings.
    pub time: TimeSettings,
    /// Work score settings.
    pub scoring: ScoringSettings,
    /// AFISS settings.
    pub afiss: AfissSettings,
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

impl EngineSettings {
    /// Checks that the settings keep the engine's invariants intact.
    ///
    /// Tier multipliers and the burden multiplier must be at least 1 and
    /// premiums non-negative, so that true cost never falls below base
    /// wage; margins must stay in [0, 100).
    pub fn validate(&self) -> EngineResult<()> {
        let labor = &self.labor;
        if labor.burden_multiplier < Decimal::ONE {
            return Err(invalid(format!(
                "burden_multiplier must be at least 1, got {}",
                labor.burden_multiplier
            )));
        }
        for (tier, multiplier) in &labor.tier_multipliers {
            if *multiplier < Decimal::ONE {
                return Err(invalid(format!(
                    "tier {} multiplier must be at least 1, got {}",
                    tier, multiplier
                )));
            }
        }
        for (table, premiums) in [
            ("leadership_premiums", &labor.leadership_premiums),
            ("equipment_premiums", &labor.equipment_premiums),
            ("driver_premiums", &labor.driver_premiums),
            ("certification_premiums", &labor.certification_premiums),
        ] {
            if let Some((code, premium)) = premiums.iter().find(|(_, p)| **p < Decimal::ZERO) {
                return Err(invalid(format!(
                    "{} entry '{}' must not be negative, got {}",
                    table, code, premium
                )));
            }
        }

        for margin in &self.pricing.margin_ladder {
            if *margin < Decimal::ZERO || *margin >= Decimal::ONE_HUNDRED {
                return Err(invalid(format!(
                    "margin_ladder entries must be in [0, 100), got {}",
                    margin
                )));
            }
        }

        if self.time.buffer_fraction < Decimal::ZERO {
            return Err(invalid("buffer_fraction must not be negative"));
        }
        if let Some((service, hours)) = self
            .time
            .minimum_hours
            .iter()
            .find(|(_, h)| **h < Decimal::ZERO)
        {
            return Err(invalid(format!(
                "minimum_hours for {} must not be negative, got {}",
                service, hours
            )));
        }

        let scoring = &self.scoring;
        let density = &scoring.density_factors;
        if density.light <= Decimal::ZERO
            || density.average <= density.light
            || density.heavy <= density.average
        {
            return Err(invalid(
                "density_factors must satisfy 0 < light < average < heavy",
            ));
        }
        let trim = &scoring.trim_percentages;
        for (name, pct) in [("light", trim.light), ("medium", trim.medium), ("heavy", trim.heavy)] {
            if pct <= Decimal::ZERO || pct > Decimal::ONE {
                return Err(invalid(format!(
                    "trim_percentages.{} must be in (0, 1], got {}",
                    name, pct
                )));
            }
        }
        let stump = &scoring.stump_modifiers;
        let negative_deltas: Decimal = [
            stump.hardwood,
            stump.root_flare,
            stump.rotten,
            stump.rocks,
            stump.tight_space,
        ]
        .into_iter()
        .filter(|delta| *delta < Decimal::ZERO)
        .sum();
        if Decimal::ONE + negative_deltas <= Decimal::ZERO {
            return Err(invalid(
                "stump_modifiers can combine to a non-positive factor",
            ));
        }
        if scoring.minimum_acres < Decimal::ZERO {
            return Err(invalid("minimum_acres must not be negative"));
        }

        if self.afiss.floor <= Decimal::ZERO {
            return Err(invalid("afiss.floor must be greater than zero"));
        }
        if self.afiss.warning_threshold <= Decimal::ONE {
            return Err(invalid("afiss.warning_threshold must be greater than 1"));
        }

        Ok(())
    }
}

/// The configured catalog of selectable AFISS factors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfissCatalog {
    factors: Vec<AfissFactor>,
}

impl AfissCatalog {
    /// Creates a catalog, rejecting duplicate factor ids.
    pub fn new(factors: Vec<AfissFactor>) -> EngineResult<Self> {
        let mut seen = HashSet::new();
        for factor in &factors {
            if !seen.insert(factor.id.as_str()) {
                return Err(invalid(format!("duplicate AFISS factor id '{}'", factor.id)));
            }
        }
        Ok(Self { factors })
    }

    /// All factors in catalog order.
    pub fn factors(&self) -> &[AfissFactor] {
        &self.factors
    }

    /// Looks up a factor by id.
    pub fn get(&self, id: &str) -> Option<&AfissFactor> {
        self.factors.iter().find(|f| f.id == id)
    }

    /// Factors in one category.
    pub fn by_category(&self, category: AfissCategory) -> impl Iterator<Item = &AfissFactor> {
        self.factors.iter().filter(move |f| f.category == category)
    }

    /// Resolves a selection of factor ids.
    ///
    /// Repeated ids count once. An id the catalog does not know is an
    /// error: dropping it silently would under-price the job.
    pub fn select(&self, ids: &[String]) -> EngineResult<Vec<&AfissFactor>> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            let factor = self.get(id).ok_or_else(|| {
                EngineError::invalid_input("afiss_factor_ids", format!("unknown AFISS factor '{}'", id))
            })?;
            selected.push(factor);
        }
        Ok(selected)
    }
}

/// AFISS catalog file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AfissCatalogConfig {
    /// The factors in the catalog.
    pub factors: Vec<AfissFactor>,
}

/// Service templates file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceTemplatesConfig {
    /// One template per configured service.
    pub templates: Vec<ServiceTemplate>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    afiss_catalog: AfissCatalog,
    service_templates: HashMap<ServiceType, ServiceTemplate>,
}

impl EngineConfig {
    /// Creates a configuration from its component parts.
    ///
    /// Settings and every template are validated; a service may have at
    /// most one template.
    pub fn new(
        settings: EngineSettings,
        afiss_catalog: AfissCatalog,
        templates: Vec<ServiceTemplate>,
    ) -> EngineResult<Self> {
        settings.validate()?;

        let mut service_templates = HashMap::new();
        for template in templates {
            template.validate().map_err(|e| invalid(e.to_string()))?;
            let service_type = template.service_type;
            if service_templates.insert(service_type, template).is_some() {
                return Err(invalid(format!(
                    "more than one service template for '{}'",
                    service_type
                )));
            }
        }

        Ok(Self {
            settings,
            afiss_catalog,
            service_templates,
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the AFISS catalog.
    pub fn afiss_catalog(&self) -> &AfissCatalog {
        &self.afiss_catalog
    }

    /// Returns all configured service templates.
    pub fn service_templates(&self) -> &HashMap<ServiceType, ServiceTemplate> {
        &self.service_templates
    }

    /// Returns the template for a service, or `ServiceNotConfigured`.
    pub fn service_template(&self, service_type: ServiceType) -> EngineResult<&ServiceTemplate> {
        self.service_templates
            .get(&service_type)
            .ok_or(EngineError::ServiceNotConfigured { service_type })
    }
}
