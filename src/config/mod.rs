//! Configuration loading and management for the pricing engine.
//!
//! This module loads per-organization engine settings, the AFISS factor
//! catalog and company-wide service templates from YAML files. Calculators
//! receive these values as arguments instead of reading module-level
//! constants, so organizations can diverge.
//!
//! # Example
//!
//! ```no_run
//! use treeshop_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/treeshop").unwrap();
//! println!("Burden multiplier: {}", config.settings().labor.burden_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AfissCatalog, AfissCatalogConfig, AfissSettings, DEFAULT_BUFFER_FRACTION,
    DEFAULT_BURDEN_MULTIPLIER, DEFAULT_MARGIN_LADDER, DensityFactors, EngineConfig,
    EngineSettings, LaborSettings, PricingSettings, ScoringSettings, ServiceTemplatesConfig,
    StumpModifiers, TimeSettings, TrimPercentages,
};
