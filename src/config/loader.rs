//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{ServiceTemplate, ServiceType};

use super::types::{
    AfissCatalog, AfissCatalogConfig, EngineConfig, EngineSettings, ServiceTemplatesConfig,
};

/// Loads and provides access to engine configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query settings, AFISS factors and service
/// templates.
///
/// # Directory Structure
///
/// ```text
/// config/treeshop/
/// ├── settings.yaml           # Labor, pricing, time, scoring, AFISS settings
/// ├── afiss_factors.yaml      # Selectable site-complexity factors
/// └── service_templates.yaml  # Company-wide standard PPH / cost / margin
/// ```
///
/// # Example
///
/// ```no_run
/// use treeshop_engine::config::ConfigLoader;
/// use treeshop_engine::models::ServiceType;
///
/// let loader = ConfigLoader::load("./config/treeshop").unwrap();
/// let template = loader.get_service_template(ServiceType::ForestryMulching).unwrap();
/// println!("Standard PPH: {}", template.standard_pph);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The settings or templates fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("settings.yaml"))?;

        let afiss = Self::load_yaml::<AfissCatalogConfig>(&path.join("afiss_factors.yaml"))?;
        let afiss_catalog = AfissCatalog::new(afiss.factors)?;

        let templates =
            Self::load_yaml::<ServiceTemplatesConfig>(&path.join("service_templates.yaml"))?;

        let config = EngineConfig::new(settings, afiss_catalog, templates.templates)?;

        debug!(
            path = %path.display(),
            afiss_factors = config.afiss_catalog().factors().len(),
            service_templates = config.service_templates().len(),
            "Loaded engine configuration"
        );

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the AFISS factor catalog.
    pub fn afiss_catalog(&self) -> &AfissCatalog {
        self.config.afiss_catalog()
    }

    /// Gets the service template for a service type.
    ///
    /// # Returns
    ///
    /// Returns the template if configured, or `ServiceNotConfigured` so the
    /// caller can block pricing instead of showing a zero price.
    pub fn get_service_template(&self, service_type: ServiceType) -> EngineResult<&ServiceTemplate> {
        self.config.service_template(service_type)
    }
}
