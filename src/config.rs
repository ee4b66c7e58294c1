use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PopulationError;
use crate::models::{ModelParameters, PopulationUnit};

/// Settings for how results are presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Unit in which targets are entered
    pub unit: PopulationUnit,
    /// Render terminal charts when available
    pub charts: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            unit: PopulationUnit::Millions,
            charts: true,
        }
    }
}

/// Application configuration, loaded from TOML.
///
/// ```toml
/// [model]
/// base_year = 2023
/// base_population = 2500000.0
/// annual_growth_rate = 0.03
/// rounding = "nearest"
///
/// [display]
/// unit = "millions"
/// charts = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub model: ModelParameters,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PopulationError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate the model section.
    pub fn from_toml_str(content: &str) -> Result<Self, PopulationError> {
        let config: AppConfig = toml::from_str(content)?;
        config.model.validate()?;
        Ok(config)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, PopulationError> {
        toml::to_string(self).map_err(|e| PopulationError::Config(e.to_string()))
    }
}
