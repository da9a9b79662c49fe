//! Configuration for the ganji crates, loaded from TOML.
//!
//! A config file has two optional tables:
//!
//! ```toml
//! [chart]
//! observer_longitude_deg = 126.98
//! day_boundary = "인시"
//!
//! [strength.blend.year]
//! natal = 0.5
//! decade = 0.3
//! year = 0.2
//! ```
//!
//! Missing keys take their defaults. Enum values accept the English
//! snake_case names and the Korean labels.

pub mod chart;
pub mod error;
pub mod strength;

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use chart::ChartConfig;
pub use error::ConfigError;
pub use strength::StrengthConfig;

/// Environment variable the CLI reads a config path from.
pub const CONFIG_PATH_ENV: &str = "GANJI_CONFIG";

/// Complete configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanjiConfig {
    pub chart: ChartConfig,
    pub strength: StrengthConfig,
}

impl GanjiConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chart.validate()?;
        self.strength.validate()
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
