//! Application configuration
//!
//! Every field has a default, so an empty JSON object is a valid config.
//! Environment overrides:
//!   FYWISE_CONFIG     path to a JSON config file
//!   FYWISE_DATA_FILE  use the CSV store at this path

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{FywiseError, Result};
use crate::loan::{ProjectionConfig, ProjectionEngine, DEFAULT_TREND_MARKERS};
use crate::store::StoreBackend;

pub const CONFIG_PATH_ENV: &str = "FYWISE_CONFIG";
pub const DATA_FILE_ENV: &str = "FYWISE_DATA_FILE";

fn default_trend_markers() -> Vec<u32> {
    DEFAULT_TREND_MARKERS.to_vec()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreBackend,

    #[serde(default)]
    pub projection: ProjectionConfig,

    /// Months sampled for the balance chart
    #[serde(default = "default_trend_markers")]
    pub trend_markers: Vec<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            projection: ProjectionConfig::default(),
            trend_markers: default_trend_markers(),
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        debug!("loaded config from {}", path.as_ref().display());
        Self::from_json_str(&contents)
    }

    /// Resolve the config: explicit path, then `FYWISE_CONFIG`, then defaults,
    /// with `FYWISE_DATA_FILE` applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(p) => Self::from_json_path(p)?,
            None => Self::default(),
        };

        if let Some(data_file) = env::var_os(DATA_FILE_ENV) {
            config.store = StoreBackend::Csv {
                path: PathBuf::from(data_file),
            };
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.projection.schedule_cap_months == 0 {
            return Err(FywiseError::Config(
                "projection.schedule_cap_months must be at least 1".to_string(),
            ));
        }
        if self.projection.preview_months == 0 {
            return Err(FywiseError::Config(
                "projection.preview_months must be at least 1".to_string(),
            ));
        }
        if self.trend_markers.windows(2).any(|w| w[1] <= w[0]) {
            return Err(FywiseError::Config(
                "trend_markers must be strictly increasing".to_string(),
            ));
        }
        Ok(())
    }

    pub fn engine(&self) -> ProjectionEngine {
        ProjectionEngine::new(self.projection)
    }
}
