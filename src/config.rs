use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::model::Group;
use crate::fit::FitOptions;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "bench-viewer.json";
/// Overrides the config file location.
pub const CONFIG_ENV: &str = "BENCH_VIEWER_CONFIG";
/// Overrides `results_dir`.
pub const RESULTS_ENV: &str = "BENCH_VIEWER_RESULTS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Viewer settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub results_dir: PathBuf,
    pub window_size: [f32; 2],
    pub initial_group: Group,
    pub log_scale: bool,
    pub fit: FitOptions,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            window_size: [1100.0, 800.0],
            initial_group: Group::ArrayLength,
            log_scale: false,
            fit: FitOptions::default(),
        }
    }
}

impl ViewerConfig {
    /// Resolve the configuration from the environment and optional file.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.is_file() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(dir) = std::env::var_os(RESULTS_ENV) {
            config.results_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}
