//! Dashboard Configuration
//! Source file locations and the initial view, read from JSON.

use crate::data::DataSources;
use crate::view::ViewState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub sources: DataSources,
    #[serde(default)]
    pub view: ViewState,
}

impl DashboardConfig {
    /// Default file names in `dir`, default view.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            sources: DataSources::from_dir(dir),
            view: ViewState::default(),
        }
    }

    /// Load a JSON config file. Relative source paths resolve against the
    /// config file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: DashboardConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(base) = path.parent() {
            let sources = &mut config.sources;
            for source in [
                &mut sources.population,
                &mut sources.gdp,
                &mut sources.child_mortality,
                &mut sources.life_expectancy,
                &mut sources.fertility_rate,
            ] {
                if source.is_relative() {
                    *source = base.join(&*source);
                }
            }
        }

        Ok(config)
    }
}
