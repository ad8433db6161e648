use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://sheetdb.io/api/v1/6f6eekubj5k2n";
const CONFIG_FILE: &str = "config.json";

/// Runtime configuration, read from `config.json` in the platform config dir.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL returning the JSON array of records.
    pub endpoint: String,
    /// Where `storage.json` and the log directory live. Platform data dir when unset.
    pub data_dir: Option<PathBuf>,
    pub toast_visible_ms: u64,
    pub toast_fade_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            data_dir: None,
            toast_visible_ms: 2200,
            toast_fade_ms: 400,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location when `path` is `None`.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, CatalogError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match project_dirs() {
                Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let bytes = std::fs::read(&path)?;
        let config: Config = serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.endpoint.trim().is_empty() {
            return Err(CatalogError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    /// Apply command line overrides on top of the file values.
    pub fn with_overrides(mut self, endpoint: Option<String>, data_dir: Option<PathBuf>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        if let Some(dir) = data_dir {
            self.data_dir = Some(dir);
        }
        self
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> Result<PathBuf, CatalogError> {
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        project_dirs()
            .map(|d| d.data_dir().to_path_buf())
            .ok_or_else(|| CatalogError::Config("Could not determine home directory".to_string()))
    }

    pub fn toast_visible(&self) -> Duration {
        Duration::from_millis(self.toast_visible_ms)
    }

    pub fn toast_fade(&self) -> Duration {
        Duration::from_millis(self.toast_fade_ms)
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "linkcatalog", "link-catalog")
}
