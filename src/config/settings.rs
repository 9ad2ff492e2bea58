use super::ConfigError;
use crate::ingredients::SUPPORTED_COUNTRIES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_strict_transitions() -> bool {
    true
}

fn default_country_id() -> String {
    "us".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Strict sessions return configuration errors; lenient ones log them and
    /// leave navigation unchanged.
    #[serde(default = "default_strict_transitions")]
    pub strict_transitions: bool,
    #[serde(default)]
    pub flow_catalog: Option<PathBuf>,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default = "default_country_id")]
    pub country_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict_transitions: default_strict_transitions(),
            flow_catalog: None,
            log_path: None,
            country_id: default_country_id(),
        }
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_COUNTRIES.contains(&self.country_id.as_str()) {
            return Err(ConfigError::Settings(format!(
                "country_id `{}` is not supported; expected one of {}",
                self.country_id,
                SUPPORTED_COUNTRIES.join(", ")
            )));
        }
        if let Some(path) = &self.flow_catalog {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Settings(
                    "flow_catalog must not be empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Log file location. `state_root` is only consulted when no path is
    /// configured.
    pub fn resolve_log_path(
        &self,
        state_root: impl FnOnce() -> Result<PathBuf, ConfigError>,
    ) -> Result<PathBuf, ConfigError> {
        match &self.log_path {
            Some(path) => Ok(path.clone()),
            None => Ok(crate::shared::logging::wizard_log_path(&state_root()?)),
        }
    }
}
