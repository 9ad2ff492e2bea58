use super::{default_global_config_path, ConfigError, Settings};
use crate::flow::FlowCatalog;
use std::path::Path;

/// Missing settings file means defaults; a present but malformed one is an
/// error.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let settings = Settings::from_path(path)?;
    settings.validate()?;
    Ok(settings)
}

pub fn load_global_settings() -> Result<Settings, ConfigError> {
    let path = default_global_config_path()?;
    load_settings_from(&path)
}

pub fn load_flow_catalog(settings: &Settings) -> Result<FlowCatalog, ConfigError> {
    match &settings.flow_catalog {
        Some(path) => FlowCatalog::from_path(path),
        None => FlowCatalog::builtin(),
    }
}
