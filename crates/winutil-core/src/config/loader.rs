use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::paths::default_config_path;
use super::WinUtilConfig;
use crate::WinUtilResult;

/// Load a YAML configuration file from disk
pub fn load_yaml<T: DeserializeOwned>(path: impl AsRef<Path>) -> WinUtilResult<T> {
    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}

/// Parse YAML from string
pub fn parse_yaml<T: DeserializeOwned>(content: &str) -> WinUtilResult<T> {
    Ok(serde_yaml::from_str(content)?)
}

/// Save a configuration to a YAML file
pub fn save_yaml<T: Serialize>(path: impl AsRef<Path>, config: &T) -> WinUtilResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Read configuration from `path`, or from the default location.
///
/// A missing file yields defaults; an unreadable or invalid one is an error
/// so the caller can report it once logging is up.
pub fn read_config(path: Option<&Path>) -> WinUtilResult<WinUtilConfig> {
    let default_path = default_config_path();
    let path = path.unwrap_or(default_path.as_path());

    if !path.exists() {
        tracing::debug!("No config at {:?}, using defaults", path);
        return Ok(WinUtilConfig::default());
    }

    let config = load_yaml::<WinUtilConfig>(path)?;
    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Load configuration from `path`, or from the default location.
/// Returns defaults if the file doesn't exist or is invalid
pub fn load_config(path: Option<&Path>) -> WinUtilConfig {
    read_config(path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}, using defaults", e);
        WinUtilConfig::default()
    })
}
