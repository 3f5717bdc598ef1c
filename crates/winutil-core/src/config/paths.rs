use std::path::PathBuf;

/// Get platform-specific configuration directory
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("winutil")
}

pub fn default_config_path() -> PathBuf {
    config_dir().join("config.yaml")
}

pub fn log_dir() -> PathBuf {
    config_dir().join("logs")
}
