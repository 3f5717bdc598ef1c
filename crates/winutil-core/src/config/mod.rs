//! Configuration: YAML file with per-section defaults.

pub mod loader;
pub mod paths;

use crate::{PollPolicy, ServiceConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WinUtilConfig {
    pub poll: PollConfig,
    pub input: InputConfig,
    pub host: HostConfig,
    pub installer: InstallerConfig,
    pub logging: LoggingConfig,
}

impl WinUtilConfig {
    /// Service tunables derived from this configuration.
    pub fn service(&self) -> ServiceConfig {
        ServiceConfig {
            poll: PollPolicy::from_millis(self.poll.interval_ms, self.poll.timeout_ms),
            key_press: Duration::from_millis(self.input.key_press_ms),
            host_window_title: self.host.window_title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    /// Delay between probes.
    pub interval_ms: u64,
    /// Default deadline for handle resolution.
    pub timeout_ms: u64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 10,
            timeout_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How long a key is held by `send_key_async`.
    pub key_press_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { key_press_ms: 100 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Title of the embedding application's window.
    /// Leave empty to disable the null-handle fallback.
    pub window_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Define symbol enabled once the packages are installed.
    pub feature_flag: String,
    /// Packages required in the manifest: name -> source.
    pub packages: BTreeMap<String, String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        let packages = [
            (
                "com.cysharp.unitask",
                "https://github.com/Cysharp/UniTask.git?path=src/UniTask/Assets/Plugins/UniTask",
            ),
            (
                "work.ctrl3d.winapi",
                "https://github.com/ctrl3d/WinAPI.git?path=Assets/WinAPI",
            ),
        ]
        .into_iter()
        .map(|(name, url)| (name.to_string(), url.to_string()))
        .collect();

        Self {
            feature_flag: "UNITASK_SUPPORT".to_string(),
            packages,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write a daily-rotated log file under the log directory.
    pub file: bool,
    /// Leave empty to use platform default path
    pub dir: String,
}

impl LoggingConfig {
    pub fn effective_dir(&self) -> std::path::PathBuf {
        if self.dir.is_empty() {
            paths::log_dir()
        } else {
            std::path::PathBuf::from(&self.dir)
        }
    }
}
