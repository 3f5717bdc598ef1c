//! Common error types for winutil-core.

use thiserror::Error;

/// Errors raised by window-system calls and the installer helper.
///
/// `WindowService` never hands these to its callers; it logs them and
/// returns a sentinel instead. Config and installer APIs propagate them.
#[derive(Debug, Error)]
pub enum WinUtilError {
    #[error("invalid (null) window handle")]
    InvalidHandle,
    #[error("{op} failed (os error {code})")]
    Os { op: &'static str, code: u32 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("not supported on this platform: {0}")]
    Unsupported(&'static str),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("invalid z-order: {0}")]
    InvalidZOrder(String),
    #[error("manifest error: {0}")]
    Manifest(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl WinUtilError {
    /// Shorthand for an OS call failure.
    pub fn os(op: &'static str, code: u32) -> Self {
        WinUtilError::Os { op, code }
    }
}

/// Result type for winutil operations.
pub type WinUtilResult<T> = Result<T, WinUtilError>;
