//! winutil-core: window handle resolution and window-management helpers.
//!
//! Design goal: keep this crate platform-agnostic. Every OS call goes through
//! the [`WindowSystem`] trait; the Win32 implementation lives in
//! `winutil-platform`.
//!
//! ## Module Structure
//!
//! - `error` - Common error types
//! - `types` - Handles, process records, rectangles and style pairs
//! - `system` - The `WindowSystem` capability trait
//! - `poll` - Timeout-bounded polling combinator
//! - `style` - Window style bit math (popup / framed)
//! - `keys` - Key name to virtual-key code mapping
//! - `service` - `WindowService`, the sentinel-returning public surface
//! - `installer` - Package manifest and define-symbol editing
//! - `config` - YAML configuration and platform paths

pub mod config;
mod error;
pub mod installer;
mod keys;
mod poll;
mod service;
pub mod style;
mod system;
mod types;

#[cfg(test)]
mod fake;

// Re-export error types
pub use error::{WinUtilError, WinUtilResult};

// Re-export core types
pub use types::{
    KeyDirection, LaunchWindow, Placement, ProcessLaunch, ProcessRecord, ShowCommand, StyleIndex,
    WindowHandle, WindowRect, WindowStyles, ZOrder,
};

pub use keys::parse_key;
pub use poll::{poll_until, PollPolicy};
pub use service::{ServiceConfig, WindowService};
pub use system::{SharedWindowSystem, WindowSystem};
