//! Window system implementations.
//!
//! Platform implementations:
//! - Windows: Win32 API (`windows.rs`)
//! - Other targets: every window call fails with `Unsupported`
//!   (`unsupported.rs`); process calls still work

use std::sync::Arc;
use winutil_core::SharedWindowSystem;

#[cfg(windows)]
mod windows;

#[cfg(not(windows))]
mod unsupported;

#[cfg(windows)]
pub use windows::Win32WindowSystem;

#[cfg(not(windows))]
pub use unsupported::UnsupportedWindowSystem;

/// The window system of the current platform.
pub fn native_window_system() -> SharedWindowSystem {
    #[cfg(windows)]
    {
        Arc::new(Win32WindowSystem::new())
    }
    #[cfg(not(windows))]
    {
        Arc::new(UnsupportedWindowSystem::new())
    }
}
