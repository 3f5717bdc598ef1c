//! winutil-platform: OS boundary for winutil.
//!
//! This crate provides:
//! - A Win32 implementation of `winutil_core::WindowSystem`
//! - Process enumeration and launch shared by every target
//! - A fallback window system for non-Windows builds that reports
//!   every window call as unsupported
//!
//! ## Module Structure
//!
//! - `process` - Process enumeration (`sysinfo`) and launch (`std::process`)
//! - `window` - Window system implementations, one per platform

mod process;
mod window;

pub use process::{find_process, launch, list_processes, process_base_name};
pub use window::native_window_system;

#[cfg(windows)]
pub use window::Win32WindowSystem;

#[cfg(not(windows))]
pub use window::UnsupportedWindowSystem;
