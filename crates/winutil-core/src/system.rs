//! The OS capability every window operation goes through.

use crate::{
    KeyDirection, Placement, ProcessLaunch, ProcessRecord, ShowCommand, StyleIndex, WinUtilResult,
    WindowHandle,
};
use std::sync::Arc;

/// Single-call access to the host window manager.
///
/// Implementations perform exactly one OS call per method and report
/// failures as errors; retrying, defaulting and logging belong to
/// [`crate::WindowService`].
pub trait WindowSystem: Send + Sync {
    /// Find a top-level window by exact title. `NULL` when absent.
    fn find_window(&self, title: &str) -> WinUtilResult<WindowHandle>;

    /// Window title, empty when the window has none.
    fn window_text(&self, handle: WindowHandle) -> WinUtilResult<String>;

    fn set_window_pos(&self, handle: WindowHandle, placement: Placement) -> WinUtilResult<()>;

    fn show_window(&self, handle: WindowHandle, cmd: ShowCommand) -> WinUtilResult<()>;

    fn set_foreground(&self, handle: WindowHandle) -> WinUtilResult<()>;

    fn window_long(&self, handle: WindowHandle, index: StyleIndex) -> WinUtilResult<u32>;

    /// Write a style word, returning the previous value.
    fn set_window_long(
        &self,
        handle: WindowHandle,
        index: StyleIndex,
        value: u32,
    ) -> WinUtilResult<u32>;

    /// Make the window manager re-read cached frame styles.
    fn refresh_frame(&self, handle: WindowHandle) -> WinUtilResult<()>;

    /// Post WM_CLOSE.
    fn post_close(&self, handle: WindowHandle) -> WinUtilResult<()>;

    /// Synthesize one key transition for a virtual-key code.
    fn send_key(&self, vk: u8, direction: KeyDirection) -> WinUtilResult<()>;

    /// Snapshot of running processes.
    fn processes(&self) -> WinUtilResult<Vec<ProcessRecord>>;

    fn process_by_id(&self, pid: u32) -> WinUtilResult<Option<ProcessRecord>>;

    /// Main window of a process, `NULL` while it has none.
    fn main_window(&self, pid: u32) -> WinUtilResult<WindowHandle>;

    /// Start a program and return its pid.
    fn spawn_process(&self, launch: &ProcessLaunch) -> WinUtilResult<u32>;
}

/// Shared trait object handed to services.
pub type SharedWindowSystem = Arc<dyn WindowSystem>;
