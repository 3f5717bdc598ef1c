//! Fallback for targets without a Win32 window manager.

use crate::process;
use tracing::warn;
use winutil_core::{
    KeyDirection, Placement, ProcessLaunch, ProcessRecord, ShowCommand, StyleIndex, WinUtilError,
    WinUtilResult, WindowHandle, WindowSystem,
};

const UNSUPPORTED: WinUtilError = WinUtilError::Unsupported("window management requires Windows");

pub struct UnsupportedWindowSystem;

impl UnsupportedWindowSystem {
    pub fn new() -> Self {
        warn!("window management is not available on this platform; window calls will fail");
        Self
    }
}

impl Default for UnsupportedWindowSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowSystem for UnsupportedWindowSystem {
    fn find_window(&self, _title: &str) -> WinUtilResult<WindowHandle> {
        Err(UNSUPPORTED)
    }

    fn window_text(&self, _handle: WindowHandle) -> WinUtilResult<String> {
        Err(UNSUPPORTED)
    }

    fn set_window_pos(&self, _handle: WindowHandle, _placement: Placement) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn show_window(&self, _handle: WindowHandle, _cmd: ShowCommand) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn set_foreground(&self, _handle: WindowHandle) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn window_long(&self, _handle: WindowHandle, _index: StyleIndex) -> WinUtilResult<u32> {
        Err(UNSUPPORTED)
    }

    fn set_window_long(
        &self,
        _handle: WindowHandle,
        _index: StyleIndex,
        _value: u32,
    ) -> WinUtilResult<u32> {
        Err(UNSUPPORTED)
    }

    fn refresh_frame(&self, _handle: WindowHandle) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn post_close(&self, _handle: WindowHandle) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn send_key(&self, _vk: u8, _direction: KeyDirection) -> WinUtilResult<()> {
        Err(UNSUPPORTED)
    }

    fn processes(&self) -> WinUtilResult<Vec<ProcessRecord>> {
        Ok(process::list_processes())
    }

    fn process_by_id(&self, pid: u32) -> WinUtilResult<Option<ProcessRecord>> {
        Ok(process::find_process(pid))
    }

    fn main_window(&self, _pid: u32) -> WinUtilResult<WindowHandle> {
        Err(UNSUPPORTED)
    }

    fn spawn_process(&self, launch: &ProcessLaunch) -> WinUtilResult<u32> {
        process::launch(launch)
    }
}
