//! Windows implementation of the window system using Win32.

use crate::process;
use std::ptr;
use tracing::debug;
use windows_sys::Win32::Foundation::{GetLastError, SetLastError, BOOL, FALSE, HWND, LPARAM, TRUE};
use windows_sys::Win32::UI::Input::KeyboardAndMouse::{keybd_event, KEYEVENTF_KEYUP};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    EnumWindows, FindWindowW, GetWindow, GetWindowLongW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsWindow, IsWindowVisible, PostMessageW, SetForegroundWindow,
    SetWindowLongW, SetWindowPos, ShowWindow, GWL_EXSTYLE, GWL_STYLE, GW_OWNER, HWND_BOTTOM,
    HWND_NOTOPMOST, HWND_TOP, HWND_TOPMOST, SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE,
    SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_SHOW, WINDOW_LONG_PTR_INDEX, WM_CLOSE,
};
use winutil_core::{
    KeyDirection, Placement, ProcessLaunch, ProcessRecord, ShowCommand, StyleIndex, WinUtilError,
    WinUtilResult, WindowHandle, WindowSystem, ZOrder,
};

/// `WindowSystem` backed by user32.
#[derive(Debug, Default)]
pub struct Win32WindowSystem;

impl Win32WindowSystem {
    pub fn new() -> Self {
        Self
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    handle.0 as HWND
}

fn last_error(op: &'static str) -> WinUtilError {
    let code = unsafe { GetLastError() };
    WinUtilError::os(op, code)
}

/// Reject null and destroyed handles before calling APIs whose return value
/// cannot signal failure.
fn live(handle: WindowHandle) -> WinUtilResult<HWND> {
    if handle.is_null() {
        return Err(WinUtilError::InvalidHandle);
    }
    let h = hwnd(handle);
    if unsafe { IsWindow(h) } == 0 {
        // ERROR_INVALID_WINDOW_HANDLE
        return Err(WinUtilError::os("IsWindow", 1400));
    }
    Ok(h)
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn long_index(index: StyleIndex) -> WINDOW_LONG_PTR_INDEX {
    match index {
        StyleIndex::Style => GWL_STYLE,
        StyleIndex::ExStyle => GWL_EXSTYLE,
    }
}

fn insert_after(z_order: ZOrder) -> HWND {
    match z_order {
        ZOrder::Bottom => HWND_BOTTOM,
        ZOrder::Top => HWND_TOP,
        ZOrder::NoTopMost => HWND_NOTOPMOST,
        ZOrder::TopMost => HWND_TOPMOST,
    }
}

struct MainWindowSearch {
    pid: u32,
    found: HWND,
}

/// First visible, unowned top-level window of `search.pid`.
unsafe extern "system" fn main_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    let search = &mut *(lparam as *mut MainWindowSearch);

    let mut owner_pid: u32 = 0;
    GetWindowThreadProcessId(hwnd, &mut owner_pid);
    if owner_pid != search.pid {
        return TRUE;
    }

    // Skip owned (dialog/tool) and invisible windows
    if !GetWindow(hwnd, GW_OWNER).is_null() || IsWindowVisible(hwnd) == 0 {
        return TRUE;
    }

    search.found = hwnd;
    FALSE
}

impl WindowSystem for Win32WindowSystem {
    fn find_window(&self, title: &str) -> WinUtilResult<WindowHandle> {
        let wide = to_wide(title);
        let h = unsafe { FindWindowW(ptr::null(), wide.as_ptr()) };
        Ok(WindowHandle(h as usize))
    }

    fn window_text(&self, handle: WindowHandle) -> WinUtilResult<String> {
        let h = live(handle)?;
        unsafe {
            let len = GetWindowTextLengthW(h);
            if len <= 0 {
                return Ok(String::new());
            }

            let mut buf: Vec<u16> = vec![0; (len + 1) as usize];
            let copied = GetWindowTextW(h, buf.as_mut_ptr(), buf.len() as i32);
            buf.truncate(copied.max(0) as usize);
            Ok(String::from_utf16_lossy(&buf))
        }
    }

    fn set_window_pos(&self, handle: WindowHandle, placement: Placement) -> WinUtilResult<()> {
        let h = live(handle)?;

        let mut flags = 0;
        let after = match placement.z_order {
            Some(z_order) => insert_after(z_order),
            None => {
                flags |= SWP_NOZORDER;
                ptr::null_mut()
            }
        };
        let rect = match placement.rect {
            Some(rect) => rect,
            None => {
                flags |= SWP_NOMOVE | SWP_NOSIZE;
                Default::default()
            }
        };

        let ok = unsafe {
            SetWindowPos(h, after, rect.x, rect.y, rect.width, rect.height, flags)
        };
        if ok == 0 {
            return Err(last_error("SetWindowPos"));
        }
        debug!(%handle, ?placement, "SetWindowPos");
        Ok(())
    }

    fn show_window(&self, handle: WindowHandle, cmd: ShowCommand) -> WinUtilResult<()> {
        let h = live(handle)?;
        let cmd = match cmd {
            ShowCommand::Show => SW_SHOW,
            ShowCommand::Hide => SW_HIDE,
        };
        // return value is the previous visibility, not success
        unsafe { ShowWindow(h, cmd) };
        Ok(())
    }

    fn set_foreground(&self, handle: WindowHandle) -> WinUtilResult<()> {
        let h = live(handle)?;
        if unsafe { SetForegroundWindow(h) } == 0 {
            // no extended error info for SetForegroundWindow
            return Err(WinUtilError::os("SetForegroundWindow", 0));
        }
        Ok(())
    }

    fn window_long(&self, handle: WindowHandle, index: StyleIndex) -> WinUtilResult<u32> {
        let h = live(handle)?;
        unsafe {
            SetLastError(0);
            let value = GetWindowLongW(h, long_index(index));
            if value == 0 && GetLastError() != 0 {
                return Err(last_error("GetWindowLong"));
            }
            Ok(value as u32)
        }
    }

    fn set_window_long(
        &self,
        handle: WindowHandle,
        index: StyleIndex,
        value: u32,
    ) -> WinUtilResult<u32> {
        let h = live(handle)?;
        unsafe {
            // a zero return is only a failure if the last error was set
            SetLastError(0);
            let previous = SetWindowLongW(h, long_index(index), value as i32);
            if previous == 0 && GetLastError() != 0 {
                return Err(last_error("SetWindowLong"));
            }
            Ok(previous as u32)
        }
    }

    fn refresh_frame(&self, handle: WindowHandle) -> WinUtilResult<()> {
        let h = live(handle)?;
        let flags = SWP_FRAMECHANGED | SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE;
        if unsafe { SetWindowPos(h, ptr::null_mut(), 0, 0, 0, 0, flags) } == 0 {
            return Err(last_error("SetWindowPos"));
        }
        Ok(())
    }

    fn post_close(&self, handle: WindowHandle) -> WinUtilResult<()> {
        let h = live(handle)?;
        if unsafe { PostMessageW(h, WM_CLOSE, 0, 0) } == 0 {
            return Err(last_error("PostMessage"));
        }
        debug!(%handle, "posted WM_CLOSE");
        Ok(())
    }

    fn send_key(&self, vk: u8, direction: KeyDirection) -> WinUtilResult<()> {
        let flags = match direction {
            KeyDirection::Down => 0,
            KeyDirection::Up => KEYEVENTF_KEYUP,
        };
        unsafe { keybd_event(vk, 0, flags, 0) };
        debug!(vk, ?direction, "keybd_event");
        Ok(())
    }

    fn processes(&self) -> WinUtilResult<Vec<ProcessRecord>> {
        Ok(process::list_processes())
    }

    fn process_by_id(&self, pid: u32) -> WinUtilResult<Option<ProcessRecord>> {
        Ok(process::find_process(pid))
    }

    fn main_window(&self, pid: u32) -> WinUtilResult<WindowHandle> {
        let mut search = MainWindowSearch {
            pid,
            found: ptr::null_mut(),
        };
        // EnumWindows reports FALSE when the callback stops early
        unsafe {
            EnumWindows(
                Some(main_window_callback),
                &mut search as *mut MainWindowSearch as LPARAM,
            );
        }
        Ok(WindowHandle(search.found as usize))
    }

    fn spawn_process(&self, launch: &ProcessLaunch) -> WinUtilResult<u32> {
        process::launch(launch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_window_is_null() {
        let system = Win32WindowSystem::new();
        let h = system
            .find_window("winutil test window that does not exist 4c1d")
            .unwrap();
        assert!(h.is_null());
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let system = Win32WindowSystem::new();
        assert!(matches!(
            system.window_text(WindowHandle::NULL),
            Err(WinUtilError::InvalidHandle)
        ));
        assert!(system.post_close(WindowHandle(0x7FFF_FFF0)).is_err());
    }

    #[test]
    fn test_to_wide_is_nul_terminated() {
        assert_eq!(to_wide("ab"), vec![b'a' as u16, b'b' as u16, 0]);
    }
}
