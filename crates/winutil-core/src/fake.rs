//! In-memory `WindowSystem` for tests.
//!
//! Windows can be scheduled to appear after a delay measured on the tokio
//! clock, so paused-time tests control exactly when a poll succeeds.

use crate::style::{WS_EX_CLIENTEDGE, WS_OVERLAPPEDWINDOW};
use crate::{
    KeyDirection, Placement, ProcessLaunch, ProcessRecord, ShowCommand, StyleIndex, WinUtilError,
    WinUtilResult, WindowHandle, WindowSystem,
};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub pid: u32,
    pub style: u32,
    pub ex_style: u32,
    pub visible: bool,
    pub placement: Option<Placement>,
    pub closed: bool,
    appears_at: Instant,
}

#[derive(Default)]
struct State {
    windows: Vec<FakeWindow>,
    processes: Vec<ProcessRecord>,
    keys: Vec<(u8, KeyDirection)>,
    foreground: WindowHandle,
    next_pid: u32,
}

pub struct FakeWindowSystem {
    created: Instant,
    state: Mutex<State>,
}

impl FakeWindowSystem {
    pub fn new() -> Self {
        Self {
            created: Instant::now(),
            state: Mutex::new(State {
                next_pid: 9000,
                ..State::default()
            }),
        }
    }

    /// Add a framed window that exists immediately.
    pub fn add_window(&self, handle: usize, title: &str, pid: u32) -> WindowHandle {
        self.add_window_after(handle, title, pid, Duration::ZERO)
    }

    /// Add a framed window that becomes visible to lookups after `delay`.
    pub fn add_window_after(
        &self,
        handle: usize,
        title: &str,
        pid: u32,
        delay: Duration,
    ) -> WindowHandle {
        let handle = WindowHandle(handle);
        self.state.lock().unwrap().windows.push(FakeWindow {
            handle,
            title: title.to_string(),
            pid,
            style: WS_OVERLAPPEDWINDOW,
            ex_style: WS_EX_CLIENTEDGE,
            visible: true,
            placement: None,
            closed: false,
            appears_at: self.created + delay,
        });
        handle
    }

    pub fn add_process(&self, name: &str, pid: u32) {
        self.state
            .lock()
            .unwrap()
            .processes
            .push(ProcessRecord::new(name, pid));
    }

    pub fn window(&self, handle: WindowHandle) -> Option<FakeWindow> {
        self.state
            .lock()
            .unwrap()
            .windows
            .iter()
            .find(|w| w.handle == handle)
            .cloned()
    }

    pub fn keys(&self) -> Vec<(u8, KeyDirection)> {
        self.state.lock().unwrap().keys.clone()
    }

    pub fn foreground(&self) -> WindowHandle {
        self.state.lock().unwrap().foreground
    }

    fn with_window<T>(
        &self,
        handle: WindowHandle,
        f: impl FnOnce(&mut FakeWindow) -> T,
    ) -> WinUtilResult<T> {
        if handle.is_null() {
            return Err(WinUtilError::InvalidHandle);
        }
        let now = Instant::now();
        let mut state = self.state.lock().unwrap();
        state
            .windows
            .iter_mut()
            .find(|w| w.handle == handle && w.appears_at <= now)
            .map(f)
            // ERROR_INVALID_WINDOW_HANDLE
            .ok_or(WinUtilError::os("fake", 1400))
    }
}

impl WindowSystem for FakeWindowSystem {
    fn find_window(&self, title: &str) -> WinUtilResult<WindowHandle> {
        let now = Instant::now();
        let state = self.state.lock().unwrap();
        Ok(state
            .windows
            .iter()
            .find(|w| w.title == title && !w.closed && w.appears_at <= now)
            .map(|w| w.handle)
            .unwrap_or(WindowHandle::NULL))
    }

    fn window_text(&self, handle: WindowHandle) -> WinUtilResult<String> {
        self.with_window(handle, |w| w.title.clone())
    }

    fn set_window_pos(&self, handle: WindowHandle, placement: Placement) -> WinUtilResult<()> {
        self.with_window(handle, |w| w.placement = Some(placement))
    }

    fn show_window(&self, handle: WindowHandle, cmd: ShowCommand) -> WinUtilResult<()> {
        self.with_window(handle, |w| w.visible = cmd == ShowCommand::Show)
    }

    fn set_foreground(&self, handle: WindowHandle) -> WinUtilResult<()> {
        self.with_window(handle, |_| ())?;
        self.state.lock().unwrap().foreground = handle;
        Ok(())
    }

    fn window_long(&self, handle: WindowHandle, index: StyleIndex) -> WinUtilResult<u32> {
        self.with_window(handle, |w| match index {
            StyleIndex::Style => w.style,
            StyleIndex::ExStyle => w.ex_style,
        })
    }

    fn set_window_long(
        &self,
        handle: WindowHandle,
        index: StyleIndex,
        value: u32,
    ) -> WinUtilResult<u32> {
        self.with_window(handle, |w| {
            let slot = match index {
                StyleIndex::Style => &mut w.style,
                StyleIndex::ExStyle => &mut w.ex_style,
            };
            std::mem::replace(slot, value)
        })
    }

    fn refresh_frame(&self, handle: WindowHandle) -> WinUtilResult<()> {
        self.with_window(handle, |_| ())
    }

    fn post_close(&self, handle: WindowHandle) -> WinUtilResult<()> {
        self.with_window(handle, |w| w.closed = true)
    }

    fn send_key(&self, vk: u8, direction: KeyDirection) -> WinUtilResult<()> {
        self.state.lock().unwrap().keys.push((vk, direction));
        Ok(())
    }

    fn processes(&self) -> WinUtilResult<Vec<ProcessRecord>> {
        Ok(self.state.lock().unwrap().processes.clone())
    }

    fn process_by_id(&self, pid: u32) -> WinUtilResult<Option<ProcessRecord>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .processes
            .iter()
            .find(|p| p.pid == pid)
            .cloned())
    }

    fn main_window(&self, pid: u32) -> WinUtilResult<WindowHandle> {
        let now = Instant::now();
        let state = self.state.lock().unwrap();
        Ok(state
            .windows
            .iter()
            .find(|w| w.pid == pid && w.visible && !w.closed && w.appears_at <= now)
            .map(|w| w.handle)
            .unwrap_or(WindowHandle::NULL))
    }

    fn spawn_process(&self, launch: &ProcessLaunch) -> WinUtilResult<u32> {
        if launch.program.is_empty() {
            return Err(WinUtilError::NotFound("empty program".into()));
        }
        let mut state = self.state.lock().unwrap();
        let pid = state.next_pid;
        state.next_pid += 1;
        let name = launch
            .program
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&launch.program)
            .trim_end_matches(".exe")
            .to_string();
        state.processes.push(ProcessRecord::new(name, pid));
        Ok(pid)
    }
}
