//! `WindowService`: the public, never-failing surface over a [`WindowSystem`].
//!
//! Every method either returns a real value or a sentinel (`NULL`, `false`,
//! `0`, `None`, empty `Vec`). OS failures are logged here and go no further.

use crate::poll::{poll_until, PollPolicy};
use crate::style;
use crate::{
    KeyDirection, Placement, ProcessLaunch, ProcessRecord, SharedWindowSystem, ShowCommand,
    StyleIndex, WinUtilResult, WindowHandle, WindowRect, WindowStyles, ZOrder,
};
use futures::future::join_all;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tunables for a [`WindowService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Interval and default deadline of handle polling.
    pub poll: PollPolicy,
    /// How long `send_key_async` holds a key down.
    pub key_press: Duration,
    /// Title of the host application's window. Operations given a null
    /// handle fall back to it; empty disables the fallback.
    pub host_window_title: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            poll: PollPolicy::default(),
            key_press: Duration::from_millis(100),
            host_window_title: String::new(),
        }
    }
}

/// Stateless window-management service.
///
/// Cheap to construct; holds only the injected OS capability and its
/// configuration.
#[derive(Clone)]
pub struct WindowService {
    system: SharedWindowSystem,
    config: ServiceConfig,
}

impl WindowService {
    pub fn new(system: SharedWindowSystem, config: ServiceConfig) -> Self {
        Self { system, config }
    }

    pub fn with_defaults(system: SharedWindowSystem) -> Self {
        Self::new(system, ServiceConfig::default())
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Handle resolution
    // ------------------------------------------------------------------

    /// Look up a window by exact title once.
    pub fn get_window_handle(&self, title: &str) -> WindowHandle {
        report("FindWindow", self.system.find_window(title)).unwrap_or(WindowHandle::NULL)
    }

    /// Poll for a window by title until it appears or `timeout` elapses.
    pub async fn get_window_handle_async(&self, title: &str, timeout: Duration) -> WindowHandle {
        let policy = self.config.poll.with_timeout(timeout);
        let found = poll_until(policy, || match self.system.find_window(title) {
            Ok(handle) => handle.non_null(),
            Err(e) => {
                debug!(title, error = %e, "FindWindow failed while polling");
                None
            }
        })
        .await;

        match found {
            Some(handle) => {
                debug!(title, %handle, "window resolved");
                handle
            }
            None => {
                debug!(title, ?timeout, "window not found before timeout");
                WindowHandle::NULL
            }
        }
    }

    /// Handle of the configured host window, `NULL` if unset or absent.
    pub fn get_host_window(&self) -> WindowHandle {
        if self.config.host_window_title.is_empty() {
            return WindowHandle::NULL;
        }
        self.get_window_handle(&self.config.host_window_title)
    }

    /// Window title, `None` for a missing window or an empty title.
    pub fn get_window_title(&self, handle: WindowHandle) -> Option<String> {
        if handle.is_null() {
            error!("GetWindowText: null window handle");
            return None;
        }
        report("GetWindowText", self.system.window_text(handle))
            .filter(|title| !title.is_empty())
    }

    /// Title of the main window of the first process matching `prefix`.
    pub async fn get_process_window_title_async(&self, prefix: &str) -> Option<String> {
        let handle = self
            .get_window_handle_by_process_name_async(prefix, self.config.poll.timeout)
            .await;
        if handle.is_null() {
            return None;
        }
        self.get_window_title(handle)
    }

    /// Main-window handles of every process named exactly `name`
    /// (case-insensitive). Processes without a window contribute `NULL`.
    pub fn get_window_handles_by_process_name(&self, name: &str) -> Vec<WindowHandle> {
        let Some(processes) = report("EnumProcesses", self.system.processes()) else {
            return Vec::new();
        };

        processes
            .iter()
            .filter(|p| p.name_matches(name))
            .map(|p| self.main_window_of(p.pid).unwrap_or(WindowHandle::NULL))
            .collect()
    }

    /// Concurrently wait for the main windows of all processes whose name
    /// starts with `prefix`, under one shared `timeout`.
    ///
    /// Returns the distinct handles resolved before the deadline, in the
    /// order they were found. Processes that never produce a window are
    /// dropped silently, whether they exited or simply timed out.
    pub async fn get_window_handles_by_process_name_async(
        &self,
        prefix: &str,
        timeout: Duration,
    ) -> Vec<WindowHandle> {
        let Some(processes) = report("EnumProcesses", self.system.processes()) else {
            return Vec::new();
        };
        let matching: Vec<ProcessRecord> = processes
            .into_iter()
            .filter(|p| p.name_starts_with(prefix))
            .collect();

        if matching.is_empty() {
            debug!(prefix, "no matching processes");
            return Vec::new();
        }

        let policy = self.config.poll.with_timeout(timeout);
        let found: Mutex<Vec<WindowHandle>> = Mutex::new(Vec::with_capacity(matching.len()));

        let polls = matching.iter().map(|process| {
            let found = &found;
            async move {
                let resolved = poll_until(policy, || self.main_window_of(process.pid)).await;
                if let Some(handle) = resolved {
                    let mut found = found.lock().unwrap_or_else(PoisonError::into_inner);
                    if !found.contains(&handle) {
                        found.push(handle);
                    }
                }
            }
        });

        if tokio::time::timeout(timeout, join_all(polls)).await.is_err() {
            debug!(prefix, ?timeout, "batch resolution hit the shared timeout");
        }

        let handles = found.into_inner().unwrap_or_else(PoisonError::into_inner);
        debug!(
            prefix,
            processes = matching.len(),
            resolved = handles.len(),
            "batch resolution finished"
        );
        handles
    }

    /// First handle resolved by [`Self::get_window_handles_by_process_name_async`].
    pub async fn get_window_handle_by_process_name_async(
        &self,
        prefix: &str,
        timeout: Duration,
    ) -> WindowHandle {
        self.get_window_handles_by_process_name_async(prefix, timeout)
            .await
            .first()
            .copied()
            .unwrap_or(WindowHandle::NULL)
    }

    /// Main window of a process, `NULL` if the process or window is absent.
    pub fn get_window_handle_by_process_id(&self, pid: u32) -> WindowHandle {
        match report("OpenProcess", self.system.process_by_id(pid)) {
            Some(Some(_)) => report("MainWindow", self.system.main_window(pid))
                .unwrap_or(WindowHandle::NULL),
            Some(None) => {
                error!(pid, "process not found");
                WindowHandle::NULL
            }
            None => WindowHandle::NULL,
        }
    }

    /// Single-element variant of [`Self::get_window_handle_by_process_id`].
    pub fn get_window_handles_by_process_id(&self, pid: u32) -> Vec<WindowHandle> {
        vec![self.get_window_handle_by_process_id(pid)]
    }

    /// Start a program and wait until the OS reports its process.
    pub async fn process_start_async(
        &self,
        launch: &ProcessLaunch,
        timeout: Duration,
    ) -> Option<ProcessRecord> {
        let pid = report("CreateProcess", self.system.spawn_process(launch))?;
        info!(program = %launch.program, pid, "process started");

        let policy = self.config.poll.with_timeout(timeout);
        let record = poll_until(policy, || self.system.process_by_id(pid).ok().flatten()).await;
        if record.is_none() {
            error!(program = %launch.program, pid, "process did not appear before timeout");
        }
        record
    }

    fn main_window_of(&self, pid: u32) -> Option<WindowHandle> {
        match self.system.main_window(pid) {
            Ok(handle) => handle.non_null(),
            Err(e) => {
                debug!(pid, error = %e, "main window lookup failed");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Placement and visibility
    // ------------------------------------------------------------------

    /// Move and resize a window, keeping its z-order.
    pub fn move_and_resize_window(&self, handle: WindowHandle, rect: WindowRect) -> bool {
        if handle.is_null() {
            error!("MoveAndResize: null window handle");
            return false;
        }
        report("SetWindowPos", self.system.set_window_pos(handle, Placement::rect(rect))).is_some()
    }

    pub fn show(&self, handle: WindowHandle) -> bool {
        self.show_window(handle, ShowCommand::Show)
    }

    pub fn hide(&self, handle: WindowHandle) -> bool {
        self.show_window(handle, ShowCommand::Hide)
    }

    fn show_window(&self, handle: WindowHandle, cmd: ShowCommand) -> bool {
        if handle.is_null() {
            error!(?cmd, "ShowWindow: null window handle");
            return false;
        }
        report("ShowWindow", self.system.show_window(handle, cmd)).is_some()
    }

    /// Bring a window to the foreground; `NULL` targets the host window.
    pub fn set_focus(&self, handle: WindowHandle) -> bool {
        let Some(target) = self.target(handle) else {
            return false;
        };
        report("SetForegroundWindow", self.system.set_foreground(target)).is_some()
    }

    // ------------------------------------------------------------------
    // Z-order
    // ------------------------------------------------------------------

    pub fn bottom(&self, handle: WindowHandle) -> bool {
        self.restack(handle, ZOrder::Bottom)
    }

    pub fn top(&self, handle: WindowHandle) -> bool {
        self.restack(handle, ZOrder::Top)
    }

    pub fn no_top_most(&self, handle: WindowHandle) -> bool {
        self.restack(handle, ZOrder::NoTopMost)
    }

    pub fn top_most(&self, handle: WindowHandle) -> bool {
        self.restack(handle, ZOrder::TopMost)
    }

    /// Restack a window; `NULL` targets the host window.
    pub fn restack(&self, handle: WindowHandle, z_order: ZOrder) -> bool {
        let Some(target) = self.target(handle) else {
            return false;
        };
        report(
            "SetWindowPos",
            self.system.set_window_pos(target, Placement::z_order(z_order)),
        )
        .is_some()
    }

    /// Restack the host window by name (`"bottom"`, `"top"`, `"notopmost"`,
    /// `"topmost"`, any case).
    pub fn set_z_order(&self, z_order: &str) -> bool {
        match z_order.parse::<ZOrder>() {
            Ok(z_order) => self.restack(WindowHandle::NULL, z_order),
            Err(e) => {
                warn!(error = %e, "ignoring z-order request");
                false
            }
        }
    }

    // ------------------------------------------------------------------
    // Close
    // ------------------------------------------------------------------

    /// Ask a window to close (WM_CLOSE).
    pub fn close_window(&self, handle: WindowHandle) -> bool {
        if handle.is_null() {
            error!("CloseWindow: null window handle");
            return false;
        }
        report("PostMessage(WM_CLOSE)", self.system.post_close(handle)).is_some()
    }

    // ------------------------------------------------------------------
    // Styles
    // ------------------------------------------------------------------

    pub fn get_window_style(&self, handle: WindowHandle) -> u32 {
        self.read_style(handle, StyleIndex::Style)
    }

    pub fn get_window_ex_style(&self, handle: WindowHandle) -> u32 {
        self.read_style(handle, StyleIndex::ExStyle)
    }

    pub fn set_window_style(&self, handle: WindowHandle, style: u32) -> bool {
        self.write_style(handle, StyleIndex::Style, style)
    }

    pub fn set_window_ex_style(&self, handle: WindowHandle, ex_style: u32) -> bool {
        self.write_style(handle, StyleIndex::ExStyle, ex_style)
    }

    /// Turn a framed window into a borderless popup.
    ///
    /// Returns the styles it had before, for [`Self::restore_window_styles`].
    pub fn set_popup_window(&self, handle: WindowHandle) -> Option<WindowStyles> {
        let original = self.read_styles(handle)?;
        self.apply_styles(handle, style::popup(original))
            .then_some(original)
    }

    /// Give a popup window back its border, caption and sizing frame.
    pub fn cancel_popup_window(&self, handle: WindowHandle) -> bool {
        match self.read_styles(handle) {
            Some(current) => self.apply_styles(handle, style::framed(current)),
            None => false,
        }
    }

    /// Write a saved style pair back verbatim.
    pub fn restore_window_styles(&self, handle: WindowHandle, styles: WindowStyles) -> bool {
        self.apply_styles(handle, styles)
    }

    fn read_style(&self, handle: WindowHandle, index: StyleIndex) -> u32 {
        if handle.is_null() {
            error!(?index, "GetWindowLong: null window handle");
            return 0;
        }
        report("GetWindowLong", self.system.window_long(handle, index)).unwrap_or(0)
    }

    fn write_style(&self, handle: WindowHandle, index: StyleIndex, value: u32) -> bool {
        if handle.is_null() {
            error!(?index, "SetWindowLong: null window handle");
            return false;
        }
        report("SetWindowLong", self.system.set_window_long(handle, index, value)).is_some()
    }

    fn read_styles(&self, handle: WindowHandle) -> Option<WindowStyles> {
        if handle.is_null() {
            error!("GetWindowLong: null window handle");
            return None;
        }
        let style = report("GetWindowLong", self.system.window_long(handle, StyleIndex::Style))?;
        let ex_style =
            report("GetWindowLong", self.system.window_long(handle, StyleIndex::ExStyle))?;
        Some(WindowStyles { style, ex_style })
    }

    fn apply_styles(&self, handle: WindowHandle, styles: WindowStyles) -> bool {
        let applied = self.write_style(handle, StyleIndex::Style, styles.style)
            && self.write_style(handle, StyleIndex::ExStyle, styles.ex_style);
        if applied {
            // frame changes are cached until SWP_FRAMECHANGED
            let _ = report("SetWindowPos(FRAMECHANGED)", self.system.refresh_frame(handle));
            debug!(%handle, style = styles.style, ex_style = styles.ex_style, "styles applied");
        }
        applied
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    pub fn send_key_down(&self, vk: u8) -> bool {
        report("keybd_event", self.system.send_key(vk, KeyDirection::Down)).is_some()
    }

    pub fn send_key_up(&self, vk: u8) -> bool {
        report("keybd_event", self.system.send_key(vk, KeyDirection::Up)).is_some()
    }

    /// Focus a window, then press and release a key.
    ///
    /// The key is sent even if focusing fails; the press is held for
    /// `key_press`. `NULL` targets the host window.
    pub async fn send_key_async(&self, handle: WindowHandle, vk: u8) -> bool {
        if !self.set_focus(handle) {
            warn!(%handle, vk, "could not focus target window, sending key anyway");
        }
        if !self.send_key_down(vk) {
            return false;
        }
        tokio::time::sleep(self.config.key_press).await;
        self.send_key_up(vk)
    }

    /// Resolve `NULL` to the host window.
    fn target(&self, handle: WindowHandle) -> Option<WindowHandle> {
        if !handle.is_null() {
            return Some(handle);
        }
        let host = self.get_host_window();
        if host.is_null() {
            error!(
                host = %self.config.host_window_title,
                "null window handle and no host window to fall back to"
            );
            return None;
        }
        Some(host)
    }
}

/// Log a failed OS call and turn it into `None`.
fn report<T>(op: &'static str, result: WinUtilResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(op, error = %e, "window system call failed");
            None
        }
    }
}
