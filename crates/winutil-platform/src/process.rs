//! Process enumeration and launch.

use std::process::Command;
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::debug;
use winutil_core::{LaunchWindow, ProcessLaunch, ProcessRecord, WinUtilError, WinUtilResult};

/// Executable base name without directory or `.exe` extension.
pub fn process_base_name(name: &str) -> &str {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.len().checked_sub(4) {
        Some(cut) if base.is_char_boundary(cut) && base[cut..].eq_ignore_ascii_case(".exe") => {
            &base[..cut]
        }
        _ => base,
    }
}

/// Snapshot of all running processes.
pub fn list_processes() -> Vec<ProcessRecord> {
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::All, true);

    let processes: Vec<ProcessRecord> = system
        .processes()
        .iter()
        .map(|(pid, process)| {
            let name = process.name().to_string_lossy();
            ProcessRecord::new(process_base_name(&name), pid.as_u32())
        })
        .collect();

    debug!(count = processes.len(), "enumerated processes");
    processes
}

/// Look up a single running process.
pub fn find_process(pid: u32) -> Option<ProcessRecord> {
    let mut system = System::new();
    let pid_obj = Pid::from_u32(pid);
    system.refresh_processes(ProcessesToUpdate::Some(&[pid_obj]), true);
    system.process(pid_obj).map(|process| {
        let name = process.name().to_string_lossy();
        ProcessRecord::new(process_base_name(&name), pid)
    })
}

/// Start a program, returning its pid.
///
/// `Hidden` suppresses the console window on Windows; other window states
/// are left to the program.
pub fn launch(request: &ProcessLaunch) -> WinUtilResult<u32> {
    if request.program.is_empty() {
        return Err(WinUtilError::NotFound("empty program path".into()));
    }

    let mut command = Command::new(&request.program);
    command.args(&request.args);

    #[cfg(windows)]
    if request.window == LaunchWindow::Hidden {
        use std::os::windows::process::CommandExt;
        use windows_sys::Win32::System::Threading::CREATE_NO_WINDOW;
        command.creation_flags(CREATE_NO_WINDOW);
    }

    if matches!(request.window, LaunchWindow::Minimized | LaunchWindow::Maximized) {
        debug!(window = ?request.window, "initial window state not applied");
    }

    let mut child = command.spawn()?;
    let pid = child.id();
    // detached; reaped in the background
    std::thread::spawn(move || {
        let _ = child.wait();
    });
    debug!(program = %request.program, pid, "spawned process");
    Ok(pid)
}
