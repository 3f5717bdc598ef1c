//! Command-line surface.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;
use winutil_core::config::WinUtilConfig;
use winutil_core::installer;
use winutil_core::{
    parse_key, LaunchWindow, ProcessLaunch, WindowHandle, WindowRect, WindowService, ZOrder,
};

#[derive(Parser, Debug)]
#[command(name = "winutil")]
#[command(about = "Find, move, restack and restyle top-level windows")]
pub struct Cli {
    /// Config file (defaults to <config dir>/winutil/config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find a window by exact title
    Find {
        title: String,
        /// Keep polling up to this many milliseconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Print a window's title
    Title { handle: WindowHandle },
    /// Main windows of processes whose name starts with NAME
    ProcessWindows {
        name: String,
        #[arg(long)]
        timeout: Option<u64>,
        /// Exact name match, no waiting; processes without a window print 0x0
        #[arg(long)]
        exact: bool,
    },
    /// Title of the first window of processes matching NAME
    ProcessTitle { name: String },
    /// Main window of a process id
    PidWindow { pid: u32 },
    /// Move and resize a window
    Move {
        handle: WindowHandle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    Show { handle: WindowHandle },
    Hide { handle: WindowHandle },
    /// Bring a window (default: host window) to the foreground
    Focus { handle: Option<WindowHandle> },
    /// Restack a window (default: host window)
    Zorder {
        #[arg(value_enum)]
        position: Position,
        handle: Option<WindowHandle>,
    },
    /// Post WM_CLOSE to a window
    Close { handle: WindowHandle },
    /// Make a window borderless; prints the original styles
    Popup { handle: WindowHandle },
    /// Undo `popup`, or restore exact styles with --style/--ex-style
    Unpopup {
        handle: WindowHandle,
        #[arg(long, requires = "ex_style", value_parser = parse_u32)]
        style: Option<u32>,
        #[arg(long, requires = "style", value_parser = parse_u32)]
        ex_style: Option<u32>,
    },
    /// Print a window's style and extended style
    Style { handle: WindowHandle },
    /// Focus a window (default: host window) and tap a key
    Key {
        key: String,
        #[arg(long)]
        handle: Option<WindowHandle>,
    },
    /// Start a program and wait for its process
    Start {
        program: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
        #[arg(long, value_enum, default_value_t = WindowMode::Normal)]
        window: WindowMode,
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Add required packages to a manifest and enable the feature flag
    Install {
        manifest: PathBuf,
        /// Current define symbols (`;`-separated)
        #[arg(long, default_value = "")]
        defines: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Bottom,
    Top,
    Notopmost,
    Topmost,
}

impl From<Position> for ZOrder {
    fn from(position: Position) -> Self {
        match position {
            Position::Bottom => ZOrder::Bottom,
            Position::Top => ZOrder::Top,
            Position::Notopmost => ZOrder::NoTopMost,
            Position::Topmost => ZOrder::TopMost,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowMode {
    Normal,
    Hidden,
    Minimized,
    Maximized,
}

impl From<WindowMode> for LaunchWindow {
    fn from(mode: WindowMode) -> Self {
        match mode {
            WindowMode::Normal => LaunchWindow::Normal,
            WindowMode::Hidden => LaunchWindow::Hidden,
            WindowMode::Minimized => LaunchWindow::Minimized,
            WindowMode::Maximized => LaunchWindow::Maximized,
        }
    }
}

fn parse_u32(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    };
    parsed.map_err(|e| format!("invalid style value {s:?}: {e}"))
}

fn ensure(ok: bool, what: &str) -> anyhow::Result<()> {
    if !ok {
        bail!("{what} failed");
    }
    Ok(())
}

fn print_handle(handle: WindowHandle) -> anyhow::Result<()> {
    println!("{handle}");
    if handle.is_null() {
        bail!("window not found");
    }
    Ok(())
}

pub async fn run(
    command: Command,
    service: &WindowService,
    config: &WinUtilConfig,
) -> anyhow::Result<()> {
    let timeout = |ms: Option<u64>| {
        ms.map(Duration::from_millis)
            .unwrap_or(service.config().poll.timeout)
    };
    let or_host = |handle: Option<WindowHandle>| handle.unwrap_or(WindowHandle::NULL);

    match command {
        Command::Find { title, timeout: ms } => {
            let handle = match ms {
                Some(_) => service.get_window_handle_async(&title, timeout(ms)).await,
                None => service.get_window_handle(&title),
            };
            print_handle(handle)
        }
        Command::Title { handle } => match service.get_window_title(handle) {
            Some(title) => {
                println!("{title}");
                Ok(())
            }
            None => bail!("no title for window {handle}"),
        },
        Command::ProcessWindows {
            name,
            timeout: ms,
            exact,
        } => {
            let handles = if exact {
                service.get_window_handles_by_process_name(&name)
            } else {
                service
                    .get_window_handles_by_process_name_async(&name, timeout(ms))
                    .await
            };
            for handle in &handles {
                println!("{handle}");
            }
            if handles.is_empty() {
                bail!("no windows for processes matching {name:?}");
            }
            Ok(())
        }
        Command::ProcessTitle { name } => match service.get_process_window_title_async(&name).await
        {
            Some(title) => {
                println!("{title}");
                Ok(())
            }
            None => bail!("no window title for processes matching {name:?}"),
        },
        Command::PidWindow { pid } => print_handle(service.get_window_handle_by_process_id(pid)),
        Command::Move {
            handle,
            x,
            y,
            width,
            height,
        } => ensure(
            service.move_and_resize_window(handle, WindowRect::new(x, y, width, height)),
            "move",
        ),
        Command::Show { handle } => ensure(service.show(handle), "show"),
        Command::Hide { handle } => ensure(service.hide(handle), "hide"),
        Command::Focus { handle } => ensure(service.set_focus(or_host(handle)), "focus"),
        Command::Zorder { position, handle } => ensure(
            service.restack(or_host(handle), position.into()),
            "z-order change",
        ),
        Command::Close { handle } => ensure(service.close_window(handle), "close"),
        Command::Popup { handle } => match service.set_popup_window(handle) {
            Some(original) => {
                println!("style={:#010x} ex_style={:#010x}", original.style, original.ex_style);
                Ok(())
            }
            None => bail!("popup failed"),
        },
        Command::Unpopup {
            handle,
            style,
            ex_style,
        } => match style.zip(ex_style) {
            Some((style, ex_style)) => ensure(
                service.restore_window_styles(
                    handle,
                    winutil_core::WindowStyles { style, ex_style },
                ),
                "style restore",
            ),
            None => ensure(service.cancel_popup_window(handle), "unpopup"),
        },
        Command::Style { handle } => {
            let style = service.get_window_style(handle);
            let ex_style = service.get_window_ex_style(handle);
            println!("style={style:#010x} ex_style={ex_style:#010x}");
            ensure(style != 0 || ex_style != 0, "style query")
        }
        Command::Key { key, handle } => {
            let vk = parse_key(&key).with_context(|| format!("cannot send {key:?}"))?;
            ensure(service.send_key_async(or_host(handle), vk).await, "key")
        }
        Command::Start {
            program,
            args,
            window,
            timeout: ms,
        } => {
            let launch = ProcessLaunch::new(program)
                .with_args(args)
                .with_window(window.into());
            match service.process_start_async(&launch, timeout(ms)).await {
                Some(record) => {
                    println!("{} {}", record.pid, record.name);
                    Ok(())
                }
                None => bail!("failed to start {}", launch.program),
            }
        }
        Command::Install { manifest, defines } => {
            let report = installer::install(
                &manifest,
                &config.installer.packages,
                &defines,
                &config.installer.feature_flag,
            )
            .with_context(|| format!("failed to update {}", manifest.display()))?;

            for package in &report.added_packages {
                println!("added {package}");
            }
            println!("defines={}", report.defines);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_handles() {
        let cli = Cli::try_parse_from(["winutil", "move", "0x1F00", "10", "20", "800", "600"])
            .unwrap();
        match cli.command {
            Command::Move {
                handle,
                x,
                width,
                ..
            } => {
                assert_eq!(handle, WindowHandle(0x1F00));
                assert_eq!(x, 10);
                assert_eq!(width, 800);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_zorder_defaults_to_host() {
        let cli = Cli::try_parse_from(["winutil", "zorder", "topmost"]).unwrap();
        match cli.command {
            Command::Zorder { position, handle } => {
                assert_eq!(ZOrder::from(position), ZOrder::TopMost);
                assert_eq!(handle, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(Cli::try_parse_from(["winutil", "zorder", "sideways"]).is_err());
    }

    #[test]
    fn test_cli_unpopup_requires_both_styles() {
        assert!(Cli::try_parse_from(["winutil", "unpopup", "1", "--style", "0x10"]).is_err());
        let cli = Cli::try_parse_from([
            "winutil",
            "unpopup",
            "1",
            "--style",
            "0x00CF0000",
            "--ex-style",
            "512",
        ])
        .unwrap();
        match cli.command {
            Command::Unpopup {
                style, ex_style, ..
            } => {
                assert_eq!(style, Some(0x00CF_0000));
                assert_eq!(ex_style, Some(512));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "winutil",
            "find",
            "Notepad",
            "--timeout",
            "2500",
            "-v",
            "--config",
            "winutil.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("winutil.yaml")));
        match cli.command {
            Command::Find { title, timeout } => {
                assert_eq!(title, "Notepad");
                assert_eq!(timeout, Some(2500));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_start_passes_hyphenated_args() {
        let cli =
            Cli::try_parse_from(["winutil", "start", "viewer.exe", "--fullscreen", "-w", "800"])
                .unwrap();
        match cli.command {
            Command::Start {
                program,
                args,
                window,
                ..
            } => {
                assert_eq!(program, "viewer.exe");
                assert_eq!(args, vec!["--fullscreen", "-w", "800"]);
                assert_eq!(window, WindowMode::Normal);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_start_passes_args() {
        let cli = Cli::try_parse_from([
            "winutil", "start", "--window", "hidden", "viewer.exe", "a", "b",
        ])
        .unwrap();
        match cli.command {
            Command::Start {
                program,
                args,
                window,
                ..
            } => {
                assert_eq!(program, "viewer.exe");
                assert_eq!(args, vec!["a", "b"]);
                assert_eq!(LaunchWindow::from(window), LaunchWindow::Hidden);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
