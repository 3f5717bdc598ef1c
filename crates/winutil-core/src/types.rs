//! Handle, process and geometry types shared by every layer.

use crate::{WinUtilError, WinUtilResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque OS window handle. Zero means "no window".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(pub usize);

impl WindowHandle {
    /// The "not found" sentinel.
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// `None` for the null handle.
    pub fn non_null(self) -> Option<WindowHandle> {
        (!self.is_null()).then_some(self)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for WindowHandle {
    type Err = std::num::ParseIntError;

    /// Accepts decimal (`65552`) or hex (`0x10010`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let raw = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => usize::from_str_radix(hex, 16)?,
            None => s.parse::<usize>()?,
        };
        Ok(WindowHandle(raw))
    }
}

/// A running process as seen by the OS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Executable base name without extension (e.g. "notepad").
    pub name: String,
    pub pid: u32,
}

impl ProcessRecord {
    pub fn new(name: impl Into<String>, pid: u32) -> Self {
        Self {
            name: name.into(),
            pid,
        }
    }

    /// Case-insensitive prefix match on the process name.
    pub fn name_starts_with(&self, prefix: &str) -> bool {
        self.name
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }

    /// Case-insensitive exact match on the process name.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Window rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl WindowRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Basic and extended style bitmasks of one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowStyles {
    pub style: u32,
    pub ex_style: u32,
}

/// Which style word to read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleIndex {
    Style,
    ExStyle,
}

/// Stacking position for `SetWindowPos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZOrder {
    /// Bottom of the z-order; a topmost window loses its topmost status.
    Bottom,
    /// Top of the z-order.
    Top,
    /// Above all non-topmost windows, behind topmost ones.
    NoTopMost,
    /// Above all non-topmost windows, kept there even when deactivated.
    TopMost,
}

impl FromStr for ZOrder {
    type Err = WinUtilError;

    fn from_str(s: &str) -> WinUtilResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "BOTTOM" => Ok(ZOrder::Bottom),
            "TOP" => Ok(ZOrder::Top),
            "NOTOPMOST" => Ok(ZOrder::NoTopMost),
            "TOPMOST" => Ok(ZOrder::TopMost),
            _ => Err(WinUtilError::InvalidZOrder(s.to_string())),
        }
    }
}

/// Arguments of one `SetWindowPos` call.
///
/// `None` fields are left untouched (`SWP_NOZORDER`, `SWP_NOMOVE | SWP_NOSIZE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    pub z_order: Option<ZOrder>,
    pub rect: Option<WindowRect>,
}

impl Placement {
    /// Move and resize, keeping the current z-order.
    pub fn rect(rect: WindowRect) -> Self {
        Self {
            z_order: None,
            rect: Some(rect),
        }
    }

    /// Restack, keeping position and size.
    pub fn z_order(z_order: ZOrder) -> Self {
        Self {
            z_order: Some(z_order),
            rect: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowCommand {
    Show,
    Hide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDirection {
    Down,
    Up,
}

/// Initial window state of a launched process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchWindow {
    #[default]
    Normal,
    Hidden,
    Minimized,
    Maximized,
}

/// A program to start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessLaunch {
    pub program: String,
    pub args: Vec<String>,
    pub window: LaunchWindow,
}

impl ProcessLaunch {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Default::default()
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_window(mut self, window: LaunchWindow) -> Self {
        self.window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_parse() {
        assert_eq!("65552".parse::<WindowHandle>().unwrap(), WindowHandle(65552));
        assert_eq!("0x10010".parse::<WindowHandle>().unwrap(), WindowHandle(0x10010));
        assert!("zz".parse::<WindowHandle>().is_err());
        assert_eq!(WindowHandle(0x10010).to_string(), "0x10010");
    }

    #[test]
    fn test_null_handle() {
        assert!(WindowHandle::NULL.is_null());
        assert_eq!(WindowHandle::NULL.non_null(), None);
        assert_eq!(WindowHandle(7).non_null(), Some(WindowHandle(7)));
    }

    #[test]
    fn test_zorder_parse_case_insensitive() {
        assert_eq!("topmost".parse::<ZOrder>().unwrap(), ZOrder::TopMost);
        assert_eq!("NoTopMost".parse::<ZOrder>().unwrap(), ZOrder::NoTopMost);
        assert_eq!("BOTTOM".parse::<ZOrder>().unwrap(), ZOrder::Bottom);
        assert!(matches!(
            "sideways".parse::<ZOrder>(),
            Err(WinUtilError::InvalidZOrder(_))
        ));
    }

    #[test]
    fn test_process_name_matching() {
        let p = ProcessRecord::new("NotePad", 42);
        assert!(p.name_starts_with("note"));
        assert!(p.name_starts_with("NOTEPAD"));
        assert!(!p.name_starts_with("pad"));
        assert!(p.name_matches("notepad"));
        assert!(!p.name_matches("note"));
    }
}
