//! Window style bit math.
//!
//! Values are the Win32 `WS_*` / `WS_EX_*` constants; they are defined here
//! so the transforms stay testable without the OS headers.

use crate::WindowStyles;

pub const WS_BORDER: u32 = 0x0080_0000;
pub const WS_CAPTION: u32 = 0x00C0_0000;
pub const WS_THICKFRAME: u32 = 0x0004_0000;
pub const WS_POPUP: u32 = 0x8000_0000;
pub const WS_OVERLAPPEDWINDOW: u32 = 0x00CF_0000;

pub const WS_EX_CLIENTEDGE: u32 = 0x0000_0200;

/// Decoration bits removed by the popup transform.
pub const FRAME_BITS: u32 = WS_BORDER | WS_CAPTION | WS_THICKFRAME;

/// Strip border, caption and sizing frame; mark as popup.
pub fn popup(styles: WindowStyles) -> WindowStyles {
    WindowStyles {
        style: (styles.style & !FRAME_BITS) | WS_POPUP,
        ex_style: styles.ex_style & !WS_EX_CLIENTEDGE,
    }
}

/// Inverse of [`popup`] for a window that was framed to begin with.
pub fn framed(styles: WindowStyles) -> WindowStyles {
    WindowStyles {
        style: (styles.style | FRAME_BITS) & !WS_POPUP,
        ex_style: styles.ex_style | WS_EX_CLIENTEDGE,
    }
}
