//! Key name parsing into Win32 virtual-key codes.

use crate::{WinUtilError, WinUtilResult};
use tracing::debug;

/// Parse a key string into a virtual-key code.
///
/// Accepts single letters and digits, common key names (case-insensitive),
/// `f1`..`f24`, and raw codes written as decimal or `0x` hex.
pub fn parse_key(key: &str) -> WinUtilResult<u8> {
    let key = key.trim();
    if key.is_empty() {
        return Err(WinUtilError::InvalidKey(key.to_string()));
    }

    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return single_char(c).ok_or_else(|| WinUtilError::InvalidKey(key.to_string()));
    }

    let key_lower = key.to_lowercase();

    if let Some(hex) = key_lower.strip_prefix("0x") {
        return u8::from_str_radix(hex, 16).map_err(|_| WinUtilError::InvalidKey(key.to_string()));
    }
    if key_lower.chars().all(|c| c.is_ascii_digit()) {
        return key_lower
            .parse::<u8>()
            .map_err(|_| WinUtilError::InvalidKey(key.to_string()));
    }

    if let Some(n) = key_lower
        .strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
    {
        if (1..=24).contains(&n) {
            return Ok(0x70 + n - 1);
        }
    }

    let vk = match key_lower.as_str() {
        // Modifiers
        "shift" => 0x10,
        "lshift" => 0xA0,
        "rshift" => 0xA1,
        "control" | "ctrl" => 0x11,
        "lctrl" | "lcontrol" => 0xA2,
        "rctrl" | "rcontrol" => 0xA3,
        "alt" | "menu" => 0x12,
        "lalt" => 0xA4,
        "ralt" => 0xA5,
        "win" | "lwin" | "meta" | "super" => 0x5B,
        "rwin" => 0x5C,

        // Navigation
        "up" | "uparrow" => 0x26,
        "down" | "downarrow" => 0x28,
        "left" | "leftarrow" => 0x25,
        "right" | "rightarrow" => 0x27,
        "home" => 0x24,
        "end" => 0x23,
        "pageup" | "pgup" => 0x21,
        "pagedown" | "pgdn" => 0x22,

        // Editing
        "backspace" | "back" => 0x08,
        "delete" | "del" => 0x2E,
        "insert" | "ins" => 0x2D,
        "enter" | "return" => 0x0D,
        "tab" => 0x09,
        "escape" | "esc" => 0x1B,
        "space" => 0x20,

        // Misc
        "capslock" | "caps" => 0x14,
        "printscreen" | "prtsc" => 0x2C,
        "scrolllock" => 0x91,
        "pause" => 0x13,
        "numlock" => 0x90,

        _ => return Err(WinUtilError::InvalidKey(key.to_string())),
    };

    debug!(key, vk, "parsed key name");
    Ok(vk)
}

fn single_char(c: char) -> Option<u8> {
    match c {
        'a'..='z' => Some(c.to_ascii_uppercase() as u8),
        'A'..='Z' | '0'..='9' => Some(c as u8),
        ' ' => Some(0x20),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_single_char() {
        assert_eq!(parse_key("a").unwrap(), b'A');
        assert_eq!(parse_key("Z").unwrap(), b'Z');
        assert_eq!(parse_key("7").unwrap(), b'7');
    }

    #[test]
    fn test_parse_key_named() {
        assert_eq!(parse_key("Space").unwrap(), 0x20);
        assert_eq!(parse_key("ENTER").unwrap(), 0x0D);
        assert_eq!(parse_key("ctrl").unwrap(), 0x11);
        assert_eq!(parse_key("esc").unwrap(), 0x1B);
    }

    #[test]
    fn test_parse_key_function() {
        assert_eq!(parse_key("F1").unwrap(), 0x70);
        assert_eq!(parse_key("f12").unwrap(), 0x7B);
        assert!(parse_key("f25").is_err());
    }

    #[test]
    fn test_parse_key_numeric() {
        assert_eq!(parse_key("0x1B").unwrap(), 0x1B);
        assert_eq!(parse_key("13").unwrap(), 13);
        assert!(parse_key("300").is_err());
    }

    #[test]
    fn test_parse_key_unknown() {
        assert!(matches!(
            parse_key("hyper"),
            Err(WinUtilError::InvalidKey(_))
        ));
        assert!(parse_key("").is_err());
        assert!(parse_key("é").is_err());
    }
}
