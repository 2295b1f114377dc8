//! Background color parsing: hex (#RGB, #RGBA, #RRGGBB, #RRGGBBAA) and a few names.

use crate::plan::CanvasColor;

/// Parse a color string into a [`CanvasColor`].
///
/// Accepts:
/// - `#RGB` / `RGB` - 3-digit hex, alpha = 0xFF
/// - `#RGBA` / `RGBA` - 4-digit hex
/// - `#RRGGBB` / `RRGGBB` - 6-digit hex, alpha = 0xFF
/// - `#RRGGBBAA` / `RRGGBBAA` - 8-digit hex
/// - `white`, `black`, `transparent` (case-insensitive)
pub fn parse_color(s: &str) -> Option<CanvasColor> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if let Some(c) = parse_hex(hex) {
        return Some(c);
    }

    if s.eq_ignore_ascii_case("white") {
        Some(CanvasColor::WHITE)
    } else if s.eq_ignore_ascii_case("black") {
        Some(CanvasColor::BLACK)
    } else if s.eq_ignore_ascii_case("transparent") {
        Some(CanvasColor::TRANSPARENT)
    } else {
        None
    }
}

fn parse_hex(hex: &str) -> Option<CanvasColor> {
    let b = hex.as_bytes();
    if !b.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }

    match b.len() {
        3 | 4 => {
            let a = if b.len() == 4 { expand_nibble(b[3])? } else { 255 };
            Some(CanvasColor::rgba(
                expand_nibble(b[0])?,
                expand_nibble(b[1])?,
                expand_nibble(b[2])?,
                a,
            ))
        }
        6 | 8 => {
            let a = if b.len() == 8 { byte_at(b, 6)? } else { 255 };
            Some(CanvasColor::rgba(
                byte_at(b, 0)?,
                byte_at(b, 2)?,
                byte_at(b, 4)?,
                a,
            ))
        }
        _ => None,
    }
}

/// Expand a single hex nibble: 'f' → 0xFF, 'a' → 0xAA.
fn expand_nibble(ch: u8) -> Option<u8> {
    let n = hex_val(ch)?;
    Some(n << 4 | n)
}

fn byte_at(b: &[u8], i: usize) -> Option<u8> {
    Some(hex_val(b[i])? << 4 | hex_val(b[i + 1])?)
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}
