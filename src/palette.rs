//! Named color palettes for rendering
//!
//! Only the renderer looks at these; growth never depends on color.

use crossterm::style::Color;

/// Color set for one palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub trunk: Color,
    pub branch: Color,
    pub leaf: Color,
    pub grass: Color,
    pub base: Color,
    pub dirt: Color,
    pub message: Color,
}

pub const NAMES: &[&str] = &["default", "cherry", "wisteria", "maple"];

/// Helper to create RGB colors
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

const WOOD: Color = rgb(0x97, 0x6c, 0x3c);
const GREEN: Color = rgb(0x4e, 0x9a, 0x06);

const fn with_leaves(name: &'static str, leaf: Color, grass: Color) -> Palette {
    Palette {
        name,
        trunk: WOOD,
        branch: WOOD,
        leaf,
        grass,
        base: rgb(0x8a, 0x8a, 0x8a),
        dirt: rgb(0x6d, 0x33, 0x00),
        message: rgb(0xcc, 0xcc, 0xcc),
    }
}

impl Palette {
    /// Case-insensitive lookup
    pub fn by_name(name: &str) -> Option<Palette> {
        let palette = match name.to_ascii_lowercase().as_str() {
            "default" => with_leaves("default", GREEN, GREEN),
            "cherry" => with_leaves("cherry", rgb(0xff, 0x80, 0xab), GREEN),
            "wisteria" => with_leaves("wisteria", rgb(0x95, 0x75, 0xcd), rgb(0xa5, 0xd6, 0xa7)),
            "maple" => with_leaves("maple", rgb(0xe5, 0x39, 0x35), GREEN),
            _ => return None,
        };
        Some(palette)
    }

    /// Lookup falling back to the default palette
    pub fn named_or_default(name: &str) -> Palette {
        Self::by_name(name).unwrap_or_default()
    }
}

impl Default for Palette {
    fn default() -> Self {
        with_leaves("default", GREEN, GREEN)
    }
}
