//! Wood glyphs keyed by branch family and step direction

use crate::config::BranchType;

/// Glyphs for one branch family
struct GlyphSet {
    down: Option<&'static str>,
    horizontal: &'static str,
    left_diagonal: &'static str,
    vertical: &'static str,
    right_diagonal: &'static str,
}

const TRUNK: GlyphSet = GlyphSet {
    down: None,
    horizontal: "/~",
    left_diagonal: "//|",
    vertical: "/|//",
    right_diagonal: "|/",
};

const SHOOT_LEFT: GlyphSet = GlyphSet {
    down: Some("//"),
    horizontal: "//_",
    left_diagonal: "//|",
    vertical: "/|",
    right_diagonal: "/",
};

const SHOOT_RIGHT: GlyphSet = GlyphSet {
    down: Some("/"),
    horizontal: "_/",
    left_diagonal: "//|",
    vertical: "/|",
    right_diagonal: "/",
};

/// Wood glyph for a structural branch step, `None` for foliage types.
///
/// Trunks have no down glyph; a descending trunk step picks a diagonal or
/// vertical glyph by `dx` like a climbing one.
pub fn wood(branch_type: BranchType, dx: i32, dy: i32) -> Option<&'static str> {
    let set = match branch_type {
        BranchType::Trunk => &TRUNK,
        BranchType::ShootLeft => &SHOOT_LEFT,
        BranchType::ShootRight => &SHOOT_RIGHT,
        BranchType::Dying | BranchType::Dead => return None,
    };

    let glyph = match set.down {
        Some(down) if dy > 0 => down,
        _ if dy == 0 => set.horizontal,
        _ if dx < 0 => set.left_diagonal,
        _ if dx == 0 => set.vertical,
        _ => set.right_diagonal,
    };
    Some(glyph)
}
