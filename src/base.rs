//! ASCII pots stamped under the trunk

use crate::grid::{Category, Cell, Grid};

const LARGE_POT: &[&str] = &[
    ":__________./~~~~~\\.__________:",
    " \\                           /",
    "  \\________________________ /",
    "  (_)                     (_)",
];

const SMALL_POT: &[&str] = &[
    "(_---_./~~~\\._---_)",
    " (   (      )   ) ",
    "  (___(____)___) ",
    "  (_)        (_)",
];

/// Pot pattern for a base index; 0 and unknown indices have none
pub fn pattern(base: u8) -> &'static [&'static str] {
    match base {
        1 => LARGE_POT,
        2 => SMALL_POT,
        _ => &[],
    }
}

/// Rows the pot occupies
pub fn height(base: u8) -> i32 {
    pattern(base).len() as i32
}

/// Stamp a pot centered on `center_x` with its last line on `bottom_y`.
///
/// Blank pattern positions are left untouched, so stamping twice leaves the
/// grid exactly as stamping once.
pub fn stamp(grid: &mut Grid, base: u8, center_x: i32, bottom_y: i32) {
    let lines = pattern(base);
    let Some(first) = lines.first() else {
        return;
    };

    let width = first.chars().count() as i32;
    let start_x = (center_x - width / 2).max(0);
    let top_y = bottom_y - lines.len() as i32 + 1;

    for (i, line) in lines.iter().enumerate() {
        let y = top_y + i as i32;
        for (j, ch) in line.chars().enumerate() {
            if ch != ' ' {
                grid.set(y, start_x + j as i32, Cell::tagged(ch.to_string(), Category::Base));
            }
        }
    }
}
