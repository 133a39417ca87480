//! Turning a grid into styled terminal text
//!
//! Multi-character glyphs start at their own column and spill to the right,
//! but only over columns that have nothing of their own.

use crate::config::BranchType;
use crate::error::BonsaiError;
use crate::grid::{Category, Cell, Grid};
use crate::growth::GrowthStats;
use crate::palette::Palette;
use crate::session::Tree;
use crossterm::style::Color;
use serde::Serialize;
use std::io::Write;

/// Foreground color and weight for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
}

/// Display style for a cell, from its tags alone
pub fn style_for(cell: &Cell, palette: &Palette) -> Option<Style> {
    let style = match cell.category {
        Category::Empty => return None,
        Category::Trunk => Style {
            fg: palette.trunk,
            bold: cell.direction.is_some_and(|(_, dy)| dy < 0),
        },
        Category::Branch => Style {
            fg: palette.branch,
            bold: false,
        },
        Category::Leaf => Style {
            fg: palette.leaf,
            bold: cell.branch_type == Some(BranchType::Dead),
        },
        Category::Base => {
            let fg = match cell.glyph.as_str() {
                "." | "~" => palette.grass,
                "_" => palette.dirt,
                _ => palette.base,
            };
            Style { fg, bold: false }
        }
        Category::Message => Style {
            fg: palette.message,
            bold: true,
        },
    };
    Some(style)
}

/// Drop anything that would be interpreted by the terminal
pub fn escape_glyph(glyph: &str) -> impl Iterator<Item = char> + '_ {
    glyph.chars().filter(|c| !c.is_control())
}

/// One screen row: a character and optional style per column
pub fn compose_row(grid: &Grid, row: usize, palette: &Palette) -> Vec<(char, Option<Style>)> {
    let cells = grid.row(row);
    let mut out = vec![(' ', None); cells.len()];

    for (col, cell) in cells.iter().enumerate() {
        let Some(style) = style_for(cell, palette) else {
            continue;
        };
        for (offset, ch) in escape_glyph(&cell.glyph).enumerate() {
            let target = col + offset;
            if target >= cells.len() {
                break;
            }
            // spill stops at the next occupied column
            if offset > 0 && !cells[target].is_empty() {
                break;
            }
            out[target] = (ch, Some(style));
        }
    }

    out
}

/// Write the whole grid with ANSI colors (print mode)
pub fn write_ansi<W: Write>(out: &mut W, grid: &Grid, palette: &Palette) -> Result<(), BonsaiError> {
    for row in 0..grid.rows() {
        let line = compose_row(grid, row, palette);
        let end = line.iter().rposition(|(ch, _)| *ch != ' ').map_or(0, |i| i + 1);
        for (ch, style) in &line[..end] {
            match style {
                Some(style) => {
                    if style.bold {
                        write!(out, "\x1b[1m")?;
                    }
                    write!(out, "{}{}\x1b[0m", ansi_fg(style.fg), ch)?;
                }
                None => write!(out, "{}", ch)?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn ansi_fg(color: Color) -> String {
    match color {
        Color::Rgb { r, g, b } => format!("\x1b[38;2;{};{};{}m", r, g, b),
        Color::AnsiValue(v) => format!("\x1b[38;5;{}m", v),
        Color::Black => "\x1b[30m".to_string(),
        Color::DarkRed => "\x1b[31m".to_string(),
        Color::DarkGreen => "\x1b[32m".to_string(),
        Color::DarkYellow => "\x1b[33m".to_string(),
        Color::DarkBlue => "\x1b[34m".to_string(),
        Color::DarkMagenta => "\x1b[35m".to_string(),
        Color::DarkCyan => "\x1b[36m".to_string(),
        Color::Grey => "\x1b[37m".to_string(),
        Color::DarkGrey => "\x1b[90m".to_string(),
        Color::Red => "\x1b[91m".to_string(),
        Color::Green => "\x1b[92m".to_string(),
        Color::Yellow => "\x1b[93m".to_string(),
        Color::Blue => "\x1b[94m".to_string(),
        Color::Magenta => "\x1b[95m".to_string(),
        Color::Cyan => "\x1b[96m".to_string(),
        Color::White => "\x1b[97m".to_string(),
        _ => String::new(),
    }
}

#[derive(Serialize)]
struct TreeDocument<'a> {
    seed: u32,
    palette: &'a str,
    stats: GrowthStats,
    rows: usize,
    cols: usize,
    grid: Vec<&'a [Cell]>,
}

/// Serialize a tree for an external renderer
pub fn write_json<W: Write>(out: &mut W, tree: &Tree, palette: &Palette) -> Result<(), BonsaiError> {
    let document = TreeDocument {
        seed: tree.seed,
        palette: palette.name,
        stats: tree.stats,
        rows: tree.grid.rows(),
        cols: tree.grid.cols(),
        grid: tree.grid.row_slices().collect(),
    };
    serde_json::to_writer(&mut *out, &document)?;
    writeln!(out)?;
    Ok(())
}
