//! Character grid the tree grows into
//!
//! Row-major, origin at the top-left. Writes outside the grid are dropped
//! silently: branches wander off the edges all the time and that is fine.

use crate::config::BranchType;
use serde::Serialize;

/// Structural role of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Trunk,
    Branch,
    Leaf,
    Base,
    Message,
    #[default]
    Empty,
}

/// A single cell in the grid
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Cell {
    pub glyph: String,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_type: Option<BranchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<(i32, i32)>,
}

static EMPTY: Cell = Cell::empty();

impl Cell {
    pub const fn empty() -> Self {
        Self {
            glyph: String::new(),
            category: Category::Empty,
            branch_type: None,
            direction: None,
        }
    }

    /// Wood or foliage produced by a growing branch
    pub fn grown(glyph: impl Into<String>, branch_type: BranchType, dx: i32, dy: i32) -> Self {
        let category = match branch_type {
            BranchType::Trunk => Category::Trunk,
            BranchType::ShootLeft | BranchType::ShootRight => Category::Branch,
            BranchType::Dying | BranchType::Dead => Category::Leaf,
        };
        Self {
            glyph: glyph.into(),
            category,
            branch_type: Some(branch_type),
            direction: Some((dx, dy)),
        }
    }

    /// Decorative leaf with no branch of its own
    pub fn leaf(glyph: impl Into<String>) -> Self {
        Self::tagged(glyph, Category::Leaf)
    }

    pub fn tagged(glyph: impl Into<String>, category: Category) -> Self {
        Self {
            glyph: glyph.into(),
            category,
            branch_type: None,
            direction: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.category == Category::Empty
    }
}

/// Fixed-size 2D cell buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::empty(); rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.rows && col < self.cols {
            Some(row * self.cols + col)
        } else {
            None
        }
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Cell at position, or the empty sentinel outside the grid
    pub fn get(&self, row: i32, col: i32) -> &Cell {
        match self.index(row, col) {
            Some(i) => &self.cells[i],
            None => &EMPTY,
        }
    }

    /// Overwrite a cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = cell;
        }
    }

    /// Write only into an in-bounds empty cell. Returns whether it wrote.
    pub fn set_if_empty(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) if self.cells[i].is_empty() => {
                self.cells[i] = cell;
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Rows top to bottom
    pub fn row_slices(&self) -> impl Iterator<Item = &[Cell]> {
        // chunks() panics on zero, and a zero-width grid has no visible rows
        self.cells.chunks(self.cols.max(1))
    }

    /// Non-empty cells in row-major order as (row, col, cell)
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(move |(i, cell)| (i / cols, i % cols, cell))
    }

    pub fn count(&self, category: Category) -> usize {
        self.cells.iter().filter(|c| c.category == category).count()
    }

    /// Plain-text rendition, one glyph's first character per column
    pub fn to_plain_string(&self) -> String {
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in self.row_slices() {
            for cell in row {
                out.push(cell.glyph.chars().next().unwrap_or(' '));
            }
            out.push('\n');
        }
        out
    }
}
