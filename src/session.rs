//! One generation pass: seed in, finished grid out

use crate::base;
use crate::config::{BonsaiConfig, BranchType};
use crate::error::BonsaiError;
use crate::grid::{Category, Cell, Grid};
use crate::growth::{self, Branch, GrowthState, GrowthStats};
use crate::random::SeededRandom;
use log::{debug, info};

/// Size of the drawing area in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub rows: usize,
    pub cols: usize,
}

impl Viewport {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    fn validate(self) -> Result<Self, BonsaiError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(BonsaiError::InvalidViewport {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self)
    }
}

/// A finished tree ready for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub seed: u32,
    pub grid: Grid,
    pub stats: GrowthStats,
}

/// Owns configuration and seed for repeated tree generation
#[derive(Debug, Clone)]
pub struct TreeSession {
    config: BonsaiConfig,
    viewport: Viewport,
    seed: u32,
}

impl TreeSession {
    /// Build a session. A missing seed is drawn from OS entropy and logged so
    /// the tree can be reproduced.
    pub fn new(config: BonsaiConfig, viewport: Viewport) -> Result<Self, BonsaiError> {
        let viewport = viewport.validate()?;
        let config = config.sanitized();
        let seed = resolve_seed(config.seed);
        Ok(Self {
            config,
            viewport,
            seed,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &BonsaiConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Switch to another seed, drawing a fresh one when `None`
    pub fn reseed(&mut self, seed: Option<u32>) -> u32 {
        self.seed = resolve_seed(seed);
        self.seed
    }

    /// Grow a complete tree. Same session, same tree.
    pub fn generate(&self) -> Tree {
        let Viewport { rows, cols } = self.viewport;
        let mut rng = SeededRandom::new(self.seed);
        let mut grid = Grid::new(rows, cols);
        let mut state = GrowthState::new(&self.config);
        // Random starting side so the first shoot isn't always on the right
        state.counters.shoot_counter = rng.roll(100);

        let start_x = cols as i32 / 2;
        let start_y = rows as i32 - 1;

        if self.config.base > 0 {
            base::stamp(&mut grid, self.config.base, start_x, start_y);
        }

        let trunk_y = start_y - base::height(self.config.base);
        growth::grow_branch(
            &mut grid,
            &mut rng,
            &mut state,
            Branch::new(start_x, trunk_y, (0, -1), BranchType::Trunk, self.config.life),
        );

        if let Some(message) = &self.config.message {
            stamp_message(&mut grid, message);
        }

        let stats = state.stats();
        debug!(
            "seed {}: {} branches, {} shoots, {} steps",
            self.seed, stats.branches, stats.shoots, stats.steps
        );

        Tree {
            seed: self.seed,
            grid,
            stats,
        }
    }
}

fn resolve_seed(seed: Option<u32>) -> u32 {
    match seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u32>();
            info!("using random seed {}", seed);
            seed
        }
    }
}

/// Stamp a message a third of the way in, halfway down. Words that would
/// run past the right edge start a new row; a word longer than the row is
/// clipped. Separating spaces blank whatever grew underneath.
pub fn stamp_message(grid: &mut Grid, message: &str) {
    let top = grid.rows() as i32 / 2;
    let left = grid.cols() as i32 / 3;
    let width = (grid.cols() as i32 - left).max(1);

    let (mut row, mut col) = (top, 0);
    for word in message.split_whitespace() {
        let len = word.chars().count() as i32;
        if col > 0 && col + 1 + len > width {
            row += 1;
            col = 0;
        } else if col > 0 {
            grid.set(row, left + col, Cell::empty());
            col += 1;
        }
        for ch in word.chars() {
            grid.set(row, left + col, Cell::tagged(ch.to_string(), Category::Message));
            col += 1;
        }
    }
}
