//! Recursive branch growth
//!
//! Every branch walks a step at a time until its life runs out, drawing its
//! direction from a per-type dice table and spawning children along the way.
//! Children are grown to completion before the parent takes its next step, so
//! the random draws happen in a fixed order and a seed always yields the same
//! tree.

use crate::config::{BonsaiConfig, BranchType, GrowthTuning};
use crate::glyphs;
use crate::grid::{Cell, Grid};
use crate::random::SeededRandom;
use log::{debug, trace};
use serde::Serialize;

/// Nesting beyond this stops spawning children
const MAX_DEPTH: usize = 1024;
/// Hard ceiling on growth steps for a whole tree. Sibling trunks may outlive
/// their parent, so large life with a small multiplier can otherwise branch
/// without practical bound.
pub const MAX_STEPS: u64 = 1 << 20;
/// Tries per leaf cluster before giving up
const LEAF_ATTEMPTS: usize = 6;
const LEAF_ABOVE_CHANCE: f64 = 0.6;
const SECONDARY_LEAF_CHANCE: f64 = 0.5;
const TERTIARY_LEAF_CHANCE: f64 = 0.3;

/// A branch about to grow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub x: i32,
    pub y: i32,
    /// Direction the branch was spawned heading in
    pub heading: (i32, i32),
    pub branch_type: BranchType,
    pub life: i32,
}

impl Branch {
    pub fn new(x: i32, y: i32, heading: (i32, i32), branch_type: BranchType, life: i32) -> Self {
        Self {
            x,
            y,
            heading,
            branch_type,
            life,
        }
    }
}

/// Counters for tracking generation progress
#[derive(Debug, Default, Clone, Copy)]
pub struct Counters {
    pub branches: u32,
    pub shoots: u32,
    /// Alternates shoot sides; starts at a random offset
    pub shoot_counter: i32,
    pub steps: u64,
}

/// Summary handed to renderers once growth is finished
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GrowthStats {
    pub branches: u32,
    pub shoots: u32,
    pub steps: u64,
}

/// Options and counters threaded through the recursion
#[derive(Debug, Clone)]
pub struct GrowthState {
    pub initial_life: i32,
    pub multiplier: i32,
    pub leaves: Vec<String>,
    pub tuning: GrowthTuning,
    pub counters: Counters,
    depth: usize,
}

impl GrowthState {
    pub fn new(config: &BonsaiConfig) -> Self {
        Self {
            initial_life: config.life,
            multiplier: config.multiplier,
            leaves: config.leaves.clone(),
            tuning: config.tuning,
            counters: Counters::default(),
            depth: 0,
        }
    }

    pub fn stats(&self) -> GrowthStats {
        GrowthStats {
            branches: self.counters.branches,
            shoots: self.counters.shoots,
            steps: self.counters.steps,
        }
    }
}

/// Grow one branch, and recursively everything it spawns, into the grid
pub fn grow_branch(grid: &mut Grid, rng: &mut SeededRandom, state: &mut GrowthState, branch: Branch) {
    trace!(
        "{:?} at ({}, {}) heading {:?}, life {}",
        branch.branch_type,
        branch.x,
        branch.y,
        branch.heading,
        branch.life
    );
    state.counters.branches += 1;
    state.depth += 1;

    let Branch {
        mut x,
        mut y,
        branch_type,
        mut life,
        ..
    } = branch;
    let multiplier = state.multiplier;
    let ground = grid.rows() as i32 - 2;
    let mut shoot_cooldown = multiplier;

    while life > 0 {
        if state.counters.steps >= MAX_STEPS {
            break;
        }
        life -= 1;
        state.counters.steps += 1;
        let age = state.initial_life - life;

        let (dx, dy) = compute_delta(rng, branch_type, life, age, multiplier);
        // Keep branches off the ground line
        let dy = if dy > 0 && y >= ground { 0 } else { dy };

        if life < 3 {
            for _ in 0..state.tuning.dead_spawns {
                let heading = (dx + rng.jitter(), dy + rng.jitter());
                spawn(grid, rng, state, Branch::new(x, y, heading, BranchType::Dead, life));
            }
        } else if (branch_type == BranchType::Trunk || branch_type.is_shoot()) && life < multiplier + 2 {
            for _ in 0..state.tuning.dying_spawns {
                let heading = (dx + rng.jitter(), dy + rng.roll(2) - 1);
                spawn(grid, rng, state, Branch::new(x, y, heading, BranchType::Dying, life));
            }
        } else if branch_type == BranchType::Trunk
            && (rng.roll(3) == 0 || life.checked_rem(multiplier) == Some(0))
        {
            if rng.roll(8) == 0 && life > 7 {
                shoot_cooldown = multiplier * 2;
                let life_delta = rng.roll(5) - 2;
                spawn(
                    grid,
                    rng,
                    state,
                    Branch::new(x, y, (dx, dy), BranchType::Trunk, life + life_delta),
                );
            } else if shoot_cooldown <= 0 {
                shoot_cooldown = multiplier * 2;
                state.counters.shoots += 1;
                state.counters.shoot_counter += 1;

                let (shoot_type, shoot_dx) = if state.counters.shoot_counter % 2 == 0 {
                    (BranchType::ShootLeft, -1)
                } else {
                    (BranchType::ShootRight, 1)
                };
                spawn(
                    grid,
                    rng,
                    state,
                    Branch::new(x + shoot_dx, y - 1, (shoot_dx, -1), shoot_type, life + multiplier),
                );
            }
        }

        shoot_cooldown -= 1;

        x += dx;
        y += dy;

        let glyph = choose_glyph(rng, &state.leaves, branch_type, life, dx, dy);
        grid.set(y, x, Cell::grown(glyph, branch_type, dx, dy));

        let leaf_chance = if branch_type == BranchType::Trunk {
            state.tuning.trunk_leaf_chance
        } else {
            state.tuning.leaf_chance
        };
        if rng.next() < leaf_chance {
            add_leaf(grid, rng, &state.leaves, x, y);
        }
    }

    state.depth -= 1;
}

fn spawn(grid: &mut Grid, rng: &mut SeededRandom, state: &mut GrowthState, branch: Branch) {
    if state.counters.steps >= MAX_STEPS {
        return;
    }
    if state.depth >= MAX_DEPTH {
        debug!("nesting limit reached, dropping {:?} branch", branch.branch_type);
        return;
    }
    grow_branch(grid, rng, state, branch);
}

/// Draw the next step for a branch from its type's dice table
pub fn compute_delta(
    rng: &mut SeededRandom,
    branch_type: BranchType,
    life: i32,
    age: i32,
    multiplier: i32,
) -> (i32, i32) {
    match branch_type {
        BranchType::Trunk => {
            if age <= 2 || life < 4 {
                // Fresh or spent trunk spreads sideways
                (rng.jitter(), 0)
            } else if age < multiplier * 3 {
                // Young trunk grows wide, rising every half-multiplier steps
                let dy = if age.checked_rem(multiplier / 2) == Some(0) { -1 } else { 0 };
                let dx = match rng.roll(10) {
                    0 => -2,
                    1..=3 => -1,
                    4..=5 => 0,
                    6..=8 => 1,
                    _ => 2,
                };
                (dx, dy)
            } else {
                let dy = if rng.roll(10) > 2 { -1 } else { 0 };
                (rng.jitter(), dy)
            }
        }
        BranchType::ShootLeft | BranchType::ShootRight => {
            let dy = match rng.roll(10) {
                0..=1 => -1,
                2..=7 => 0,
                _ => 1,
            };
            let dx = match rng.roll(10) {
                0..=1 => -2,
                2..=5 => -1,
                6..=8 => 0,
                _ => 1,
            };
            if branch_type == BranchType::ShootRight {
                (-dx, dy)
            } else {
                (dx, dy)
            }
        }
        BranchType::Dying => {
            let dy = match rng.roll(10) {
                0..=1 => -1,
                2..=8 => 0,
                _ => 1,
            };
            let dx = match rng.roll(15) {
                0 => -3,
                1..=2 => -2,
                3..=5 => -1,
                6..=8 => 0,
                9..=11 => 1,
                12..=13 => 2,
                _ => 3,
            };
            (dx, dy)
        }
        BranchType::Dead => {
            let dy = match rng.roll(10) {
                0..=2 => -1,
                3..=6 => 0,
                _ => 1,
            };
            (rng.jitter(), dy)
        }
    }
}

/// Glyph for a step. Nearly spent branches render as foliage whatever their
/// type.
fn choose_glyph(
    rng: &mut SeededRandom,
    leaves: &[String],
    branch_type: BranchType,
    life: i32,
    dx: i32,
    dy: i32,
) -> String {
    let glyph_type = if life < 4 { BranchType::Dying } else { branch_type };
    match glyphs::wood(glyph_type, dx, dy) {
        Some(wood) => wood.to_string(),
        None => pick_leaf(rng, leaves),
    }
}

fn pick_leaf(rng: &mut SeededRandom, leaves: &[String]) -> String {
    let index = rng.roll(leaves.len() as u32) as usize;
    leaves.get(index).cloned().unwrap_or_else(|| "&".to_string())
}

/// Scatter a small leaf cluster around a branch position.
///
/// Leaves only ever land on empty cells.
pub fn add_leaf(grid: &mut Grid, rng: &mut SeededRandom, leaves: &[String], x: i32, y: i32) {
    for _ in 0..LEAF_ATTEMPTS {
        let (offset_x, offset_y) = if rng.next() < LEAF_ABOVE_CHANCE {
            (rng.jitter(), -1)
        } else {
            let offset_x = rng.jitter();
            let offset_y = rng.jitter();
            if offset_x == 0 && offset_y == 0 {
                continue;
            }
            (offset_x, offset_y)
        };

        let (leaf_x, leaf_y) = (x + offset_x, y + offset_y);
        if !place_leaf(grid, rng, leaves, leaf_x, leaf_y) {
            continue;
        }

        for chance in [SECONDARY_LEAF_CHANCE, TERTIARY_LEAF_CHANCE] {
            if rng.next() < chance {
                let near_x = leaf_x + rng.jitter();
                let near_y = leaf_y + rng.jitter();
                place_leaf(grid, rng, leaves, near_x, near_y);
            }
        }
        return;
    }
}

fn place_leaf(grid: &mut Grid, rng: &mut SeededRandom, leaves: &[String], x: i32, y: i32) -> bool {
    if !grid.in_bounds(y, x) || !grid.get(y, x).is_empty() {
        return false;
    }
    let glyph = pick_leaf(rng, leaves);
    grid.set_if_empty(y, x, Cell::leaf(glyph))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Category;

    fn leaves() -> Vec<String> {
        vec!["&".to_string(), "*".to_string()]
    }

    fn state(life: i32, multiplier: i32) -> GrowthState {
        GrowthState::new(&BonsaiConfig {
            life,
            multiplier,
            leaves: leaves(),
            ..BonsaiConfig::default()
        })
    }

    #[test]
    fn dying_delta_matches_dice_tables() {
        for seed in 0..200 {
            let mut rng = SeededRandom::new(seed);
            let mut mirror = rng.clone();
            let (dx, dy) = compute_delta(&mut rng, BranchType::Dying, 10, 10, 5);

            let expected_dy = match mirror.roll(10) {
                0..=1 => -1,
                2..=8 => 0,
                _ => 1,
            };
            let expected_dx = [-3, -2, -2, -1, -1, -1, 0, 0, 0, 1, 1, 1, 2, 2, 3][mirror.roll(15) as usize];
            assert_eq!((dx, dy), (expected_dx, expected_dy), "seed {seed}");
        }
    }

    #[test]
    fn shoots_mirror_each_other() {
        for seed in 0..200 {
            let left = compute_delta(&mut SeededRandom::new(seed), BranchType::ShootLeft, 10, 10, 5);
            let right = compute_delta(&mut SeededRandom::new(seed), BranchType::ShootRight, 10, 10, 5);
            assert_eq!(left.0, -right.0);
            assert_eq!(left.1, right.1);
            assert!((-2..=1).contains(&left.0));
        }
    }

    #[test]
    fn new_trunk_stays_level() {
        for seed in 0..100 {
            let mut rng = SeededRandom::new(seed);
            let (dx, dy) = compute_delta(&mut rng, BranchType::Trunk, 30, 1, 5);
            assert_eq!(dy, 0);
            assert!((-1..=1).contains(&dx));
            // exactly one draw
            let mut mirror = SeededRandom::new(seed);
            mirror.next();
            assert_eq!(rng, mirror);
        }
    }

    #[test]
    fn young_trunk_rises_on_half_multiplier_ticks() {
        let mut rng = SeededRandom::new(3);
        // multiplier 6 -> rise when age % 3 == 0, young while age < 18
        assert_eq!(compute_delta(&mut rng, BranchType::Trunk, 20, 9, 6).1, -1);
        assert_eq!(compute_delta(&mut rng, BranchType::Trunk, 20, 10, 6).1, 0);
    }

    #[test]
    fn small_multipliers_do_not_divide_by_zero() {
        let mut rng = SeededRandom::new(11);
        for multiplier in 0..=2 {
            for age in -5..10 {
                let (_, dy) = compute_delta(&mut rng, BranchType::Trunk, 10, age, multiplier);
                assert!((-1..=0).contains(&dy));
            }
        }
    }

    #[test]
    fn dead_delta_is_bounded() {
        let mut rng = SeededRandom::new(17);
        for _ in 0..500 {
            let (dx, dy) = compute_delta(&mut rng, BranchType::Dead, 2, 30, 5);
            assert!((-1..=1).contains(&dx));
            assert!((-1..=1).contains(&dy));
        }
    }

    #[test]
    fn zero_life_branch_draws_nothing() {
        let mut grid = Grid::new(10, 10);
        let mut rng = SeededRandom::new(1);
        let before = rng.clone();
        let mut state = state(0, 5);
        grow_branch(&mut grid, &mut rng, &mut state, Branch::new(5, 9, (0, -1), BranchType::Trunk, 0));
        assert_eq!(grid.occupied().count(), 0);
        assert_eq!(rng, before);
        assert_eq!(state.stats(), GrowthStats { branches: 1, shoots: 0, steps: 0 });
    }

    #[test]
    fn growth_in_tiny_grid_is_safe() {
        for seed in 0..20 {
            let mut grid = Grid::new(1, 1);
            let mut rng = SeededRandom::new(seed);
            let mut state = state(40, 5);
            grow_branch(&mut grid, &mut rng, &mut state, Branch::new(0, 0, (0, -1), BranchType::Trunk, 40));
            assert_eq!(grid.rows(), 1);
            assert_eq!(grid.cols(), 1);
        }
    }

    #[test]
    fn trunk_writes_tagged_cells() {
        let mut grid = Grid::new(30, 60);
        let mut rng = SeededRandom::new(8);
        let mut state = state(32, 5);
        grow_branch(&mut grid, &mut rng, &mut state, Branch::new(30, 28, (0, -1), BranchType::Trunk, 32));

        assert!(grid.count(Category::Trunk) > 0);
        assert!(grid.count(Category::Leaf) > 0);
        for (_, _, cell) in grid.occupied() {
            assert!(!cell.glyph.trim().is_empty());
            if cell.category == Category::Branch {
                assert!(cell.branch_type.is_some_and(BranchType::is_shoot));
            }
        }
        assert!(state.counters.branches > 1);
    }

    #[test]
    fn leaves_never_overwrite() {
        let mut grid = Grid::new(5, 5);
        for row in 0..5 {
            for col in 0..5 {
                if (row + col) % 2 == 0 {
                    grid.set(row, col, Cell::grown("|", BranchType::Trunk, 0, -1));
                }
            }
        }
        let wood = grid.clone();
        let mut rng = SeededRandom::new(23);
        for _ in 0..200 {
            add_leaf(&mut grid, &mut rng, &leaves(), 2, 2);
        }
        for row in 0..5 {
            for col in 0..5 {
                if !wood.get(row, col).is_empty() {
                    assert_eq!(grid.get(row, col), wood.get(row, col));
                }
            }
        }
    }

    #[test]
    fn leaves_fill_only_within_reach() {
        let mut grid = Grid::new(9, 9);
        let mut rng = SeededRandom::new(5);
        for _ in 0..100 {
            add_leaf(&mut grid, &mut rng, &leaves(), 4, 4);
        }
        for (row, col, cell) in grid.occupied() {
            assert_eq!(cell.category, Category::Leaf);
            // primary within 1, secondary/tertiary one more
            assert!((row as i32 - 4).abs() <= 2 && (col as i32 - 4).abs() <= 2);
        }
    }

    #[test]
    fn full_neighbourhood_gets_no_leaves() {
        let mut grid = Grid::new(3, 3);
        for row in 0..3 {
            for col in 0..3 {
                grid.set(row, col, Cell::tagged("#", Category::Base));
            }
        }
        let before = grid.clone();
        let mut rng = SeededRandom::new(2);
        add_leaf(&mut grid, &mut rng, &leaves(), 1, 1);
        assert_eq!(grid, before);
    }

    #[test]
    fn shoots_alternate_sides() {
        let mut grid = Grid::new(40, 80);
        let mut rng = SeededRandom::new(77);
        let mut state = state(60, 2);
        grow_branch(&mut grid, &mut rng, &mut state, Branch::new(40, 38, (0, -1), BranchType::Trunk, 60));
        assert!(state.counters.shoots > 0);
        assert_eq!(state.counters.shoot_counter, state.counters.shoots as i32);
    }
}
