//! Progressive reveal ordering for a finished tree
//!
//! Growth always completes first; this only decides in which order and at
//! what offsets the renderer shows the cells. Dropping a schedule midway
//! never touches the grid.

use crate::grid::{Category, Grid};
use std::collections::HashMap;
use std::time::Duration;

/// Pause inserted before the branch and leaf phases
pub const PHASE_PAUSE: Duration = Duration::from_millis(300);

/// Reveal phases, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Base,
    Wood,
    Foliage,
}

impl Phase {
    fn of(category: Category) -> Option<Phase> {
        match category {
            Category::Base => Some(Phase::Base),
            Category::Trunk | Category::Branch => Some(Phase::Wood),
            // messages come up with the leaves
            Category::Leaf | Category::Message => Some(Phase::Foliage),
            Category::Empty => None,
        }
    }
}

/// One cell to show and when
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub row: usize,
    pub col: usize,
    pub phase: Phase,
    pub delay: Duration,
}

/// Ordered reveal plan for a grid
#[derive(Debug, Clone, Default)]
pub struct RevealSchedule {
    steps: Vec<RevealStep>,
}

impl RevealSchedule {
    /// Base, then wood, then foliage; each phase bottom row first
    pub fn new(grid: &Grid, step: Duration) -> Self {
        let mut cells: Vec<(Phase, usize, usize)> = grid
            .occupied()
            .filter_map(|(row, col, cell)| Phase::of(cell.category).map(|phase| (phase, row, col)))
            .collect();
        // stable: ties keep row-major order
        cells.sort_by_key(|&(phase, row, _)| (phase, std::cmp::Reverse(row)));

        let mut steps = Vec::with_capacity(cells.len());
        let mut clock = Duration::ZERO;
        let mut current: Option<Phase> = None;
        for (phase, row, col) in cells {
            if current != Some(phase) {
                if current.is_some() {
                    clock += PHASE_PAUSE;
                }
                current = Some(phase);
            }
            steps.push(RevealStep {
                row,
                col,
                phase,
                delay: clock,
            });
            clock += step;
        }

        Self { steps }
    }

    pub fn steps(&self) -> &[RevealStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Time until the last cell has been shown for one step.
    ///
    /// Zero when there is nothing to show or no per-cell delay.
    pub fn total_duration(&self, step: Duration) -> Duration {
        if self.steps.is_empty() || step.is_zero() {
            return Duration::ZERO;
        }
        self.steps.last().map_or(Duration::ZERO, |last| last.delay + step)
    }
}

/// Non-empty cells per category
pub fn category_counts(grid: &Grid) -> HashMap<Category, usize> {
    let mut counts = HashMap::new();
    for (_, _, cell) in grid.occupied() {
        *counts.entry(cell.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BranchType;
    use crate::grid::Cell;

    fn sample() -> Grid {
        let mut grid = Grid::new(4, 3);
        grid.set(0, 0, Cell::leaf("&"));
        grid.set(1, 1, Cell::grown("|", BranchType::Trunk, 0, -1));
        grid.set(2, 1, Cell::grown("/", BranchType::ShootRight, 1, -1));
        grid.set(3, 0, Cell::tagged("(", Category::Base));
        grid.set(3, 2, Cell::tagged(")", Category::Base));
        grid.set(1, 2, Cell::tagged("m", Category::Message));
        grid
    }

    #[test]
    fn phases_run_base_wood_foliage_bottom_up() {
        let schedule = RevealSchedule::new(&sample(), Duration::from_millis(10));
        let order: Vec<_> = schedule.steps().iter().map(|s| (s.phase, s.row, s.col)).collect();
        assert_eq!(
            order,
            vec![
                (Phase::Base, 3, 0),
                (Phase::Base, 3, 2),
                (Phase::Wood, 2, 1),
                (Phase::Wood, 1, 1),
                (Phase::Foliage, 1, 2),
                (Phase::Foliage, 0, 0),
            ]
        );
    }

    #[test]
    fn delays_include_phase_pauses() {
        let step = Duration::from_millis(10);
        let schedule = RevealSchedule::new(&sample(), step);
        let delays: Vec<_> = schedule.steps().iter().map(|s| s.delay.as_millis()).collect();
        assert_eq!(delays, vec![0, 10, 320, 330, 640, 650]);
        assert_eq!(schedule.total_duration(step), Duration::from_millis(660));
    }

    #[test]
    fn empty_grid_has_no_schedule() {
        let schedule = RevealSchedule::new(&Grid::new(5, 5), Duration::from_millis(10));
        assert!(schedule.is_empty());
        assert_eq!(schedule.total_duration(Duration::from_millis(10)), Duration::ZERO);
    }

    #[test]
    fn zero_step_is_instant() {
        let schedule = RevealSchedule::new(&sample(), Duration::ZERO);
        assert_eq!(schedule.len(), 6);
        assert_eq!(schedule.total_duration(Duration::ZERO), Duration::ZERO);
    }

    #[test]
    fn counts_by_category() {
        let counts = category_counts(&sample());
        assert_eq!(counts[&Category::Base], 2);
        assert_eq!(counts[&Category::Trunk], 1);
        assert_eq!(counts[&Category::Branch], 1);
        assert_eq!(counts[&Category::Leaf], 1);
        assert_eq!(counts[&Category::Message], 1);
        assert!(!counts.contains_key(&Category::Empty));
    }
}
