//! termbonsai - seeded ASCII bonsai trees for the terminal
//!
//! Core modules:
//! - `random`: deterministic LCG every stochastic choice draws from
//! - `growth`: recursive branch growth, the tree algorithm itself
//! - `grid`: bounds-checked cell buffer the tree grows into
//! - `session`: one seed-to-grid pass plus statistics
//! - `reveal`, `render`, `terminal`: showing the finished tree

pub mod base;
pub mod config;
pub mod error;
pub mod glyphs;
pub mod grid;
pub mod growth;
pub mod palette;
pub mod random;
pub mod render;
pub mod reveal;
pub mod session;
pub mod settings;
pub mod terminal;

pub use config::{BonsaiConfig, BranchType, GrowthTuning};
pub use error::BonsaiError;
pub use grid::{Category, Cell, Grid};
pub use growth::{grow_branch, Branch, GrowthState, GrowthStats};
pub use random::SeededRandom;
pub use session::{Tree, TreeSession, Viewport};
