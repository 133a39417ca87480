use crate::palette::{self, Palette};
use log::warn;
use serde::{Deserialize, Serialize};

pub const MAX_LIFE: i32 = 200;
pub const MAX_MULTIPLIER: i32 = 20;
pub const MAX_BASE: u8 = 2;
/// Longest step or wait accepted, in seconds
pub const MAX_DELAY_SECS: f64 = 3600.0;

/// Leaf glyph pool used when none is configured
pub const DEFAULT_LEAVES: &[&str] = &[
    "&", "+", "*", ".", "^", "@", "~", "`", "\"", "/", "_", ",", "o", "O", "0", "#", "%", "$",
    "v", "V", "x",
];

/// Configuration for bonsai tree generation
#[derive(Debug, Clone)]
pub struct BonsaiConfig {
    pub live: bool,
    pub infinite: bool,
    pub print: bool,
    pub json: bool,
    pub time_step: f32,
    pub time_wait: f64,
    pub life: i32,
    pub multiplier: i32,
    pub seed: Option<u32>,
    pub base: u8,
    pub leaves: Vec<String>,
    pub message: Option<String>,
    pub palette: String,
    pub tuning: GrowthTuning,
}

impl Default for BonsaiConfig {
    fn default() -> Self {
        Self {
            live: false,
            infinite: false,
            print: false,
            json: false,
            time_step: 0.03,
            time_wait: 4.0,
            life: 32,
            multiplier: 5,
            seed: None,
            base: 1,
            leaves: DEFAULT_LEAVES.iter().map(|s| s.to_string()).collect(),
            message: None,
            palette: "default".to_string(),
            tuning: GrowthTuning::default(),
        }
    }
}

impl BonsaiConfig {
    /// Clamp every option into its documented range.
    ///
    /// Out-of-range values are never fatal; each correction is logged.
    pub fn sanitized(mut self) -> Self {
        let life = self.life.clamp(0, MAX_LIFE);
        if life != self.life {
            warn!("life {} out of range, clamped to {}", self.life, life);
            self.life = life;
        }

        let multiplier = self.multiplier.clamp(0, MAX_MULTIPLIER);
        if multiplier != self.multiplier {
            warn!("multiplier {} out of range, clamped to {}", self.multiplier, multiplier);
            self.multiplier = multiplier;
        }

        if self.base > MAX_BASE {
            warn!("base {} out of range, clamped to {}", self.base, MAX_BASE);
            self.base = MAX_BASE;
        }

        self.time_step = seconds("time", self.time_step as f64, 0.03) as f32;
        self.time_wait = seconds("wait", self.time_wait, 4.0);

        self.leaves = self
            .leaves
            .iter()
            .map(|leaf| strip_controls(leaf.trim()))
            .filter(|leaf| !leaf.is_empty())
            .collect();
        if self.leaves.is_empty() {
            warn!("no usable leaf glyphs, falling back to defaults");
            self.leaves = DEFAULT_LEAVES.iter().map(|s| s.to_string()).collect();
        }

        self.message = self
            .message
            .map(|m| strip_controls(&m))
            .filter(|m| !m.trim().is_empty());

        if Palette::by_name(&self.palette).is_none() {
            warn!("unknown palette '{}' (expected one of {:?}), using default", self.palette, palette::NAMES);
            self.palette = "default".to_string();
        }

        self.tuning = self.tuning.sanitized();
        self
    }
}

/// Tunable density knobs for foliage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthTuning {
    /// Chance per step that a non-trunk branch attaches leaves
    pub leaf_chance: f64,
    /// Chance per step that a trunk attaches leaves
    pub trunk_leaf_chance: f64,
    /// Dead children spawned per step once a branch is nearly spent
    pub dead_spawns: u32,
    /// Dying children spawned per step by a fading trunk or shoot
    pub dying_spawns: u32,
}

impl Default for GrowthTuning {
    fn default() -> Self {
        Self {
            leaf_chance: 0.40,
            trunk_leaf_chance: 0.15,
            dead_spawns: 3,
            dying_spawns: 2,
        }
    }
}

impl GrowthTuning {
    fn sanitized(self) -> Self {
        let clamp_chance = |name: &str, value: f64, fallback: f64| {
            if value.is_nan() {
                warn!("{} is not a number, using {}", name, fallback);
                fallback
            } else if !(0.0..=1.0).contains(&value) {
                let clamped = value.clamp(0.0, 1.0);
                warn!("{} {} out of range, clamped to {}", name, value, clamped);
                clamped
            } else {
                value
            }
        };
        let defaults = Self::default();
        Self {
            leaf_chance: clamp_chance("leaf_chance", self.leaf_chance, defaults.leaf_chance),
            trunk_leaf_chance: clamp_chance(
                "trunk_leaf_chance",
                self.trunk_leaf_chance,
                defaults.trunk_leaf_chance,
            ),
            dead_spawns: self.dead_spawns.min(8),
            dying_spawns: self.dying_spawns.min(8),
        }
    }
}

/// Branch types for bonsai tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchType {
    Trunk,
    ShootLeft,
    ShootRight,
    Dying,
    Dead,
}

impl BranchType {
    pub fn is_shoot(self) -> bool {
        matches!(self, BranchType::ShootLeft | BranchType::ShootRight)
    }
}

/// Delays must convert to a `Duration`: NaN and negatives take the default,
/// anything longer than an hour (infinity included) is cut to an hour.
fn seconds(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_nan() || value < 0.0 {
        warn!("{} {} is not a valid delay, using {}", name, value, fallback);
        fallback
    } else if value > MAX_DELAY_SECS {
        warn!("{} {} too long, clamped to {}", name, value, MAX_DELAY_SECS);
        MAX_DELAY_SECS
    } else {
        value
    }
}

fn strip_controls(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
