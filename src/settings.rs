//! Optional defaults from `<config dir>/termbonsai/config.toml`
//!
//! ```toml
//! [bonsai]
//! life = 48
//! multiplier = 8
//! leaves = ["&", "*"]
//! palette = "cherry"
//! ```

use crate::config::{BonsaiConfig, GrowthTuning};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bonsai: BonsaiSettings,
}

/// Every field optional; absent fields keep the built-in default
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BonsaiSettings {
    pub life: Option<i32>,
    pub multiplier: Option<i32>,
    pub base: Option<u8>,
    pub leaves: Option<Vec<String>>,
    pub message: Option<String>,
    pub palette: Option<String>,
    pub time: Option<f32>,
    pub wait: Option<f64>,
    pub leaf_chance: Option<f64>,
    pub trunk_leaf_chance: Option<f64>,
    pub dead_spawns: Option<u32>,
    pub dying_spawns: Option<u32>,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                warn!("cannot read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termbonsai")
            .join("config.toml")
    }

    /// Built-in defaults overlaid with whatever the file sets
    pub fn to_config(&self) -> BonsaiConfig {
        let s = &self.bonsai;
        let defaults = BonsaiConfig::default();
        let tuning = GrowthTuning::default();
        debug!("settings file overrides: {:?}", s);

        BonsaiConfig {
            life: s.life.unwrap_or(defaults.life),
            multiplier: s.multiplier.unwrap_or(defaults.multiplier),
            base: s.base.unwrap_or(defaults.base),
            leaves: s.leaves.clone().unwrap_or(defaults.leaves),
            message: s.message.clone().or(defaults.message),
            palette: s.palette.clone().unwrap_or(defaults.palette),
            time_step: s.time.unwrap_or(defaults.time_step),
            time_wait: s.wait.unwrap_or(defaults.time_wait),
            tuning: GrowthTuning {
                leaf_chance: s.leaf_chance.unwrap_or(tuning.leaf_chance),
                trunk_leaf_chance: s.trunk_leaf_chance.unwrap_or(tuning.trunk_leaf_chance),
                dead_spawns: s.dead_spawns.unwrap_or(tuning.dead_spawns),
                dying_spawns: s.dying_spawns.unwrap_or(tuning.dying_spawns),
            },
            ..defaults
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Settings::parse("").unwrap().to_config();
        assert_eq!(config.life, 32);
        assert_eq!(config.multiplier, 5);
        assert_eq!(config.tuning, GrowthTuning::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = Settings::parse(
            r#"
            [bonsai]
            life = 48
            leaves = ["*"]
            palette = "maple"
            leaf_chance = 0.25
            "#,
        )
        .unwrap();
        let config = settings.to_config();
        assert_eq!(config.life, 48);
        assert_eq!(config.multiplier, 5);
        assert_eq!(config.leaves, vec!["*".to_string()]);
        assert_eq!(config.palette, "maple");
        assert_eq!(config.tuning.leaf_chance, 0.25);
        assert_eq!(config.tuning.trunk_leaf_chance, 0.15);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Settings::parse("[bonsai]\nlief = 3\n").is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let settings = Settings::load_from(Path::new("/nonexistent/termbonsai/config.toml"));
        assert!(settings.bonsai.life.is_none());
    }
}
