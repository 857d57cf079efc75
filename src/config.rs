use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::EngagementWeights;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackerConfig {
    pub orphan_floor: usize,
    pub suffix_estimate_digits: usize,
    pub max_repack_passes: usize,
}

impl Default for PackerConfig {
    fn default() -> Self {
        Self {
            orphan_floor: 40,
            suffix_estimate_digits: 2,
            max_repack_passes: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub packer: PackerConfig,
    pub weights: EngagementWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            packer: PackerConfig::default(),
            weights: EngagementWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(floor) = env::var("ORPHAN_FLOOR") {
            if let Ok(value) = floor.parse::<usize>() {
                self.packer.orphan_floor = value;
            }
        }
        if let Ok(digits) = env::var("SUFFIX_ESTIMATE_DIGITS") {
            if let Ok(value) = digits.parse::<usize>() {
                if value > 0 {
                    self.packer.suffix_estimate_digits = value;
                }
            }
        }
        if let Ok(passes) = env::var("MAX_REPACK_PASSES") {
            if let Ok(value) = passes.parse::<usize>() {
                if value > 0 {
                    self.packer.max_repack_passes = value;
                }
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("FORMATTER_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/formatter.toml")))
}
