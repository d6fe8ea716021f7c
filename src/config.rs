use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::engine::{ForecastConfig, ReadinessConfig};
use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    /// How many buckets each ranking keeps.
    pub top_n: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: 3 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub ranking: RankingConfig,
    pub readiness: ReadinessConfig,
    pub forecast: ForecastConfig,
}

impl EngineConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            } else {
                EngineConfig::default()
            }
        } else {
            EngineConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(top_n) = env::var("ENGINE_TOP_N") {
            if let Ok(value) = top_n.parse::<usize>() {
                self.ranking.top_n = value;
            }
        }
        if let Ok(limit) = env::var("ENGINE_RECOMMENDATION_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.readiness.recommendation_limit = value;
            }
        }
        if let Ok(spread) = env::var("ENGINE_SPREAD_FACTOR") {
            if let Ok(value) = spread.parse::<f64>() {
                self.forecast.spread_factor = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("ENGINE_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/engine.toml")))
}
