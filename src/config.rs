use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::grid::DEFAULT_NOISE_RATIO;

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct Config {
  pub app: AppConfig,
  pub filters: FilterConfig,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
  pub media_group_ttl_secs: u64,
}

impl AppConfig {
  pub fn media_group_ttl(&self) -> Duration {
    Duration::from_secs(self.media_group_ttl_secs)
  }
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      media_group_ttl_secs: 300,
    }
  }
}

/// Defaults used when a caption names a filter without an argument.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FilterConfig {
  pub blur_level: usize,
  pub segment_threshold: f64,
  pub brightness_step: f64,
  pub noise_ratio: f64,
  pub noise_seed: Option<u64>,
}

impl Default for FilterConfig {
  fn default() -> Self {
    Self {
      blur_level: 16,
      segment_threshold: 100.0,
      brightness_step: 30.0,
      noise_ratio: DEFAULT_NOISE_RATIO,
      noise_seed: None,
    }
  }
}

pub fn parse(config_path: &str) -> Result<Config> {
  let toml_str = fs::read_to_string(config_path)
    .with_context(|| format!("failed to read config file {}", config_path))?;
  let cfg: Config = toml::from_str(&toml_str)
    .with_context(|| format!("failed to deserialize config {}", config_path))?;

  Ok(cfg)
}
