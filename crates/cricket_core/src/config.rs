//! Match configuration
//!
//! Loaded from YAML or JSON (by file extension), or from the file named by
//! `CRICKET_CONFIG_PATH`. Missing fields fall back to the classic console
//! defaults: 5 overs a side, 15% wicket chance, 50 ms between deliveries.

use std::path::Path;
use std::{env, fs};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::innings::{DEFAULT_WICKET_THRESHOLD, WICKET_ROLL_BOUND};
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "CRICKET_CONFIG_PATH";

/// Longest limited-overs format (one-day international).
pub const MAX_OVERS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Over limit per innings
    #[serde(default = "default_overs")]
    pub overs: u32,

    /// Wicket roll below this (out of 100) dismisses the striker
    #[serde(default = "default_wicket_threshold")]
    pub wicket_threshold: u32,

    /// Size of each side's bowling attack, taken from the tail of the order
    #[serde(default = "default_bowlers_per_side")]
    pub bowlers_per_side: usize,

    /// Fixed seed; `None` draws one from entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Console pacing only. Never affects the simulation.
    #[serde(default = "default_delivery_delay_ms")]
    pub delivery_delay_ms: u64,

    /// 날씨/해설 문구 출력 여부
    #[serde(default = "default_flavour_text")]
    pub flavour_text: bool,
}

fn default_overs() -> u32 {
    5
}

fn default_wicket_threshold() -> u32 {
    DEFAULT_WICKET_THRESHOLD
}

fn default_bowlers_per_side() -> usize {
    5
}

fn default_delivery_delay_ms() -> u64 {
    50
}

fn default_flavour_text() -> bool {
    true
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            overs: default_overs(),
            wicket_threshold: default_wicket_threshold(),
            bowlers_per_side: default_bowlers_per_side(),
            seed: None,
            delivery_delay_ms: default_delivery_delay_ms(),
            flavour_text: default_flavour_text(),
        }
    }
}

impl MatchConfig {
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `.json` files parse as JSON, everything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json(&content)?
        } else {
            Self::from_yaml(&content)?
        };
        info!(path = %path.display(), overs = config.overs, "loaded match config");
        Ok(config)
    }

    /// Config from `CRICKET_CONFIG_PATH` if set and non-empty, otherwise defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(Self::default());
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.overs > MAX_OVERS {
            return Err(ConfigError::Invalid(format!(
                "overs must be 0..={MAX_OVERS}, got {}",
                self.overs
            )));
        }
        if self.wicket_threshold > WICKET_ROLL_BOUND {
            return Err(ConfigError::Invalid(format!(
                "wicket_threshold must be 0..={WICKET_ROLL_BOUND}, got {}",
                self.wicket_threshold
            )));
        }
        if self.bowlers_per_side == 0 {
            return Err(ConfigError::Invalid(
                "bowlers_per_side must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
