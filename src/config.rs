use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;

/// Banner settings, readable from TOML. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerConfig {
    pub switch_time_ms: u64,
    pub animation_speed: u32,
    pub paths_prefix: String,
    pub paths: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub load_timeout_ms: Option<u64>,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            switch_time_ms: DEFAULT_SWITCH_TIME_MS,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            paths_prefix: String::new(),
            paths: Vec::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            load_timeout_ms: None,
        }
    }
}

impl BannerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        if self.switch_time_ms == 0 {
            return Err(ConfigError::Invalid("switch_time_ms must be positive".into()));
        }

        Ok(())
    }

    #[must_use]
    pub fn switch_time(&self) -> Duration {
        Duration::from_millis(self.switch_time_ms)
    }

    #[must_use]
    pub fn load_timeout(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}
