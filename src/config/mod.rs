pub mod keys;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::{
    DEFAULT_PREVIEW_COUNT, GRAVITY_INTERVAL_MS, MAX_PREVIEW_COUNT, REPEAT_DELAY_MS,
    REPEAT_INTERVAL_MS,
};

pub use self::keys::KeyConfig;
pub use self::loader::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub rules: RulesConfig,
    pub keys: KeyConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Rejects values the game loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.gravity_ms == 0 || timing.repeat_delay_ms == 0 || timing.repeat_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "timing intervals must be greater than zero".to_string(),
            ));
        }
        if self.rules.preview_count > MAX_PREVIEW_COUNT {
            return Err(ConfigError::Invalid(format!(
                "preview_count {} exceeds the maximum of {MAX_PREVIEW_COUNT}",
                self.rules.preview_count
            )));
        }
        self.keys.resolve()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub gravity_ms: u64,
    pub repeat_delay_ms: u64,
    pub repeat_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_INTERVAL_MS,
            repeat_delay_ms: REPEAT_DELAY_MS,
            repeat_interval_ms: REPEAT_INTERVAL_MS,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn gravity(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }

    #[must_use]
    pub fn repeat_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_delay_ms)
    }

    #[must_use]
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Allow only one hold until the next piece locks.
    pub hold_lock_out: bool,
    pub preview_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hold_lock_out: true,
            preview_count: DEFAULT_PREVIEW_COUNT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: "blockfall.log".to_string(),
        }
    }
}
