use std::path::Path;

use tracing::warn;

use crate::env::RewardConfig;
use crate::error::ConfigError;
use crate::session::SessionConfig;
use crate::training::ArenaConfig;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rewards: RewardConfig,
    pub session: SessionConfig,
    pub arena: ArenaConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.rewards;
        if !(r.win > r.loss) {
            return Err(ConfigError::Validation(
                "rewards.win must be > rewards.loss".into(),
            ));
        }
        if !(r.draw >= r.loss && r.draw <= r.win) {
            return Err(ConfigError::Validation(
                "rewards.draw must be in [rewards.loss, rewards.win]".into(),
            ));
        }
        if !(r.invalid_move < 0.0) {
            return Err(ConfigError::Validation(
                "rewards.invalid_move must be < 0".into(),
            ));
        }

        if self.session.ttl_secs == 0 {
            return Err(ConfigError::Validation(
                "session.ttl_secs must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.session.ai_exploration_rate) {
            return Err(ConfigError::Validation(
                "session.ai_exploration_rate must be in [0, 1]".into(),
            ));
        }

        if self.arena.games == 0 {
            return Err(ConfigError::Validation(
                "arena.games must be > 0".into(),
            ));
        }
        if self.arena.log_interval == 0 {
            return Err(ConfigError::Validation(
                "arena.log_interval must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.arena.exploration_rate) {
            return Err(ConfigError::Validation(
                "arena.exploration_rate must be in [0, 1]".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
