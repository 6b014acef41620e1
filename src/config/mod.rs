//! # Configuration
//!
//! TOML configuration for the `trailsense` binary and for embedders that want
//! the same knobs the binary exposes.
//!
//! ## Sections
//!
//! - [`WorldConfig`] - where the world file lives
//! - [`SearchPolicy`] (`[pathfinding]`) - zone scope, doors, diagonals, expansion cap
//! - [`TrackingRules`] (`[tracking]`) - levels, dice and difficulty behind `track`
//! - [`LoggingConfig`] - log level and optional log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use trailsense::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("trailsense.toml").await?;
//!     config.validate()?;
//!     println!("World file: {}", config.world.path);
//!     Ok(())
//! }
//! ```
//!
//! ## File format
//!
//! ```toml
//! [world]
//! path = "data/seeds/world.json"
//!
//! [pathfinding]
//! zone_scope = "same_zone"
//! track_through_doors = false
//! diagonal_dirs = true
//!
//! [tracking]
//! implementor_level = 34
//! immortal_level = 31
//!
//! [logging]
//! level = "info"
//! ```
//!
//! Every section except `[world]` may be omitted and falls back to defaults.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::errors::TrailError;
use crate::mobile::TrackingRules;
use crate::pathfind::SearchPolicy;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub world: WorldConfig,
    #[serde(default)]
    pub pathfinding: SearchPolicy,
    #[serde(default)]
    pub tracking: TrackingRules,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    /// JSON room file, relative to the working directory.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

impl Config {
    /// Load configuration from file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path))?;

        Ok(config)
    }

    /// Parse configuration text. Syntax and shape errors surface as
    /// [`TrailError::Toml`].
    pub fn from_toml_str(content: &str) -> Result<Self, TrailError> {
        Ok(toml::from_str(content)?)
    }

    /// Write the default configuration to `path`.
    pub async fn create_default(path: &str) -> Result<()> {
        let content = toml::to_string_pretty(&Config::default())
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), TrailError> {
        if self.world.path.trim().is_empty() {
            return Err(TrailError::InvalidConfig("world.path is empty".into()));
        }
        if self.pathfinding.max_expansions == Some(0) {
            return Err(TrailError::InvalidConfig(
                "pathfinding.max_expansions must be at least 1".into(),
            ));
        }
        let t = &self.tracking;
        if t.immortal_level > t.implementor_level {
            return Err(TrailError::InvalidConfig(format!(
                "tracking.immortal_level {} is above implementor_level {}",
                t.immortal_level, t.implementor_level
            )));
        }
        if t.move_dice_count == 0 || t.move_dice_size < 1 {
            return Err(TrailError::InvalidConfig(
                "tracking move dice need at least one die of size 1".into(),
            ));
        }
        if t.guess_tries == 0 {
            return Err(TrailError::InvalidConfig(
                "tracking.guess_tries must be at least 1".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            return Err(TrailError::InvalidConfig(format!(
                "unknown logging.level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                path: "data/seeds/world.json".to_string(),
            },
            pathfinding: SearchPolicy::default(),
            tracking: TrackingRules::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("trailsense.log".to_string()),
            },
        }
    }
}
