use std::path::Path;

use crate::config::TraderConfig;
use crate::error::ConfigError;

/// Load and validate a trader configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<TraderConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load and validate a trader configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<TraderConfig, ConfigError> {
    let config: TraderConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<TraderConfig, ConfigError> {
    let default_config = include_str!("default_config.json");
    load_config_from_str(default_config)
}
