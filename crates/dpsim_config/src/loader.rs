//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::SimConfig;
use std::path::Path;

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "dpsim.toml";

/// Loads and validates `<dir>/dpsim.toml`.
pub fn load_config(dir: &Path) -> Result<SimConfig, ConfigError> {
    let content = std::fs::read_to_string(dir.join(CONFIG_FILE_NAME))?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a TOML string.
pub fn load_config_from_str(content: &str) -> Result<SimConfig, ConfigError> {
    let config: SimConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &SimConfig) -> Result<(), ConfigError> {
    let caps = [
        ("scheduler.max_iterations", Some(config.scheduler.max_iterations)),
        (
            "scheduler.input_combo_max_iterations",
            config.scheduler.input_combo_max_iterations,
        ),
        (
            "scheduler.active_max_iterations",
            config.scheduler.active_max_iterations,
        ),
        (
            "scheduler.nba_max_iterations",
            config.scheduler.nba_max_iterations,
        ),
    ];
    for (field, cap) in caps {
        if cap == Some(0) {
            return Err(invalid(field, "must be at least 1"));
        }
    }

    let top = &config.model.top;
    if top.is_empty() {
        return Err(invalid("model.top", "must not be empty"));
    }
    if top.contains('.') {
        return Err(invalid("model.top", "must be a single path segment"));
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
