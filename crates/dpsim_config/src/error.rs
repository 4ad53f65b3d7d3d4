//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `dpsim.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed into the configuration schema.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value is out of its allowed range.
    #[error("validation error: {field}: {reason}")]
    ValidationError {
        /// Dotted key of the offending field (e.g. `scheduler.max_iterations`).
        field: String,
        /// Why the value was rejected.
        reason: String,
    },
}
