//! Parsing and validation of `dpsim.toml` simulator configuration.
//!
//! Every section is optional; an empty file yields the same [`SimConfig`] as
//! [`SimConfig::default`], which uses the standard scheduler policy
//! (100 iterations per region, abort on non-convergence).

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
