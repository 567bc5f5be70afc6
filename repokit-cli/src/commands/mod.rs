//! CLI command implementations.

pub mod backends;
pub mod map;

pub use backends::show_backends;
pub use map::{map_values, MapOptions};

use anyhow::{Context, Result};
use repokit_reactive::ReactiveConfig;
use std::path::Path;

/// Load the configuration file, falling back to defaults when it does not exist
pub fn load_config(config_path: &Path) -> Result<ReactiveConfig> {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No configuration file; using defaults");
        return Ok(ReactiveConfig::default());
    }
    ReactiveConfig::from_file(config_path).context("Failed to load configuration")
}
