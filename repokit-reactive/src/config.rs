//! Configuration parsing for the adaptation layer.

use crate::backend::{Backend, Backends};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Concrete wrapper types a publisher can be unwrapped into before mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Specialization {
    Flux,
    Mono,
}

/// Configuration matching the repokit.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactiveConfig {
    /// Backends to use; `None` means every compiled backend
    #[serde(default)]
    pub backends: Option<Vec<Backend>>,

    /// Wrapper types the publisher adapter hands off to directly, in order
    #[serde(default = "default_specializations")]
    pub publisher_specializations: Vec<Specialization>,
}

fn default_specializations() -> Vec<Specialization> {
    vec![Specialization::Flux, Specialization::Mono]
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            backends: None,
            publisher_specializations: default_specializations(),
        }
    }
}

impl ReactiveConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Resolve the effective backend set
    pub fn backends(&self) -> Backends {
        match &self.backends {
            Some(requested) => Backends::from_requested(requested.iter().copied()),
            None => Backends::detect(),
        }
    }
}
