//! Configuration loaded from `skiff.toml` and overridden by flags.

use clap::ValueEnum;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "skiff.toml";

/// How expressions are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Translate to SK combinators (cached) and reduce
    #[default]
    Sk,
    /// Evaluate lambda terms directly by substitution
    Lc,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub strategy: Strategy,
    /// Load the standard prelude before user input
    pub prelude: bool,
    /// Show Church booleans as `true` / `false`
    pub church_booleans: bool,
    /// Stack size of the evaluation thread, in MiB
    pub stack_size_mb: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: Strategy::Sk,
            prelude: true,
            church_booleans: true,
            stack_size_mb: 64,
        }
    }
}

/// Values given on the command line. `None` keeps the configured value.
#[derive(Debug, Default)]
pub struct Overrides {
    pub strategy: Option<Strategy>,
    pub prelude: Option<bool>,
    pub church_booleans: Option<bool>,
    pub stack_size_mb: Option<usize>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("stack_size_mb must be at least 1")]
    EmptyStack,
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::parse(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse TOML text. Missing keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply command-line overrides and check the result.
    pub fn with_overrides(mut self, overrides: Overrides) -> Result<Self, ConfigError> {
        if let Some(strategy) = overrides.strategy {
            self.strategy = strategy;
        }
        if let Some(prelude) = overrides.prelude {
            self.prelude = prelude;
        }
        if let Some(church_booleans) = overrides.church_booleans {
            self.church_booleans = church_booleans;
        }
        if let Some(stack_size_mb) = overrides.stack_size_mb {
            self.stack_size_mb = stack_size_mb;
        }
        if self.stack_size_mb == 0 {
            return Err(ConfigError::EmptyStack);
        }
        Ok(self)
    }

    /// Evaluation thread stack size in bytes.
    pub fn stack_size(&self) -> usize {
        self.stack_size_mb.saturating_mul(1024 * 1024)
    }
}
