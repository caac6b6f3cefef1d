//! Store configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::errors::{ComputableError, ComputableResult};

/// Environment variable overriding [`StoreConfig::max_depth`]
pub const ENV_MAX_DEPTH: &str = "COMPUTABLE_MAX_DEPTH";

/// Environment variable overriding [`StoreConfig::skip_unchanged`]
pub const ENV_SKIP_UNCHANGED: &str = "COMPUTABLE_SKIP_UNCHANGED";

/// Configuration for a [`Store`](crate::store::Store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of derived fields being recomputed at once
    /// (derived fields reading other derived fields nest)
    pub max_depth: usize,
    /// Skip invalidation and notification when a set stores a value equal
    /// to the current one
    pub skip_unchanged: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            skip_unchanged: true,
        }
    }
}

impl StoreConfig {
    /// Build a configuration from defaults overridden by environment variables
    pub fn from_env() -> ComputableResult<Self> {
        let mut config = Self::default();
        if let Some(depth) = read_var::<usize>(ENV_MAX_DEPTH)? {
            config.max_depth = depth;
        }
        if let Some(skip) = read_var::<bool>(ENV_SKIP_UNCHANGED)? {
            config.skip_unchanged = skip;
        }
        Ok(config)
    }

    /// Set the maximum recomputation depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set whether unchanged assignments are ignored
    pub fn with_skip_unchanged(mut self, skip_unchanged: bool) -> Self {
        self.skip_unchanged = skip_unchanged;
        self
    }
}

fn read_var<T: FromStr>(name: &str) -> ComputableResult<Option<T>> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ComputableError::Configuration(format!("{name} has invalid value {raw:?}"))
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ComputableError::Configuration(format!(
            "{name} is not valid unicode"
        ))),
    }
}
