//! Startup configuration for the dispatch core.
//!
//! Configuration is read once, validated, and handed to the storage adapters
//! and services by constructor. Nothing downstream reads the environment.

use crate::delivery::domain::{ParseTransitionPolicyError, TransitionPolicy};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL_VAR: &str = "DISPATCH_DATABASE_URL";
/// Environment variable holding the maximum pool size.
pub const POOL_SIZE_VAR: &str = "DISPATCH_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "DISPATCH_CONNECT_TIMEOUT_SECS";
/// Environment variable selecting the goal status transition policy.
pub const TRANSITION_POLICY_VAR: &str = "DISPATCH_TRANSITION_POLICY";

/// Errors raised while assembling configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or blank.
    #[error("missing required configuration value {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be parsed.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value supplied.
        value: String,
        /// Parse failure description.
        reason: String,
    },
}

/// Storage collaborator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    #[serde(default = "StoreConfig::default_pool_size")]
    pub max_pool_size: u32,
    /// Seconds to wait for a pooled connection before failing.
    #[serde(default = "StoreConfig::default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl StoreConfig {
    const DEFAULT_POOL_SIZE: u32 = 8;
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

    /// Creates store settings with default pool sizing.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_pool_size: Self::DEFAULT_POOL_SIZE,
            connect_timeout_secs: Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    const fn default_pool_size() -> u32 {
        Self::DEFAULT_POOL_SIZE
    }

    const fn default_connect_timeout_secs() -> u64 {
        Self::DEFAULT_CONNECT_TIMEOUT_SECS
    }
}

/// Complete configuration for a dispatch deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Storage settings.
    pub store: StoreConfig,
    /// Goal status transition policy.
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
}

impl DispatchConfig {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or any value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the database URL is missing or any value
    /// fails to parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let mut store = StoreConfig::new(database_url);
        if let Some(raw) = lookup(POOL_SIZE_VAR) {
            store.max_pool_size = parse_value(POOL_SIZE_VAR, &raw)?;
            if store.max_pool_size == 0 {
                return Err(ConfigError::Invalid {
                    key: POOL_SIZE_VAR,
                    value: raw,
                    reason: "pool size must be positive".to_owned(),
                });
            }
        }
        if let Some(raw) = lookup(CONNECT_TIMEOUT_VAR) {
            store.connect_timeout_secs = parse_value(CONNECT_TIMEOUT_VAR, &raw)?;
        }

        let transition_policy = match lookup(TRANSITION_POLICY_VAR) {
            Some(raw) => TransitionPolicy::try_from(raw.as_str()).map_err(
                |err: ParseTransitionPolicyError| ConfigError::Invalid {
                    key: TRANSITION_POLICY_VAR,
                    value: raw.clone(),
                    reason: err.to_string(),
                },
            )?,
            None => TransitionPolicy::default(),
        };

        Ok(Self {
            store,
            transition_policy,
        })
    }
}

fn parse_value<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|err| ConfigError::Invalid {
        key,
        value: raw.to_owned(),
        reason: err.to_string(),
    })
}
