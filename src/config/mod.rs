//! Configuration for relay-datastore
//!
//! This module controls where the backing store lives, which key namespace
//! the cache reads and writes, and how long store commands may take.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use relay_datastore::DatastoreConfig;
//!
//! // localhost:6379, keys under boost-relay/mainnet, no timeouts
//! let config = DatastoreConfig::default();
//! assert_eq!(config.key_prefix, "boost-relay");
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use relay_datastore::DatastoreConfigBuilder;
//! use std::time::Duration;
//!
//! let config = DatastoreConfigBuilder::new()
//!     .redis_uri("redis.internal:6379")
//!     .deployment_tag("holesky")
//!     .command_timeout(Duration::from_millis(500))
//!     .build();
//! ```
//!
//! # Example: From the environment
//!
//! ```rust,no_run
//! use relay_datastore::DatastoreConfig;
//!
//! // Reads REDIS_URI, REDIS_DEPLOYMENT_TAG, ... (a .env file is honored)
//! let config = DatastoreConfig::from_env()?;
//! # Ok::<(), relay_datastore::DatastoreError>(())
//! ```

use std::time::Duration;

use crate::errors::DatastoreError;

pub mod constants;

use constants::{env, DEFAULT_DEPLOYMENT_TAG, DEFAULT_KEY_PREFIX, DEFAULT_REDIS_URI};

/// Configuration for a [`ValidatorCache`](crate::ValidatorCache)
///
/// Use [`DatastoreConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastoreConfig {
    /// Address of the backing store
    /// Default: `localhost:6379` (a bare `host:port` is treated as `redis://host:port`)
    pub redis_uri: String,

    /// Root prefix of every key
    /// Default: `boost-relay`
    pub key_prefix: String,

    /// Deployment tag separating relays that share one store, usually the network name
    /// Default: `mainnet`
    pub deployment_tag: String,

    /// Upper bound on a single store command
    /// Default: None (wait for the store)
    pub command_timeout: Option<Duration>,

    /// Upper bound on opening the connection and on the `PING` that verifies it
    /// Default: None
    pub connect_timeout: Option<Duration>,
}

impl Default for DatastoreConfig {
    fn default() -> Self {
        Self {
            redis_uri: DEFAULT_REDIS_URI.to_string(),
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            deployment_tag: DEFAULT_DEPLOYMENT_TAG.to_string(),
            command_timeout: None,
            connect_timeout: None,
        }
    }
}

impl DatastoreConfig {
    /// Build a config from environment variables, falling back to defaults
    ///
    /// Variables are looked up through `dotenvy`, so values from a `.env`
    /// file in the working directory are honored.
    ///
    /// | Variable | Field |
    /// |---|---|
    /// | `REDIS_URI` | `redis_uri` |
    /// | `REDIS_KEY_PREFIX` | `key_prefix` |
    /// | `REDIS_DEPLOYMENT_TAG` | `deployment_tag` |
    /// | `REDIS_COMMAND_TIMEOUT_MS` | `command_timeout` |
    /// | `REDIS_CONNECT_TIMEOUT_MS` | `connect_timeout` |
    pub fn from_env() -> Result<Self, DatastoreError> {
        Self::from_lookup(|name| dotenvy::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup
    ///
    /// # Example
    ///
    /// ```rust
    /// use relay_datastore::DatastoreConfig;
    /// use std::collections::HashMap;
    /// use std::time::Duration;
    ///
    /// let vars = HashMap::from([
    ///     ("REDIS_DEPLOYMENT_TAG", "sepolia"),
    ///     ("REDIS_COMMAND_TIMEOUT_MS", "250"),
    /// ]);
    /// let config = DatastoreConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))?;
    ///
    /// assert_eq!(config.deployment_tag, "sepolia");
    /// assert_eq!(config.command_timeout, Some(Duration::from_millis(250)));
    /// # Ok::<(), relay_datastore::DatastoreError>(())
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DatastoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(uri) = lookup(env::REDIS_URI) {
            config.redis_uri = uri;
        }
        if let Some(prefix) = lookup(env::KEY_PREFIX) {
            config.key_prefix = prefix;
        }
        if let Some(tag) = lookup(env::DEPLOYMENT_TAG) {
            config.deployment_tag = tag;
        }
        config.command_timeout =
            parse_millis(env::COMMAND_TIMEOUT_MS, lookup(env::COMMAND_TIMEOUT_MS))?;
        config.connect_timeout =
            parse_millis(env::CONNECT_TIMEOUT_MS, lookup(env::CONNECT_TIMEOUT_MS))?;

        Ok(config)
    }

    /// Store address in URL form, as accepted by the Redis client
    ///
    /// # Example
    ///
    /// ```rust
    /// use relay_datastore::DatastoreConfigBuilder;
    ///
    /// let config = DatastoreConfigBuilder::new().redis_uri("10.0.0.5:6379").build();
    /// assert_eq!(config.redis_url(), "redis://10.0.0.5:6379");
    ///
    /// let config = DatastoreConfigBuilder::new().redis_uri("rediss://cache:6380/1").build();
    /// assert_eq!(config.redis_url(), "rediss://cache:6380/1");
    /// ```
    pub fn redis_url(&self) -> String {
        if self.redis_uri.contains("://") {
            self.redis_uri.clone()
        } else {
            format!("redis://{}", self.redis_uri)
        }
    }
}

fn parse_millis(name: &str, value: Option<String>) -> Result<Option<Duration>, DatastoreError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let millis: u64 = value.trim().parse().map_err(|_| {
        DatastoreError::invalid_config(format!("{name} must be milliseconds, got {value:?}"))
    })?;
    Ok(Some(Duration::from_millis(millis)))
}

/// Builder for [`DatastoreConfig`]
///
/// # Example
///
/// ```rust
/// use relay_datastore::DatastoreConfigBuilder;
/// use std::time::Duration;
///
/// let config = DatastoreConfigBuilder::new()
///     .deployment_tag("holesky")
///     .connect_timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(config.deployment_tag, "holesky");
/// ```
#[derive(Debug, Default)]
pub struct DatastoreConfigBuilder {
    config: DatastoreConfig,
}

impl DatastoreConfigBuilder {
    /// Create a new builder starting from [`DatastoreConfig::default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing store address
    pub fn redis_uri(mut self, uri: impl Into<String>) -> Self {
        self.config.redis_uri = uri.into();
        self
    }

    /// Set the root key prefix
    ///
    /// Only change this when the store is not shared with existing relays.
    pub fn key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.key_prefix = prefix.into();
        self
    }

    /// Set the deployment tag
    pub fn deployment_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.deployment_tag = tag.into();
        self
    }

    /// Set the per-command timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.config.command_timeout = Some(timeout);
        self
    }

    /// Set the connection and probe timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> DatastoreConfig {
        self.config
    }
}
