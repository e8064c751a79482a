//! Validator cache
//!
//! [`ValidatorCache`] answers two questions for relay request handlers with
//! low latency: "is this validator known" and "what is its latest
//! registration". All state lives in the backing store; the cache itself only
//! holds the store handle and the resolved [`KeyNamespace`], so it is cheap to
//! clone and safe to share across tasks.
//!
//! Operations are split by the record they touch:
//!
//! - known validators (pubkey -> proposer index), see `known_validators.rs`
//! - registrations (pubkey -> signed registration + timestamp), see `registrations.rs`
//!
//! # Examples
//!
//! ```rust
//! use relay_datastore::{MemoryStore, PubkeyHex, ValidatorCache};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), relay_datastore::DatastoreError> {
//! let cache = ValidatorCache::new(Arc::new(MemoryStore::new()), "boost-relay", "mainnet").await?;
//!
//! cache.set_known_validator(&PubkeyHex::new("0xABC"), 7).await?;
//! let known = cache.get_all_known_validators().await?;
//! assert_eq!(known.get(&PubkeyHex::new("0xabc")), Some(&7));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Instrument};

use crate::errors::{DatastoreError, StoreError};
use crate::keys::KeyNamespace;
use crate::spans;
use crate::store::HashStore;

mod known_validators;
mod registrations;

/// Cache of known validators and their latest registrations
///
/// Every method delegates to the backing store without in-process locking,
/// transactions or retries. A method issuing several store commands is not
/// atomic: if it fails or is cancelled partway, commands already sent stay
/// applied and are visible to concurrent readers.
///
/// Cancelling a call means dropping its future (for example via
/// `tokio::time::timeout`). No further store command is issued for that call.
#[derive(Clone)]
pub struct ValidatorCache {
    store: Arc<dyn HashStore>,
    keys: KeyNamespace,
}

impl std::fmt::Debug for ValidatorCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorCache")
            .field("backend", &self.store.name())
            .field("keys", &self.keys)
            .finish()
    }
}

impl ValidatorCache {
    /// Builds a cache over `store` and verifies the store is reachable
    ///
    /// Keys are resolved once from `key_prefix` and `deployment_tag`.
    ///
    /// # Errors
    ///
    /// [`DatastoreError::Connection`] if the liveness probe fails. Nothing is
    /// retried; the caller decides whether to try again.
    pub async fn new(
        store: Arc<dyn HashStore>,
        key_prefix: &str,
        deployment_tag: &str,
    ) -> Result<Self, DatastoreError> {
        Self::bootstrap(store, KeyNamespace::new(key_prefix, deployment_tag), None, None).await
    }

    /// Connects to the Redis server named in `config` and builds a cache over it
    ///
    /// # Errors
    ///
    /// [`DatastoreError::Connection`] if the address does not parse, the
    /// connection cannot be opened, or the server does not answer `PING`.
    /// `connect_timeout` bounds both the handshake and the `PING`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use relay_datastore::{DatastoreConfig, ValidatorCache};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), relay_datastore::DatastoreError> {
    /// let config = DatastoreConfig::from_env()?;
    /// let cache = ValidatorCache::connect(&config).await?;
    /// println!("registered: {}", cache.count_registered().await?);
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "redis")]
    pub async fn connect(config: &crate::DatastoreConfig) -> Result<Self, DatastoreError> {
        use crate::store::RedisStore;

        let url = config.redis_url();
        let store = RedisStore::connect(&url, config.connect_timeout, config.command_timeout)
            .await
            .map_err(|e| DatastoreError::connection("RedisStore", Some(url.clone()), e))?;

        let keys = KeyNamespace::new(&config.key_prefix, &config.deployment_tag);
        Self::bootstrap(Arc::new(store), keys, Some(url), config.connect_timeout).await
    }

    async fn bootstrap(
        store: Arc<dyn HashStore>,
        keys: KeyNamespace,
        address: Option<String>,
        ping_timeout: Option<Duration>,
    ) -> Result<Self, DatastoreError> {
        let backend = store.name();
        let span = spans::bootstrap(backend, &keys);
        async move {
            let ping = match ping_timeout {
                Some(limit) => tokio::time::timeout(limit, store.ping())
                    .await
                    .unwrap_or_else(|_| {
                        Err(StoreError::timeout(
                            "PING",
                            address.as_deref().unwrap_or(backend),
                            limit,
                        ))
                    }),
                None => store.ping().await,
            };
            ping.map_err(|e| DatastoreError::connection(backend, address.clone(), e))?;

            info!(backend, address = ?address, namespace = %keys, "Validator cache ready");
            Ok(Self { store, keys })
        }
        .instrument(span)
        .await
    }

    /// Keys this cache reads and writes
    pub fn keys(&self) -> &KeyNamespace {
        &self.keys
    }

    /// Name of the backing store implementation
    pub fn backend(&self) -> &'static str {
        self.store.name()
    }
}

/// Parses a stored unsigned base-10 integer
///
/// Only ASCII digits are accepted; a sign, whitespace or an empty value is
/// malformed.
fn parse_stored_u64(raw: &[u8]) -> Option<u64> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(raw).ok()?.parse().ok()
}
