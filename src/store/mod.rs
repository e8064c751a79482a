//! Backing store capability
//!
//! The cache needs very little from its store: named hash maps with
//! single-field set/get, a bulk read, a field count, and a liveness probe.
//! [`HashStore`] captures exactly that, so the network store can be swapped
//! for an in-process one in tests or single-node setups.
//!
//! - [`RedisStore`]: Redis over a multiplexed async connection (feature `redis`, default)
//! - [`MemoryStore`]: process-local maps, no persistence
//!
//! # Examples
//!
//! ```rust
//! use relay_datastore::{HashStore, MemoryStore};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), relay_datastore::StoreError> {
//! let store = MemoryStore::new();
//! store.hset("validators", "0xabc", b"7").await?;
//!
//! assert_eq!(store.hget("validators", "0xabc").await?, Some(b"7".to_vec()));
//! assert_eq!(store.hlen("validators").await?, 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::collections::HashMap;

use crate::errors::StoreError;

mod memory;
#[cfg(feature = "redis")]
mod redis;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

/// Remote hash-map service underlying the cache
///
/// Each method is a single store round trip. Implementations must not retry
/// internally; failures go back to the caller as [`StoreError`].
///
/// # Thread Safety
///
/// Implementations are shared behind an `Arc` and called concurrently from
/// many tasks.
///
/// # Cancellation
///
/// Dropping a returned future must be safe. A command that was already sent
/// may or may not have been applied.
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Checks that the store is reachable
    async fn ping(&self) -> Result<(), StoreError>;

    /// Sets `field` of map `key` to `value`, replacing any previous value
    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Reads `field` of map `key`, or `None` if the field does not exist
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Reads every field of map `key` in one round trip
    ///
    /// A missing map reads as empty.
    async fn hgetall(&self, key: &str) -> Result<HashMap<String, Vec<u8>>, StoreError>;

    /// Number of fields in map `key`
    async fn hlen(&self, key: &str) -> Result<u64, StoreError>;

    /// Returns a human-readable name for this store backend
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;
}
