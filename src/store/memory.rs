// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! In-memory hash store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

use super::HashStore;
use crate::errors::StoreError;

/// Process-local implementation of [`HashStore`]
///
/// Holds every map in a `HashMap` behind a `tokio::sync::RwLock`. Nothing
/// survives a restart, so this backend is meant for tests and single-process
/// relays. Share one instance through an `Arc` to let several caches see the
/// same records.
///
/// # Examples
///
/// ```rust
/// use relay_datastore::{MemoryStore, ValidatorCache};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), relay_datastore::DatastoreError> {
/// let store = Arc::new(MemoryStore::new());
/// let cache = ValidatorCache::new(store.clone(), "boost-relay", "mainnet").await?;
/// # Ok(())
/// # }
/// ```
///
/// # Performance
///
/// - `hset`/`hget`/`hlen`: O(1) average case
/// - `hgetall`: O(n) in the size of the map (the map is cloned)
#[derive(Debug, Default)]
pub struct MemoryStore {
    maps: RwLock<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HashStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut maps = self.maps.write().await;
        trace!(key, field, len = value.len(), "HSET (memory)");
        maps.entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_vec());
        Ok(())
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let maps = self.maps.read().await;
        Ok(maps.get(key).and_then(|map| map.get(field)).cloned())
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        let maps = self.maps.read().await;
        Ok(maps.get(key).cloned().unwrap_or_default())
    }

    async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
        let maps = self.maps.read().await;
        Ok(maps.get(key).map_or(0, |map| map.len() as u64))
    }

    fn name(&self) -> &'static str {
        "MemoryStore"
    }
}
