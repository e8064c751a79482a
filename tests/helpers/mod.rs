// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for relay-datastore integration tests
//!
//! Provides registration fixtures and `HashStore` doubles that inject
//! failures or stall, so partial-write behavior can be tested without a
//! real Redis server.

#![allow(dead_code)]

use alloy_primitives::{Address, FixedBytes};
use async_trait::async_trait;
use relay_datastore::{
    HashStore, MemoryStore, SignedValidatorRegistration, StoreError, ValidatorCache,
    ValidatorRegistration,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_PREFIX: &str = "boost-relay";
pub const TEST_TAG: &str = "testnet";

/// Registration whose pubkey is 48 copies of `key_byte`
pub fn registration(key_byte: u8, timestamp: u64) -> SignedValidatorRegistration {
    SignedValidatorRegistration {
        message: ValidatorRegistration {
            fee_recipient: Address::repeat_byte(key_byte.wrapping_add(1)),
            gas_limit: 30_000_000,
            timestamp,
            pubkey: FixedBytes::repeat_byte(key_byte),
        },
        signature: FixedBytes::repeat_byte(0xcd),
    }
}

/// Cache over a fresh in-memory store, with the store handle for direct inspection
pub async fn memory_cache() -> (ValidatorCache, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let cache = ValidatorCache::new(store.clone(), TEST_PREFIX, TEST_TAG)
        .await
        .expect("memory store is always reachable");
    (cache, store)
}

fn injected(command: &'static str, key: &str) -> StoreError {
    StoreError::command_failed(
        command,
        key,
        std::io::Error::new(std::io::ErrorKind::BrokenPipe, "injected failure"),
    )
}

/// HashStore wrapper that fails selected commands
///
/// Delegates to an inner [`MemoryStore`] and records every successful HSET.
///
/// # Example
///
/// ```rust,ignore
/// let store = FaultyStore::new()
///     .fail_hset_field("0xbbbb...")   // every HSET on this field fails
///     .fail_hset_key("...:validators-registration-timestamp"); // payload writes fail
/// ```
#[derive(Default)]
pub struct FaultyStore {
    inner: MemoryStore,
    fail_ping: AtomicBool,
    fail_reads: AtomicBool,
    fail_hset_fields: Mutex<Vec<String>>,
    fail_hset_keys: Mutex<Vec<String>>,
    hset_calls: AtomicUsize,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the liveness probe fail
    pub fn fail_ping(self) -> Self {
        self.fail_ping.store(true, Ordering::SeqCst);
        self
    }

    /// Make HGET, HGETALL and HLEN fail
    pub fn fail_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    /// Make every HSET on `field` fail, whatever the key
    pub fn fail_hset_field(self, field: impl Into<String>) -> Self {
        self.fail_hset_fields.lock().unwrap().push(field.into());
        self
    }

    /// Make every HSET on `key` fail, whatever the field
    pub fn fail_hset_key(self, key: impl Into<String>) -> Self {
        self.fail_hset_keys.lock().unwrap().push(key.into());
        self
    }

    /// Number of HSET calls that reached the store, failed or not
    pub fn hset_calls(&self) -> usize {
        self.hset_calls.load(Ordering::SeqCst)
    }

    /// Direct access to the underlying data, bypassing fault injection
    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl HashStore for FaultyStore {
    async fn ping(&self) -> Result<(), StoreError> {
        if self.fail_ping.load(Ordering::SeqCst) {
            return Err(injected("PING", "faulty"));
        }
        self.inner.ping().await
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        self.hset_calls.fetch_add(1, Ordering::SeqCst);
        let fail_field = self.fail_hset_fields.lock().unwrap().iter().any(|f| f == field);
        let fail_key = self.fail_hset_keys.lock().unwrap().iter().any(|k| k == key);
        if fail_field || fail_key {
            return Err(injected("HSET", key));
        }
        self.inner.hset(key, field, value).await
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("HGET", key));
        }
        self.inner.hget(key, field).await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("HGETALL", key));
        }
        self.inner.hgetall(key).await
    }

    async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("HLEN", key));
        }
        self.inner.hlen(key).await
    }

    fn name(&self) -> &'static str {
        "FaultyStore"
    }
}

/// HashStore wrapper whose HSET on one key never completes
///
/// Used to cancel a registration write between its two commands.
pub struct StallingStore {
    inner: MemoryStore,
    stall_key: String,
}

impl StallingStore {
    pub fn new(stall_key: impl Into<String>) -> Self {
        Self {
            inner: MemoryStore::new(),
            stall_key: stall_key.into(),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

#[async_trait]
impl HashStore for StallingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        if key == self.stall_key {
            std::future::pending::<()>().await;
        }
        self.inner.hset(key, field, value).await
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.hget(key, field).await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        self.inner.hgetall(key).await
    }

    async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
        self.inner.hlen(key).await
    }

    fn name(&self) -> &'static str {
        "StallingStore"
    }
}
