//! Registration records
//!
//! One logical record per pubkey, stored as two fields under the same pubkey
//! in two maps: the signing timestamp and the serialized signed registration.
//! Writes go timestamp first, payload second, as two separate commands.
//!
//! Partial failure leaves the maps out of step:
//!
//! | Failure point | Timestamp map | Payload map |
//! |---|---|---|
//! | timestamp write fails | unchanged | unchanged |
//! | serialization fails | new | old (or absent) |
//! | payload write fails or call cancelled | new | old (or absent) |
//!
//! Readers that need both halves must tolerate a timestamp without a matching
//! payload. Re-writing the registration repairs the record.

use tracing::{debug, Instrument};

use super::ValidatorCache;
use crate::errors::{DatastoreError, StoreError};
use crate::spans;
use crate::types::pubkey::PubkeyHex;
use crate::types::registration::SignedValidatorRegistration;

impl ValidatorCache {
    /// Latest registration stored for `pubkey`, or `None` if it never registered
    ///
    /// # Errors
    ///
    /// - [`DatastoreError::Deserialization`] if the stored payload does not decode
    /// - [`DatastoreError::Store`] on store failure
    pub async fn get_registration(
        &self,
        pubkey: &PubkeyHex,
    ) -> Result<Option<SignedValidatorRegistration>, DatastoreError> {
        async move {
            let raw = self
                .store
                .hget(self.keys.registration_payload(), pubkey.as_str())
                .await?;

            let Some(raw) = raw else {
                debug!("No registration stored");
                return Ok(None);
            };

            let registration = serde_json::from_slice(&raw).map_err(|source| {
                DatastoreError::Deserialization {
                    pubkey: pubkey.to_string(),
                    source,
                }
            })?;
            Ok(Some(registration))
        }
        .instrument(spans::get_registration(pubkey))
        .await
    }

    /// Signing timestamp of the latest registration for `pubkey`, or `0` if none
    ///
    /// # Errors
    ///
    /// [`DatastoreError::Store`] on store failure, including a stored value that
    /// is not a base-10 `u64` ([`StoreError::UnexpectedValue`]).
    pub async fn get_registration_timestamp(
        &self,
        pubkey: &PubkeyHex,
    ) -> Result<u64, DatastoreError> {
        async move {
            let key = self.keys.registration_timestamp();
            let Some(raw) = self.store.hget(key, pubkey.as_str()).await? else {
                return Ok(0);
            };

            let timestamp = super::parse_stored_u64(&raw).ok_or_else(|| {
                StoreError::unexpected_value(
                    key,
                    pubkey.as_str(),
                    format!(
                        "timestamp {:?} is not a base-10 integer",
                        String::from_utf8_lossy(&raw)
                    ),
                )
            })?;
            Ok(timestamp)
        }
        .instrument(spans::get_registration_timestamp(pubkey))
        .await
    }

    /// Stores `entry` as the latest registration for its pubkey
    ///
    /// Replaces both the timestamp and the payload unconditionally, even when
    /// the stored registration carries a newer timestamp. Concurrent writers to
    /// the same pubkey race; whichever write reaches the store last wins.
    ///
    /// The two writes are not atomic; see the module docs for what a failure
    /// between them leaves behind.
    pub async fn set_registration(
        &self,
        entry: &SignedValidatorRegistration,
    ) -> Result<(), DatastoreError> {
        let pubkey = entry.pubkey_hex();
        let span = spans::set_registration(&pubkey, entry.timestamp());
        async move {
            let timestamp = entry.timestamp().to_string();
            self.store
                .hset(
                    self.keys.registration_timestamp(),
                    pubkey.as_str(),
                    timestamp.as_bytes(),
                )
                .await?;

            let payload = serde_json::to_vec(entry).map_err(|source| {
                DatastoreError::Serialization {
                    pubkey: pubkey.to_string(),
                    source,
                }
            })?;

            self.store
                .hset(self.keys.registration_payload(), pubkey.as_str(), &payload)
                .await?;

            debug!("Stored registration");
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Stores each entry in order with [`set_registration`](Self::set_registration)
    ///
    /// Stops at the first failure and returns it. Entries before the failing
    /// one stay committed, entries after it are not attempted.
    pub async fn set_registrations(
        &self,
        entries: &[SignedValidatorRegistration],
    ) -> Result<(), DatastoreError> {
        async move {
            for (index, entry) in entries.iter().enumerate() {
                if let Err(e) = self.set_registration(entry).await {
                    debug!(
                        committed = index,
                        failed_pubkey = %entry.pubkey_hex(),
                        "Registration batch stopped"
                    );
                    return Err(e);
                }
            }
            Ok(())
        }
        .instrument(spans::set_registrations(entries.len()))
        .await
    }

    /// Number of distinct pubkeys with a registration timestamp
    ///
    /// Used as the count of registered validators.
    pub async fn count_registered(&self) -> Result<u64, DatastoreError> {
        async move {
            let count = self.store.hlen(self.keys.registration_timestamp()).await?;
            Ok(count)
        }
        .instrument(spans::count_registered(&self.keys))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{HashStore, MemoryStore};
    use crate::types::registration::ValidatorRegistration;
    use alloy_primitives::{Address, FixedBytes};
    use std::sync::Arc;

    fn create_test_registration(key_byte: u8, timestamp: u64) -> SignedValidatorRegistration {
        SignedValidatorRegistration {
            message: ValidatorRegistration {
                fee_recipient: Address::repeat_byte(0x11),
                gas_limit: 30_000_000,
                timestamp,
                pubkey: FixedBytes::repeat_byte(key_byte),
            },
            signature: FixedBytes::repeat_byte(0xcd),
        }
    }

    async fn create_test_cache() -> (ValidatorCache, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = ValidatorCache::new(store.clone(), "boost-relay", "test")
            .await
            .unwrap();
        (cache, store)
    }

    #[tokio::test]
    async fn test_set_registration_writes_crossed_keys() {
        let (cache, store) = create_test_cache().await;
        let registration = create_test_registration(0xab, 1_700_000_000);
        let field = registration.pubkey_hex();

        cache.set_registration(&registration).await.unwrap();

        // Timestamp lives under the "validators-registration" key
        let timestamp = store
            .hget("boost-relay/test:validators-registration", field.as_str())
            .await
            .unwrap();
        assert_eq!(timestamp, Some(b"1700000000".to_vec()));

        // Payload lives under the "validators-registration-timestamp" key
        let payload = store
            .hget("boost-relay/test:validators-registration-timestamp", field.as_str())
            .await
            .unwrap()
            .unwrap();
        let decoded: SignedValidatorRegistration = serde_json::from_slice(&payload).unwrap();
        assert_eq!(decoded, registration);
    }

    #[tokio::test]
    async fn test_corrupt_payload_is_deserialization_error() {
        let (cache, store) = create_test_cache().await;
        let pubkey = PubkeyHex::new("0xabc");
        store
            .hset(cache.keys().registration_payload(), pubkey.as_str(), b"{not json")
            .await
            .unwrap();

        let err = cache.get_registration(&pubkey).await.unwrap_err();
        assert!(matches!(err, DatastoreError::Deserialization { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_timestamp_is_store_error() {
        let (cache, store) = create_test_cache().await;
        let pubkey = PubkeyHex::new("0xabc");
        store
            .hset(cache.keys().registration_timestamp(), pubkey.as_str(), b"yesterday")
            .await
            .unwrap();

        let err = cache.get_registration_timestamp(&pubkey).await.unwrap_err();
        assert!(matches!(
            err,
            DatastoreError::Store(StoreError::UnexpectedValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_signed_timestamp_is_store_error() {
        let (cache, store) = create_test_cache().await;
        let pubkey = PubkeyHex::new("0xcc");
        store
            .hset(cache.keys().registration_timestamp(), pubkey.as_str(), b"+9")
            .await
            .unwrap();

        let err = cache.get_registration_timestamp(&pubkey).await.unwrap_err();
        assert!(matches!(
            err,
            DatastoreError::Store(StoreError::UnexpectedValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_batch_is_ok() {
        let (cache, _store) = create_test_cache().await;
        cache.set_registrations(&[]).await.unwrap();
        assert_eq!(cache.count_registered().await.unwrap(), 0);
    }
}
