//! Known-validator records: pubkey -> proposer index

use std::collections::HashMap;
use tracing::{debug, warn, Instrument};

use super::ValidatorCache;
use crate::errors::DatastoreError;
use crate::spans;
use crate::types::pubkey::PubkeyHex;

impl ValidatorCache {
    /// Reads every known validator in one round trip
    ///
    /// A field whose value is not a base-10 `u64` is left out of the result
    /// and logged at `warn`; it does not fail the read. Only a failure of the
    /// bulk read itself is returned as an error.
    ///
    /// Fields are lowercased. If the map holds the same pubkey under two
    /// casings only one survives, and the collision is logged at `warn`.
    pub async fn get_all_known_validators(
        &self,
    ) -> Result<HashMap<PubkeyHex, u64>, DatastoreError> {
        async move {
            let key = self.keys.known_validators();
            let entries = self.store.hgetall(key).await?;

            let mut validators = HashMap::with_capacity(entries.len());
            let mut skipped = 0usize;
            for (pubkey, raw) in entries {
                match super::parse_stored_u64(&raw) {
                    Some(proposer_index) => {
                        let normalized = PubkeyHex::new(&pubkey);
                        if let Some(previous) = validators.insert(normalized, proposer_index) {
                            warn!(
                                key,
                                pubkey = %pubkey,
                                previous,
                                kept = proposer_index,
                                "Known validator stored under more than one casing"
                            );
                        }
                    }
                    None => {
                        skipped += 1;
                        warn!(
                            key,
                            pubkey = %pubkey,
                            value = %String::from_utf8_lossy(&raw),
                            "Skipping known validator with malformed proposer index"
                        );
                    }
                }
            }

            debug!(count = validators.len(), skipped, "Loaded known validators");
            Ok(validators)
        }
        .instrument(spans::get_all_known_validators(&self.keys))
        .await
    }

    /// Records `pubkey` as known with `proposer_index`
    ///
    /// Overwrites any previous index for the same pubkey (last writer wins).
    pub async fn set_known_validator(
        &self,
        pubkey: &PubkeyHex,
        proposer_index: u64,
    ) -> Result<(), DatastoreError> {
        async move {
            let value = proposer_index.to_string();
            self.store
                .hset(self.keys.known_validators(), pubkey.as_str(), value.as_bytes())
                .await?;
            Ok(())
        }
        .instrument(spans::set_known_validator(pubkey, proposer_index))
        .await
    }
}
