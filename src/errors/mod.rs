//! Error types for the relay-datastore library.
//!
//! It follows a two-level approach:
//!
//! - [`StoreError`] for failures of individual backing store commands
//! - [`DatastoreError`] for everything a [`ValidatorCache`](crate::ValidatorCache)
//!   operation can return, with `StoreError` converting into it via `From`
//!
//! "Not found" is never an error here. Missing registrations come back as
//! `None`, missing timestamps as `0`.
//!
//! # Examples
//!
//! ```rust,ignore
//! use relay_datastore::{DatastoreError, PubkeyHex, ValidatorCache};
//!
//! async fn example(cache: &ValidatorCache, pubkey: &PubkeyHex) {
//!     match cache.get_registration(pubkey).await {
//!         Ok(Some(registration)) => println!("fee recipient: {}", registration.message.fee_recipient),
//!         Ok(None) => println!("validator never registered"),
//!         Err(DatastoreError::Deserialization { pubkey, .. }) => {
//!             eprintln!("corrupt registration stored for {pubkey}");
//!         }
//!         Err(DatastoreError::Store(e)) => eprintln!("store failure, caller may retry: {e}"),
//!         Err(e) => eprintln!("other error: {e}"),
//!     }
//! }
//! ```

mod store;

pub use store::StoreError;

/// Unified error type for all cache operations.
#[derive(Debug, thiserror::Error)]
pub enum DatastoreError {
    /// The backing store could not be reached while constructing the cache.
    ///
    /// Fatal to cache usability. The caller decides whether to retry construction.
    #[error(
        "{backend} backing store{} is unreachable",
        .address.as_ref().map(|a| format!(" at {a}")).unwrap_or_default()
    )]
    Connection {
        /// Name of the store implementation, e.g. `RedisStore`
        backend: &'static str,
        /// Address the cache tried to connect to, when the store has one
        address: Option<String>,
        /// The underlying connection or probe error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A read, write or count against the backing store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A registration could not be encoded for storage.
    #[error("Failed to serialize registration for {pubkey}")]
    Serialization {
        /// Lowercase pubkey of the registration
        pubkey: String,
        /// The underlying encoding error
        #[source]
        source: serde_json::Error,
    },

    /// Stored registration bytes could not be decoded.
    #[error("Failed to deserialize registration for {pubkey}")]
    Deserialization {
        /// Lowercase pubkey whose payload is corrupt
        pubkey: String,
        /// The underlying decoding error
        #[source]
        source: serde_json::Error,
    },

    /// Configuration read from the environment is invalid.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the invalid setting
        reason: String,
    },
}

impl DatastoreError {
    /// Create a `Connection` error from any connection or probe failure.
    pub fn connection(
        backend: &'static str,
        address: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DatastoreError::Connection {
            backend,
            address,
            source: Box::new(source),
        }
    }

    /// Create an `InvalidConfig` error with a reason.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        DatastoreError::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Returns `true` for store-level failures a caller may reasonably retry.
    pub fn is_store_error(&self) -> bool {
        matches!(self, DatastoreError::Store(_))
    }
}
