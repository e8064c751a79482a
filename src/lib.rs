//! Validator state cache for proof-of-stake block-building relays.
//!
//! A relay has to answer two questions on its hot path: is this validator
//! known, and what is its latest signed fee-recipient / gas-limit
//! registration. `relay-datastore` keeps both in a hash-map backing store
//! (Redis in production) so answers are fast and survive restarts.
//!
//! # Layout in the store
//!
//! Three hash maps per deployment, keyed by lowercase hex pubkey:
//!
//! | Key | Field value |
//! |---|---|
//! | `boost-relay/<tag>:known-validators` | proposer index, base-10 |
//! | `boost-relay/<tag>:validators-registration` | registration timestamp, base-10 |
//! | `boost-relay/<tag>:validators-registration-timestamp` | signed registration, JSON |
//!
//! The last two suffixes are crossed relative to their content. Relays
//! already deployed use this layout, so it is kept for compatibility.
//!
//! # Example
//!
//! ```rust,no_run
//! use relay_datastore::{DatastoreConfigBuilder, PubkeyHex, ValidatorCache};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), relay_datastore::DatastoreError> {
//! let config = DatastoreConfigBuilder::new()
//!     .redis_uri("localhost:6379")
//!     .deployment_tag("holesky")
//!     .build();
//! let cache = ValidatorCache::connect(&config).await?;
//!
//! let pubkey = PubkeyHex::new("0x8f1c...");
//! if let Some(registration) = cache.get_registration(&pubkey).await? {
//!     println!("gas limit {}", registration.message.gas_limit);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `redis` (default): [`RedisStore`] and [`ValidatorCache::connect`]

mod cache;
mod config;
mod errors;
mod keys;
mod spans;
mod store;
mod types;

pub use cache::ValidatorCache;
pub use config::constants;
pub use config::{DatastoreConfig, DatastoreConfigBuilder};
pub use errors::{DatastoreError, StoreError};
pub use keys::KeyNamespace;
#[cfg(feature = "redis")]
pub use store::RedisStore;
pub use store::{HashStore, MemoryStore};
pub use types::pubkey::{BlsPublicKey, BlsSignature, PubkeyHex};
pub use types::registration::{SignedValidatorRegistration, ValidatorRegistration};
