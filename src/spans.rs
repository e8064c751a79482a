//! Span creation helpers for cache operations.
//!
//! Telemetry is kept apart from cache logic: every instrumented operation has
//! a helper here that builds its span, and the operation attaches it with
//! [`tracing::Instrument`] so the returned future stays `Send`.
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     async move {
//!         // Cache logic here
//!     }
//!     .instrument(spans::my_operation(param_value))
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::keys::KeyNamespace;
use crate::types::pubkey::PubkeyHex;

/// Create span for bootstrapping a cache against a backing store.
///
/// Parent: None (root span for this operation)
/// Children: store liveness probe
#[inline]
pub(crate) fn bootstrap(backend: &'static str, namespace: &KeyNamespace) -> Span {
    tracing::span!(
        Level::INFO,
        "relay_datastore.bootstrap",
        backend = backend,
        namespace = %namespace,
    )
}

/// Create span for reading the full known-validator snapshot.
#[inline]
pub(crate) fn get_all_known_validators(namespace: &KeyNamespace) -> Span {
    tracing::debug_span!(
        "relay_datastore.get_all_known_validators",
        namespace = %namespace,
    )
}

/// Create span for writing one known validator.
#[inline]
pub(crate) fn set_known_validator(pubkey: &PubkeyHex, proposer_index: u64) -> Span {
    tracing::trace_span!(
        "relay_datastore.set_known_validator",
        pubkey = %pubkey,
        proposer_index = proposer_index,
    )
}

/// Create span for reading a registration payload.
#[inline]
pub(crate) fn get_registration(pubkey: &PubkeyHex) -> Span {
    tracing::trace_span!("relay_datastore.get_registration", pubkey = %pubkey)
}

/// Create span for reading a registration timestamp.
#[inline]
pub(crate) fn get_registration_timestamp(pubkey: &PubkeyHex) -> Span {
    tracing::trace_span!("relay_datastore.get_registration_timestamp", pubkey = %pubkey)
}

/// Create span for the two-phase write of one registration.
///
/// Parent: set_registrations span when called from a batch
#[inline]
pub(crate) fn set_registration(pubkey: &PubkeyHex, timestamp: u64) -> Span {
    tracing::debug_span!(
        "relay_datastore.set_registration",
        pubkey = %pubkey,
        timestamp = timestamp,
    )
}

/// Create span for a batch of registration writes.
///
/// Parent: None (root span for this operation)
/// Children: set_registration spans (one per entry)
#[inline]
pub(crate) fn set_registrations(count: usize) -> Span {
    tracing::span!(
        Level::INFO,
        "relay_datastore.set_registrations",
        count = count,
    )
}

/// Create span for counting registered validators.
#[inline]
pub(crate) fn count_registered(namespace: &KeyNamespace) -> Span {
    tracing::debug_span!("relay_datastore.count_registered", namespace = %namespace)
}
