//! Key namespace for the three validator hash maps.

use std::fmt;

use crate::config::constants::suffixes;

/// Fully-qualified store keys for one deployment
///
/// Keys have the form `<prefix>/<deployment-tag>:<suffix>`. They are resolved
/// once when a cache is built; two caches built with the same prefix and tag
/// address the same records, which lets several processes share one store.
///
/// # Examples
///
/// ```
/// use relay_datastore::KeyNamespace;
///
/// let keys = KeyNamespace::new("boost-relay", "mainnet");
/// assert_eq!(keys.known_validators(), "boost-relay/mainnet:known-validators");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyNamespace {
    base: String,
    known_validators: String,
    registration_payload: String,
    registration_timestamp: String,
}

impl KeyNamespace {
    /// Resolves the keys for `prefix` and `deployment_tag`.
    pub fn new(prefix: &str, deployment_tag: &str) -> Self {
        let base = format!("{prefix}/{deployment_tag}");
        Self {
            known_validators: format!("{base}:{}", suffixes::KNOWN_VALIDATORS),
            // Suffixes are crossed relative to their content. Deployed relays
            // already read and write these exact keys.
            registration_payload: format!("{base}:{}", suffixes::VALIDATOR_REGISTRATION_PAYLOAD),
            registration_timestamp: format!(
                "{base}:{}",
                suffixes::VALIDATOR_REGISTRATION_TIMESTAMP
            ),
            base,
        }
    }

    /// Map of pubkey -> proposer index
    pub fn known_validators(&self) -> &str {
        &self.known_validators
    }

    /// Map of pubkey -> serialized signed registration
    ///
    /// Physically `<base>:validators-registration-timestamp`.
    pub fn registration_payload(&self) -> &str {
        &self.registration_payload
    }

    /// Map of pubkey -> registration timestamp
    ///
    /// Physically `<base>:validators-registration`.
    pub fn registration_timestamp(&self) -> &str {
        &self.registration_timestamp
    }
}

impl fmt::Display for KeyNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
