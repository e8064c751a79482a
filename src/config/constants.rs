//! Well-known key names and defaults
//!
//! Key prefixes and suffixes are shared with relays already deployed against
//! the same store, so they must not change.

/// Root prefix of every key written by the relay
pub const DEFAULT_KEY_PREFIX: &str = "boost-relay";

/// Deployment tag used when none is configured
pub const DEFAULT_DEPLOYMENT_TAG: &str = "mainnet";

/// Store address used when none is configured
pub const DEFAULT_REDIS_URI: &str = "localhost:6379";

/// Key suffixes of the three hash maps
pub mod suffixes {
    /// pubkey -> proposer index
    pub const KNOWN_VALIDATORS: &str = "known-validators";

    /// Suffix of the map holding registration *payloads*.
    ///
    /// The name says "timestamp", the content is the serialized registration.
    /// Existing deployments store data this way.
    pub const VALIDATOR_REGISTRATION_PAYLOAD: &str = "validators-registration-timestamp";

    /// Suffix of the map holding registration *timestamps*.
    pub const VALIDATOR_REGISTRATION_TIMESTAMP: &str = "validators-registration";
}

/// Environment variables read by [`DatastoreConfig::from_env`](crate::DatastoreConfig::from_env)
pub mod env {
    pub const REDIS_URI: &str = "REDIS_URI";
    pub const KEY_PREFIX: &str = "REDIS_KEY_PREFIX";
    pub const DEPLOYMENT_TAG: &str = "REDIS_DEPLOYMENT_TAG";
    pub const COMMAND_TIMEOUT_MS: &str = "REDIS_COMMAND_TIMEOUT_MS";
    pub const CONNECT_TIMEOUT_MS: &str = "REDIS_CONNECT_TIMEOUT_MS";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_and_timestamp_suffixes_are_distinct() {
        assert_ne!(
            suffixes::VALIDATOR_REGISTRATION_PAYLOAD,
            suffixes::VALIDATOR_REGISTRATION_TIMESTAMP
        );
    }

    #[test]
    fn default_prefix_matches_deployed_relays() {
        assert_eq!(DEFAULT_KEY_PREFIX, "boost-relay");
    }
}
