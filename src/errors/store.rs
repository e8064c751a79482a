//! Error types for backing store operations.
//!
//! Every [`HashStore`](crate::HashStore) implementation reports failures through
//! [`StoreError`], independent of the transport it wraps.

use std::time::Duration;

/// Errors that can occur while executing a command against the backing store.
///
/// These are transport- or protocol-level failures. They are surfaced to the
/// caller verbatim; nothing in this crate retries them.
///
/// # Examples
///
/// ```rust
/// use relay_datastore::StoreError;
///
/// let error = StoreError::unexpected_value(
///     "boost-relay/mainnet:validators-registration",
///     "0xabc",
///     "not a base-10 integer",
/// );
/// println!("Error: {}", error);
/// ```
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A command was rejected by the store or failed in transit.
    #[error("Store command {command} on {key} failed")]
    CommandFailed {
        /// The command that failed (e.g., `HSET`, `HGETALL`)
        command: &'static str,
        /// The map key the command targeted
        key: String,
        /// The underlying client error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A command did not complete within the configured command timeout.
    #[error("Store command {command} on {key} timed out after {timeout:?}")]
    Timeout {
        /// The command that timed out
        command: &'static str,
        /// The map key the command targeted
        key: String,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// The store returned a value that does not have the expected encoding.
    #[error("Unexpected value in {key} field {field}: {details}")]
    UnexpectedValue {
        /// The map key that was read
        key: String,
        /// The field holding the bad value
        field: String,
        /// What was wrong with the value
        details: String,
    },
}

impl StoreError {
    /// Create a `CommandFailed` error from any client error.
    pub fn command_failed(
        command: &'static str,
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        StoreError::CommandFailed {
            command,
            key: key.into(),
            source: Box::new(source),
        }
    }

    /// Create a `Timeout` error.
    pub fn timeout(command: &'static str, key: impl Into<String>, timeout: Duration) -> Self {
        StoreError::Timeout {
            command,
            key: key.into(),
            timeout,
        }
    }

    /// Create an `UnexpectedValue` error.
    pub fn unexpected_value(
        key: impl Into<String>,
        field: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        StoreError::UnexpectedValue {
            key: key.into(),
            field: field.into(),
            details: details.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let error = StoreError::command_failed("HSET", "boost-relay/mainnet:known-validators", io);

        assert_eq!(
            error.to_string(),
            "Store command HSET on boost-relay/mainnet:known-validators failed"
        );
        let source = std::error::Error::source(&error).expect("source should be kept");
        assert_eq!(source.to_string(), "reset by peer");
    }

    #[test]
    fn timeout_display_includes_duration() {
        let error = StoreError::timeout("HGET", "k", Duration::from_millis(250));
        assert_eq!(error.to_string(), "Store command HGET on k timed out after 250ms");
    }
}
