// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for validator public keys
//!
//! BLS public keys travel in two forms: as raw 48-byte values inside signed
//! registrations, and as hex strings used for lookup and as store fields.
//! [`PubkeyHex`] is the string form with case-insensitive identity.

use alloy_primitives::{hex, FixedBytes};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 48-byte compressed BLS12-381 public key
pub type BlsPublicKey = FixedBytes<48>;

/// 96-byte compressed BLS12-381 signature
pub type BlsSignature = FixedBytes<96>;

/// Hex-encoded BLS public key, normalized to lowercase
///
/// Two strings that differ only in case denote the same validator, so the
/// value is lowercased on construction and on deserialization. Every store
/// field written by this crate is the `as_str()` form of a `PubkeyHex`.
///
/// No hex validation is performed: lookups with a malformed key simply miss.
///
/// # Examples
///
/// ```
/// use relay_datastore::PubkeyHex;
///
/// let upper = PubkeyHex::new("0xABCDEF");
/// let lower = PubkeyHex::new("0xabcdef");
/// assert_eq!(upper, lower);
/// assert_eq!(upper.as_str(), "0xabcdef");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PubkeyHex(String);

impl PubkeyHex {
    /// Create a pubkey, lowercasing the input
    pub fn new(pubkey: impl AsRef<str>) -> Self {
        Self(pubkey.as_ref().to_lowercase())
    }

    /// The normalized (lowercase) hex string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PubkeyHex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PubkeyHex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for PubkeyHex {
    fn from(pubkey: String) -> Self {
        Self::new(pubkey)
    }
}

impl From<&str> for PubkeyHex {
    fn from(pubkey: &str) -> Self {
        Self::new(pubkey)
    }
}

impl From<PubkeyHex> for String {
    fn from(pubkey: PubkeyHex) -> Self {
        pubkey.0
    }
}

impl From<&BlsPublicKey> for PubkeyHex {
    fn from(pubkey: &BlsPublicKey) -> Self {
        // encode_prefixed is already lowercase
        Self(hex::encode_prefixed(pubkey))
    }
}

impl From<BlsPublicKey> for PubkeyHex {
    fn from(pubkey: BlsPublicKey) -> Self {
        Self::from(&pubkey)
    }
}

impl FromStr for PubkeyHex {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}
