// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Signed validator registrations
//!
//! A registration is a validator-signed statement of the fee recipient and
//! gas limit the validator wants when a relay builds blocks on its behalf.
//! The JSON shape matches the builder API, which is also the shape stored
//! in the registration payload map.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use super::pubkey::{BlsPublicKey, BlsSignature, PubkeyHex};
use super::quoted::quoted_u64;

/// Unsigned body of a validator registration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidatorRegistration {
    /// Address that should receive block rewards
    pub fee_recipient: Address,
    /// Preferred block gas limit
    #[serde(with = "quoted_u64")]
    pub gas_limit: u64,
    /// Unix time (seconds) at which the validator signed the registration
    #[serde(with = "quoted_u64")]
    pub timestamp: u64,
    /// Validator BLS public key
    pub pubkey: BlsPublicKey,
}

/// Validator registration together with the validator's BLS signature
///
/// Signature verification happens before a registration reaches the cache;
/// the cache stores and returns whatever it is given.
///
/// # Examples
///
/// ```
/// use alloy_primitives::{Address, FixedBytes};
/// use relay_datastore::{SignedValidatorRegistration, ValidatorRegistration};
///
/// let registration = SignedValidatorRegistration {
///     message: ValidatorRegistration {
///         fee_recipient: Address::repeat_byte(0x11),
///         gas_limit: 30_000_000,
///         timestamp: 1_700_000_000,
///         pubkey: FixedBytes::repeat_byte(0xab),
///     },
///     signature: FixedBytes::repeat_byte(0xcd),
/// };
///
/// assert_eq!(registration.timestamp(), 1_700_000_000);
/// assert!(registration.pubkey_hex().as_str().starts_with("0xabab"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignedValidatorRegistration {
    /// The signed registration body
    pub message: ValidatorRegistration,
    /// BLS signature over the registration body
    pub signature: BlsSignature,
}

impl SignedValidatorRegistration {
    /// Lowercase hex form of the registering validator's pubkey
    pub fn pubkey_hex(&self) -> PubkeyHex {
        PubkeyHex::from(&self.message.pubkey)
    }

    /// Signing timestamp of the registration
    pub fn timestamp(&self) -> u64 {
        self.message.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::FixedBytes;

    fn create_test_registration() -> SignedValidatorRegistration {
        SignedValidatorRegistration {
            message: ValidatorRegistration {
                fee_recipient: Address::repeat_byte(0x11),
                gas_limit: 30_000_000,
                timestamp: 1_700_000_000,
                pubkey: FixedBytes::repeat_byte(0xab),
            },
            signature: FixedBytes::repeat_byte(0xcd),
        }
    }

    #[test]
    fn registration_json_uses_builder_api_shape() {
        let json = serde_json::to_value(create_test_registration()).unwrap();

        assert_eq!(json["message"]["gas_limit"], "30000000");
        assert_eq!(json["message"]["timestamp"], "1700000000");
        assert!(json["message"]["pubkey"]
            .as_str()
            .unwrap()
            .starts_with("0xabab"));
        assert!(json["signature"].as_str().unwrap().starts_with("0xcdcd"));
    }

    #[test]
    fn registration_json_round_trip() {
        let registration = create_test_registration();
        let bytes = serde_json::to_vec(&registration).unwrap();
        let decoded: SignedValidatorRegistration = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, registration);
    }

    #[test]
    fn registration_accepts_uppercase_hex() {
        let pubkey = format!("0x{}", "AB".repeat(48));
        let signature = format!("0x{}", "CD".repeat(96));
        let json = format!(
            r#"{{"message":{{"fee_recipient":"0x1111111111111111111111111111111111111111","gas_limit":"30000000","timestamp":"1700000000","pubkey":"{pubkey}"}},"signature":"{signature}"}}"#
        );

        let decoded: SignedValidatorRegistration = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, create_test_registration());
        assert_eq!(decoded.pubkey_hex().as_str(), format!("0x{}", "ab".repeat(48)));
    }
}
