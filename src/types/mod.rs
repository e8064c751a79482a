// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across relay-datastore.
//!
//! This module provides the domain types the cache stores and returns:
//! - Validator public keys (raw BLS bytes and normalized hex strings)
//! - Signed validator registrations in builder-API shape

pub mod pubkey;
mod quoted;
pub mod registration;

// Note: Public types are re-exported from lib.rs, not here
