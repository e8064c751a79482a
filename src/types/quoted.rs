//! Serde helper for integers encoded as decimal strings
//!
//! The builder API quotes `uint64` values in JSON. Writing always produces a
//! string; reading accepts either a string or a bare number.

pub(crate) mod quoted_u64 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNative {
        String(String),
        Native(u64),
    }

    pub(crate) fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match StringOrNative::deserialize(deserializer)? {
            StringOrNative::String(s) => s.parse().map_err(D::Error::custom),
            StringOrNative::Native(n) => Ok(n),
        }
    }
}
