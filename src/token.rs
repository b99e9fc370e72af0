//! Request token generation
//!
//! The gateway signs every payload with a SHA-256 digest over the values of
//! its fields: keys are sorted lexicographically, the values are concatenated
//! in that order with no separator, and the digest of the resulting string is
//! rendered as lowercase hex. The shared terminal password participates as an
//! ordinary field under the reserved `Password` key.

use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Reserved key under which the shared secret is inserted into the signing map
pub const PASSWORD_KEY: &str = "Password";

/// Compute the token over a map of signing values
///
/// Deterministic and side-effect free. The `BTreeMap` ordering is byte-wise
/// lexicographic, which is exactly the ordering the gateway sorts by. Keys
/// with empty string values still contribute (zero-length) text; only keys
/// absent from the map are excluded from the digest.
pub fn generate_token(values: &BTreeMap<String, String>) -> String {
    let mut concatenated = String::new();
    for value in values.values() {
        concatenated.push_str(value);
    }
    hex::encode(Sha256::digest(concatenated.as_bytes()))
}

/// Serialize a boolean the way the gateway signs it
pub fn serialize_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
