//! Hashing utilities for stable identifiers.

use sha2::{Digest, Sha256};

/// Compute SHA256 hash of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute SHA256 hash of a string.
pub fn sha256_str(s: &str) -> String {
    sha256_bytes(s.as_bytes())
}

/// Short stable id derived from a list of components.
///
/// Components are NUL-separated so `["ab", "c"]` and `["a", "bc"]` differ.
pub fn short_id(components: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for component in components {
        hasher.update(component.as_bytes());
        hasher.update(b"\0");
    }
    let mut hex = hex::encode(hasher.finalize());
    hex.truncate(8);
    hex
}
