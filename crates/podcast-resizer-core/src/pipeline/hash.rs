//! Content hashing for log correlation.
//!
//! Duplicate deliveries of the same upload show the same source hash, and an
//! unchanged source always produces the same output hash.

/// BLAKE3 hex digest of `bytes`.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
