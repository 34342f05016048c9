//! Summary types returned by a successful pipeline run.

use serde::{Deserialize, Serialize};

/// What one invocation read and wrote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedObject {
    // === Locations ===
    /// Bucket read from and written to
    pub bucket: String,

    /// Key of the triggering object
    pub source_key: String,

    /// Key the JPEG was written to
    pub output_key: String,

    // === Source ===
    /// Detected source format ("jpeg", "png", "gif", ...)
    pub source_format: String,

    /// Source width in pixels
    pub source_width: u32,

    /// Source height in pixels
    pub source_height: u32,

    /// Source size in bytes
    pub source_size: u64,

    /// BLAKE3 hash of the source bytes
    pub source_hash: String,

    // === Output ===
    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Output size in bytes
    pub output_size: u64,

    /// BLAKE3 hash of the written bytes
    pub output_hash: String,

    /// Notification records after the first, not processed
    #[serde(skip_serializing_if = "is_zero")]
    #[serde(default)]
    pub ignored_records: usize,

    /// Per-stage timings
    pub stats: ProcessingStats,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

/// Wall-clock time spent in each stage, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub fetch_ms: u64,
    pub decode_ms: u64,
    pub resize_ms: u64,
    pub encode_ms: u64,
    pub write_ms: u64,
    pub total_ms: u64,
}
