//! Destination key routing.
//!
//! Results are written to `<output prefix><basename>` in the source bucket.
//! The output prefix is the only thing keeping a written image from firing
//! the bucket notification again, so the deployment must filter the
//! notification on prefixes disjoint from it (see
//! `routing.watched_prefixes` in the configuration).

use crate::error::{PipelineError, PipelineResult};

/// Prefix resized images are written under.
pub const DEFAULT_OUTPUT_PREFIX: &str = "/podcast/images/";

/// Computes destination keys under a fixed output prefix.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    output_prefix: String,
}

impl KeyRouter {
    pub fn new(output_prefix: impl Into<String>) -> Self {
        Self {
            output_prefix: output_prefix.into(),
        }
    }

    pub fn output_prefix(&self) -> &str {
        &self.output_prefix
    }

    /// Destination key for `source_key`.
    ///
    /// A key ending in `/` has no file name to carry over and is rejected.
    pub fn route(&self, source_key: &str) -> PipelineResult<String> {
        let name = basename(source_key);
        if name.is_empty() {
            return Err(PipelineError::MalformedEvent(format!(
                "object key {source_key:?} has no file name"
            )));
        }
        Ok(format!("{}{}", self.output_prefix, name))
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_PREFIX)
    }
}

/// The component after the final `/`, or the whole key.
pub fn basename(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Whether keys under one prefix can also fall under the other.
pub fn prefixes_overlap(a: &str, b: &str) -> bool {
    a.starts_with(b) || b.starts_with(a)
}
