//! Configuration validation.

use crate::error::ConfigError;
use crate::pipeline::route::prefixes_overlap;

use super::Config;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
const LOG_FORMATS: &[&str] = &["json", "pretty"];

impl Config {
    /// Validate configuration values.
    ///
    /// The output prefix must be disjoint from every watched prefix, otherwise
    /// each written object would trigger another invocation.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let prefix = &self.routing.output_prefix;
        if prefix.is_empty() {
            return Err(ConfigError::ValidationError(
                "routing.output_prefix must not be empty".into(),
            ));
        }
        if !prefix.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "routing.output_prefix must end with '/', got {prefix:?}"
            )));
        }
        for watched in &self.routing.watched_prefixes {
            if prefixes_overlap(prefix, watched) {
                return Err(ConfigError::ValidationError(format!(
                    "routing.output_prefix {prefix:?} overlaps watched prefix {watched:?}; \
                     written images would re-trigger the function"
                )));
            }
        }
        if let Some(region) = &self.storage.region {
            if region.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "storage.region must not be blank when set".into(),
                ));
            }
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {LOG_LEVELS:?}, got {:?}",
                self.logging.level
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {LOG_FORMATS:?}, got {:?}",
                self.logging.format
            )));
        }
        Ok(())
    }
}
