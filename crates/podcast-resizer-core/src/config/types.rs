//! Sub-configuration structs with deployment defaults.

use serde::{Deserialize, Serialize};

use crate::pipeline::route::DEFAULT_OUTPUT_PREFIX;

/// Storage client settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Region override. `None` resolves the region from the environment
    /// the same way credentials are resolved.
    pub region: Option<String>,
}

/// Destination routing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Key prefix every resized object is written under
    pub output_prefix: String,

    /// Key prefixes the bucket notification is filtered on.
    /// Only used to check the output prefix can never re-trigger the function.
    pub watched_prefixes: Vec<String>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            watched_prefixes: Vec::new(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "json" or "pretty"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
        }
    }
}
