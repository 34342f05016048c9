//! Error types for the resize pipeline.
//!
//! The pipeline taxonomy is deliberately flat: one variant per stage, each
//! carrying the bucket/key or format context and the underlying cause.

use std::fmt;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors reported by an [`ObjectStore`](crate::storage::ObjectStore) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("access denied: s3://{bucket}/{key}")]
    AccessDenied { bucket: String, key: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A step of the per-invocation state machine.
///
/// `Start → Event → Fetch → Decode → Resize → Encode → Write → Success`;
/// a failure at any step ends the run in `Failed(stage)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Event,
    Fetch,
    Decode,
    /// Names the resize step of the state machine; resizing itself cannot
    /// fail, so no [`PipelineError`] reports it.
    Resize,
    Encode,
    Write,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Resize => "resize",
            Self::Encode => "encode",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pipeline processing errors, one per stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The notification did not identify an object
    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    /// Reading the source object failed
    #[error("Fetch failed for s3://{bucket}/{key}: {source}")]
    Fetch {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },

    /// Source bytes are not a supported image or are corrupt
    #[error("Decode error ({format}): {message}")]
    Decode {
        format: &'static str,
        message: String,
    },

    /// JPEG serialization failed
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// Uploading the result failed
    #[error("Write failed for s3://{bucket}/{key}: {source}")]
    Write {
        bucket: String,
        key: String,
        #[source]
        source: StorageError,
    },
}

impl PipelineError {
    /// The stage the pipeline was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::MalformedEvent(_) => Stage::Event,
            Self::Fetch { .. } => Stage::Fetch,
            Self::Decode { .. } => Stage::Decode,
            Self::Encode { .. } => Stage::Encode,
            Self::Write { .. } => Stage::Write,
        }
    }
}

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_of_each_variant() {
        assert_eq!(
            PipelineError::MalformedEvent("no records".into()).stage(),
            Stage::Event
        );
        let fetch = PipelineError::Fetch {
            bucket: "b".into(),
            key: "k".into(),
            source: StorageError::Backend("timeout".into()),
        };
        assert_eq!(fetch.stage(), Stage::Fetch);
        assert_eq!(fetch.stage().to_string(), "fetch");
        let decode = PipelineError::Decode {
            format: "png",
            message: "truncated".into(),
        };
        assert_eq!(decode.stage(), Stage::Decode);
    }

    #[test]
    fn test_resize_is_never_a_failure_stage() {
        let errors = [
            PipelineError::MalformedEvent("no records".into()),
            PipelineError::Fetch {
                bucket: "b".into(),
                key: "k".into(),
                source: StorageError::Backend("timeout".into()),
            },
            PipelineError::Decode {
                format: "gif",
                message: "bad frame".into(),
            },
            PipelineError::Encode {
                message: "io".into(),
            },
            PipelineError::Write {
                bucket: "b".into(),
                key: "/podcast/images/k".into(),
                source: StorageError::AccessDenied {
                    bucket: "b".into(),
                    key: "/podcast/images/k".into(),
                },
            },
        ];
        for err in &errors {
            assert_ne!(err.stage(), Stage::Resize, "{err}");
        }
        assert_eq!(Stage::Resize.to_string(), "resize");
    }

    #[test]
    fn test_fetch_error_keeps_source() {
        let err = PipelineError::Fetch {
            bucket: "artwork".into(),
            key: "raw/ep1.jpg".into(),
            source: StorageError::NotFound {
                bucket: "artwork".into(),
                key: "raw/ep1.jpg".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("s3://artwork/raw/ep1.jpg"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
