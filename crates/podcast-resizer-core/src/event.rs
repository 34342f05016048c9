//! Trigger decoding: turns an S3 object-created notification into the single
//! object reference one invocation processes.
//!
//! Only the first record of a notification is honoured. S3 delivers one
//! record per object-created event in practice; any extra records are counted
//! in [`TriggerEvent::ignored_records`] so the caller can report them.

use aws_lambda_events::event::s3::S3Event;

use crate::error::{PipelineError, PipelineResult};

/// The object a single invocation processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerEvent {
    /// Bucket holding the source object (also the destination bucket)
    pub bucket: String,
    /// Decoded object key
    pub key: String,
    /// Records in the notification beyond the first, which are not processed
    pub ignored_records: usize,
}

impl TriggerEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            ignored_records: 0,
        }
    }

    /// Extract the bucket and key from the first record of a notification.
    pub fn from_s3_event(event: &S3Event) -> PipelineResult<Self> {
        let record = event.records.first().ok_or_else(|| {
            PipelineError::MalformedEvent("notification contains no records".to_string())
        })?;

        let bucket = record
            .s3
            .bucket
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .ok_or_else(|| PipelineError::MalformedEvent("record has no bucket name".into()))?;
        let raw_key = record
            .s3
            .object
            .key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| PipelineError::MalformedEvent("record has no object key".into()))?;

        Ok(Self {
            bucket: bucket.to_string(),
            key: decode_key(raw_key)?,
            ignored_records: event.records.len() - 1,
        })
    }
}

/// Decode an object key as it appears in S3 notifications.
///
/// Keys are form-URL-encoded: spaces arrive as `+` and other reserved
/// characters as `%XX` escapes.
pub fn decode_key(raw: &str) -> PipelineResult<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|key| key.into_owned())
        .map_err(|e| {
            PipelineError::MalformedEvent(format!("object key {raw:?} is not UTF-8: {e}"))
        })
}
