//! Lambda handler: runs the pipeline for one notification and reports the
//! outcome.
//!
//! The core pipeline never logs failures itself; this adapter logs each one
//! exactly once, tagged with the failing stage, before handing the error back
//! to the host so its retry and dead-letter policy can apply.

use aws_lambda_events::event::s3::S3Event;
use lambda_runtime::{Error, LambdaEvent};
use podcast_resizer_core::{
    ImageProcessor, ObjectStore, PipelineError, ProcessedObject, TriggerEvent,
};

/// Entry point registered with the Lambda runtime.
pub async fn function_handler<S: ObjectStore>(
    event: LambdaEvent<S3Event>,
    processor: &ImageProcessor<S>,
) -> Result<(), Error> {
    let (payload, context) = event.into_parts();
    handle_event(&payload, &context.request_id, processor).await?;
    Ok(())
}

/// Run the pipeline and log the outcome.
pub async fn handle_event<S: ObjectStore>(
    payload: &S3Event,
    request_id: &str,
    processor: &ImageProcessor<S>,
) -> Result<ProcessedObject, PipelineError> {
    match processor.handle(payload).await {
        Ok(processed) => {
            if processed.ignored_records > 0 {
                tracing::warn!(
                    request_id,
                    ignored_records = processed.ignored_records,
                    "notification carried several records; only the first was processed"
                );
            }
            tracing::info!(
                request_id,
                bucket = %processed.bucket,
                source_key = %processed.source_key,
                output_key = %processed.output_key,
                source_format = %processed.source_format,
                source_hash = %processed.source_hash,
                width = processed.width,
                height = processed.height,
                output_size = processed.output_size,
                total_ms = processed.stats.total_ms,
                "image resized"
            );
            Ok(processed)
        }
        Err(err) => {
            let (bucket, key) = failure_location(payload);
            tracing::error!(
                request_id,
                stage = %err.stage(),
                bucket = %bucket,
                key = %key,
                error = %err,
                "resize pipeline failed"
            );
            Err(err)
        }
    }
}

/// Bucket and key to report for a failed run.
///
/// Uses the decoded key so failure lines match the `source_key` of success
/// lines; falls back to the raw record fields when the event itself was
/// unusable.
fn failure_location(payload: &S3Event) -> (String, String) {
    if let Ok(trigger) = TriggerEvent::from_s3_event(payload) {
        return (trigger.bucket, trigger.key);
    }
    let record = payload.records.first();
    let bucket = record
        .and_then(|r| r.s3.bucket.name.clone())
        .unwrap_or_else(|| "-".to_string());
    let key = record
        .and_then(|r| r.s3.object.key.clone())
        .unwrap_or_else(|| "-".to_string());
    (bucket, key)
}
