//! Pipeline orchestration - wires together all processing stages.

use aws_lambda_events::event::s3::S3Event;
use bytes::Bytes;
use image::GenericImageView;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::event::TriggerEvent;
use crate::storage::ObjectStore;
use crate::types::{ProcessedObject, ProcessingStats};

use super::decode::{decode_image, SourceFormat};
use super::encode::{encode_jpeg, CONTENT_TYPE};
use super::hash::content_hash;
use super::resize::{resize_to_fit, MAX_HEIGHT, MAX_WIDTH};
use super::route::KeyRouter;

/// Output of the CPU-bound part of the pipeline.
#[derive(Debug)]
pub struct Transcoded {
    /// JPEG bytes
    pub bytes: Vec<u8>,
    pub source_format: SourceFormat,
    pub source_width: u32,
    pub source_height: u32,
    pub width: u32,
    pub height: u32,
    pub decode_time: Duration,
    pub resize_time: Duration,
    pub encode_time: Duration,
}

/// Decode, fit within the maximum bounds, and re-encode as JPEG.
pub fn transcode(bytes: &[u8]) -> PipelineResult<Transcoded> {
    let decode_start = Instant::now();
    let decoded = decode_image(bytes)?;
    let decode_time = decode_start.elapsed();
    tracing::trace!("  Decode: {:?}", decode_time);

    let resize_start = Instant::now();
    let resized = resize_to_fit(decoded.image, MAX_WIDTH, MAX_HEIGHT);
    let resize_time = resize_start.elapsed();
    tracing::trace!("  Resize: {:?}", resize_time);

    let encode_start = Instant::now();
    let encoded = encode_jpeg(&resized)?;
    let encode_time = encode_start.elapsed();
    tracing::trace!("  Encode: {:?}", encode_time);

    let (width, height) = resized.dimensions();
    Ok(Transcoded {
        bytes: encoded,
        source_format: decoded.format,
        source_width: decoded.width,
        source_height: decoded.height,
        width,
        height,
        decode_time,
        resize_time,
        encode_time,
    })
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis() as u64
}

/// Runs the fetch → transcode → write pipeline against an injected store.
///
/// Built once per process; every invocation borrows it. Holds no per-run
/// state, so concurrent invocations are independent.
pub struct ImageProcessor<S> {
    store: S,
    router: KeyRouter,
}

impl<S: ObjectStore> ImageProcessor<S> {
    /// Create a processor writing under the configured output prefix.
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            router: KeyRouter::new(config.routing.output_prefix.clone()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn router(&self) -> &KeyRouter {
        &self.router
    }

    /// Run the pipeline for the first object named in an S3 notification.
    pub async fn handle(&self, event: &S3Event) -> PipelineResult<ProcessedObject> {
        let trigger = TriggerEvent::from_s3_event(event)?;
        self.process(&trigger).await
    }

    /// Run the pipeline for one object.
    ///
    /// Nothing is written unless every earlier stage succeeded.
    pub async fn process(&self, trigger: &TriggerEvent) -> PipelineResult<ProcessedObject> {
        let start = Instant::now();
        tracing::debug!("Processing: s3://{}/{}", trigger.bucket, trigger.key);

        // Route first: it is cheap and rejects unusable keys before any I/O
        let output_key = self.router.route(&trigger.key)?;

        // Fetch
        let fetch_start = Instant::now();
        let source = self
            .store
            .get_object(&trigger.bucket, &trigger.key)
            .await
            .map_err(|source| PipelineError::Fetch {
                bucket: trigger.bucket.clone(),
                key: trigger.key.clone(),
                source,
            })?;
        let fetch_time = fetch_start.elapsed();
        tracing::trace!("  Fetch: {:?} ({} bytes)", fetch_time, source.len());

        let source_size = source.len() as u64;
        let source_hash = content_hash(&source);

        // Decode → resize → encode on the blocking pool
        let transcoded = match tokio::task::spawn_blocking(move || transcode(&source)).await {
            Ok(result) => result?,
            Err(e) => {
                return Err(PipelineError::Decode {
                    format: "unknown",
                    message: format!("Task join error: {}", e),
                })
            }
        };

        let output_size = transcoded.bytes.len() as u64;
        let output_hash = content_hash(&transcoded.bytes);

        // Write
        let write_start = Instant::now();
        self.store
            .put_object(
                &trigger.bucket,
                &output_key,
                CONTENT_TYPE,
                Bytes::from(transcoded.bytes),
            )
            .await
            .map_err(|source| PipelineError::Write {
                bucket: trigger.bucket.clone(),
                key: output_key.clone(),
                source,
            })?;
        let write_time = write_start.elapsed();
        tracing::trace!("  Write: {:?}", write_time);

        let total_time = start.elapsed();
        tracing::debug!(
            "Processed {:?} in {:?} ({}x{} -> {}x{})",
            trigger.key,
            total_time,
            transcoded.source_width,
            transcoded.source_height,
            transcoded.width,
            transcoded.height
        );

        Ok(ProcessedObject {
            bucket: trigger.bucket.clone(),
            source_key: trigger.key.clone(),
            output_key,
            source_format: transcoded.source_format.to_string(),
            source_width: transcoded.source_width,
            source_height: transcoded.source_height,
            source_size,
            source_hash,
            width: transcoded.width,
            height: transcoded.height,
            output_size,
            output_hash,
            ignored_records: trigger.ignored_records,
            stats: ProcessingStats {
                fetch_ms: millis(fetch_time),
                decode_ms: millis(transcoded.decode_time),
                resize_ms: millis(transcoded.resize_time),
                encode_ms: millis(transcoded.encode_time),
                write_ms: millis(write_time),
                total_ms: millis(total_time),
            },
        })
    }
}
