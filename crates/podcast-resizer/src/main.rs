//! podcast-resizer - resizes podcast artwork when it is uploaded to S3.
//!
//! Built as the `bootstrap` executable of a custom-runtime Lambda function
//! subscribed to `s3:ObjectCreated:*` notifications. Each uploaded image is
//! fitted within 3000×3000, re-encoded as JPEG and written under the output
//! prefix of the same bucket.
//!
//! # Deployment contract
//!
//! The notification must be filtered on prefixes that do not overlap the
//! output prefix (`/podcast/images/` by default), otherwise every written
//! image triggers another invocation. List the filtered prefixes under
//! `routing.watched_prefixes` in `podcast-resizer.toml` to have start-up
//! reject an overlapping configuration.

use anyhow::Context;
use lambda_runtime::{run, service_fn};
use podcast_resizer_core::{Config, ImageProcessor, ObjectStore, S3Store};

mod handler;
mod logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // An invalid config fails the init phase rather than running with a
    // routing setup that was not asked for.
    let config = Config::load()
        .with_context(|| format!("failed to load {}", Config::default_path().display()))?;
    logging::init_from_config(&config);

    tracing::debug!("podcast-resizer v{}", podcast_resizer_core::VERSION);

    // One client for the life of the process, shared by every invocation
    let store = S3Store::from_config(&config.storage).await;
    let processor = ImageProcessor::new(store, &config);
    tracing::info!(
        store = processor.store().name(),
        output_prefix = processor.router().output_prefix(),
        "podcast-resizer ready"
    );

    run(service_fn(|event| handler::function_handler(event, &processor)))
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
