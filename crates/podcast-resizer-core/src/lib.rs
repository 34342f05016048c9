//! podcast-resizer core - resizes podcast artwork when it lands in a bucket.
//!
//! Each invocation handles one uploaded object and writes one JPEG:
//!
//! ```text
//! S3 event → Fetch → Decode → Resize (fit 3000×3000, Lanczos3) → Encode JPEG → Write
//! ```
//!
//! Results go to `<output prefix><file name>` in the same bucket. The output
//! prefix must be disjoint from the prefixes the bucket notification watches,
//! otherwise every written image triggers another run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use podcast_resizer_core::{Config, ImageProcessor, S3Store};
//!
//! let config = Config::load()?;
//! let store = S3Store::from_config(&config.storage).await;
//! let processor = ImageProcessor::new(store, &config);
//!
//! let processed = processor.handle(&s3_event).await?;
//! println!("wrote {}", processed.output_key);
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod storage;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, Stage, StorageError};
pub use event::TriggerEvent;
pub use pipeline::{ImageProcessor, SourceFormat};
pub use storage::{MemoryStore, ObjectStore, S3Store};
pub use types::{ProcessedObject, ProcessingStats};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
