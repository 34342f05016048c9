//! Image processing pipeline components.
//!
//! This module contains all the stages of the resize pipeline:
//! - **decode**: Sniff the source format and decode with the matching codec
//! - **resize**: Fit within the maximum bounds using Lanczos resampling
//! - **encode**: Serialize the result as JPEG
//! - **route**: Derive the destination key under the output prefix
//! - **hash**: Content hashes for log correlation
//! - **processor**: Orchestrates fetch, transcode and write

pub mod decode;
pub mod encode;
pub mod hash;
pub mod processor;
pub mod resize;
pub mod route;

// Re-exports for convenient access
pub use decode::{
    decode_image, DecodedImage, ImageDecoder, SourceFormat, MAX_DECODE_ALLOC, MAX_SOURCE_DIMENSION,
};
pub use encode::{encode_jpeg, CONTENT_TYPE, JPEG_QUALITY};
pub use processor::{transcode, ImageProcessor, Transcoded};
pub use resize::{fit_dimensions, resize_to_fit, MAX_HEIGHT, MAX_WIDTH};
pub use route::{KeyRouter, DEFAULT_OUTPUT_PREFIX};
