//! JPEG encoding.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};

/// Content type attached to every written object.
pub const CONTENT_TYPE: &str = "image/jpeg";

/// Default JPEG quality (1-100).
pub const JPEG_QUALITY: u8 = 75;

/// Encode an image as baseline JPEG at [`JPEG_QUALITY`].
///
/// JPEG has no alpha channel; the image is flattened to 8-bit RGB first.
pub fn encode_jpeg(image: &DynamicImage) -> PipelineResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| PipelineError::Encode {
            message: format!("JPEG encode failed: {e}"),
        })?;

    Ok(buf.into_inner())
}
