//! Image decoding with explicit, content-sniffed format selection.
//!
//! Every supported format has its own [`ImageDecoder`] so failures can be
//! attributed to (and tested against) a specific codec. The file extension is
//! never consulted.

use image::codecs::{bmp, gif, jpeg, png, tiff};
use image::{DynamicImage, GenericImageView, ImageDecoder as CodecDecoder, ImageResult, Limits};
use std::fmt;
use std::io::Cursor;

use crate::error::{PipelineError, PipelineResult};

/// Largest width or height accepted from a source header.
pub const MAX_SOURCE_DIMENSION: u32 = 16384;

/// Largest pixel buffer a decode may allocate (512 MiB).
pub const MAX_DECODE_ALLOC: u64 = 512 * 1024 * 1024;

/// Source formats the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
    Bmp,
    Tiff,
}

impl SourceFormat {
    /// Identify the format from the leading magic bytes.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some(Self::Png),
            [b'G', b'I', b'F', b'8', b'7' | b'9', b'a', ..] => Some(Self::Gif),
            [b'B', b'M', ..] => Some(Self::Bmp),
            // Little-endian (II) or big-endian (MM) TIFF, followed by version 42
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// The decoder responsible for this format.
    pub fn decoder(self) -> &'static dyn ImageDecoder {
        match self {
            Self::Jpeg => &JpegDecoder,
            Self::Png => &PngDecoder,
            Self::Gif => &GifDecoder,
            Self::Bmp => &BmpDecoder,
            Self::Tiff => &TiffDecoder,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decodes one encoded format into a raster image.
pub trait ImageDecoder: Send + Sync {
    fn format(&self) -> SourceFormat;

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage>;
}

pub struct JpegDecoder;
pub struct PngDecoder;
/// Decodes the first frame only.
pub struct GifDecoder;
pub struct BmpDecoder;
pub struct TiffDecoder;

impl ImageDecoder for JpegDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Jpeg
    }

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        decode_limited(jpeg::JpegDecoder::new(Cursor::new(bytes))?)
    }
}

impl ImageDecoder for PngDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Png
    }

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        decode_limited(png::PngDecoder::new(Cursor::new(bytes))?)
    }
}

impl ImageDecoder for GifDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Gif
    }

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        decode_limited(gif::GifDecoder::new(Cursor::new(bytes))?)
    }
}

impl ImageDecoder for BmpDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Bmp
    }

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        decode_limited(bmp::BmpDecoder::new(Cursor::new(bytes))?)
    }
}

impl ImageDecoder for TiffDecoder {
    fn format(&self) -> SourceFormat {
        SourceFormat::Tiff
    }

    fn decode(&self, bytes: &[u8]) -> ImageResult<DynamicImage> {
        decode_limited(tiff::TiffDecoder::new(Cursor::new(bytes))?)
    }
}

fn decode_limits() -> Limits {
    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_SOURCE_DIMENSION);
    limits.max_image_height = Some(MAX_SOURCE_DIMENSION);
    limits.max_alloc = Some(MAX_DECODE_ALLOC);
    limits
}

/// Check the header against [`decode_limits`] before the pixel buffer is
/// allocated, then decode.
fn decode_limited(mut decoder: impl CodecDecoder) -> ImageResult<DynamicImage> {
    let mut limits = decode_limits();
    limits.reserve(decoder.total_bytes())?;
    decoder.set_limits(limits)?;
    DynamicImage::from_decoder(decoder)
}

/// Result of decoding an image.
#[derive(Debug)]
pub struct DecodedImage {
    /// The decoded image data
    pub image: DynamicImage,
    /// Detected image format
    pub format: SourceFormat,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

/// Sniff the format of `bytes` and decode them with the matching decoder.
pub fn decode_image(bytes: &[u8]) -> PipelineResult<DecodedImage> {
    let format = SourceFormat::sniff(bytes).ok_or_else(|| PipelineError::Decode {
        format: "unknown",
        message: "unrecognized image format (invalid magic bytes)".to_string(),
    })?;

    let image = format
        .decoder()
        .decode(bytes)
        .map_err(|e| PipelineError::Decode {
            format: format.as_str(),
            message: e.to_string(),
        })?;

    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        image,
        format,
        width,
        height,
    })
}
