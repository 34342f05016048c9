//! Fit-within-box resizing with Lanczos resampling.

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Maximum output width in pixels.
pub const MAX_WIDTH: u32 = 3000;

/// Maximum output height in pixels.
pub const MAX_HEIGHT: u32 = 3000;

/// Resampling filter used for every downscale.
pub const FILTER: FilterType = FilterType::Lanczos3;

/// Compute the dimensions of `src` scaled to fit inside `max`.
///
/// The scale factor is the smaller of the two axis ratios, capped at 1.0 so
/// images are never enlarged. Each side is rounded to the nearest pixel and
/// kept within `1..=max`.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h).min(1.0);

    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;
    (new_w.clamp(1, max_w.max(1)), new_h.clamp(1, max_h.max(1)))
}

/// Scale `image` to fit inside `max_w`×`max_h`, preserving aspect ratio.
///
/// Images that already fit are returned untouched, so their pixels are
/// identical to the input.
pub fn resize_to_fit(image: DynamicImage, max_w: u32, max_h: u32) -> DynamicImage {
    let (src_w, src_h) = image.dimensions();
    let (dst_w, dst_h) = fit_dimensions(src_w, src_h, max_w, max_h);

    if (dst_w, dst_h) == (src_w, src_h) {
        return image;
    }

    image.resize_exact(dst_w, dst_h, FILTER)
}
