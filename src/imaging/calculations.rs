//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{ParamError, PixelSize, ScaleFactor};

/// Horizontal stretch applied by the "curse" effect.
pub const CURSE_STRETCH_X: f32 = 1.5;
/// Vertical squash applied by the "curse" effect.
pub const CURSE_STRETCH_Y: f32 = 0.5;

/// Largest RGBA buffer a transform may produce, matching the decoder's
/// default `image::Limits::max_alloc`.
pub const MAX_IMAGE_BYTES: u64 = 512 * 1024 * 1024;
/// Upper bound for each edge of an ASCII grid.
pub const MAX_ASCII_EDGE: u32 = 1000;

/// Dimensions of the intermediate low-resolution image used for pixelation.
///
/// Each edge is divided by the block size and clamped to at least one pixel,
/// so a block larger than the image collapses it to a single colour instead
/// of producing an empty buffer.
///
/// # Examples
/// ```
/// # use climp::imaging::{PixelSize, pixelate_dimensions};
/// let p = PixelSize::new(10).unwrap();
/// assert_eq!(pixelate_dimensions((800, 600), p), (80, 60));
/// assert_eq!(pixelate_dimensions((8, 6), p), (1, 1));
/// ```
pub fn pixelate_dimensions(source: (u32, u32), size: PixelSize) -> (u32, u32) {
    let (w, h) = source;
    let block = size.value();
    ((w / block).max(1), (h / block).max(1))
}

/// Output dimensions of an integer upscale.
///
/// Fails when either edge would overflow `u32` or the RGBA buffer would
/// exceed [`MAX_IMAGE_BYTES`].
pub fn scaled_dimensions(
    source: (u32, u32),
    factor: ScaleFactor,
) -> Result<(u32, u32), ParamError> {
    let (w, h) = source;
    let f = factor.value();
    let overflow = ParamError::DimensionOverflow {
        width: w,
        height: h,
        factor: f,
    };
    let (Some(sw), Some(sh)) = (w.checked_mul(f), h.checked_mul(f)) else {
        return Err(overflow);
    };
    match rgba_bytes(sw, sh) {
        Some(bytes) if bytes <= MAX_IMAGE_BYTES => Ok((sw, sh)),
        _ => Err(overflow),
    }
}

fn rgba_bytes(width: u32, height: u32) -> Option<u64> {
    u64::from(width)
        .checked_mul(u64::from(height))?
        .checked_mul(4)
}

/// Dimensions after a fractional stretch, truncating and clamping to 1.
pub fn stretched_dimensions(source: (u32, u32), stretch: (f32, f32)) -> (u32, u32) {
    let (w, h) = source;
    let (sx, sy) = stretch;
    let nw = (w as f32 * sx) as u32;
    let nh = (h as f32 * sy) as u32;
    (nw.max(1), nh.max(1))
}

/// Fit an image into a grid of text cells for ASCII rendering.
///
/// Terminal cells are about twice as tall as they are wide, so a derived
/// row count is halved to keep the picture's proportions.
///
/// - both given → used as-is
/// - only width → height derived from aspect ratio
/// - only height → width derived from aspect ratio
/// - neither → `default_width` columns, height derived
///
/// Both results are clamped to `1..=MAX_ASCII_EDGE`.
pub fn ascii_grid_dimensions(
    source: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
    default_width: u32,
) -> (u32, u32) {
    let (src_w, src_h) = source;
    let aspect = if src_h == 0 {
        1.0
    } else {
        src_w as f64 / src_h as f64
    };

    let width = width.map(|w| w.min(MAX_ASCII_EDGE));
    let height = height.map(|h| h.min(MAX_ASCII_EDGE));

    let (cols, rows) = match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (None, Some(h)) => ((h as f64 * aspect * 2.0).round() as u32, h),
        (Some(w), None) => (w, (w as f64 / aspect / 2.0).round() as u32),
        (None, None) => (
            default_width,
            (default_width as f64 / aspect / 2.0).round() as u32,
        ),
    };

    (cols.clamp(1, MAX_ASCII_EDGE), rows.clamp(1, MAX_ASCII_EDGE))
}
