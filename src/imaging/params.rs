//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. Each numeric
//! parameter is validated once, on construction, so the pixel code in
//! [`operations`](super::operations) never has to re-check them.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100, default 90). Clamped on construction.
//! - [`BlurRadius`] — Gaussian sigma in pixels. Zero means "no blur".
//! - [`PixelSize`] — Block edge for pixelation. Must be at least 1.
//! - [`ScaleFactor`] — Integer upscale multiplier. Must be at least 1.
//! - [`Threshold`] — Luminance cut-off for monochrome conversion. Must be finite.
//! - [`SaveParams`] — Where and how the backend writes a finished image.

use image::ImageFormat;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("pixel size must be at least 1")]
    ZeroPixelSize,
    #[error("scale factor must be at least 1")]
    ZeroScaleFactor,
    #[error("threshold must be a finite number, got {0}")]
    NonFiniteThreshold(f32),
    #[error("scaling {width}x{height} by {factor} overflows the maximum image size")]
    DimensionOverflow { width: u32, height: u32, factor: u32 },
    #[error("charset must contain at least one glyph")]
    EmptyCharset,
}

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(90)
    }
}

/// Gaussian blur strength. Used directly as the kernel sigma.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlurRadius(pub u32);

impl BlurRadius {
    pub fn sigma(self) -> f32 {
        self.0 as f32
    }

    pub fn is_noop(self) -> bool {
        self.0 == 0
    }
}

/// Edge length, in source pixels, of one pixelation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSize(pub(super) u32);

impl PixelSize {
    pub fn new(value: u32) -> Result<Self, ParamError> {
        if value == 0 {
            return Err(ParamError::ZeroPixelSize);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Integer multiplier applied to both image edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleFactor(pub(super) u32);

impl ScaleFactor {
    pub fn new(value: u32) -> Result<Self, ParamError> {
        if value == 0 {
            return Err(ParamError::ZeroScaleFactor);
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

/// Luminance threshold on the 0–255 scale.
///
/// Values outside that range are legal: anything below 0 turns the whole
/// image white, anything above 255 turns it black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold(pub(super) f32);

impl Threshold {
    pub fn new(value: f32) -> Result<Self, ParamError> {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteThreshold(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(128.0)
    }
}

/// Parameters for writing an image to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveParams {
    pub output: PathBuf,
    pub format: ImageFormat,
    pub quality: Quality,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_valid_range() {
        assert_eq!(Quality::new(0).value(), 1);
        assert_eq!(Quality::new(50).value(), 50);
        assert_eq!(Quality::new(150).value(), 100);
    }

    #[test]
    fn quality_default_is_90() {
        assert_eq!(Quality::default().value(), 90);
    }

    #[test]
    fn zero_pixel_size_rejected() {
        assert_eq!(PixelSize::new(0), Err(ParamError::ZeroPixelSize));
        assert_eq!(PixelSize::new(10).unwrap().value(), 10);
    }

    #[test]
    fn zero_scale_factor_rejected() {
        assert_eq!(ScaleFactor::new(0), Err(ParamError::ZeroScaleFactor));
        assert_eq!(ScaleFactor::new(2).unwrap().value(), 2);
    }

    #[test]
    fn threshold_rejects_nan_and_infinity() {
        assert!(Threshold::new(f32::NAN).is_err());
        assert!(Threshold::new(f32::INFINITY).is_err());
        assert_eq!(Threshold::new(-5.0).unwrap().value(), -5.0);
    }

    #[test]
    fn threshold_default_is_midpoint() {
        assert_eq!(Threshold::default().value(), 128.0);
    }

    #[test]
    fn blur_radius_zero_is_noop() {
        assert!(BlurRadius(0).is_noop());
        assert!(!BlurRadius(5).is_noop());
        assert_eq!(BlurRadius(5).sigma(), 5.0);
    }
}
