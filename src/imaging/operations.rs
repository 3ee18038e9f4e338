//! Raster operations.
//!
//! Every operation takes an RGBA8 buffer and returns a new one. Geometry and
//! resampling are delegated to `image::imageops`; the per-pixel colour
//! transforms are written here and run in parallel over pixels with rayon.
//!
//! | Subcommand | Function | Notes |
//! |---|---|---|
//! | `blur` | [`blur`] | Gaussian, sigma = radius |
//! | `pixelate` | [`pixelate`] | nearest down, nearest up |
//! | `mirror` | [`mirror`] | horizontal flip |
//! | `flip_vertical` | [`flip_vertical`] | vertical flip |
//! | `rotate` | [`rotate`] | 90° clockwise |
//! | `grayscale` | [`grayscale`] | channel mean, opaque |
//! | `monochrome_ugly` | [`monochrome`] | Rec. 709 luminance threshold |
//! | `scale` | [`scale`] | nearest, integer factor |
//! | `curse` | [`curse`] | 1.5× wide, 0.5× tall, pixelate 5 |
//! | `zxc` | [`zxc`] | curse, then monochrome at 125 |

use super::calculations::{
    CURSE_STRETCH_X, CURSE_STRETCH_Y, pixelate_dimensions, scaled_dimensions,
    stretched_dimensions,
};
use super::params::{BlurRadius, ParamError, PixelSize, ScaleFactor, Threshold};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use rayon::prelude::*;

/// Block size used by the "curse" effect's final pixelation.
const CURSE_PIXEL_SIZE: PixelSize = PixelSize(5);
/// Threshold used by the "zxc" effect's monochrome pass.
const ZXC_THRESHOLD: Threshold = Threshold(125.0);

/// A single transformation selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Blur(BlurRadius),
    Pixelate(PixelSize),
    Mirror,
    FlipVertical,
    Rotate,
    Grayscale,
    Monochrome(Threshold),
    Scale(ScaleFactor),
    Curse,
    Zxc,
}

impl Operation {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Blur(_) => "blur",
            Operation::Pixelate(_) => "pixelate",
            Operation::Mirror => "mirror",
            Operation::FlipVertical => "flip_vertical",
            Operation::Rotate => "rotate",
            Operation::Grayscale => "grayscale",
            Operation::Monochrome(_) => "monochrome_ugly",
            Operation::Scale(_) => "scale",
            Operation::Curse => "curse",
            Operation::Zxc => "zxc",
        }
    }

    /// Word that opens the confirmation line, e.g. `Blurred image saved as`.
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Blur(_) => "Blurred",
            Operation::Pixelate(_) => "Pixelated",
            Operation::Mirror => "Mirrored",
            Operation::FlipVertical => "Flipped",
            Operation::Rotate => "Rotated",
            Operation::Grayscale => "Grayscale",
            Operation::Monochrome(_) => "Monochrome",
            Operation::Scale(_) => "Scaled",
            Operation::Curse => "Cursed",
            Operation::Zxc => "ZXCursed",
        }
    }

    /// Whether the operation is slow enough to deserve a spinner.
    pub fn is_slow(&self) -> bool {
        matches!(self, Operation::Blur(r) if !r.is_noop())
    }

    pub fn apply(&self, img: &RgbaImage) -> Result<RgbaImage, ParamError> {
        Ok(match *self {
            Operation::Blur(radius) => blur(img, radius),
            Operation::Pixelate(size) => pixelate(img, size),
            Operation::Mirror => mirror(img),
            Operation::FlipVertical => flip_vertical(img),
            Operation::Rotate => rotate(img),
            Operation::Grayscale => grayscale(img),
            Operation::Monochrome(threshold) => monochrome(img, threshold),
            Operation::Scale(factor) => scale(img, factor)?,
            Operation::Curse => curse(img),
            Operation::Zxc => zxc(img),
        })
    }
}

fn is_empty(img: &RgbaImage) -> bool {
    img.width() == 0 || img.height() == 0
}

/// Gaussian blur. Large radii are expensive: cost grows with the kernel.
pub fn blur(img: &RgbaImage, radius: BlurRadius) -> RgbaImage {
    if radius.is_noop() || is_empty(img) {
        return img.clone();
    }
    imageops::blur(img, radius.sigma())
}

/// Pixelate by shrinking with nearest-neighbour sampling and growing back.
///
/// Output dimensions always equal input dimensions.
pub fn pixelate(img: &RgbaImage, size: PixelSize) -> RgbaImage {
    if is_empty(img) {
        return img.clone();
    }
    let (w, h) = img.dimensions();
    let (small_w, small_h) = pixelate_dimensions((w, h), size);
    let small = imageops::resize(img, small_w, small_h, FilterType::Nearest);
    imageops::resize(&small, w, h, FilterType::Nearest)
}

pub fn mirror(img: &RgbaImage) -> RgbaImage {
    imageops::flip_horizontal(img)
}

pub fn flip_vertical(img: &RgbaImage) -> RgbaImage {
    imageops::flip_vertical(img)
}

/// Rotate 90° clockwise.
pub fn rotate(img: &RgbaImage) -> RgbaImage {
    imageops::rotate90(img)
}

/// Replace each pixel with the unweighted mean of its channels, fully opaque.
pub fn grayscale(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    out.par_chunks_exact_mut(4).for_each(|px| {
        let mean = ((px[0] as u16 + px[1] as u16 + px[2] as u16) / 3) as u8;
        px.copy_from_slice(&[mean, mean, mean, 255]);
    });
    out
}

/// Rec. 709 relative luminance on the 0–255 scale.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    0.2126 * r as f32 + 0.7152 * g as f32 + 0.0722 * b as f32
}

/// Two-tone conversion: pixels at or above the threshold become white.
pub fn monochrome(img: &RgbaImage, threshold: Threshold) -> RgbaImage {
    let cut = threshold.value();
    let mut out = img.clone();
    out.par_chunks_exact_mut(4).for_each(|px| {
        let v = if luminance(px[0], px[1], px[2]) >= cut {
            255
        } else {
            0
        };
        px.copy_from_slice(&[v, v, v, 255]);
    });
    out
}

/// Integer upscale with nearest-neighbour sampling, keeping hard pixel edges.
pub fn scale(img: &RgbaImage, factor: ScaleFactor) -> Result<RgbaImage, ParamError> {
    let (w, h) = scaled_dimensions(img.dimensions(), factor)?;
    if is_empty(img) {
        return Ok(img.clone());
    }
    Ok(imageops::resize(img, w, h, FilterType::Nearest))
}

/// Stretch sideways, squash vertically, then pixelate.
pub fn curse(img: &RgbaImage) -> RgbaImage {
    if is_empty(img) {
        return img.clone();
    }
    let (w, h) = stretched_dimensions(img.dimensions(), (CURSE_STRETCH_X, CURSE_STRETCH_Y));
    let stretched = imageops::resize(img, w, h, FilterType::Nearest);
    pixelate(&stretched, CURSE_PIXEL_SIZE)
}

/// The curse effect reduced to black and white.
pub fn zxc(img: &RgbaImage) -> RgbaImage {
    monochrome(&curse(img), ZXC_THRESHOLD)
}
