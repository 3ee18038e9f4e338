//! Pure Rust I/O backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader`, format sniffed from content |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with configured quality, alpha dropped |
//! | Encode → everything else | `ImageBuffer::write_to` |

use super::backend::{BackendError, ImageBackend};
use super::params::SaveParams;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Map a file extension to a format this build can encode.
///
/// `ImageFormat::from_extension` knows every format the `image` crate has
/// ever heard of; only the ones whose encoder is compiled in are returned.
pub fn writable_format(ext: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(ext).filter(|f| f.writing_enabled())
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn encode(image: &RgbaImage, params: &SaveParams) -> Result<(), BackendError> {
    let file = std::fs::File::create(&params.output)?;
    let mut writer = BufWriter::new(file);
    let encode_err = |e: image::ImageError| BackendError::Encode {
        path: params.output.display().to_string(),
        reason: e.to_string(),
    };

    match params.format {
        ImageFormat::Jpeg => {
            // JPEG has no alpha channel
            let rgb = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(image.clone()).to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut writer, params.quality.value() as u8);
            rgb.write_with_encoder(encoder).map_err(encode_err)?;
        }
        format => image.write_to(&mut writer, format).map_err(encode_err)?,
    }

    writer.flush()?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<RgbaImage, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(img.into_rgba8())
    }

    fn save(&self, image: &RgbaImage, params: &SaveParams) -> Result<(), BackendError> {
        let result = encode(image, params);
        if result.is_err() {
            // Don't leave a truncated file behind
            let _ = std::fs::remove_file(&params.output);
        }
        result
    }
}
