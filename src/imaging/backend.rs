//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations every backend must
//! support: load (decode to RGBA8) and save (encode to a chosen format).
//! Pixel work lives in [`operations`](super::operations) and never touches
//! the filesystem, so the job runner can be tested with a mock backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate's pure-Rust codecs.

use super::params::SaveParams;
use image::RgbaImage;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// Trait for image I/O backends.
pub trait ImageBackend: Sync {
    /// Decode the image at `path` into an RGBA8 buffer.
    fn load(&self, path: &Path) -> Result<RgbaImage, BackendError>;

    /// Encode `image` and write it as described by `params`.
    fn save(&self, image: &RgbaImage, params: &SaveParams) -> Result<(), BackendError>;
}
