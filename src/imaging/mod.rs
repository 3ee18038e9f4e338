//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (content-sniffed) |
//! | **Blur** | `imageops::blur` |
//! | **Flip / rotate** | `imageops::flip_*`, `imageops::rotate90` |
//! | **Pixelate / scale / curse** | `imageops::resize` with `Nearest` |
//! | **Grayscale / monochrome** | per-pixel, rayon-parallel |
//! | **Encode** | `image` encoders, JPEG quality from config |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Validated operation parameters and save settings
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: The [`Operation`] enum and the pixel transforms behind it

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use calculations::{
    MAX_ASCII_EDGE, MAX_IMAGE_BYTES, ascii_grid_dimensions, pixelate_dimensions,
    scaled_dimensions,
};
pub use operations::{Operation, luminance};
pub use params::{
    BlurRadius, ParamError, PixelSize, Quality, SaveParams, ScaleFactor, Threshold,
};
pub use rust_backend::{RustBackend, writable_format};
