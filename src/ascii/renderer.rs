//! Turns an RGBA image into rows of glyphs.
//!
//! The image is resampled so that one pixel becomes one terminal cell. A cell's
//! brightness is its luminance scaled by alpha, so transparent areas render
//! with the darkest glyph.

use super::charsets::Charset;
use crate::imaging::{ascii_grid_dimensions, luminance};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::io;

const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Columns. Derived from `height` and the aspect ratio when absent.
    pub width: Option<u32>,
    /// Rows. Derived from the column count when absent.
    pub height: Option<u32>,
    /// Columns used when neither dimension is given.
    pub default_width: u32,
    /// Wrap each glyph in a 24-bit foreground colour escape.
    pub colored: bool,
    /// Brightest cells get the first glyph instead of the last.
    pub invert: bool,
    pub charset: Charset,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            default_width: 80,
            colored: false,
            invert: false,
            charset: Charset::default(),
        }
    }
}

/// Render to a string, one `\n`-terminated line per row.
pub fn render(image: &RgbaImage, options: &RenderOptions) -> String {
    if image.width() == 0 || image.height() == 0 {
        return String::new();
    }
    let (cols, rows) = ascii_grid_dimensions(
        image.dimensions(),
        options.width,
        options.height,
        options.default_width,
    );
    let cells = imageops::resize(image, cols, rows, FilterType::Triangle);

    let mut out = String::new();
    for row in cells.rows() {
        for px in row {
            let [r, g, b, a] = px.0;
            let brightness = luminance(r, g, b) * a as f32 / 255.0;
            let glyph = options.charset.glyph_for(brightness, options.invert);
            if options.colored {
                out.push_str(&format!("\x1b[38;2;{r};{g};{b}m{glyph}{ANSI_RESET}"));
            } else {
                out.push_str(glyph);
            }
        }
        out.push('\n');
    }
    out
}

/// Render straight into a writer and flush it.
pub fn render_to(
    image: &RgbaImage,
    to: &mut impl io::Write,
    options: &RenderOptions,
) -> io::Result<()> {
    to.write_all(render(image, options).as_bytes())?;
    to.flush()
}
