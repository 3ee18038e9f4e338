//! ASCII art rendering.
//!
//! - **Charsets**: built-in glyph ramps and literal grapheme strings ([`Charset`])
//! - **Renderer**: resample, measure brightness, emit glyphs ([`render`])

pub mod charsets;
mod renderer;

pub use charsets::Charset;
pub use renderer::{RenderOptions, render, render_to};
