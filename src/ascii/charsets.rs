//! Glyph ramps for ASCII rendering, darkest glyph first.

use crate::imaging::ParamError;
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT: &[&str] = &[" ", ".", ",", ":", ";", "+", "*", "?", "%", "S", "#", "@"];
pub const BLOCK: &[&str] = &[" ", "░", "▒", "▓", "█"];
pub const EMOJI: &[&str] = &["🌑", "🌘", "🌗", "🌖", "🌕"];
pub const RUSSIAN: &[&str] = &[" ", "г", "т", "л", "п", "к", "а", "д", "ф", "Ж", "Щ", "Ш", "Ы", "Ю", "Я"];
pub const SLIGHT: &[&str] = &[" ", ".", "`", "'", "-", ":", "~", "="];

/// Names accepted by `--charset` besides literal glyph strings.
pub const NAMES: &[&str] = &["default", "block", "emoji", "russian", "slight"];

/// Look up a built-in ramp by name.
pub fn named(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "default" => Some(DEFAULT),
        "block" => Some(BLOCK),
        "emoji" => Some(EMOJI),
        "russian" => Some(RUSSIAN),
        "slight" => Some(SLIGHT),
        _ => None,
    }
}

/// An ordered, non-empty list of glyphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    glyphs: Vec<String>,
}

impl Charset {
    /// A built-in name, or else the literal string split into grapheme clusters.
    pub fn parse(text: &str) -> Result<Self, ParamError> {
        let glyphs: Vec<String> = match named(text) {
            Some(ramp) => ramp.iter().map(|g| g.to_string()).collect(),
            None => text.graphemes(true).map(str::to_string).collect(),
        };
        if glyphs.is_empty() {
            return Err(ParamError::EmptyCharset);
        }
        Ok(Self { glyphs })
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    /// Pick the glyph for a brightness on the 0–255 scale.
    pub fn glyph_for(&self, brightness: f32, invert: bool) -> &str {
        let last = self.glyphs.len() - 1;
        let mut level = brightness.clamp(0.0, 255.0) / 255.0;
        if invert {
            level = 1.0 - level;
        }
        let index = (level * last as f32).round() as usize;
        &self.glyphs[index.min(last)]
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            glyphs: DEFAULT.iter().map(|g| g.to_string()).collect(),
        }
    }
}
