//! Tool configuration module.
//!
//! Handles loading, validating, and merging `climp.toml`. Stock defaults are
//! overridden by a user file, which only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! 1. `--config <path>` on the command line (the file must exist)
//! 2. `climp.toml` in the current directory, if present
//! 3. Stock defaults
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! suffix = "_edited"        # Appended to the input name when -o is omitted
//! fallback_format = "jpg"   # Used when the output extension is not writable
//! quality = 90              # JPEG quality (1-100)
//!
//! [monochrome]
//! threshold = 128.0         # Default luminance cut-off for monochrome_ugly
//!
//! [ascii]
//! width = 80                # Default column count for ascii
//! charset = "default"       # Named charset or literal glyphs
//!
//! [processing]
//! max_threads = 4           # Max worker threads (omit for auto = CPU cores)
//!
//! [logging]
//! level = "warn"            # trace | debug | info | warn | error
//! format = "pretty"         # pretty | json
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::writable_format;
use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "climp.toml";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `climp.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimpConfig {
    /// Output naming and encoding.
    pub output: OutputConfig,
    /// Defaults for `monochrome_ugly`.
    pub monochrome: MonochromeConfig,
    /// Defaults for `ascii`.
    pub ascii: AsciiConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
    /// Log level and format.
    pub logging: LoggingConfig,
}

impl ClimpConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.output.suffix.is_empty() {
            return Err(ConfigError::Validation(
                "output.suffix must not be empty (it would overwrite the input)".into(),
            ));
        }
        if writable_format(&self.output.fallback_format).is_none() {
            return Err(ConfigError::Validation(format!(
                "output.fallback_format '{}' is not a writable image format",
                self.output.fallback_format
            )));
        }
        if !self.monochrome.threshold.is_finite() {
            return Err(ConfigError::Validation(
                "monochrome.threshold must be a finite number".into(),
            ));
        }
        if self.ascii.width == 0 {
            return Err(ConfigError::Validation(
                "ascii.width must be at least 1".into(),
            ));
        }
        if self.ascii.charset.is_empty() {
            return Err(ConfigError::Validation(
                "ascii.charset must not be empty".into(),
            ));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Output naming and encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Appended to the input file stem when no `-o` is given.
    pub suffix: String,
    /// Extension whose format is used when the requested one can't be written.
    pub fallback_format: String,
    /// JPEG encoding quality.
    pub quality: u32,
}

impl OutputConfig {
    /// The fallback as an encoder format. Validated configs always resolve.
    pub fn fallback(&self) -> ImageFormat {
        writable_format(&self.fallback_format).unwrap_or(ImageFormat::Jpeg)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: "_edited".to_string(),
            fallback_format: "jpg".to_string(),
            quality: 90,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MonochromeConfig {
    pub threshold: f32,
}

impl Default for MonochromeConfig {
    fn default() -> Self {
        Self { threshold: 128.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AsciiConfig {
    /// Column count used when neither `--width` nor `--height` is given.
    pub width: u32,
    /// Named charset (see [`crate::ascii::charsets`]) or literal glyphs.
    pub charset: String,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            width: 80,
            charset: "default".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of worker threads for per-pixel transforms.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ClimpConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ClimpConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ClimpConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the effective configuration.
///
/// An explicit path must exist. Otherwise `climp.toml` in `dir` is used when
/// present, and stock defaults when not.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<ClimpConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() {
                Some(load_raw_config(&path)?)
            } else {
                None
            }
        }
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `climp.toml` with all keys and explanations.
///
/// Used by the `--gen-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# climp configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# climp reads ./climp.toml when present, or the file given with --config.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output naming and encoding
# ---------------------------------------------------------------------------
[output]
# Appended to the input file name when -o is not given:
#   photo.jpg -> photo_edited.jpg
suffix = "_edited"

# Format used when the output extension is missing or can't be written.
# Any of: jpg, png, tiff, webp, gif, bmp
fallback_format = "jpg"

# JPEG quality (1-100). Other formats are lossless.
quality = 90

# ---------------------------------------------------------------------------
# monochrome_ugly
# ---------------------------------------------------------------------------
[monochrome]
# Luminance (0-255) at or above which a pixel turns white.
# Overridden per run with -t/--threshold.
threshold = 128.0

# ---------------------------------------------------------------------------
# ascii
# ---------------------------------------------------------------------------
[ascii]
# Columns used when neither --width nor --height is given.
width = 80

# Named charset: default, block, emoji, russian, slight.
# Any other string is used literally, darkest glyph first.
charset = "default"

# ---------------------------------------------------------------------------
# Parallel processing
# ---------------------------------------------------------------------------
[processing]
# Maximum worker threads for per-pixel transforms.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_threads = 4

# ---------------------------------------------------------------------------
# Logging (written to stderr)
# ---------------------------------------------------------------------------
[logging]
# trace | debug | info | warn | error
# --verbose forces debug; the CLIMP_LOG environment variable overrides both.
level = "warn"

# pretty | json  (--log-json forces json)
format = "pretty"
"##
}
