//! Output path and format resolution.
//!
//! Every job writes exactly one file. Its location comes from `-o` when given
//! and otherwise from the input name plus the configured suffix, placed in the
//! working directory:
//!
//! - `../pics/photo.jpg` → `./photo_edited.jpg`
//! - `../pics/photo.jpg -o out.png` → `out.png` (PNG)
//! - `../pics/photo.jpg -o out` → `out.jpg` (fallback extension appended)
//! - `../pics/photo.jpg -o out.xyz` → `out.xyz` (encoded with the fallback format)
//!
//! ASCII art is text, so its default name ends in `.txt` and a requested
//! path is used as is.

use crate::config::OutputConfig;
use crate::imaging::writable_format;
use image::ImageFormat;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Extension of the default ASCII art output file.
pub const TEXT_EXTENSION: &str = "txt";

/// Where an image job writes, and with which encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub format: ImageFormat,
}

/// Resolve the output of an image-producing job.
///
/// `dir` is where default names are placed (the working directory in the
/// CLI). A requested path is never relocated.
pub fn resolve_output(
    input: &Path,
    requested: Option<&Path>,
    config: &OutputConfig,
    dir: &Path,
) -> OutputTarget {
    match requested {
        Some(path) => resolve_requested(path, config),
        None => {
            let (format, ext) = extension_of(input)
                .and_then(|ext| writable_format(&ext).map(|format| (format, ext)))
                .unwrap_or_else(|| (config.fallback(), config.fallback_format.clone()));
            OutputTarget {
                path: dir.join(default_file_name(input, &config.suffix, &ext)),
                format,
            }
        }
    }
}

fn resolve_requested(path: &Path, config: &OutputConfig) -> OutputTarget {
    let Some(ext) = extension_of(path) else {
        let mut with_ext = path.as_os_str().to_owned();
        with_ext.push(".");
        with_ext.push(&config.fallback_format);
        return OutputTarget {
            path: PathBuf::from(with_ext),
            format: config.fallback(),
        };
    };

    match writable_format(&ext) {
        Some(format) => OutputTarget {
            path: path.to_path_buf(),
            format,
        },
        None => {
            warn!(
                path = %path.display(),
                fallback = %config.fallback_format,
                "Unsupported output extension, encoding with fallback format"
            );
            OutputTarget {
                path: path.to_path_buf(),
                format: config.fallback(),
            }
        }
    }
}

/// Resolve the output file of an `ascii` job that is not printed to stdout.
pub fn resolve_text_output(
    input: &Path,
    requested: Option<&Path>,
    config: &OutputConfig,
    dir: &Path,
) -> PathBuf {
    match requested {
        Some(path) => path.to_path_buf(),
        None => dir.join(default_file_name(input, &config.suffix, TEXT_EXTENSION)),
    }
}

/// `<stem><suffix>.<ext>` for the given input.
pub fn default_file_name(input: &Path, suffix: &str, ext: &str) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string());
    format!("{stem}{suffix}.{ext}")
}

/// `None` for a missing extension. `Some("")` for a trailing dot.
fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OutputConfig {
        OutputConfig::default()
    }

    #[test]
    fn default_name_uses_input_stem_and_extension() {
        let target = resolve_output(
            Path::new("../pics/photo.jpg"),
            None,
            &config(),
            Path::new("/work"),
        );
        assert_eq!(target.path, PathBuf::from("/work/photo_edited.jpg"));
        assert_eq!(target.format, ImageFormat::Jpeg);
    }

    #[test]
    fn default_name_keeps_png_input_format() {
        let target = resolve_output(Path::new("a/b/icon.png"), None, &config(), Path::new("."));
        assert_eq!(target.path, PathBuf::from("./icon_edited.png"));
        assert_eq!(target.format, ImageFormat::Png);
    }

    #[test]
    fn default_name_with_unwritable_input_extension_falls_back() {
        let target = resolve_output(Path::new("scan.xyz"), None, &config(), Path::new("out"));
        assert_eq!(target.path, PathBuf::from("out/scan_edited.jpg"));
        assert_eq!(target.format, ImageFormat::Jpeg);
    }

    #[test]
    fn default_name_respects_configured_suffix() {
        let cfg = OutputConfig {
            suffix: "-climped".to_string(),
            ..OutputConfig::default()
        };
        let target = resolve_output(Path::new("cat.bmp"), None, &cfg, Path::new("/t"));
        assert_eq!(target.path, PathBuf::from("/t/cat-climped.bmp"));
        assert_eq!(target.format, ImageFormat::Bmp);
    }

    #[test]
    fn requested_path_with_known_extension() {
        let target = resolve_output(
            Path::new("photo.jpg"),
            Some(Path::new("./out.png")),
            &config(),
            Path::new("/ignored"),
        );
        assert_eq!(target.path, PathBuf::from("./out.png"));
        assert_eq!(target.format, ImageFormat::Png);
    }

    #[test]
    fn requested_extension_is_case_insensitive() {
        let target = resolve_output(
            Path::new("photo.jpg"),
            Some(Path::new("OUT.WEBP")),
            &config(),
            Path::new("."),
        );
        assert_eq!(target.format, ImageFormat::WebP);
    }

    #[test]
    fn requested_path_without_extension_gets_fallback_appended() {
        let target = resolve_output(
            Path::new("photo.png"),
            Some(Path::new("results/out")),
            &config(),
            Path::new("."),
        );
        assert_eq!(target.path, PathBuf::from("results/out.jpg"));
        assert_eq!(target.format, ImageFormat::Jpeg);
    }

    #[test]
    fn requested_path_with_unknown_extension_is_kept() {
        let target = resolve_output(
            Path::new("photo.png"),
            Some(Path::new("out.xyz")),
            &config(),
            Path::new("."),
        );
        assert_eq!(target.path, PathBuf::from("out.xyz"));
        assert_eq!(target.format, ImageFormat::Jpeg);
    }

    #[test]
    fn fallback_format_follows_config() {
        let cfg = OutputConfig {
            fallback_format: "png".to_string(),
            ..OutputConfig::default()
        };
        let target = resolve_output(
            Path::new("photo.jpg"),
            Some(Path::new("out")),
            &cfg,
            Path::new("."),
        );
        assert_eq!(target.path, PathBuf::from("out.png"));
        assert_eq!(target.format, ImageFormat::Png);
    }

    #[test]
    fn text_output_defaults_to_txt() {
        let path = resolve_text_output(Path::new("../pics/photo.jpg"), None, &config(), Path::new("/w"));
        assert_eq!(path, PathBuf::from("/w/photo_edited.txt"));
    }

    #[test]
    fn text_output_uses_requested_path_verbatim() {
        let path = resolve_text_output(
            Path::new("photo.jpg"),
            Some(Path::new("art.png")),
            &config(),
            Path::new("/w"),
        );
        assert_eq!(path, PathBuf::from("art.png"));
    }

    #[test]
    fn default_file_name_without_stem() {
        assert_eq!(default_file_name(Path::new("/"), "_edited", "png"), "image_edited.png");
        assert_eq!(default_file_name(Path::new("a.tar.gz"), "_x", "gz"), "a.tar_x.gz");
    }
}
