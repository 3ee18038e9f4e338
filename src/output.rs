//! CLI output formatting.
//!
//! Confirmation lines go to stdout so callers can match on them:
//!
//! ```text
//! Blurred image saved as "./out.png"
//! ASCII art saved as "./photo_edited.txt"
//! ```
//!
//! Each line has a `format_*` function (pure, testable) and a `print_*`
//! wrapper that writes to stdout. Diagnostics belong to `tracing` on stderr.

use std::path::Path;

/// `<Label> image saved as "<path>"`.
pub fn format_saved(label: &str, path: &Path) -> String {
    format!("{label} image saved as {path:?}")
}

pub fn print_saved(label: &str, path: &Path) {
    println!("{}", format_saved(label, path));
}

pub fn format_ascii_saved(path: &Path) -> String {
    format!("ASCII art saved as {path:?}")
}

pub fn print_ascii_saved(path: &Path) {
    println!("{}", format_ascii_saved(path));
}

/// Hint shown when the binary runs without a subcommand.
pub fn format_no_subcommand() -> Vec<String> {
    vec![
        "Unidentified subcommand.".to_string(),
        "Use '--help' for more information".to_string(),
    ]
}

pub fn print_no_subcommand() {
    for line in format_no_subcommand() {
        println!("{line}");
    }
}
