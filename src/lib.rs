//! # climp
//!
//! A command-line image manipulator. One invocation reads one image, applies
//! one transformation and writes one file, then prints a confirmation line:
//!
//! ```text
//! $ climp ../pics/photo.jpg -o ./out.png blur -r 5
//! Blurred image saved as "./out.png"
//! ```
//!
//! # Architecture
//!
//! ```text
//! clap Cli ──► Operation ──► process::run_job ──► ImageBackend::load
//!                                   │                     │
//!                                   │              Operation::apply
//!                                   ▼                     │
//!                       naming::resolve_output ──► ImageBackend::save
//! ```
//!
//! The binary turns the parsed command line into a closed [`imaging::Operation`]
//! with validated parameters, resolves where the result goes, and hands both
//! to [`process`]. Pixel work never touches the filesystem, and file I/O sits
//! behind the [`imaging::ImageBackend`] trait so the job runner is tested with
//! a mock.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Operations, validated parameters, dimension math, the `image`-crate backend |
//! | [`ascii`] | Charsets and the ASCII art renderer |
//! | [`process`] | Runs a job: load → transform → save, or load → render text |
//! | [`naming`] | Output path and encoder format resolution |
//! | [`config`] | `climp.toml` loading, merging over stock defaults, validation |
//! | [`output`] | Confirmation lines printed to stdout |
//! | [`logging`] | `tracing` subscriber setup (stderr, pretty or JSON) |
//! | [`interactive`] | `--interactive` menu loop on top of [`process`] |
//!
//! # Design Decisions
//!
//! ## Confirmation On stdout, Diagnostics On stderr
//!
//! Scripts match on the confirmation line, so stdout carries only that line
//! (or the ASCII art itself with `ascii -v`). Logs, spinners and interactive
//! prompts all go to stderr.
//!
//! ## Failures Are Errors
//!
//! A run either writes its output and prints the confirmation, or exits
//! non-zero with nothing printed to stdout. Encoder failures remove the
//! partially written file.
//!
//! ## Output Format Follows The Extension
//!
//! `-o out.png` writes PNG, `-o out.webp` writes WebP. An extension with no
//! compiled-in encoder keeps the requested path but encodes with the fallback
//! format from `climp.toml` (stock: JPEG), and says so in a warning.

pub mod ascii;
pub mod config;
pub mod imaging;
pub mod interactive;
pub mod logging;
pub mod naming;
pub mod output;
pub mod process;

#[cfg(test)]
pub(crate) mod test_helpers;
