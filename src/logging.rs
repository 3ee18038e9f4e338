//! Logging initialization.
//!
//! Uses the `tracing` ecosystem with either human-readable or JSON lines.
//! Everything goes to stderr: stdout carries confirmation lines and ASCII art.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the configured filter.
pub const LOG_ENV: &str = "CLIMP_LOG";

/// Level used when neither `CLIMP_LOG` nor `--verbose` is set.
pub fn default_level<'a>(config: &'a LoggingConfig, verbose: bool) -> &'a str {
    if verbose { "debug" } else { &config.level }
}

/// Install the global subscriber.
///
/// `--verbose` forces debug and `--log-json` forces JSON. A valid
/// `CLIMP_LOG` filter overrides the level either way.
pub fn init(config: &LoggingConfig, verbose: bool, json_override: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_level(config, verbose)));
    let json = json_override || config.format == LogFormat::Json;

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(console::Term::stderr().features().colors_supported()),
            )
            .init();
    }
}
