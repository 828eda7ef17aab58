//! Log setup
//!
//! Logs go to stderr so `keys` output stays clean on stdout. `RUST_LOG`
//! overrides the level picked from `-q`/`-v`.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, ColorChoice};

/// The filter in effect for a configuration
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()))
}

/// Install the global subscriber; returns `false` if one was already set
pub fn init(config: &CliConfig) -> bool {
    let ansi = match config.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => std::io::stderr().is_terminal(),
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(config.verbosity.is_verbose());

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.with_ansi(ansi).try_init()
    };
    installed.is_ok()
}
