//! # Main Entry Point
//!
//! Sets up panic handlers and logging, loads the embedded default
//! configuration, then hands over to `cli::cli_match`. The process exit code
//! is whatever the selected command reports: 0 for a clean run, 1 for every
//! failure the launcher detects.

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;

#[cfg(debug_assertions)]
extern crate better_panic;

use std::process::ExitCode;

use pylauncher::utils::app_config::AppConfig;
use pylauncher::utils::error::Result;

fn main() -> Result<ExitCode> {
    // Human Panic. Only enabled when *not* debugging.
    #[cfg(not(debug_assertions))]
    {
        setup_panic!();
    }

    // Better Panic. Only enabled *when* debugging.
    #[cfg(debug_assertions)]
    {
        better_panic::Settings::debug()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .install();
    }

    let _guard = pylauncher::utils::logger::setup_logging()?;

    // Initialize Configuration
    let config_contents = include_str!("resources/default_config.toml");
    AppConfig::init(Some(config_contents))?;

    pylauncher::cli::cli_match()
}
