//! # Command-Line Interface Module
//!
//! Parses the launcher's arguments with `clap` and dispatches to
//! `core::commands`. Running the binary with no arguments at all (the
//! double-click case) launches the application.
//!
//! - `Cli`: global options shared by every command.
//! - `Commands`: `launch`, `check`, `config` and `completion`.
//! - `cli_match()`: merges configuration layers and runs the chosen command.

use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::core::{commands, types::OutputFormat};
use crate::utils::app_config::AppConfig;
use crate::utils::error::Result;
use crate::utils::logger;
use crate::utils::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "pylauncher",
    author,
    about,
    long_about = "Bootstrap launcher: checks Python and its GUI toolkit, installs requirements.txt when needed, then starts main.py",
    version
)]
pub struct Cli {
    /// Specifies a custom configuration file path.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enables or disables debug mode (forces debug logging).
    #[arg(name = "debug", short, long = "debug", value_name = "DEBUG")]
    pub debug: Option<bool>,

    /// Sets the logging level for the launcher's own diagnostics.
    #[arg(
        name = "log_level",
        short,
        long = "log-level",
        value_name = "LOG_LEVEL",
        value_enum
    )]
    pub log_level: Option<LogLevel>,

    /// Do not wait for Enter after a failure.
    #[arg(long = "no-pause")]
    pub no_pause: bool,

    /// Application directory. Defaults to the directory of this executable.
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// The subcommand to execute. Defaults to `launch`.
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Checks the environment, installs missing dependencies and starts the application.
    #[clap(
        name = "launch",
        about = "Bootstrap and start the application (default)",
        long_about = None,
    )]
    Launch {
        /// Arguments passed through to the application, after `--`.
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<OsString>,
    },
    /// Runs the interpreter and toolkit probes and reports, without installing or launching.
    #[clap(
        name = "check",
        about = "Report whether the application can start",
        long_about = None,
    )]
    Check {
        /// The output format for the report: `text` or `json`. Defaults to `text`.
        #[arg(long, value_name = "FORMAT", default_value = "text", value_parser = parse_output_format)]
        format: OutputFormat,
    },
    /// Generates shell completion scripts.
    #[clap(
        name = "completion",
        about = "Generate completion scripts",
        long_about = None,
        )]
    Completion {
        #[clap(subcommand)]
        subcommand: CompletionSubcommand,
    },
    /// Displays the effective configuration: defaults, config file, environment and flags merged.
    #[clap(
        name = "config",
        about = "Show Configuration",
        long_about = None,
    )]
    Config,
}

#[derive(Subcommand, PartialEq, Debug)]
enum CompletionSubcommand {
    #[clap(about = "generate the autocompletion script for bash")]
    Bash,
    #[clap(about = "generate the autocompletion script for zsh")]
    Zsh,
    #[clap(about = "generate the autocompletion script for fish")]
    Fish,
}

/// Parses command-line arguments, merges configurations, and executes the appropriate command.
///
/// Configuration precedence, lowest first: embedded defaults, `--config` file,
/// environment (`PYLAUNCHER_*`), command-line flags.
pub fn cli_match() -> Result<ExitCode> {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    AppConfig::merge_config(cli.config.as_deref())?;
    AppConfig::merge_args(&matches)?;

    let config = AppConfig::fetch()?;
    logger::set_level(config.effective_log_level())?;
    debug!("effective configuration: {:?}", config);

    let command = cli.command.unwrap_or(Commands::Launch { args: Vec::new() });
    match command {
        Commands::Launch { args } => commands::launch::run(args),
        Commands::Check { format } => commands::check::run(format),
        Commands::Completion { subcommand } => {
            let mut app = Cli::command();
            match subcommand {
                CompletionSubcommand::Bash => {
                    generate(Bash, &mut app, "pylauncher", &mut std::io::stdout());
                }
                CompletionSubcommand::Zsh => {
                    generate(Zsh, &mut app, "pylauncher", &mut std::io::stdout());
                }
                CompletionSubcommand::Fish => {
                    generate(Fish, &mut app, "pylauncher", &mut std::io::stdout());
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            commands::config::run()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn parse_output_format(s: &str) -> std::result::Result<OutputFormat, String> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}", s)),
    }
}
