use std::ffi::OsString;
use std::process::ExitCode;

use crate::core::bootstrap::Launcher;
use crate::core::console::TerminalConsole;
use crate::core::runner::SystemRunner;
use crate::core::settings::LaunchSettings;
use crate::utils::{app_config::AppConfig, error::Result};

/// Bootstrap and run the application, forwarding `app_args` to it.
pub(crate) fn run(app_args: Vec<OsString>) -> Result<ExitCode> {
    let config = AppConfig::fetch()?;
    let settings = LaunchSettings::from_config(config, app_args);

    let mut launcher = Launcher::new(&settings, SystemRunner, TerminalConsole);
    let outcome = launcher.run();
    info!("launcher finished: {:?}", outcome);

    Ok(outcome.into())
}
