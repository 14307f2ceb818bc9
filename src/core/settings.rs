//! Command lines for each launch step, built from the merged configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::runner::CommandSpec;
use crate::utils::app_config::AppConfig;

/// Everything one launch needs, resolved from the configuration.
#[derive(Debug, Clone)]
pub struct LaunchSettings {
    pub app_name: String,
    pub window_title: String,
    pub pause_on_error: bool,
    pub interpreter: String,
    pub version_flag: String,
    pub toolkit_module: String,
    pub installer: String,
    pub install_args: Vec<String>,
    pub manifest: PathBuf,
    pub entry_point: PathBuf,
    pub error_log: PathBuf,
    pub download_url: String,
    pub base_dir: Option<PathBuf>,
    /// Extra arguments handed to the application after the entry point.
    pub app_args: Vec<OsString>,
}

impl LaunchSettings {
    pub fn from_config(config: AppConfig, app_args: Vec<OsString>) -> Self {
        LaunchSettings {
            app_name: config.app_name,
            window_title: config.window_title,
            pause_on_error: config.pause_on_error,
            interpreter: config.interpreter,
            version_flag: config.version_flag,
            toolkit_module: config.toolkit_module,
            installer: config.installer,
            install_args: config.install_args,
            manifest: config.manifest,
            entry_point: config.entry_point,
            error_log: config.error_log,
            download_url: config.download_url,
            base_dir: config.base_dir,
            app_args,
        }
    }

    /// `python --version`
    pub fn interpreter_probe(&self, dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.interpreter, dir).arg(&self.version_flag)
    }

    /// `python -c "import PyQt6"`
    pub fn import_check(&self, dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.interpreter, dir)
            .arg("-c")
            .arg(format!("import {}", self.toolkit_module))
    }

    /// `pip install -r requirements.txt`
    pub fn install(&self, dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.installer, dir)
            .args(&self.install_args)
            .arg(&self.manifest)
    }

    /// `python main.py [args...]`
    pub fn application(&self, dir: &Path) -> CommandSpec {
        CommandSpec::new(&self.interpreter, dir)
            .arg(&self.entry_point)
            .args(&self.app_args)
    }
}
