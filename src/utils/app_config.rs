use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::error::{Error, Result};
use super::types::LogLevel;

/// Prefix for environment overrides, e.g. `PYLAUNCHER_INTERPRETER=python3`.
pub const ENV_PREFIX: &str = "PYLAUNCHER";

// The layered configuration builder. Sources are pushed on top of each other
// and only resolved into an `AppConfig` on `fetch`.
lazy_static! {
    pub static ref BUILDER: RwLock<ConfigBuilder<DefaultState>> = RwLock::new(Config::builder());
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub debug: bool,
    pub log_level: LogLevel,
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
    /// Directory the application lives in. Defaults to the launcher's own directory.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Initialize AppConfig from the embedded defaults.
    pub fn init(default_config: Option<&str>) -> Result<()> {
        let mut builder = Config::builder();

        if let Some(config_contents) = default_config {
            builder = builder.add_source(config::File::from_str(
                config_contents,
                config::FileFormat::Toml,
            ));
        }

        {
            let mut w = BUILDER.write()?;
            *w = builder;
        }

        Ok(())
    }

    /// Apply command line overrides. Only flags the user actually passed are merged.
    pub fn merge_args(args: &clap::ArgMatches) -> Result<()> {
        if let Some(value) = args.get_one::<bool>("debug") {
            AppConfig::set("debug", *value)?;
        }

        if let Some(value) = args.get_one::<LogLevel>("log_level") {
            AppConfig::set("log_level", value.to_string())?;
        }

        if args.get_flag("no_pause") {
            AppConfig::set("pause_on_error", false)?;
        }

        if let Some(dir) = args.get_one::<PathBuf>("dir") {
            let dir = dir
                .to_str()
                .ok_or_else(|| Error::new(&format!("non UTF-8 path: {}", dir.display())))?;
            AppConfig::set("base_dir", dir)?;
        }

        Ok(())
    }

    /// Layer the optional config file, then the `PYLAUNCHER_*` environment on top of it.
    pub fn merge_config(config_file: Option<&Path>) -> Result<()> {
        let mut w = BUILDER.write()?;
        let mut builder = w.clone();

        if let Some(config_file_path) = config_file {
            builder = builder.add_source(config::File::from(config_file_path));
        }
        *w = builder.add_source(environment());

        Ok(())
    }

    pub fn set<V>(key: &str, value: V) -> Result<()>
    where
        V: Into<config::Value>,
    {
        let mut w = BUILDER.write()?;
        *w = w.clone().set_override(key, value)?;

        Ok(())
    }

    pub fn get<T>(key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        Ok(BUILDER.read()?.deref().clone().build()?.get::<T>(key)?)
    }

    /// Resolve every layer into a typed snapshot.
    ///
    /// The result is a copy: fetch again after calling `set` or `merge_*`.
    pub fn fetch() -> Result<AppConfig> {
        let r = BUILDER.read()?;
        let config = r.deref().clone().build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        Ok(app_config)
    }

    /// `debug = true` wins over whatever `log_level` says.
    pub fn effective_log_level(&self) -> LogLevel {
        if self.debug {
            LogLevel::Debug
        } else {
            self.log_level
        }
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("install_args")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // One test only: the builder is process-global.
    #[test]
    fn init_fetch_and_override() -> Result<()> {
        AppConfig::init(Some(include_str!("../resources/default_config.toml")))?;

        let config = AppConfig::fetch()?;
        assert!(!config.debug);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.toolkit_module, "PyQt6");
        assert_eq!(config.install_args, vec!["install", "-r"]);
        assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
        assert_eq!(config.entry_point, PathBuf::from("main.py"));
        assert!(config.pause_on_error);
        assert!(config.base_dir.is_none());
        assert_eq!(config.effective_log_level(), LogLevel::Warn);

        let temp_dir = TempDir::new()?;
        let config_file = temp_dir.path().join("launcher.toml");
        fs::write(&config_file, "interpreter = \"python3\"\n")?;
        AppConfig::merge_config(Some(&config_file))?;
        assert_eq!(AppConfig::get::<String>("interpreter")?, "python3");

        AppConfig::set("debug", true)?;
        AppConfig::set("pause_on_error", false)?;
        AppConfig::set("base_dir", "/opt/app")?;

        let config = AppConfig::fetch()?;
        assert!(config.debug);
        assert!(!config.pause_on_error);
        assert_eq!(config.base_dir, Some(PathBuf::from("/opt/app")));
        assert_eq!(config.effective_log_level(), LogLevel::Debug);
        assert_eq!(AppConfig::get::<String>("toolkit_module")?, "PyQt6");

        Ok(())
    }
}
