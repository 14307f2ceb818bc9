use std::process::ExitCode;

use tabled::{Table, Tabled};

use crate::core::messages;
use crate::core::runner::{CommandRunner, Stdio, SystemRunner};
use crate::core::settings::LaunchSettings;
use crate::core::types::{CheckItem, EXIT_FAILURE, EXIT_SUCCESS, OutputFormat};
use crate::core::workdir;
use crate::utils::{app_config::AppConfig, error::Result};

const WORKDIR: &str = "程序目录";
const INTERPRETER: &str = "Python 解释器";
const TOOLKIT: &str = "依赖模块";
const MANIFEST: &str = "依赖清单";
const ENTRY_POINT: &str = "程序入口";

const SKIPPED: &str = "未检查";

#[derive(Tabled)]
struct CheckDisplay {
    #[tabled(rename = "检查项")]
    name: String,
    #[tabled(rename = "状态")]
    status: &'static str,
    #[tabled(rename = "详情")]
    detail: String,
}

/// Report whether the application could start, without installing or launching anything.
pub(crate) fn run(format: OutputFormat) -> Result<ExitCode> {
    let config = AppConfig::fetch()?;
    let settings = LaunchSettings::from_config(config, Vec::new());

    let items = inspect(&settings, &mut SystemRunner);
    let all_ok = items.iter().all(|item| item.ok);

    match format {
        OutputFormat::Text => {
            let table_data: Vec<CheckDisplay> = items
                .iter()
                .map(|item| CheckDisplay {
                    name: item.name.clone(),
                    status: messages::check_status(item.ok),
                    detail: item.detail.clone(),
                })
                .collect();

            // Get terminal width, fallback to 80 if unavailable
            let terminal_width =
                if let Some((terminal_size::Width(w), _)) = terminal_size::terminal_size() {
                    w as usize
                } else {
                    80
                };

            let mut table = Table::new(table_data);
            table
                .with(tabled::settings::Style::modern())
                .with(tabled::settings::Width::wrap(
                    terminal_width.saturating_sub(4),
                ))
                .with(tabled::settings::Padding::new(1, 1, 0, 0));

            println!("{}", table);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(ExitCode::from(if all_ok { EXIT_SUCCESS } else { EXIT_FAILURE }))
}

/// Run the same probes as a launch, in the same order, and collect the results.
pub(crate) fn inspect<R: CommandRunner>(settings: &LaunchSettings, runner: &mut R) -> Vec<CheckItem> {
    let dir = match workdir::resolve(settings.base_dir.as_deref()) {
        Ok(dir) => dir,
        Err(err) => return vec![CheckItem::new(WORKDIR, false, err.to_string())],
    };

    let mut items = vec![CheckItem::new(WORKDIR, true, dir.display().to_string())];

    let interpreter_ok = match runner.capture(&settings.interpreter_probe(&dir)) {
        Ok(captured) if captured.status.success() => {
            // Python 2 prints its version to stderr.
            let version = if captured.stdout.trim().is_empty() {
                captured.stderr.trim()
            } else {
                captured.stdout.trim()
            };
            items.push(CheckItem::new(INTERPRETER, true, version));
            true
        }
        Ok(captured) => {
            items.push(CheckItem::new(
                INTERPRETER,
                false,
                format!("{}: {}", settings.interpreter, captured.status),
            ));
            false
        }
        Err(err) => {
            items.push(CheckItem::new(INTERPRETER, false, err.to_string()));
            false
        }
    };

    let toolkit = format!("{} {}", TOOLKIT, settings.toolkit_module);
    if interpreter_ok {
        let import = settings.import_check(&dir);
        let ok = runner
            .run(&import, Stdio::Quiet)
            .map(|status| status.success())
            .unwrap_or(false);
        items.push(CheckItem::new(&toolkit, ok, import.command_line()));
    } else {
        items.push(CheckItem::new(&toolkit, false, SKIPPED));
    }

    let manifest = dir.join(&settings.manifest);
    items.push(CheckItem::new(
        MANIFEST,
        manifest.is_file(),
        manifest.display().to_string(),
    ));

    let entry_point = dir.join(&settings.entry_point);
    items.push(CheckItem::new(
        ENTRY_POINT,
        entry_point.is_file(),
        entry_point.display().to_string(),
    ));

    items
}
