// Module-level comments
//! # Bootstrap Launcher
//!
//! Brings the Python application up in a fixed order:
//!
//! 1. prepare the console (UTF-8 output, window title);
//! 2. anchor the working directory to the application directory;
//! 3. probe the interpreter (`python --version`);
//! 4. probe the GUI toolkit (`python -c "import PyQt6"`);
//! 5. install `requirements.txt` when the toolkit is missing;
//! 6. run the entry point with the console inherited;
//! 7. hold the console open if it exited non-zero.
//!
//! Every failure is terminal on first occurrence. Fatal conditions and an
//! abnormal application exit pause before returning, so whatever was printed
//! stays readable after a double-click start.

use std::path::{Path, PathBuf};

use super::console::Console;
use super::messages;
use super::runner::{CommandRunner, CommandSpec, Stdio};
use super::settings::LaunchSettings;
use super::types::{FatalReason, Outcome, Stage, Status};
use super::workdir;
use crate::utils::error::Error;

pub struct Launcher<'a, R: CommandRunner, C: Console> {
    settings: &'a LaunchSettings,
    runner: R,
    console: C,
    stage: Stage,
}

impl<'a, R: CommandRunner, C: Console> Launcher<'a, R, C> {
    pub fn new(settings: &'a LaunchSettings, runner: R, console: C) -> Self {
        Launcher {
            settings,
            runner,
            console,
            stage: Stage::Init,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the whole sequence and report how it ended.
    pub fn run(&mut self) -> Outcome {
        self.console.prepare(&self.settings.window_title);

        let dir = match self.anchor() {
            Ok(dir) => dir,
            Err(detail) => {
                return self.fatal(FatalReason::WorkDir, &[messages::workdir_failed(&detail)]);
            }
        };

        self.advance(Stage::CheckInterpreter);
        let probe = self.settings.interpreter_probe(&dir);
        if !self.execute(&probe, Stdio::Quiet).success() {
            return self.fatal(
                FatalReason::InterpreterMissing,
                &[
                    messages::interpreter_missing(&self.settings.interpreter),
                    messages::download_hint(&self.settings.download_url),
                ],
            );
        }

        self.advance(Stage::CheckLibrary);
        let import = self.settings.import_check(&dir);
        if self.execute(&import, Stdio::Quiet).success() {
            debug!("{} is importable, skipping install", self.settings.toolkit_module);
        } else {
            self.advance(Stage::InstallDeps);
            self.console.say(messages::INSTALLING);
            let install = self.settings.install(&dir);
            if !self.execute(&install, Stdio::Inherit).success() {
                return self.fatal(
                    FatalReason::InstallFailed,
                    &[messages::INSTALL_FAILED.to_string()],
                );
            }
            self.console.say(messages::INSTALL_DONE);
        }

        self.advance(Stage::Launch);
        self.console.say(&messages::starting(&self.settings.app_name));
        let app = self.settings.application(&dir);
        let status = self.execute(&app, Stdio::Inherit);
        if status.success() {
            self.advance(Stage::Done);
            return Outcome::Done;
        }

        self.abnormal_exit(&dir, status)
    }

    fn anchor(&self) -> std::result::Result<PathBuf, String> {
        let dir = workdir::resolve(self.settings.base_dir.as_deref()).map_err(|e| e.to_string())?;
        workdir::enter(&dir).map_err(|e| e.to_string())?;

        Ok(dir)
    }

    /// Run one step. A program that cannot be started counts as a failed step,
    /// and the reason is shown on the console.
    fn execute(&mut self, command: &CommandSpec, stdio: Stdio) -> Status {
        match self.runner.run(command, stdio) {
            Ok(status) => {
                debug!("{} finished with {}", command.command_line(), status);
                status
            }
            Err(err) => {
                info!("{}", err);
                let line = match &err {
                    Error::Spawn { program, source } => {
                        messages::not_started(program, &source.to_string())
                    }
                    other => messages::not_started(&command.program_name(), &other.to_string()),
                };
                self.console.say(&line);
                Status::NotStarted
            }
        }
    }

    fn advance(&mut self, next: Stage) {
        debug!("stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    fn fatal(&mut self, reason: FatalReason, lines: &[String]) -> Outcome {
        self.advance(Stage::Fatal);
        info!("giving up: {:?}", reason);
        for line in lines {
            self.console.say(line);
        }
        self.hold();

        Outcome::Fatal(reason)
    }

    fn abnormal_exit(&mut self, dir: &Path, status: Status) -> Outcome {
        self.advance(Stage::NotifyAbnormalExit);
        info!("{} ended with {}", self.settings.entry_point.display(), status);
        self.console.say(messages::ABNORMAL_EXIT);

        let error_log = dir.join(&self.settings.error_log);
        if error_log.is_file() {
            self.console.say(&messages::error_log_hint(&error_log));
        }
        self.hold();

        Outcome::AbnormalExit(status)
    }

    fn hold(&mut self) {
        if self.settings.pause_on_error {
            self.console.pause();
        }
    }
}
