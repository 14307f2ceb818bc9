//! # Process Runner
//!
//! Every external program the launcher touches (interpreter, package manager,
//! the application itself) goes through [`CommandRunner`]. Calls are blocking
//! and carry an explicit working directory, so the outcome never depends on
//! where the launcher was started from.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio as StdStdio};

use super::types::Status;
use crate::utils::error::{Error, Result};

/// What the child does with the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stdio {
    /// All three streams go to the null device.
    Quiet,
    /// The child shares the launcher's console.
    Inherit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>, cwd: &Path) -> Self {
        CommandSpec {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Shell-like rendering for logs and reports.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| {
                let part = part.to_string_lossy();
                if part.is_empty() || part.contains(char::is_whitespace) {
                    format!("\"{}\"", part)
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.cwd);
        cmd
    }
}

/// Output of a captured run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub status: Status,
    pub stdout: String,
    pub stderr: String,
}

pub trait CommandRunner {
    /// Run to completion and report how the child ended.
    ///
    /// `Err` means the program could not be started.
    fn run(&mut self, command: &CommandSpec, stdio: Stdio) -> Result<Status>;

    /// Run to completion with stdout and stderr collected.
    fn capture(&mut self, command: &CommandSpec) -> Result<Captured>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &mut R {
    fn run(&mut self, command: &CommandSpec, stdio: Stdio) -> Result<Status> {
        (**self).run(command, stdio)
    }

    fn capture(&mut self, command: &CommandSpec) -> Result<Captured> {
        (**self).capture(command)
    }
}

/// Runs commands as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandSpec, stdio: Stdio) -> Result<Status> {
        let mut cmd = command.to_command();
        if stdio == Stdio::Quiet {
            cmd.stdin(StdStdio::null())
                .stdout(StdStdio::null())
                .stderr(StdStdio::null());
        }

        debug!("running {} in {}", command.command_line(), command.cwd.display());
        let status = cmd.status().map_err(|source| Error::Spawn {
            program: command.program_name(),
            source,
        })?;

        Ok(Status::from(status))
    }

    fn capture(&mut self, command: &CommandSpec) -> Result<Captured> {
        debug!("capturing {} in {}", command.command_line(), command.cwd.display());
        let output = command
            .to_command()
            .stdin(StdStdio::null())
            .output()
            .map_err(|source| Error::Spawn {
                program: command.program_name(),
                source,
            })?;

        Ok(Captured {
            status: Status::from(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
