use serde::Serialize;

/// Exit code for a clean run.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit code for every fatal condition and for an abnormal application exit.
pub const EXIT_FAILURE: u8 = 1;

/// Where the launcher is in its bootstrap sequence.
///
/// Transitions only move forward:
/// `Init → CheckInterpreter → CheckLibrary → [InstallDeps] → Launch → Done | NotifyAbnormalExit`,
/// with `Fatal` reachable from the anchoring, interpreter and install steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    CheckInterpreter,
    CheckLibrary,
    InstallDeps,
    Launch,
    NotifyAbnormalExit,
    Done,
    Fatal,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Init => write!(f, "init"),
            Stage::CheckInterpreter => write!(f, "check-interpreter"),
            Stage::CheckLibrary => write!(f, "check-library"),
            Stage::InstallDeps => write!(f, "install-deps"),
            Stage::Launch => write!(f, "launch"),
            Stage::NotifyAbnormalExit => write!(f, "notify-abnormal-exit"),
            Stage::Done => write!(f, "done"),
            Stage::Fatal => write!(f, "fatal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalReason {
    WorkDir,
    InterpreterMissing,
    InstallFailed,
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Exited(i32),
    /// Killed by a signal, no exit code available.
    Signaled,
    /// The program could not be started at all.
    NotStarted,
}

impl Status {
    pub fn success(&self) -> bool {
        matches!(self, Status::Exited(0))
    }
}

impl From<std::process::ExitStatus> for Status {
    fn from(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => Status::Exited(code),
            None => Status::Signaled,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Exited(code) => write!(f, "exit code {}", code),
            Status::Signaled => write!(f, "terminated by signal"),
            Status::NotStarted => write!(f, "not started"),
        }
    }
}

/// Terminal result of one launcher run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Fatal(FatalReason),
    AbnormalExit(Status),
}

impl Outcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Done => EXIT_SUCCESS,
            Outcome::Fatal(_) | Outcome::AbnormalExit(_) => EXIT_FAILURE,
        }
    }
}

impl From<Outcome> for std::process::ExitCode {
    fn from(outcome: Outcome) -> Self {
        std::process::ExitCode::from(outcome.exit_code())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One line of the `check` report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckItem {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

impl CheckItem {
    pub fn new(name: &str, ok: bool, detail: impl Into<String>) -> Self {
        CheckItem {
            name: name.to_string(),
            ok,
            detail: detail.into(),
        }
    }
}
