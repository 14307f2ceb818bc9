use std::sync::PoisonError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the launcher itself.
///
/// Failures of the programs it starts are not errors: they surface as a
/// [`Status`](crate::core::types::Status) and are turned into an exit code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lock poisoned: {0}")]
    Lock(String),
}

impl Error {
    pub fn new(msg: &str) -> Self {
        Error::Message(msg.to_string())
    }
}

impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Error::Lock(err.to_string())
    }
}
