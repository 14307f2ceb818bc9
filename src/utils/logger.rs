use lazy_static::lazy_static;
use slog::{Drain, o};
#[cfg(all(target_os = "linux", feature = "journald"))]
use slog_journald::JournaldDrain;
#[cfg(feature = "syslog")]
use slog_syslog::Facility;
use std::sync::RwLock;

use super::error::Result;
use super::types::LogLevel;

// Logging starts before the configuration is merged, so the threshold is
// read on every record and can be lowered once flags are known.
lazy_static! {
    static ref MAX_LEVEL: RwLock<slog::Level> = RwLock::new(LogLevel::Warn.to_slog());
}

/// Install the global logger and route the `log` macros into it.
///
/// Keep the returned guard alive for the lifetime of the program; dropping it
/// flushes the async drains.
pub fn setup_logging() -> Result<slog_scope::GlobalLoggerGuard> {
    let guard = slog_scope::set_global_logger(default_root_logger()?);
    slog_stdlog::init()?;

    Ok(guard)
}

pub fn set_level(level: LogLevel) -> Result<()> {
    let mut w = MAX_LEVEL.write()?;
    *w = level.to_slog();

    Ok(())
}

pub fn is_enabled(level: slog::Level) -> bool {
    MAX_LEVEL
        .read()
        .map(|max| level.is_at_least(*max))
        .unwrap_or(true)
}

pub fn default_root_logger() -> Result<slog::Logger> {
    let drain = default_discard()?.fuse();

    #[cfg(feature = "termlog")]
    let drain = slog::Duplicate(default_term_drain()?, drain).fuse();
    #[cfg(feature = "syslog")]
    let drain = slog::Duplicate(default_syslog_drain().unwrap_or(default_discard()?), drain).fuse();
    #[cfg(all(target_os = "linux", feature = "journald"))]
    let drain = slog::Duplicate(default_journald_drain()?, drain).fuse();

    let drain = drain
        .filter(|record: &slog::Record| is_enabled(record.level()))
        .ignore_res();

    let logger = slog::Logger::root(drain, o!("who" => env!("CARGO_PKG_NAME")));

    Ok(logger)
}

fn default_discard() -> Result<slog_async::Async> {
    let drain = slog_async::Async::default(slog::Discard);

    Ok(drain)
}

// Stdout belongs to the launcher's notices and the child processes.
#[cfg(feature = "termlog")]
fn default_term_drain() -> Result<slog_async::Async> {
    let plain = slog_term::PlainSyncDecorator::new(std::io::stderr());
    let term = slog_term::FullFormat::new(plain);
    let drain = slog_async::Async::default(term.build().fuse());

    Ok(drain)
}

#[cfg(feature = "syslog")]
fn default_syslog_drain() -> Result<slog_async::Async> {
    let syslog = slog_syslog::unix_3164(Facility::LOG_USER)?;
    let drain = slog_async::Async::default(syslog.fuse());

    Ok(drain)
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn default_journald_drain() -> Result<slog_async::Async> {
    let journald = JournaldDrain.ignore_res();
    let drain = slog_async::Async::default(journald);

    Ok(drain)
}
