//! Logging hooks used by the config manager.
//!
//! The manager only emits debug and error traces. They go through the
//! [`Logger`] trait so callers can inject their own sink; the default,
//! [`LogFacade`], forwards to the `log` crate and does nothing when no `log`
//! backend is installed or when logging was switched off with
//! [`set_logger`].

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{LevelFilter, Log, Metadata, Record};

/// Target used for every record emitted by this crate.
pub const LOG_TARGET: &str = "appconfig";

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Sink for the manager's debug and error traces.
pub trait Logger {
    fn debug(&self, message: &str);
    fn error(&self, message: &str);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn debug(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards to the `log` crate under the [`LOG_TARGET`] target.
///
/// # Examples
///
/// ```
/// use appconfig::{LogFacade, Logger};
///
/// // Without an installed `log` backend this is a no-op.
/// LogFacade.debug("config file not found");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn debug(&self, message: &str) {
        if is_enabled() {
            log::debug!(target: LOG_TARGET, "{message}");
        }
    }

    fn error(&self, message: &str) {
        if is_enabled() {
            log::error!(target: LOG_TARGET, "{message}");
        }
    }
}

/// Enable or disable the traces emitted through [`LogFacade`].
pub fn set_logger(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Set the maximum `log` level. [`LevelFilter::Off`] also disables
/// [`LogFacade`]; any other level enables it.
pub fn set_log_level(level: LevelFilter) {
    set_logger(level != LevelFilter::Off);
    log::set_max_level(level);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Environment variable read by [`init_logger`].
pub const LOG_MODE_ENV: &str = "APPCONFIG_LOG_MODE";

/// Parse a log mode: `quiet`, `normal` or `verbose` (case-insensitive).
pub fn parse_log_mode(mode: &str) -> Option<LevelFilter> {
    match mode.to_lowercase().as_str() {
        "quiet" => Some(LevelFilter::Off),
        "normal" => Some(LevelFilter::Error),
        "verbose" => Some(LevelFilter::Debug),
        _ => None,
    }
}

/// Minimal `log` backend writing `LEVEL: message` lines to stderr.
struct StderrLog;

impl Log for StderrLog {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static STDERR_LOG: StderrLog = StderrLog;

/// Install the stderr backend for binaries.
///
/// `verbose` wins; otherwise [`LOG_MODE_ENV`] is consulted, then errors only.
/// Returns the level that was applied.
pub fn init_logger(verbose: bool) -> LevelFilter {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        env::var(LOG_MODE_ENV)
            .ok()
            .and_then(|mode| parse_log_mode(&mode))
            .unwrap_or(LevelFilter::Error)
    };

    // A backend may already be installed (tests, embedding applications).
    let _ = log::set_logger(&STDERR_LOG);
    set_log_level(level);
    level
}
