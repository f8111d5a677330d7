//! # Process-wide logger.
//!
//! One [`Logger`] per process. [`install`] creates it with an explicit [`Config`];
//! otherwise the first emission or registration creates it with
//! [`Config::default`] (threshold `Warning`, console on).
//!
//! Threshold and timeout set through the free functions before the logger exists
//! are kept in process-wide cells and applied when it is created, overriding the
//! values in its `Config`.
//!
//! ```text
//! set_threshold(l) ──► pending cell ──┐
//!                  └─► logger (if any) │
//! install(cfg) / first use ──► Logger::new(cfg) ──► apply pending ──► GLOBAL
//! ```

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::OnceLock;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::core::Logger;
use crate::error::LogError;
use crate::levels::{Level, Threshold};

const UNSET_LEVEL: u8 = u8::MAX;
const UNSET_TIMEOUT: u64 = u64::MAX;

static GLOBAL: OnceLock<Logger> = OnceLock::new();
static PENDING_THRESHOLD: AtomicU8 = AtomicU8::new(UNSET_LEVEL);
static PENDING_TIMEOUT: AtomicU64 = AtomicU64::new(UNSET_TIMEOUT);

fn pending_threshold() -> Option<Level> {
    match PENDING_THRESHOLD.load(Ordering::SeqCst) {
        UNSET_LEVEL => None,
        rank => Some(Level::from_rank(rank)),
    }
}

fn pending_timeout() -> Option<Duration> {
    match PENDING_TIMEOUT.load(Ordering::SeqCst) {
        UNSET_TIMEOUT => None,
        nanos => Some(Duration::from_nanos(nanos)),
    }
}

fn apply_pending(logger: &Logger) {
    if let Some(level) = pending_threshold() {
        logger.set_threshold(level);
    }
    if let Some(timeout) = pending_timeout() {
        logger.set_timeout(timeout);
    }
}

/// Installs the process-wide logger, or returns the one already installed.
///
/// `cfg` is ignored when a logger is already installed. Threshold and timeout set
/// through [`set_threshold`]/[`set_timeout`] beforehand take precedence over `cfg`.
///
/// # Errors
/// [`LogError::NoRuntime`] when `cfg.console` is set outside a Tokio runtime.
pub fn install(cfg: Config) -> Result<&'static Logger, LogError> {
    if let Some(logger) = GLOBAL.get() {
        return Ok(logger);
    }
    let logger = Logger::new(cfg)?;
    let logger = GLOBAL.get_or_init(|| logger);
    apply_pending(logger);
    Ok(logger)
}

/// The process-wide logger, if installed.
pub fn global() -> Option<&'static Logger> {
    GLOBAL.get()
}

/// The process-wide logger, installing a default one on first use.
pub(crate) fn installed() -> Result<&'static Logger, LogError> {
    match GLOBAL.get() {
        Some(logger) => Ok(logger),
        None => install(Config::default()),
    }
}

/// Whether `level` would pass the threshold the process-wide logger has or will start with.
pub(crate) fn would_pass(level: Level) -> bool {
    let threshold = match GLOBAL.get() {
        Some(logger) => logger.threshold(),
        None => pending_threshold().unwrap_or(Config::default().threshold),
    };
    Threshold::new(threshold).passes(level)
}

/// Sets the global threshold.
///
/// Before a logger exists the level is kept and applied when one is created.
pub fn set_threshold(level: Level) {
    PENDING_THRESHOLD.store(level.verbosity(), Ordering::SeqCst);
    if let Some(logger) = GLOBAL.get() {
        logger.set_threshold(level);
    }
}

/// Sets the global delivery timeout.
///
/// Before a logger exists the timeout is kept and applied when one is created.
pub fn set_timeout(timeout: Duration) {
    let nanos = u64::try_from(timeout.as_nanos()).unwrap_or(u64::MAX);
    PENDING_TIMEOUT.store(nanos.min(UNSET_TIMEOUT - 1), Ordering::SeqCst);
    if let Some(logger) = GLOBAL.get() {
        logger.set_timeout(timeout);
    }
}

/// Turns console output on or off, installing a default logger if needed.
pub async fn enable_console_output(enabled: bool) -> Result<(), LogError> {
    installed()?.set_console(enabled).await
}

/// Registers a listener on the global logger, installing a default one if needed.
pub fn register(id: impl Into<String>) -> Result<mpsc::Receiver<String>, LogError> {
    installed()?.register(id)
}

/// Deregisters a listener from the global logger. Unknown ids are ignored.
pub async fn deregister(id: &str) {
    if let Some(logger) = global() {
        logger.deregister(id).await;
    }
}

/// Deregisters every listener of the global logger.
pub async fn shutdown() {
    if let Some(logger) = global() {
        logger.shutdown().await;
    }
}
