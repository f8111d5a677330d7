//! # Logger configuration.
//!
//! Provides [`Config`], the settings a [`Logger`](crate::Logger) starts with.
//! `threshold`, `timeout` and `console` can be changed later on the running logger;
//! the endpoint capacity and the exit code are fixed at construction.
//!
//! ## Sentinel values
//! - `endpoint_capacity = 0` is clamped to 1.

use std::time::Duration;

use crate::levels::Level;

/// Initial configuration for a [`Logger`](crate::Logger).
///
/// ## Field semantics
/// - `threshold`: most verbose level still delivered (`Wtf`/`Info` always pass)
/// - `timeout`: how long one delivery may wait for an endpoint before the listener is evicted
/// - `console`: register the console writer under the reserved id
/// - `endpoint_capacity`: buffer of endpoints created by the logger
/// - `fatal_exit_code`: process status used after a `Fatal` entry
#[derive(Clone, Debug)]
pub struct Config {
    /// Initial threshold.
    pub threshold: Level,

    /// Per-delivery timeout.
    ///
    /// A listener whose endpoint does not accept a message within this window is
    /// removed from the registry; the message is dropped for it.
    pub timeout: Duration,

    /// Whether console output starts enabled.
    pub console: bool,

    /// Capacity of endpoints created by [`Logger::register`](crate::Logger::register).
    ///
    /// With `1` an endpoint accepts a new message only once the consumer took the
    /// previous one.
    pub endpoint_capacity: usize,

    /// Exit status passed to [`std::process::exit`] after a `Fatal` entry.
    pub fatal_exit_code: i32,
}

impl Config {
    /// Endpoint capacity clamped to a minimum of 1.
    #[inline]
    pub fn endpoint_capacity_clamped(&self) -> usize {
        self.endpoint_capacity.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `threshold = Warning`
    /// - `timeout = 5s`
    /// - `console = true`
    /// - `endpoint_capacity = 1`
    /// - `fatal_exit_code = 1`
    fn default() -> Self {
        Self {
            threshold: Level::Warning,
            timeout: Duration::from_secs(5),
            console: true,
            endpoint_capacity: 1,
            fatal_exit_code: 1,
        }
    }
}
