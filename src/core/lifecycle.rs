//! # Listener lifecycle sentinels.
//!
//! Every endpoint sees [`Sentinel::Connect`] as its first message and, when it is
//! deregistered while still reachable, [`Sentinel::Disconnect`] as its last one.
//!
//! ```text
//! register(id) ──► queue: [Connect] ──► entries... ──► deregister(id) ──► [Disconnect] ──► closed
//! ```
//!
//! Both travel through the listener's delivery queue with the same timeout as any
//! entry. An unreachable endpoint simply misses them.

use std::fmt;
use std::sync::Arc;

/// Text delivered when a listener is registered.
pub const CONNECT_MESSAGE: &str = "Listening to log server";

/// Text delivered when a listener is deregistered.
pub const DISCONNECT_MESSAGE: &str = "Disconnected from log server";

/// Lifecycle marker sent outside normal log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Registration completed.
    Connect,
    /// Registration ended.
    Disconnect,
}

impl Sentinel {
    /// Wire text of the sentinel.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentinel::Connect => CONNECT_MESSAGE,
            Sentinel::Disconnect => DISCONNECT_MESSAGE,
        }
    }

    /// Recognizes a delivered message as a sentinel.
    pub fn parse(message: &str) -> Option<Sentinel> {
        match message {
            CONNECT_MESSAGE => Some(Sentinel::Connect),
            DISCONNECT_MESSAGE => Some(Sentinel::Disconnect),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Sentinel> for Arc<str> {
    fn from(s: Sentinel) -> Self {
        Arc::from(s.as_str())
    }
}
