//! # Per-listener delivery worker.
//!
//! Each registration owns one [`Delivery`] task fed by an unbounded queue. The
//! worker hands messages to the endpoint one at a time, so a listener sees them in
//! the order they were queued.
//!
//! ## Architecture
//! ```text
//! fan_out(line)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► timeout(endpoint1.send) ──► ok / evict
//!     ├──► [queue 2] ──► worker 2 ──► timeout(endpoint2.send) ──► ok / evict
//!     └──► [queue N] ──► worker N ──► timeout(endpointN.send) ──► ok / evict
//! ```
//!
//! ## Rules
//! - The timeout is read at the start of every attempt, so `set_timeout` applies to
//!   messages already queued.
//! - The per-attempt timeout is the only limit on a backlog: a listener that keeps
//!   accepting within it receives every message, however far behind it runs.
//! - First failure ends the worker: the listener is evicted and its remaining
//!   backlog is discarded.
//! - The worker keeps only a weak reference to the logger; dropping the logger
//!   closes every queue and lets workers finish.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::mpsc;

use super::logger::Inner;

/// Why a listener was dropped by its worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Eviction {
    /// Endpoint did not accept within the timeout.
    TimedOut(Duration),
    /// Endpoint receiver was dropped.
    Closed,
}

/// Delivery state for one registration.
pub(crate) struct Delivery {
    id: String,
    serial: u64,
    endpoint: mpsc::Sender<String>,
    logger: Weak<Inner>,
}

impl Delivery {
    pub(crate) fn new(
        id: String,
        serial: u64,
        endpoint: mpsc::Sender<String>,
        logger: Weak<Inner>,
    ) -> Self {
        Self {
            id,
            serial,
            endpoint,
            logger,
        }
    }

    /// Drains `queue` into the endpoint until the queue closes or a delivery fails.
    pub(crate) async fn run(self, mut queue: mpsc::UnboundedReceiver<Arc<str>>) {
        while let Some(line) = queue.recv().await {
            let timeout = match self.logger.upgrade() {
                Some(logger) => logger.timeout(),
                None => break,
            };

            let outcome =
                tokio::time::timeout(timeout, self.endpoint.send(line.as_ref().to_owned())).await;

            let eviction = match outcome {
                Ok(Ok(())) => continue,
                Ok(Err(_closed)) => Eviction::Closed,
                Err(_elapsed) => Eviction::TimedOut(timeout),
            };

            if let Some(logger) = self.logger.upgrade() {
                logger.evict(&self.id, self.serial, eviction);
            }
            break;
        }
    }
}
