//! # Logger: the single coordinator for threshold, listeners and fan-out.
//!
//! [`Logger`] owns the threshold gate, the per-delivery timeout and the listener
//! registry. Emit calls never wait for listeners: admitted entries are queued for
//! every registered listener and delivered by per-listener workers.
//!
//! ## High-level architecture
//! ```text
//! warning!("disk {}% full", 97)
//!     └─► Logger::log(level, site, message)
//!            ├─ Threshold::passes(level)?  no ──► dropped
//!            └─ yes ──► LogEntry::render()
//!                          └─► Registry::fan_out(line)       (under the registry lock)
//!                                 ┌─────────┬─────────┐
//!                                 ▼         ▼         ▼
//!                            [queue L1] [queue L2] [queue LN]   (unbounded, FIFO)
//!                                 │         │         │
//!                            worker L1  worker L2  worker LN
//!                                 │         │         │
//!                       timeout(endpoint.send(line)) ─► ok | evict(id)
//!
//! Lifecycle:
//!   register(id)   ──► queue Connect ──► spawn worker ──► insert          (atomic w.r.t. fan-out)
//!   deregister(id) ──► remove ──► queue Disconnect ──► close queue ──► join worker (≤ timeout)
//!   shutdown()     ──► drain ──► deregister every slot concurrently
//!   fatal(msg)     ──► log ──► block on shutdown() (≤ timeout) ──► process::exit
//! ```
//!
//! ## Terminal severities
//! - [`Logger::fatal`] logs, waits for listeners to receive what is queued, then
//!   exits the process with `Config::fatal_exit_code`.
//! - [`Logger::error`] logs, then panics in the caller; the process survives if the
//!   panic is contained.
//!
//! Both side effects happen whether or not the threshold admits the entry.
//!
//! ## Example
//! ```rust
//! use logvisor::{Config, Logger, Level, CONNECT_MESSAGE};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), logvisor::LogError> {
//!     let cfg = Config { console: false, ..Config::default() };
//!     let logger = Logger::new(cfg)?;
//!
//!     let mut inbox = logger.register("tail")?;
//!     assert_eq!(inbox.recv().await.as_deref(), Some(CONNECT_MESSAGE));
//!
//!     logger.warning("disk almost full");
//!     let line = inbox.recv().await.unwrap();
//!     assert!(line.starts_with("WARNING"));
//!
//!     logger.set_threshold(Level::Error);
//!     assert!(!logger.warning("filtered"));
//!
//!     logger.shutdown().await;
//!     Ok(())
//! }
//! ```

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::delivery::{Delivery, Eviction};
use super::lifecycle::Sentinel;
use super::registry::{Registry, Slot};
use crate::config::Config;
use crate::entry::{CallSite, LogEntry};
use crate::error::LogError;
use crate::levels::{Level, Threshold};
use crate::listeners::{ConsoleWriter, Listen};

/// Reserved listener id of the console writer.
pub const CONSOLE_ID: &str = "CONSOLE";

/// Shared state behind every [`Logger`] clone.
pub(crate) struct Inner {
    cfg: Config,
    threshold: Threshold,
    timeout_nanos: AtomicU64,
    registry: Registry,
    runtime: Option<Handle>,
}

impl Inner {
    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_nanos(self.timeout_nanos.load(Ordering::Relaxed))
    }

    fn set_timeout(&self, timeout: Duration) {
        let nanos = u64::try_from(timeout.as_nanos()).unwrap_or(u64::MAX);
        self.timeout_nanos.store(nanos, Ordering::Relaxed);
    }

    /// Runtime used to spawn workers: the one captured at construction, else the current one.
    fn runtime(&self) -> Result<Handle, LogError> {
        self.runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
            .ok_or(LogError::NoRuntime)
    }

    /// Filters and fans out one entry. Returns whether it was admitted.
    fn submit(&self, entry: &LogEntry) -> bool {
        if !self.threshold.passes(entry.level()) {
            return false;
        }
        self.registry.fan_out(&Arc::from(entry.render()));
        true
    }

    /// Creates the delivery queue and worker for `endpoint` and registers it as `id`.
    ///
    /// `consumer` is the task reading `endpoint`, if the logger owns one.
    fn enlist(
        self: &Arc<Self>,
        id: String,
        endpoint: mpsc::Sender<String>,
        consumer: Option<JoinHandle<()>>,
    ) -> Result<(), LogError> {
        let runtime = self.runtime()?;
        let weak = Arc::downgrade(self);

        self.registry.insert_with(id.clone(), |serial| {
            let (queue, rx) = mpsc::unbounded_channel::<Arc<str>>();
            // Queued before the slot is visible to fan-out: Connect is always first.
            let _ = queue.send(Sentinel::Connect.into());

            let delivery = Delivery::new(id, serial, endpoint, weak);
            let worker = runtime.spawn(delivery.run(rx));
            Slot {
                serial,
                queue,
                worker,
                consumer,
            }
        })?;
        Ok(())
    }

    /// Removes `id` if it is still registration `serial` and reports why.
    pub(crate) fn evict(&self, id: &str, serial: u64, why: Eviction) {
        if self.registry.evict(id, serial).is_none() {
            return;
        }
        let reason = match why {
            Eviction::TimedOut(after) => format!("did not accept within {after:?}"),
            Eviction::Closed => "endpoint closed".to_string(),
        };
        self.submit(&LogEntry::new(
            Level::Verbose,
            CallSite::caller(),
            format!("listener {id:?} evicted: {reason}"),
        ));
    }

    /// Sends Disconnect to a removed slot and waits for its worker, bounded by one timeout.
    ///
    /// A logger-owned consumer is awaited within the same deadline, so a `Listen`
    /// implementation has handled Disconnect when this returns in time.
    async fn retire(&self, slot: Slot) {
        let Slot {
            queue,
            mut worker,
            consumer,
            ..
        } = slot;
        let deadline = Instant::now() + self.timeout();

        // Fails only when the worker already stopped.
        let _ = queue.send(Sentinel::Disconnect.into());
        drop(queue);

        if tokio::time::timeout_at(deadline, &mut worker).await.is_err() {
            worker.abort();
            return;
        }
        if let Some(consumer) = consumer {
            let _ = tokio::time::timeout_at(deadline, consumer).await;
        }
    }
}

/// Leveled logger broadcasting admitted entries to registered listeners.
///
/// Cheap to clone; all clones share the same threshold, timeout and registry.
#[derive(Clone)]
pub struct Logger {
    inner: Arc<Inner>,
}

impl Logger {
    /// Creates a logger from `cfg`.
    ///
    /// When `cfg.console` is set the console writer is attached under [`CONSOLE_ID`],
    /// which requires a running Tokio runtime.
    pub fn new(cfg: Config) -> Result<Self, LogError> {
        let inner = Arc::new(Inner {
            threshold: Threshold::new(cfg.threshold),
            timeout_nanos: AtomicU64::new(0),
            registry: Registry::new(),
            runtime: Handle::try_current().ok(),
            cfg,
        });
        inner.set_timeout(inner.cfg.timeout);

        let logger = Self { inner };
        if logger.inner.cfg.console {
            logger.attach(CONSOLE_ID, Arc::new(ConsoleWriter::new()))?;
        }
        Ok(logger)
    }

    /// Configuration the logger was created with.
    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }

    // ---------------------------
    // Threshold and timeout
    // ---------------------------

    /// Sets the most verbose level still delivered.
    pub fn set_threshold(&self, level: Level) {
        self.inner.threshold.set(level);
    }

    /// Current threshold.
    pub fn threshold(&self) -> Level {
        self.inner.threshold.get()
    }

    /// True iff an entry at `level` would be delivered right now.
    pub fn passes(&self, level: Level) -> bool {
        self.inner.threshold.passes(level)
    }

    /// Sets how long one delivery may wait before its listener is evicted.
    pub fn set_timeout(&self, timeout: Duration) {
        self.inner.set_timeout(timeout);
    }

    /// Current per-delivery timeout.
    pub fn timeout(&self) -> Duration {
        self.inner.timeout()
    }

    // ---------------------------
    // Listener registry
    // ---------------------------

    /// Registers `id` with a fresh endpoint and returns its receiving side.
    ///
    /// The first message on the receiver is [`CONNECT_MESSAGE`](crate::CONNECT_MESSAGE).
    ///
    /// # Errors
    /// - [`LogError::DuplicateListener`] if `id` is already registered.
    /// - [`LogError::NoRuntime`] outside a Tokio runtime.
    pub fn register(&self, id: impl Into<String>) -> Result<mpsc::Receiver<String>, LogError> {
        let (endpoint, inbox) = mpsc::channel(self.inner.cfg.endpoint_capacity_clamped());
        self.inner.enlist(id.into(), endpoint, None)?;
        Ok(inbox)
    }

    /// Registers `id` with a caller-provided endpoint.
    ///
    /// # Errors
    /// - [`LogError::MissingEndpoint`] if `endpoint` is `None`.
    /// - [`LogError::DuplicateListener`] if `id` is already registered.
    /// - [`LogError::NoRuntime`] outside a Tokio runtime.
    pub fn register_endpoint(
        &self,
        id: impl Into<String>,
        endpoint: Option<mpsc::Sender<String>>,
    ) -> Result<(), LogError> {
        let id = id.into();
        match endpoint {
            Some(endpoint) => self.inner.enlist(id, endpoint, None),
            None => Err(LogError::MissingEndpoint { id }),
        }
    }

    /// Registers `id` and drives its endpoint with `listener`.
    ///
    /// A panicking listener stops consuming; its endpoint closes and the listener is
    /// evicted on the next delivery.
    ///
    /// # Errors
    /// Same as [`Logger::register`].
    pub fn attach(&self, id: impl Into<String>, listener: Arc<dyn Listen>) -> Result<(), LogError> {
        let runtime = self.inner.runtime()?;
        let (endpoint, mut inbox) = mpsc::channel::<String>(self.inner.cfg.endpoint_capacity_clamped());
        let weak = Arc::downgrade(&self.inner);

        // A rejected registration drops `endpoint`, which ends this task at once.
        let consumer = runtime.spawn(async move {
            while let Some(message) = inbox.recv().await {
                let fut = listener.on_message(&message);
                if let Err(panic_err) = AssertUnwindSafe(fut).catch_unwind().await {
                    let info = {
                        let any = &*panic_err;
                        if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        }
                    };
                    drop(inbox);
                    if let Some(inner) = weak.upgrade() {
                        inner.submit(&LogEntry::new(
                            Level::Warning,
                            CallSite::caller(),
                            format!("listener {} panicked: {info}", listener.name()),
                        ));
                    }
                    break;
                }
            }
        });
        self.inner.enlist(id.into(), endpoint, Some(consumer))
    }

    /// Removes `id`, sending it a best-effort Disconnect. Unknown ids are ignored.
    ///
    /// The id is free for reuse as soon as this is called; the wait for the
    /// Disconnect delivery is bounded by the current timeout.
    pub async fn deregister(&self, id: &str) {
        if let Some(slot) = self.inner.registry.remove(id) {
            self.inner.retire(slot).await;
        }
    }

    /// Deregisters every listener concurrently. Idempotent.
    pub async fn shutdown(&self) {
        let slots = self.inner.registry.drain();
        futures::future::join_all(slots.into_iter().map(|(_, slot)| self.inner.retire(slot)))
            .await;
    }

    /// Attaches or removes the console writer.
    pub async fn set_console(&self, enabled: bool) -> Result<(), LogError> {
        if enabled {
            match self.attach(CONSOLE_ID, Arc::new(ConsoleWriter::new())) {
                Ok(()) | Err(LogError::DuplicateListener { .. }) => Ok(()),
                Err(e) => Err(e),
            }
        } else {
            self.deregister(CONSOLE_ID).await;
            Ok(())
        }
    }

    /// Sorted ids of registered listeners.
    pub fn listeners(&self) -> Vec<String> {
        self.inner.registry.ids()
    }

    /// True if `id` is registered.
    pub fn is_registered(&self, id: &str) -> bool {
        self.inner.registry.contains(id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.registry.len()
    }

    /// True if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ---------------------------
    // Emission
    // ---------------------------

    /// Emits `message` at `level` from an explicit call site.
    ///
    /// Returns whether the entry passed the threshold. No terminal side effects.
    pub fn log(&self, level: Level, site: CallSite, message: impl Into<String>) -> bool {
        self.inner.submit(&LogEntry::new(level, site, message))
    }

    /// Always delivered.
    #[track_caller]
    pub fn wtf(&self, message: impl Into<String>) -> bool {
        self.log(Level::Wtf, CallSite::caller(), message)
    }

    /// Always delivered; meant for users.
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) -> bool {
        self.log(Level::Info, CallSite::caller(), message)
    }

    /// Logs, then terminates the process with `Config::fatal_exit_code`.
    ///
    /// Before exiting, the calling thread blocks until every listener has received
    /// what was queued (this entry included) and its Disconnect, for at most one
    /// timeout. That wait needs a multi-thread runtime; under a current-thread
    /// runtime the workers cannot run while the caller blocks, and queued
    /// deliveries are lost. The process exits even if the threshold filters the entry.
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) -> ! {
        self.fatal_at(CallSite::caller(), message.into())
    }

    pub(crate) fn fatal_at(&self, site: CallSite, message: String) -> ! {
        self.log(Level::Fatal, site, message);
        self.flush_blocking();
        std::process::exit(self.inner.cfg.fatal_exit_code)
    }

    /// Runs [`Logger::shutdown`] to completion from synchronous code.
    fn flush_blocking(&self) {
        let multi_thread = |h: &Handle| matches!(h.runtime_flavor(), RuntimeFlavor::MultiThread);
        match Handle::try_current() {
            Ok(current) if multi_thread(&current) => {
                tokio::task::block_in_place(|| current.block_on(self.shutdown()));
            }
            Ok(_) => {}
            Err(_) => {
                if let Some(captured) = self.inner.runtime.as_ref().filter(|h| multi_thread(*h)) {
                    captured.block_on(self.shutdown());
                }
            }
        }
    }

    /// Logs, then panics with the message.
    ///
    /// The panic happens even if the threshold filters the entry out.
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) -> ! {
        let entry = LogEntry::new(Level::Error, CallSite::caller(), message);
        self.inner.submit(&entry);
        panic!("{}", entry.message())
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) -> bool {
        self.log(Level::Warning, CallSite::caller(), message)
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) -> bool {
        self.log(Level::Debug, CallSite::caller(), message)
    }

    #[track_caller]
    pub fn verbose(&self, message: impl Into<String>) -> bool {
        self.log(Level::Verbose, CallSite::caller(), message)
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .field("timeout", &self.timeout())
            .field("listeners", &self.listeners())
            .finish()
    }
}
