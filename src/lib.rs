//! # logvisor
//!
//! **Logvisor** is an in-process leveled logging facility for Tokio applications.
//!
//! Callers emit severity-tagged entries; the logger filters them against a
//! threshold, tags them with the call site and fans admitted entries out to a
//! dynamic set of listeners. Every listener gets its own serialized delivery
//! queue, each delivery is bounded by a timeout, and listeners that stop
//! accepting are evicted.
//!
//! ## Architecture
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  producer #1 │   │  producer #2 │   │  producer #3 │
//!     │ warning!(..) │   │  logger.info │   │  debug!(..)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Logger (single coordinator)                                      │
//! │  - Threshold (atomic filter gate)                                 │
//! │  - timeout (per-delivery bound, adjustable)                       │
//! │  - Registry (id → slot, one mutex for every access)               │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   [queue "CONSOLE"]  [queue "tail"]     [queue "audit"]     (unbounded, FIFO)
//!        │                  │                  │
//!     worker             worker             worker            (one per listener)
//!        │                  │                  │
//!  timeout(send)       timeout(send)      timeout(send) ──► elapsed ─► evict
//!        ▼                  ▼                  ▼
//!  ConsoleWriter      Receiver<String>    Listen impl
//! ```
//!
//! ### Lifecycle
//! ```text
//! register(id) ──► Connect ──► entries... ──► deregister(id) ──► Disconnect
//!                                   │
//!                                   └── delivery timed out ──► evicted (no Disconnect)
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types                              |
//! |-------------------|----------------------------------------------------------|----------------------------------------|
//! | **Levels**        | Ordered severities, name/ordinal conversion, threshold.  | [`Level`], [`Threshold`]               |
//! | **Emission**      | Level-named methods and macros with call-site tags.      | [`Logger`], [`wtf!`], [`warning!`] ... |
//! | **Listeners**     | Channel endpoints or trait-based consumers.              | [`Listen`], [`ConsoleWriter`]          |
//! | **Lifecycle**     | Connect/Disconnect sentinels.                            | [`Sentinel`]                           |
//! | **Errors**        | Typed registration errors.                               | [`LogError`]                           |
//! | **Configuration** | Initial threshold, timeout, endpoint capacity.           | [`Config`]                             |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use logvisor::{Config, Level};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), logvisor::LogError> {
//!     let cfg = Config { console: false, ..Config::default() };
//!     logvisor::install(cfg)?;
//!     logvisor::set_threshold(Level::Debug);
//!     logvisor::set_timeout(Duration::from_millis(500));
//!
//!     let mut inbox = logvisor::register("tail")?;
//!     logvisor::debug!("cache warmed in {}ms", 12);
//!
//!     assert_eq!(inbox.recv().await.as_deref(), Some(logvisor::CONNECT_MESSAGE));
//!     assert!(inbox.recv().await.unwrap().ends_with("cache warmed in 12ms"));
//!
//!     logvisor::shutdown().await;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod entry;
mod error;
mod facade;
mod levels;
mod listeners;

#[doc(hidden)]
pub mod macros;

// ---- Public re-exports ----

pub use crate::config::Config;
pub use crate::core::{Logger, Sentinel, CONNECT_MESSAGE, CONSOLE_ID, DISCONNECT_MESSAGE};
pub use crate::entry::{CallSite, LogEntry};
pub use crate::error::LogError;
pub use crate::facade::{
    deregister, enable_console_output, global, install, register, set_threshold, set_timeout,
    shutdown,
};
pub use crate::levels::{Level, Threshold};
pub use crate::listeners::{ConsoleWriter, Listen};
