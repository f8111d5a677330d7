//! # Listener trait
//!
//! `Listen` is the extension point for consuming log lines without managing a
//! channel by hand. [`Logger::attach`](crate::Logger::attach) registers a fresh
//! endpoint and drives it with a dedicated consumer task that calls
//! [`Listen::on_message`] for every delivered string, sentinels included.
//!
//! ## Contract
//! - Messages arrive one at a time, in delivery order.
//! - A slow `on_message` holds the endpoint: if the next delivery cannot be
//!   accepted within the logger timeout, the listener is evicted.
//! - A panicking `on_message` detaches the listener.
//!
//! ## Example (skeleton)
//! ```rust
//! use logvisor::Listen;
//! use async_trait::async_trait;
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Listen for Audit {
//!     async fn on_message(&self, message: &str) {
//!         // write audit record...
//!         let _ = message;
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//! }
//! ```

use async_trait::async_trait;

/// Contract for message consumers attached to a [`Logger`](crate::Logger).
///
/// Called from a listener-dedicated task. Implementations should avoid blocking
/// the async runtime (prefer async I/O and cooperative waits).
#[async_trait]
pub trait Listen: Send + Sync + 'static {
    /// Handle one delivered line (a rendered entry or a sentinel).
    async fn on_message(&self, message: &str);

    /// Human-readable name (for the facility's own reports).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
