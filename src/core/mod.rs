//! Coordinator core: registry, delivery and lifecycle.
//!
//! The only public entry point from this module is [`Logger`].
//!
//! Internal modules:
//! - [`registry`]: synchronized id → slot map, fan-out under the lock;
//! - [`delivery`]: per-listener worker enforcing the timeout and eviction;
//! - [`lifecycle`]: Connect/Disconnect sentinels;
//! - [`logger`]: threshold, timeout, registration and emission.

mod delivery;
mod lifecycle;
mod logger;
mod registry;

pub use lifecycle::{Sentinel, CONNECT_MESSAGE, DISCONNECT_MESSAGE};
pub use logger::{Logger, CONSOLE_ID};
