//! # Message consumers.
//!
//! A listener is anything holding the receiving side of a registered endpoint.
//! Callers can consume the `mpsc::Receiver<String>` returned by
//! [`Logger::register`](crate::Logger::register) directly, or implement [`Listen`]
//! and let [`Logger::attach`](crate::Logger::attach) drive it.
//!
//! ## Architecture
//! ```text
//! worker ── endpoint.send(line) ──► Receiver<String>
//!                                      │
//!                                      ├──► caller loop (register)
//!                                      └──► consumer task ──► Listen::on_message (attach)
//!                                                              │
//!                                                   ┌──────────┴──────────┐
//!                                                   ▼                     ▼
//!                                             ConsoleWriter            Custom
//! ```

mod console;
mod listen;

pub use console::ConsoleWriter;
pub use listen::Listen;
