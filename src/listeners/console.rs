//! # ConsoleWriter — stdout printer
//!
//! The console is an ordinary listener registered under
//! [`CONSOLE_ID`](crate::CONSOLE_ID). It prints every delivered string verbatim,
//! including the Connect/Disconnect sentinels.
//!
//! ## Example output
//! ```text
//! Listening to log server
//! WARNING  main.rs:12	disk almost full
//! ERROR    db.rs:88	connection refused
//! Disconnected from log server
//! ```

use async_trait::async_trait;

use crate::listeners::Listen;

/// Prints delivered lines to stdout.
#[derive(Default)]
pub struct ConsoleWriter;

impl ConsoleWriter {
    /// Construct a new [`ConsoleWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Listen for ConsoleWriter {
    async fn on_message(&self, message: &str) {
        println!("{message}");
    }

    fn name(&self) -> &'static str {
        "ConsoleWriter"
    }
}
