//! # Example: custom_listener
//!
//! Demonstrates attaching a [`Listen`] implementation and consuming a raw
//! endpoint side by side, plus eviction of a listener that never reads.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_listener
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use logvisor::{Config, Listen, Logger, Sentinel};

/// Counts entries and reports lifecycle sentinels.
struct Tally {
    count: std::sync::atomic::AtomicUsize,
}

#[async_trait]
impl Listen for Tally {
    async fn on_message(&self, message: &str) {
        match Sentinel::parse(message) {
            Some(s) => println!("[tally] {s}"),
            None => {
                let n = self
                    .count
                    .fetch_add(1, std::sync::atomic::Ordering::Relaxed);
                println!("[tally] #{} {message}", n + 1);
            }
        }
    }

    fn name(&self) -> &'static str {
        "tally"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new(Config {
        console: false,
        timeout: Duration::from_millis(200),
        ..Config::default()
    })?;

    logger.attach(
        "tally",
        Arc::new(Tally {
            count: Default::default(),
        }),
    )?;

    let mut raw = logger.register("raw")?;
    let reader = tokio::spawn(async move {
        while let Some(line) = raw.recv().await {
            println!("[raw]   {line}");
        }
    });

    // Never read: evicted once a delivery times out.
    let _stalled = logger.register("stalled")?;

    logger.warning("first");
    logger.wtf("second");
    tokio::time::sleep(Duration::from_millis(400)).await;
    println!("listeners after eviction: {:?}", logger.listeners());

    logger.shutdown().await;
    reader.await?;
    Ok(())
}
