//! # Example: console
//!
//! Emits entries at every level with console output enabled, then shows how the
//! threshold and the `Error` contract behave.
//!
//! ## Run
//! ```bash
//! cargo run --example console
//! ```

use std::time::Duration;

use logvisor::{debug, error, info, verbose, warning, wtf, Config, Level};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let logger = logvisor::install(Config::default())?;

    wtf!("always shown");
    info!("starting demo with threshold {}", logger.threshold());
    warning!("disk {}% full", 97);
    debug!("hidden at the default threshold");

    logvisor::set_threshold(Level::Verbose);
    debug!("now visible");
    verbose!("so is this");

    let outcome = tokio::spawn(async {
        error!("connection refused by {}", "db-1");
    })
    .await;
    info!("error panicked the task only: {}", outcome.is_err());

    // Let the console worker flush before shutting down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    logvisor::shutdown().await;
    Ok(())
}
