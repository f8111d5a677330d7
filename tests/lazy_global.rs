//! Without `install`, the first use of the process-wide API creates a default logger.

use std::time::Duration;

use logvisor::{Level, CONNECT_MESSAGE, CONSOLE_ID};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn first_use_installs_defaults_and_keeps_earlier_settings() {
    logvisor::set_threshold(Level::Error);
    assert!(logvisor::global().is_none());

    // Filtered, but it still brings the logger up.
    assert!(!logvisor::warning!("below the threshold set earlier"));
    let logger = logvisor::global().expect("installed by the first emission");

    assert_eq!(logger.threshold(), Level::Error);
    assert_eq!(logger.timeout(), Duration::from_secs(5));
    assert!(logger.is_registered(CONSOLE_ID));

    let mut inbox = logvisor::register("p").unwrap();
    assert_eq!(inbox.recv().await.as_deref(), Some(CONNECT_MESSAGE));

    logvisor::set_threshold(Level::Debug);
    assert!(logvisor::debug!("now admitted"));
    let line = tokio::time::timeout(Duration::from_secs(2), inbox.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(line.starts_with("DEBUG    lazy_global.rs:"), "{line}");

    logvisor::shutdown().await;
    assert!(logger.is_empty());
}
