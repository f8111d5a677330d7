//! The global logger is process-wide, so everything touching it lives in one test.

use std::time::Duration;

use logvisor::{Config, Level, CONNECT_MESSAGE, CONSOLE_ID, DISCONNECT_MESSAGE};

async fn next(inbox: &mut tokio::sync::mpsc::Receiver<String>) -> String {
    tokio::time::timeout(Duration::from_secs(2), inbox.recv())
        .await
        .expect("delivery within 2s")
        .expect("endpoint open")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn global_facade_and_macros() {
    assert!(logvisor::global().is_none());

    // Settings made before any logger exists are kept for it.
    logvisor::set_threshold(Level::Debug);
    logvisor::set_timeout(Duration::from_millis(500));
    assert!(logvisor::global().is_none());

    let logger = logvisor::install(Config {
        console: false,
        ..Config::default()
    })
    .unwrap();
    assert_eq!(logger.threshold(), Level::Debug);
    assert_eq!(logger.timeout(), Duration::from_millis(500));
    assert!(!logger.is_registered(CONSOLE_ID));

    let again = logvisor::install(Config::default()).unwrap();
    assert!(std::ptr::eq(logger, again));

    logvisor::set_threshold(Level::Error);
    assert_eq!(logger.threshold(), Level::Error);
    logvisor::set_threshold(Level::Debug);

    let mut inbox = logvisor::register("tail").unwrap();
    assert_eq!(next(&mut inbox).await, CONNECT_MESSAGE);

    let line = line!() + 1;
    assert!(logvisor::debug!("cache warmed in {}ms", 12));
    assert!(!logvisor::verbose!("too chatty"));
    assert!(logvisor::wtf!("always"));
    assert!(logvisor::info!("hello {name}", name = "user"));

    assert_eq!(
        next(&mut inbox).await,
        format!("DEBUG    global.rs:{line}\tcache warmed in 12ms")
    );
    assert!(next(&mut inbox).await.starts_with("WTF      global.rs:"));
    assert!(next(&mut inbox).await.ends_with("\thello user"));

    let caught = std::panic::catch_unwind(|| {
        logvisor::error!("broken invariant {}", 7);
    });
    let payload = caught.unwrap_err();
    assert_eq!(
        payload.downcast_ref::<String>().map(String::as_str),
        Some("broken invariant 7")
    );
    let err_line = next(&mut inbox).await;
    assert!(err_line.starts_with("ERROR    global.rs:"), "{err_line}");
    assert!(err_line.ends_with("\tbroken invariant 7"));

    logvisor::enable_console_output(true).await.unwrap();
    assert!(logger.is_registered(CONSOLE_ID));
    logvisor::enable_console_output(false).await.unwrap();
    assert!(!logger.is_registered(CONSOLE_ID));

    logvisor::deregister("tail").await;
    assert_eq!(next(&mut inbox).await, DISCONNECT_MESSAGE);
    assert!(inbox.recv().await.is_none());

    let _other = logvisor::register("other").unwrap();
    logvisor::shutdown().await;
    assert!(logger.is_empty());
}
