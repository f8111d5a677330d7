//! Terminal severities, checked from a child process.
//!
//! Each test re-runs this binary filtered to itself with `CHILD` set; the child
//! does the terminal thing and the parent inspects its status and stdout.

use std::process::{Command, Output};

use logvisor::{Config, CONNECT_MESSAGE};

const CHILD: &str = "LOGVISOR_TERMINAL_CHILD";

fn run_child(test: &str, mode: &str) -> Output {
    let exe = std::env::current_exe().expect("test binary path");
    Command::new(exe)
        .args([test, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD, mode)
        .output()
        .expect("spawn child")
}

fn child_mode() -> Option<String> {
    std::env::var(CHILD).ok()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn fatal_delivers_then_exits_with_configured_status() {
    if child_mode().as_deref() == Some("fatal") {
        runtime().block_on(async {
            logvisor::install(Config {
                fatal_exit_code: 3,
                ..Config::default()
            })
            .unwrap();
            logvisor::fatal!("disk {} is gone", "sda1");
        });
        return;
    }

    let out = run_child("fatal_delivers_then_exits_with_configured_status", "fatal");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert_eq!(out.status.code(), Some(3), "{out:?}");
    assert!(stdout.contains(CONNECT_MESSAGE), "{stdout}");
    let fatal = stdout
        .lines()
        .find(|l| l.contains("FATAL    terminal.rs:"))
        .unwrap_or_else(|| panic!("no FATAL line in {stdout}"));
    assert!(fatal.ends_with("\tdisk sda1 is gone"), "{fatal}");
}

#[test]
fn error_panics_the_caller_but_not_the_process() {
    if child_mode().as_deref() == Some("error") {
        runtime().block_on(async {
            logvisor::install(Config::default()).unwrap();

            let failed = std::thread::spawn(|| {
                logvisor::error!("bad input {}", 7);
            })
            .join();
            assert!(failed.is_err());

            logvisor::wtf!("still running");
            logvisor::shutdown().await;
        });
        return;
    }

    let out = run_child("error_panics_the_caller_but_not_the_process", "error");
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success(), "{out:?}");
    let error = stdout
        .lines()
        .find(|l| l.contains("ERROR    terminal.rs:"))
        .unwrap_or_else(|| panic!("no ERROR line in {stdout}"));
    assert!(error.ends_with("\tbad input 7"), "{error}");
    assert!(stdout.contains("still running"), "{stdout}");
}
