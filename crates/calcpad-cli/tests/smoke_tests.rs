//! Smoke tests for the calcpad binary

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use calcpad::service::{ArithmeticService, ServiceConfig};
use calcpad_cli::REMOTE_ENV;
use predicates::prelude::*;
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

/// Get a command for the calcpad binary, with no remote configured
fn calcpad() -> Command {
    let mut cmd = Command::cargo_bin("calcpad").expect("calcpad binary should exist");
    cmd.env_remove(REMOTE_ENV).env_remove("RUST_LOG");
    cmd
}

/// Starts the arithmetic service on an ephemeral port; keep the runtime alive
fn spawn_service() -> (Runtime, String) {
    let runtime = Runtime::new().unwrap();
    let listener = runtime
        .block_on(TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    runtime.spawn(async move {
        ArithmeticService::new(ServiceConfig::default())
            .serve(listener)
            .await
    });
    (runtime, url)
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    calcpad()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    calcpad()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_no_args_fails() {
    calcpad().assert().failure();
}

#[test]
fn test_serve_help() {
    calcpad()
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--cors"));
}

// ============================================================================
// Keys
// ============================================================================

#[test]
fn test_keys_addition() {
    calcpad()
        .args(["--color", "never", "keys", "12+8="])
        .assert()
        .success()
        .stdout("12 + 8 =\n20\n");
}

#[test]
fn test_keys_quiet_prints_display_only() {
    calcpad()
        .args(["-q", "--color", "never", "keys", "12+8="])
        .assert()
        .success()
        .stdout("20\n");
}

#[test]
fn test_keys_leading_minus() {
    calcpad()
        .args(["-q", "--color", "never", "keys", "-3="])
        .assert()
        .success()
        .stdout("-3\n");
}

#[test]
fn test_keys_chain() {
    calcpad()
        .args(["--color", "never", "keys", "2+3*4="])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("20\n"));
}

#[test]
fn test_keys_divide_by_zero() {
    calcpad()
        .args(["--color", "never", "keys", "7/0="])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot ÷ 0"));
}

#[test]
fn test_keys_invalid_character() {
    calcpad()
        .args(["keys", "2+x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid key 'x' at position 2"));
}

#[test]
fn test_keys_rejects_bad_remote() {
    calcpad()
        .args(["keys", "1+1=", "--remote", "localhost:4100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid argument"));
}

// ============================================================================
// Remote gateway
// ============================================================================

#[test]
fn test_keys_against_service() {
    let (_runtime, url) = spawn_service();
    calcpad()
        .args(["-q", "--color", "never", "keys", "9-4*3=", "--remote", &url])
        .assert()
        .success()
        .stdout("15\n");
}

#[test]
fn test_keys_remote_from_env() {
    let (_runtime, url) = spawn_service();
    calcpad()
        .env(REMOTE_ENV, &url)
        .args(["-q", "--color", "never", "keys", "7/0="])
        .assert()
        .success()
        .stdout("Cannot ÷ 0\n");
}

#[test]
fn test_keys_unreachable_remote_shows_error() {
    calcpad()
        .args([
            "-q",
            "--color",
            "never",
            "keys",
            "1+1=",
            "--remote",
            "http://127.0.0.1:9",
        ])
        .assert()
        .success()
        .stdout("Error\n");
}
