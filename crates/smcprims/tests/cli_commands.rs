#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn smcprims(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_smcprims"))
        .args(args)
        .output()
        .expect("smcprims binary should run")
}

#[test]
fn version_prints_package_version() {
    let out = smcprims(&["version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout.trim(),
        format!("smcprims {}", env!("CARGO_PKG_VERSION"))
    );
}

#[test]
fn extended_version_lists_service() {
    let out = smcprims(&["version", "--extended"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("name: smcprims"));
    assert!(stdout.contains("service: AppleSMC"));
}

#[test]
fn invalid_key_is_a_usage_error() {
    let out = smcprims(&["read", "TOOLONG"]);
    assert_eq!(out.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid key"), "stderr: {stderr}");
}

#[test]
fn malformed_hex_is_a_usage_error() {
    let out = smcprims(&["write", "F0Tg", "0xabc"]);
    assert_eq!(out.status.code(), Some(64));
}

#[cfg(not(target_os = "macos"))]
#[test]
fn read_without_controller_is_a_transport_error() {
    let out = smcprims(&["read", "TC0P", "--format", "json"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("failed to open AppleSMC"), "stderr: {stderr}");
}
