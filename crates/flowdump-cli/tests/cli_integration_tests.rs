//! CLI integration tests
//!
//! Run the built `flowdump` binary. None of these need a database: decode is
//! offline, and dump is pointed at configurations that fail before or at the
//! first connection.

use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn flowdump(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flowdump"))
        .args(args)
        .env_remove("FLOWDUMP_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

fn write_artifact(path: &Path, lines: &[&str]) {
    let mut encoder = GzEncoder::new(std::fs::File::create(path).unwrap(), Compression::default());
    for line in lines {
        writeln!(encoder, "{}", line).unwrap();
    }
    encoder.finish().unwrap();
}

#[test]
fn test_decode_prints_relabeled_records() {
    let dir = TempDir::new().unwrap();
    let artifact = dir.path().join("dump.jsonl.gz");
    write_artifact(
        &artifact,
        &[r#"{"si": "10.0.0.1", "9": "10.0.0.2"}"#, "broken", r#"{"dp": 80}"#],
    );

    let output = flowdump(&["decode", artifact.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = printed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["SRC_IP"], "10.0.0.1");
    assert_eq!(records[0]["REVERSE_FLOW_SRC_IP"], "10.0.0.2");
    assert_eq!(records[1]["DST_PORT"], 80);
}

#[test]
fn test_decode_missing_artifact_prints_empty_array() {
    let dir = TempDir::new().unwrap();
    let output = flowdump(&["decode", dir.path().join("absent.gz").to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "[]");
}

#[test]
fn test_dump_with_invalid_config_exits_1() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("flowdump.toml");
    std::fs::write(&config, "poll_interval_ms = 0\n").unwrap();

    let output = flowdump(&["dump", "--config", config.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_CONFIG"));
}

#[test]
fn test_dump_with_missing_config_file_exits_1() {
    let dir = TempDir::new().unwrap();
    let output = flowdump(&[
        "dump",
        "--config",
        dir.path().join("absent.toml").to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_dump_without_database_exits_1_and_writes_nothing() {
    // Given: a config pointing at a port nothing listens on
    let dir = TempDir::new().unwrap();
    let request = dir.path().join("req").join("request.json");
    let config = dir.path().join("flowdump.toml");
    std::fs::write(
        &config,
        format!(
            "config_db_url = \"redis://127.0.0.1:1/4\"\n\
             state_db_url = \"redis://127.0.0.1:1/6\"\n\
             request_path = \"{}\"\n",
            request.display()
        ),
    )
    .unwrap();

    let output = flowdump(&["dump", "--config", config.to_str().unwrap()]);

    // Then: store failure, and no request was issued
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_STORE"));
    assert!(!request.exists());
}

#[test]
fn test_dump_rejects_zero_max_flows() {
    let output = flowdump(&["dump", "--max-flows", "0"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_dump_rejects_zero_timeout() {
    let output = flowdump(&["dump", "--timeout", "0"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_flag_exits_1() {
    let output = flowdump(&["dump", "--no-such-flag"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--no-such-flag"));
}

#[test]
fn test_help_exits_0() {
    let output = flowdump(&["dump", "--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--max-flows"));
}
