use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "conntrace-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn read_lines(path: &PathBuf) -> Vec<String> {
    fs::read_to_string(path)
        .expect("read output file")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn conntrace_emits_up_and_down_for_two_node_trace() {
    let dir = unique_temp_dir("two-nodes");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00;POINT(0 0)\n\
         2;2020-01-01 00:00:10;POINT(0 0.0005)\n\
         1;2020-01-01 00:00:20;POINT(0 1.0)\n",
    );
    let out = dir.join("conn.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(
        output.status.success(),
        "conntrace failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        read_lines(&out),
        vec!["10 CONN 1 2 UP", "20 CONN 1 2 DOWN"]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("up=1"), "stdout={stdout}");
    assert!(stdout.contains("down=1"), "stdout={stdout}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_strips_tz_suffix_and_fraction_from_timestamps() {
    let dir = unique_temp_dir("tz-suffix");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00+01;POINT(0 0)\n\
         2;2020-01-01 00:00:10.250+01;POINT(0 0.0005)\n",
    );
    let out = dir.join("conn.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(
        output.status.success(),
        "conntrace failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    // the link is still open at end of input: finalize closes it at the last clock
    assert_eq!(
        read_lines(&out),
        vec!["10 CONN 1 2 UP", "10 CONN 1 2 DOWN"]
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_exits_nonzero_on_malformed_record() {
    let dir = unique_temp_dir("malformed");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00\n\
         2;2020-01-01 00:00:10;POINT(0 0.0005)\n",
    );
    let out = dir.join("conn.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(!output.status.success(), "expected non-zero exit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("malformed record"),
        "stderr did not contain expected message: {stderr}"
    );
    // the run aborted before any event could be written
    assert_eq!(read_lines(&out), Vec::<String>::new());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_exits_nonzero_on_backwards_timestamps() {
    let dir = unique_temp_dir("non-monotonic");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:10;POINT(0 0)\n\
         2;2020-01-01 00:00:05;POINT(0 0.0005)\n",
    );
    let out = dir.join("conn.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(!output.status.success(), "expected non-zero exit");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("non-monotonic timestamp"),
        "stderr did not contain expected message: {stderr}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_honors_range_option() {
    let dir = unique_temp_dir("range");
    // ~55m apart: out of range at 10m, in range at the default 100m
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00;POINT(0 0)\n\
         2;2020-01-01 00:00:10;POINT(0 0.0005)\n",
    );
    let out = dir.join("conn.txt");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--range",
            "10",
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(
        output.status.success(),
        "conntrace failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(read_lines(&out), Vec::<String>::new());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_writes_stats_json_sidecar() {
    let dir = unique_temp_dir("stats-json");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00;POINT(0 0)\n\
         2;2020-01-01 00:00:10;POINT(0 0.0005)\n\
         1;2020-01-01 00:00:20;POINT(0 1.0)\n",
    );
    let out = dir.join("conn.txt");
    let stats = dir.join("stats.json");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
            "--stats-json",
            stats.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(
        output.status.success(),
        "conntrace failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&stats).expect("read stats.json");
    let v: Value = serde_json::from_str(&raw).expect("parse stats.json");
    assert_eq!(v.get("lines_read").and_then(Value::as_u64), Some(3));
    assert_eq!(v.get("nodes_seen").and_then(Value::as_u64), Some(2));
    assert_eq!(v.get("events_up").and_then(Value::as_u64), Some(1));
    assert_eq!(v.get("events_down").and_then(Value::as_u64), Some(1));
    assert_eq!(v.get("clock_end_secs").and_then(Value::as_u64), Some(20));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn conntrace_appends_to_existing_output() {
    let dir = unique_temp_dir("append");
    let datatrace = write_file(
        &dir,
        "trace.txt",
        "1;2020-01-01 00:00:00;POINT(0 0)\n\
         2;2020-01-01 00:00:10;POINT(0 0.0005)\n",
    );
    let out = write_file(&dir, "conn.txt", "0 CONN 8 9 UP\n");

    let output = Command::new(env!("CARGO_BIN_EXE_conntrace"))
        .args([
            datatrace.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .output()
        .expect("run conntrace");
    assert!(
        output.status.success(),
        "conntrace failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let lines = read_lines(&out);
    assert_eq!(lines[0], "0 CONN 8 9 UP");
    assert_eq!(lines[1], "10 CONN 1 2 UP");

    let _ = fs::remove_dir_all(&dir);
}
