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
        "queuesim-rs-{prefix}-{}-{nanos}",
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

const CHAIN: &str = r#"
{
    "seed": 3,
    "components": [
        { "kind": "source", "label": "src", "generator": { "kind": "constant", "value": 1.0 }, "next": "proc" },
        { "kind": "processor", "label": "proc", "generator": { "kind": "constant", "value": 0.5 }, "next": "sink", "monitor": true },
        { "kind": "sink", "label": "sink", "monitor": true }
    ]
}
"#;

#[test]
fn queuesim_reports_monitored_components_as_json() {
    let dir = unique_temp_dir("report");
    let definition = write_file(&dir, "net.json", CHAIN);
    let out_json = dir.join("report.json");

    let output = Command::new(env!("CARGO_BIN_EXE_queuesim"))
        .args([
            "--definition",
            definition.to_str().unwrap(),
            "--horizon",
            "20",
            "--window-start",
            "0",
            "--window-end",
            "15",
            "--report-json",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run queuesim");
    assert!(
        output.status.success(),
        "queuesim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l.starts_with("done @ ")), "stdout={stdout}");
    assert!(stdout.contains("[processor] proc"), "stdout={stdout}");
    assert!(!stdout.contains("[source] src"), "stdout={stdout}");

    let raw = fs::read_to_string(&out_json).expect("read report.json");
    let v: Value = serde_json::from_str(&raw).expect("parse report.json");
    let arr = v.as_array().expect("report.json must be a JSON array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0].get("label").and_then(|l| l.as_str()), Some("proc"));
    assert_eq!(arr[0].get("kind").and_then(|k| k.as_str()), Some("processor"));
    let utilization = arr[0]
        .pointer("/service/utilization")
        .and_then(|u| u.as_f64())
        .expect("utilization");
    assert!((utilization - 0.5).abs() < 0.05, "utilization={utilization}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn queuesim_fails_on_unresolved_reference() {
    let dir = unique_temp_dir("unresolved");
    let definition = write_file(
        &dir,
        "net.json",
        r#"{ "components": [
            { "kind": "source", "label": "src", "generator": { "kind": "constant", "value": 1.0 }, "next": "nowhere" }
        ] }"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_queuesim"))
        .args([
            "--definition",
            definition.to_str().unwrap(),
            "--horizon",
            "10",
            "--window-start",
            "0",
            "--window-end",
            "5",
        ])
        .output()
        .expect("run queuesim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not compiled"), "stderr={stderr}");
    assert!(stderr.contains("nowhere"), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn queuesim_rejects_window_past_horizon() {
    let dir = unique_temp_dir("window");
    let definition = write_file(&dir, "net.json", CHAIN);

    let output = Command::new(env!("CARGO_BIN_EXE_queuesim"))
        .args([
            "--definition",
            definition.to_str().unwrap(),
            "--horizon",
            "10",
            "--window-start",
            "2",
            "--window-end",
            "12",
        ])
        .output()
        .expect("run queuesim");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid window"), "stderr={stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn queuesim_rejects_non_finite_horizon() {
    let dir = unique_temp_dir("nan-horizon");
    let definition = write_file(&dir, "net.json", CHAIN);

    for horizon in ["NaN", "inf"] {
        let output = Command::new(env!("CARGO_BIN_EXE_queuesim"))
            .args([
                "--definition",
                definition.to_str().unwrap(),
                "--horizon",
                horizon,
                "--window-start",
                "0",
                "--window-end",
                "5",
            ])
            .output()
            .expect("run queuesim");
        assert!(!output.status.success(), "horizon={horizon}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid window"), "stderr={stderr}");
    }

    let _ = fs::remove_dir_all(&dir);
}
