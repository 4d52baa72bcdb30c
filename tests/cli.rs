use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn barscape() -> Command {
    Command::cargo_bin("barscape").unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn read_report(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn headless_report_from_matrix() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "data.json", "[[10, 20, 30, 40], [5, 5, 5, 5]]");
    let report = dir.path().join("report.json");

    barscape()
        .arg(&data)
        .arg("--no-clusters")
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.json"));

    let json = read_report(&report);
    assert_eq!(json["dataset"]["matrixSize"], "2 × 4");
    assert_eq!(json["dataset"]["totalBars"], 8);
    assert_eq!(json["dataset"]["max"], 40.0);
    assert!(json["generatedAt"].is_string());
    assert!(json["sessionDurationMs"].is_number());
    assert!(json["averageFps"].is_number());
    assert!(json["insights"].is_array());
    assert_eq!(json["predictions"]["trend"], "increasing");
    let classes = json["dataset"]["classes"].as_object().unwrap();
    assert_eq!(classes.len(), 4);
    assert_eq!(classes.values().map(|v| v.as_u64().unwrap()).sum::<u64>(), 8);
}

#[test]
fn headless_report_records_selection() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "data.json", "[[10, 20, 30, 40], [1, 1, 1, 100]]");
    let report = dir.path().join("report.json");

    barscape()
        .arg(&data)
        .args(["--select", "1,3", "--report"])
        .arg(&report)
        .assert()
        .success();

    let json = read_report(&report);
    let interactions = json["interactions"].as_array().unwrap();
    assert_eq!(interactions.len(), 1);
    assert_eq!(interactions[0]["row"], 1);
    assert_eq!(interactions[0]["col"], 3);
    assert_eq!(interactions[0]["value"], 100.0);
    // analytics follow the selected row
    assert_eq!(json["series"], "Clothing");
}

#[test]
fn nested_dataset_with_metadata() {
    let dir = TempDir::new().unwrap();
    let data = write(
        &dir,
        "nested.json",
        r#"{
            "metadata": { "title": "Quarterly", "valueLabel": "Units" },
            "categories": ["Jan", "Feb", "Mar"],
            "datasets": {
                "north": { "revenue": [1, 2, 3], "costs": [3, 2, 1] }
            }
        }"#,
    );
    let report = dir.path().join("report.json");

    barscape()
        .arg(&data)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json = read_report(&report);
    assert_eq!(json["dataset"]["title"], "Quarterly");
    assert_eq!(json["dataset"]["table"], "north");
    assert_eq!(json["dataset"]["matrixSize"], "2 × 3");
}

#[test]
fn strict_policy_rejects_ragged_rows() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "bad.json", "[[1, 2, 3], [4, 5]]");
    let report = dir.path().join("report.json");

    barscape()
        .arg(&data)
        .arg("--report")
        .arg(&report)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));

    assert!(!report.exists());
}

#[test]
fn strict_policy_rejects_missing_file() {
    let dir = TempDir::new().unwrap();
    barscape()
        .arg(dir.path().join("missing.json"))
        .arg("--report")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure();
}

#[test]
fn fallback_policy_substitutes_sample_data() {
    let dir = TempDir::new().unwrap();
    let data = write(&dir, "bad.json", "{ not json");
    let report = dir.path().join("report.json");

    barscape()
        .arg(&data)
        .args(["--policy", "fallback", "--report"])
        .arg(&report)
        .assert()
        .success()
        .stderr(predicate::str::contains("fallback"));

    let json = read_report(&report);
    assert_eq!(json["dataset"]["table"], "sales");
}

#[test]
fn config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.json", r#"{ "clustering": false }"#);
    let report = dir.path().join("report.json");

    barscape()
        .arg("--config")
        .arg(&config)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json = read_report(&report);
    assert_eq!(json["dataset"]["totalBars"], 16);
}

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.json", r#"{ "spacing": -1 }"#);

    barscape()
        .arg("--config")
        .arg(&config)
        .arg("--report")
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("spacing"));
}

#[test]
fn out_of_range_jitter_fails() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "config.json", r#"{ "realtime": { "jitter": 1e308 } }"#);

    barscape()
        .arg("--config")
        .arg(&config)
        .args(["--realtime", "--report"])
        .arg(dir.path().join("report.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("jitter"));
}

#[test]
fn unknown_scheme_is_rejected() {
    barscape()
        .args(["--scheme", "sepia", "--report", "unused.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color scheme"));
}

#[test]
fn select_requires_report() {
    barscape().args(["--select", "0,0"]).assert().failure();
}
