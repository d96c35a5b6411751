//! End-to-end `pra analyze` tests over saved payloads

mod common;

use common::{pra, sample_result, write_fixture};
use predicates::prelude::*;

fn analyze_json(args: &[&str]) -> serde_json::Value {
    let output = pra().args(args).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_analyze_json_markers() {
    let (_tmp, path) = sample_result();
    let report = analyze_json(&["analyze", path.to_str().unwrap(), "-o", "json"]);

    assert_eq!(report["project_key"], "DEMO");
    assert_eq!(report["total_simulations"], 10);
    assert_eq!(report["reported"]["p80"]["hours"], 26.0);
    assert_eq!(report["reported"]["p80"]["days"], 3.25);
    assert_eq!(report["derived"]["p50"]["hours"], 20.0);
    assert_eq!(report["derived"]["p80"]["hours"], 26.0);
}

#[test]
fn test_analyze_json_fallback_and_tornado() {
    let (_tmp, path) = sample_result();
    let report = analyze_json(&["analyze", path.to_str().unwrap(), "-o", "json"]);

    let fallback: Vec<&str> = report["fallback_tasks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(fallback, vec!["DEMO-2", "DEMO-3"]);

    let tornado = report["tornado"].as_array().unwrap();
    let keys: Vec<&str> = tornado
        .iter()
        .map(|t| t["task_key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["DEMO-1", "DEMO-2", "DEMO-3"]);
    assert_eq!(tornado[0]["provenance"], "upstream");
    assert_eq!(tornado[1]["provenance"], "fallback");
    assert_eq!(tornado[2]["value"], 0.3);

    let rows = report["critical_path"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["task_name"], "(unnamed)");
    assert_eq!(report["names_available"], false);
}

#[test]
fn test_analyze_with_task_names() {
    let (tmp, path) = sample_result();
    let names = tmp.path().join("tasks.json");
    std::fs::write(
        &names,
        r#"[{"key": "DEMO-1", "summary": "Design API"}, {"key": "DEMO-2", "summary": "Build UI"}]"#,
    )
    .unwrap();

    let report = analyze_json(&[
        "analyze",
        path.to_str().unwrap(),
        "--tasks",
        names.to_str().unwrap(),
        "-o",
        "json",
    ]);
    let rows = report["critical_path"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["task_name"], "Design API");
    assert_eq!(rows[1]["task_name"], "Build UI");
    assert_eq!(report["names_available"], true);
}

#[test]
fn test_analyze_empty_critical_path() {
    let (_tmp, path) = write_fixture(
        "empty.json",
        r#"{"projectKey": "EMPTY", "durationDistribution": [5, 6, 7], "criticalPath": []}"#,
    );

    let report = analyze_json(&["analyze", path.to_str().unwrap(), "-o", "json"]);
    assert_eq!(report["critical_path"]["summary"]["total_tasks"], 0);
    assert!(report["critical_path"]["summary"]["average_completion_probability"].is_null());

    pra()
        .args(["analyze", path.to_str().unwrap(), "-o", "pretty", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No critical path information"));
}

#[test]
fn test_analyze_pretty_without_names_lists_keys() {
    let (_tmp, path) = sample_result();
    pra()
        .args(["analyze", path.to_str().unwrap(), "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project DEMO"))
        .stdout(predicate::str::contains("1. DEMO-1"))
        .stdout(predicate::str::contains("2. DEMO-2"))
        .stdout(predicate::str::contains("Split DEMO-1 into smaller pieces"));
}

#[test]
fn test_analyze_markdown_links() {
    let (_tmp, path) = sample_result();
    pra()
        .args([
            "analyze",
            path.to_str().unwrap(),
            "-o",
            "md",
            "--issue-url",
            "https://jira.example.com/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("# DEMO Schedule Risk Report"))
        .stdout(predicate::str::contains(
            "[DEMO-1](https://jira.example.com/browse/DEMO-1)",
        ))
        .stdout(predicate::str::contains("1. Split DEMO-1 into smaller pieces"))
        .stdout(predicate::str::contains("| DEMO-1 | 0.350 | upstream |"))
        .stdout(predicate::str::contains("| DEMO-2 | 0.300 | fallback |"));
}

#[test]
fn test_analyze_tsv_critical_path() {
    let (_tmp, path) = sample_result();
    pra()
        .args(["analyze", path.to_str().unwrap(), "-o", "tsv"])
        .env("JIRA_URL", "http://jira.local")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("RANK\tKEY\tNAME"))
        .stdout(predicate::str::contains("http://jira.local/browse/DEMO-2"));
}

#[test]
fn test_analyze_yaml_payload() {
    let (_tmp, path) = write_fixture(
        "result.yaml",
        "projectKey: YML\ndurationDistribution: [1, 2, 3, 4]\ncriticalPath: null\n",
    );
    let output = pra()
        .args(["analyze", path.to_str().unwrap(), "-o", "yaml"])
        .assert()
        .success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    assert!(stdout.contains("project_key: YML"));
}

#[test]
fn test_analyze_missing_file_fails() {
    pra()
        .args(["analyze", "/nonexistent/result.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn test_analyze_syntax_error_is_located() {
    let (_tmp, path) = write_fixture("broken.json", "{\n  \"projectKey\": \"P\",\n  oops\n}");
    pra()
        .args(["analyze", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid JSON"));
}

#[test]
fn test_analyze_strict_rejects_schema_violations() {
    let (_tmp, path) = write_fixture(
        "loose.json",
        r#"{"projectKey": "P", "durationDistribution": [1, 2], "taskCompletionProbabilities": {"P-1": 1.5}}"#,
    );

    pra()
        .args(["analyze", path.to_str().unwrap(), "-o", "json"])
        .assert()
        .success();

    pra()
        .args(["analyze", path.to_str().unwrap(), "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match"));
}

#[test]
fn test_analyze_sensitivity_metric() {
    let (_tmp, path) = sample_result();
    let report = analyze_json(&[
        "analyze",
        path.to_str().unwrap(),
        "--metric",
        "sensitivity",
        "-o",
        "json",
    ]);
    assert_eq!(report["tornado_metric"], "sensitivity");
}
