//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A `pra` command isolated from the caller's config and environment
pub fn pra() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("pra"));
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("pra-tests-no-config"))
        .env_remove("BACKEND_URL")
        .env_remove("ISSUE_BASE_URL")
        .env_remove("JIRA_URL")
        .env_remove("PRA_SIMULATIONS")
        .env_remove("PRA_LOG")
        .env_remove("RUST_LOG");
    cmd
}

/// Samples 10, 12, ..., 28 hours: P50 = 20, P80 = 26
pub const SAMPLE_RESULT: &str = r#"{
  "projectKey": "DEMO",
  "totalSimulations": 10,
  "durationDistribution": [10, 12, 14, 16, 18, 20, 22, 24, 26, 28],
  "p50Duration": 20.0,
  "p80Duration": 26.0,
  "p90Duration": 28.0,
  "meanDuration": 19.0,
  "standardDeviation": 5.74,
  "criticalPath": ["DEMO-1", "DEMO-2"],
  "taskCompletionProbabilities": { "DEMO-1": 0.55, "DEMO-2": 0.9, "DEMO-3": 0.7 },
  "taskAnalyses": {
    "DEMO-1": {
      "completionProbability": 0.55,
      "estimatedDuration": 16.0,
      "optimisticDuration": 12.0,
      "pessimisticDuration": 24.0,
      "variability": 0.35,
      "riskLevel": "HIGH"
    }
  },
  "riskAnalysis": {
    "scheduleRisk": 0.45,
    "resourceRisk": 0.1,
    "scopeRisk": 0.05,
    "highRiskTasks": ["DEMO-1"],
    "recommendations": ["Split DEMO-1 into smaller pieces"]
  },
  "overallAssessment": "Moderate schedule risk."
}"#;

/// Write `content` into a fresh temp dir and return both
pub fn write_fixture(name: &str, content: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    (tmp, path)
}

pub fn sample_result() -> (TempDir, PathBuf) {
    write_fixture("result.json", SAMPLE_RESULT)
}

/// A base URL where nothing is listening
pub fn dead_backend_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Serve canned responses, one per connection in order
///
/// Each entry is a status line ("200 OK") and a JSON body. The handle yields
/// the raw requests received.
pub fn stub_backend(
    responses: Vec<(&'static str, String)>,
) -> (String, std::thread::JoinHandle<Vec<String>>) {
    use std::io::{BufRead, BufReader, Read, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = std::thread::spawn(move || {
        let mut requests = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request = String::new();
            let mut content_length = 0usize;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                    break;
                }
                if let Some(v) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap_or(0);
                }
                request.push_str(&line);
            }
            let mut payload = vec![0u8; content_length];
            reader.read_exact(&mut payload).unwrap();
            request.push_str(&String::from_utf8_lossy(&payload));

            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            stream.flush().unwrap();
            requests.push(request);
        }
        requests
    });

    (format!("http://{}", addr), handle)
}
