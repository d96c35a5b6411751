//! Blocking HTTP client for the simulation backend
//!
//! One request per call, each with its own timeout. Failures are returned as
//! [`ClientError`]; nothing is retried.

use serde::de::DeserializeOwned;
use std::io::Read;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::{SimulationLimits, Timeouts};
use crate::entities::project::{HealthStatus, ProjectInfo, TaskSummary};
use crate::entities::simulation::SimulationResult;

/// Path prefix of the risk analysis API
pub const API_PREFIX: &str = "/api/risk-analysis";

/// Minimum trimmed length of a search query
pub const MIN_QUERY_LEN: usize = 2;

/// Longest error body kept in a [`ClientError::Status`]
const MAX_ERROR_BODY: usize = 512;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("backend unreachable at {url}: {message}")]
    Transport { url: String, message: String },

    #[error("backend returned HTTP {status} for {url}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("search query must be at least {min} characters")]
    QueryTooShort { min: usize },

    #[error("simulation count {requested} is outside {min}..={max}")]
    SimulationCount { requested: u32, min: u32, max: u32 },
}

impl ClientError {
    /// Timeouts and connection failures, as opposed to server answers
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Percent-encode one URL path segment, leaving RFC 3986 unreserved bytes as-is
fn path_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

/// Trimmed query, or an error when it is too short to send
pub fn validate_query(query: &str) -> Result<&str, ClientError> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return Err(ClientError::QueryTooShort { min: MIN_QUERY_LEN });
    }
    Ok(trimmed)
}

pub fn validate_simulation_count(n: u32, limits: &SimulationLimits) -> Result<u32, ClientError> {
    if limits.contains(n) {
        Ok(n)
    } else {
        Err(ClientError::SimulationCount {
            requested: n,
            min: limits.min,
            max: limits.max,
        })
    }
}

pub struct BackendClient {
    agent: ureq::Agent,
    base_url: String,
    timeouts: Timeouts,
}

impl BackendClient {
    pub fn new(base_url: &str, timeouts: Timeouts) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeouts.longest())
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Projects whose key or name matches `query`
    pub fn search_projects(&self, query: &str) -> Result<Vec<ProjectInfo>, ClientError> {
        let query = validate_query(query)?;
        let url = self.api_url("/projects/search");
        let request = self
            .agent
            .get(&url)
            .query("query", query)
            .timeout(self.timeouts.search());
        let projects: Vec<ProjectInfo> = decode(&url, request.call())?;
        tracing::info!(query, found = projects.len(), "project search");
        Ok(projects)
    }

    /// Run a simulation on the backend
    pub fn simulate(
        &self,
        project_key: &str,
        num_simulations: u32,
    ) -> Result<SimulationResult, ClientError> {
        let url = self.api_url(&format!("/projects/{}/simulate", path_segment(project_key)));
        let body = serde_json::json!({ "numSimulations": num_simulations });
        let request = self.agent.post(&url).timeout(self.timeouts.simulate());

        tracing::info!(project = project_key, num_simulations, "requesting simulation");
        let result: SimulationResult = decode(&url, request.send_json(body))?;
        tracing::info!(
            project = project_key,
            samples = result.duration_distribution.len(),
            "simulation complete"
        );
        Ok(result)
    }

    /// Key and summary of every task in a project
    pub fn lightweight_tasks(&self, project_key: &str) -> Result<Vec<TaskSummary>, ClientError> {
        let url = self.api_url(&format!(
            "/projects/{}/tasks/lightweight",
            path_segment(project_key)
        ));
        let request = self.agent.get(&url).timeout(self.timeouts.tasks());
        let tasks: Vec<TaskSummary> = decode(&url, request.call())?;
        tracing::info!(project = project_key, tasks = tasks.len(), "task lookup");
        Ok(tasks)
    }

    pub fn health(&self) -> Result<HealthStatus, ClientError> {
        let url = self.api_url("/health");
        let request = self.agent.get(&url).timeout(self.timeouts.search());
        decode(&url, request.call())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs().max(1);
        self.timeouts = Timeouts {
            search: secs,
            simulate: secs,
            tasks: secs,
        };
        self
    }
}

fn decode<T: DeserializeOwned>(
    url: &str,
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, ClientError> {
    match response {
        Ok(resp) => serde_json::from_reader(resp.into_reader()).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        }),
        Err(ureq::Error::Status(status, resp)) => {
            let mut body = String::new();
            let _ = resp
                .into_reader()
                .take(MAX_ERROR_BODY as u64)
                .read_to_string(&mut body);
            tracing::warn!(url, status, "backend returned an error status");
            Err(ClientError::Status {
                url: url.to_string(),
                status,
                body,
            })
        }
        Err(ureq::Error::Transport(transport)) => {
            tracing::warn!(url, error = %transport, "backend request failed");
            Err(ClientError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            })
        }
    }
}
