//! Loading saved simulation results and task-name lookups

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

use crate::entities::project::{task_names, TaskNames, TaskSummary};
use crate::entities::simulation::SimulationResult;
use crate::payload::diagnostics::{PayloadError, PayloadSyntaxError};

/// Document syntax of a payload file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFormat {
    Json,
    Yaml,
}

impl PayloadFormat {
    /// Pick by extension, falling back to sniffing the first character
    pub fn detect(filename: &str, content: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => PayloadFormat::Json,
            Some("yaml") | Some("yml") => PayloadFormat::Yaml,
            _ => {
                if matches!(content.trim_start().chars().next(), Some('{') | Some('[')) {
                    PayloadFormat::Json
                } else {
                    PayloadFormat::Yaml
                }
            }
        }
    }
}

/// Parse a document into a typed value with located errors
pub fn parse_document<T: DeserializeOwned>(content: &str, filename: &str) -> Result<T, PayloadError> {
    match PayloadFormat::detect(filename, content) {
        PayloadFormat::Json => serde_json::from_str(content).map_err(|e| {
            PayloadError::Syntax(PayloadSyntaxError::from_json_error(&e, content, filename))
        }),
        PayloadFormat::Yaml => serde_yml::from_str(content).map_err(|e| {
            PayloadError::Syntax(PayloadSyntaxError::from_yaml_error(&e, content, filename))
        }),
    }
}

pub fn parse_simulation_result(content: &str, filename: &str) -> Result<SimulationResult, PayloadError> {
    let result: SimulationResult = parse_document(content, filename)?;
    tracing::debug!(
        file = filename,
        project = %result.project_key,
        samples = result.duration_distribution.len(),
        "parsed simulation result"
    );
    Ok(result)
}

pub fn read_payload(path: &Path) -> Result<String, PayloadError> {
    std::fs::read_to_string(path).map_err(|source| PayloadError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_simulation_result(path: &Path) -> Result<SimulationResult, PayloadError> {
    let content = read_payload(path)?;
    parse_simulation_result(&content, &path.display().to_string())
}

/// Either the lightweight task listing or a plain key → name map
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskNamesDocument {
    Listing(Vec<TaskSummary>),
    Map(TaskNames),
}

pub fn parse_task_names(content: &str, filename: &str) -> Result<TaskNames, PayloadError> {
    let names = match parse_document::<TaskNamesDocument>(content, filename)? {
        TaskNamesDocument::Listing(tasks) => task_names(&tasks),
        TaskNamesDocument::Map(map) => map,
    };
    Ok(names)
}

pub fn load_task_names(path: &Path) -> Result<TaskNames, PayloadError> {
    let content = read_payload(path)?;
    parse_task_names(&content, &path.display().to_string())
}
