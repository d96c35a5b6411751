//! Project search and task lookup records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A project returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Project key (e.g., "PROJ")
    pub key: String,

    /// Human-readable project name
    #[serde(default)]
    pub name: String,
}

impl std::fmt::Display for ProjectInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.key, self.name)
    }
}

/// A task from the lightweight task listing, used for name lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task key (e.g., "PROJ-42")
    pub key: String,

    /// Task summary line
    #[serde(default)]
    pub summary: String,
}

/// Backend health response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,

    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Task key → task summary
pub type TaskNames = BTreeMap<String, String>;

/// Build a name lookup from the lightweight task listing.
///
/// Later duplicates win, matching a plain dictionary build.
pub fn task_names(tasks: &[TaskSummary]) -> TaskNames {
    tasks
        .iter()
        .map(|t| (t.key.clone(), t.summary.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_info_display() {
        let project = ProjectInfo {
            key: "PROJ".to_string(),
            name: "Payment Platform".to_string(),
        };
        assert_eq!(project.to_string(), "PROJ - Payment Platform");
    }

    #[test]
    fn test_task_names_lookup() {
        let tasks = vec![
            TaskSummary {
                key: "PROJ-1".to_string(),
                summary: "Design schema".to_string(),
            },
            TaskSummary {
                key: "PROJ-2".to_string(),
                summary: "Write migrations".to_string(),
            },
        ];
        let names = task_names(&tasks);
        assert_eq!(names.get("PROJ-2").map(String::as_str), Some("Write migrations"));
        assert!(!names.contains_key("PROJ-3"));
    }

    #[test]
    fn test_health_status_case_insensitive() {
        let health: HealthStatus =
            serde_json::from_str(r#"{"status":"UP","service":"Project Risk Analyzer"}"#).unwrap();
        assert!(health.is_up());
    }
}
