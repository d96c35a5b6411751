//! Simulation result payload - output of the upstream Monte Carlo engine
//!
//! These types mirror the JSON document returned by the backend's `simulate`
//! endpoint. Every field the backend may omit is modelled explicitly as
//! optional (or defaulted), and `null` is accepted wherever omission is.
//! Nothing here derives new values; see `crate::core` for the analytics.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::RiskLevel;

/// Sparse pairwise correlation table: task key → task key → coefficient
pub type SparseCorrelations = BTreeMap<String, BTreeMap<String, f64>>;

/// Treat an explicit JSON `null` the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a risk label, dropping values no `RiskLevel` alias matches.
fn lenient_risk_level<'de, D>(deserializer: D) -> Result<Option<RiskLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|label| match label.parse::<RiskLevel>() {
        Ok(level) => Some(level),
        Err(e) => {
            tracing::warn!(label = %label, "{}", e);
            None
        }
    }))
}

/// Per-task detail record emitted by the simulator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    /// Task key (repeated from the map key by some backends)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_key: Option<String>,

    /// Probability of on-time completion (0-1); absent on some backends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_probability: Option<f64>,

    /// Expected duration in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,

    /// Optimistic estimate in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimistic_duration: Option<f64>,

    /// Pessimistic estimate in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pessimistic_duration: Option<f64>,

    /// Coefficient of variation (std-dev / mean)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variability: Option<f64>,

    /// Upstream classification; unrecognised labels are dropped
    #[serde(
        default,
        deserialize_with = "lenient_risk_level",
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_level: Option<RiskLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Project-level risk scores and advice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnalysis {
    /// Schedule risk score (0-1)
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_risk: f64,

    /// Resource risk score (0-1)
    #[serde(default, deserialize_with = "null_as_default")]
    pub resource_risk: f64,

    /// Scope risk score (0-1)
    #[serde(default, deserialize_with = "null_as_default")]
    pub scope_risk: f64,

    /// Tasks flagged as high risk by the simulator
    #[serde(default, deserialize_with = "null_as_default")]
    pub high_risk_tasks: Vec<String>,

    /// Ordered recommendations
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

/// Complete simulation output for one project run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub project_key: String,

    /// Number of trials the engine ran
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_simulations: Option<u32>,

    /// One simulated total duration (hours) per trial
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration_distribution: Vec<f64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub p50_duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub p80_duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub p90_duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mean_duration: f64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub standard_deviation: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<f64>,

    /// Ordered task keys on the critical path
    #[serde(default, deserialize_with = "null_as_default")]
    pub critical_path: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub task_completion_probabilities: BTreeMap<String, f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_analyses: Option<BTreeMap<String, TaskAnalysis>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_correlations: Option<SparseCorrelations>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub risk_analysis: RiskAnalysis,

    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_assessment: String,
}

impl SimulationResult {
    /// Upstream detail record for a task, if the engine supplied one
    pub fn task_analysis(&self, task_key: &str) -> Option<&TaskAnalysis> {
        self.task_analyses.as_ref().and_then(|m| m.get(task_key))
    }

    /// Number of trials: the reported count, or the sample count when absent
    pub fn simulation_count(&self) -> usize {
        self.total_simulations
            .map(|n| n as usize)
            .unwrap_or(self.duration_distribution.len())
    }

    /// Every task key known to the payload, in key order
    ///
    /// Union of the detail-record keys and the completion-probability keys.
    pub fn task_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.task_completion_probabilities.keys().cloned().collect();
        if let Some(analyses) = &self.task_analyses {
            keys.extend(analyses.keys().cloned());
        }
        keys.sort();
        keys.dedup();
        keys
    }

    /// Whether the engine supplied any per-task detail records
    pub fn has_task_analyses(&self) -> bool {
        self.task_analyses.as_ref().is_some_and(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAYLOAD: &str = r#"{
        "projectKey": "PROJ",
        "totalSimulations": 10,
        "p50Duration": 20.0,
        "p80Duration": 26.0,
        "p90Duration": 28.0,
        "meanDuration": 19.0,
        "standardDeviation": 5.74,
        "minDuration": 10.0,
        "maxDuration": 28.0,
        "criticalPath": ["PROJ-2", "PROJ-1"],
        "taskCompletionProbabilities": {"PROJ-1": 0.85, "PROJ-2": 0.55},
        "taskAnalyses": {
            "PROJ-1": {
                "taskKey": "PROJ-1",
                "completionProbability": 0.85,
                "estimatedDuration": 12.0,
                "optimisticDuration": 8.4,
                "pessimisticDuration": 24.0,
                "riskLevel": "낮음",
                "variability": 0.21,
                "status": "In Progress",
                "assignee": null,
                "priority": "High"
            }
        },
        "taskCorrelations": {"PROJ-1": {"PROJ-1": 1.0, "PROJ-2": 0.12}},
        "durationDistribution": [10, 12, 14, 16, 18, 20, 22, 24, 26, 28],
        "riskAnalysis": {
            "scheduleRisk": 0.35,
            "resourceRisk": 0.1,
            "scopeRisk": 0.0,
            "highRiskTasks": ["PROJ-2"],
            "recommendations": ["Add buffer time."]
        },
        "overallAssessment": "Moderate uncertainty."
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let result: SimulationResult = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(result.project_key, "PROJ");
        assert_eq!(result.duration_distribution.len(), 10);
        assert_eq!(result.critical_path, vec!["PROJ-2", "PROJ-1"]);
        assert_eq!(result.risk_analysis.high_risk_tasks, vec!["PROJ-2"]);

        let analysis = result.task_analysis("PROJ-1").unwrap();
        assert_eq!(analysis.risk_level, Some(RiskLevel::Low));
        assert_eq!(analysis.assignee, None);
        assert_eq!(analysis.variability, Some(0.21));
        assert!(result.task_analysis("PROJ-2").is_none());
    }

    #[test]
    fn test_parse_minimal_payload_with_nulls() {
        let json = r#"{
            "projectKey": "MIN",
            "durationDistribution": [5.0],
            "criticalPath": null,
            "taskCompletionProbabilities": null,
            "taskAnalyses": null,
            "taskCorrelations": null,
            "riskAnalysis": null,
            "overallAssessment": null
        }"#;
        let result: SimulationResult = serde_json::from_str(json).unwrap();
        assert!(result.critical_path.is_empty());
        assert!(result.task_completion_probabilities.is_empty());
        assert!(result.task_analyses.is_none());
        assert!(result.task_correlations.is_none());
        assert_eq!(result.risk_analysis, RiskAnalysis::default());
        assert!(result.overall_assessment.is_empty());
        assert!(!result.has_task_analyses());
    }

    #[test]
    fn test_unknown_risk_label_is_dropped() {
        let json = r#"{"completionProbability": 0.7, "riskLevel": "catastrophic"}"#;
        let analysis: TaskAnalysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.risk_level, None);
        assert_eq!(analysis.completion_probability, Some(0.7));
    }

    #[test]
    fn test_simulation_count_falls_back_to_samples() {
        let mut result: SimulationResult = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(result.simulation_count(), 10);
        result.total_simulations = None;
        result.duration_distribution.truncate(4);
        assert_eq!(result.simulation_count(), 4);
    }

    #[test]
    fn test_task_keys_union_sorted() {
        let result: SimulationResult = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(result.task_keys(), vec!["PROJ-1", "PROJ-2"]);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let result: SimulationResult = serde_json::from_str(FULL_PAYLOAD).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"durationDistribution\""));
        assert!(json.contains("\"taskCompletionProbabilities\""));
        assert!(json.contains("\"riskLevel\":\"low\""));
    }
}
