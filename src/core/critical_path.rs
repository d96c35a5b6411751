//! Critical path rows and summary statistics

use serde::{Deserialize, Serialize};

use crate::core::entity::RiskLevel;
use crate::core::resolver::{ResolvedTaskAnalysis, TaskAnalysisResolver};
use crate::entities::project::TaskNames;
use crate::entities::simulation::SimulationResult;

/// Shown when a task has no entry in the name lookup
pub const UNNAMED_TASK: &str = "(unnamed)";

/// One critical path entry, ranked from 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathRow {
    pub rank: usize,
    pub task_key: String,
    pub task_name: String,
    pub analysis: ResolvedTaskAnalysis,
}

/// Aggregate view of the critical path
///
/// Percentage and mean are `None` for an empty path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalPathSummary {
    pub total_tasks: usize,
    pub high_risk_tasks: usize,
    pub high_risk_percent: Option<f64>,
    pub average_completion_probability: Option<f64>,
}

impl CriticalPathSummary {
    pub fn from_analyses(analyses: &[ResolvedTaskAnalysis]) -> Self {
        let total_tasks = analyses.len();
        let high_risk_tasks = analyses
            .iter()
            .filter(|a| a.risk_level == RiskLevel::High)
            .count();

        if total_tasks == 0 {
            return Self::default();
        }

        let n = total_tasks as f64;
        let sum: f64 = analyses.iter().map(|a| a.completion_probability).sum();

        Self {
            total_tasks,
            high_risk_tasks,
            high_risk_percent: Some(high_risk_tasks as f64 / n * 100.0),
            average_completion_probability: Some(sum / n),
        }
    }

    pub fn has_data(&self) -> bool {
        self.total_tasks > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalPath {
    pub rows: Vec<CriticalPathRow>,
    pub summary: CriticalPathSummary,
}

impl CriticalPath {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolve every path entry and summarize
///
/// `names` is `None` when the task lookup was unavailable; rows then carry
/// the unnamed marker.
pub fn summarize(result: &SimulationResult, names: Option<&TaskNames>) -> CriticalPath {
    let resolver = TaskAnalysisResolver::new(result);
    let analyses = resolver.resolve_all(&result.critical_path);
    let summary = CriticalPathSummary::from_analyses(&analyses);

    let rows = analyses
        .into_iter()
        .enumerate()
        .map(|(i, analysis)| CriticalPathRow {
            rank: i + 1,
            task_key: analysis.task_key.clone(),
            task_name: names
                .and_then(|n| n.get(&analysis.task_key))
                .cloned()
                .unwrap_or_else(|| UNNAMED_TASK.to_string()),
            analysis,
        })
        .collect();

    CriticalPath { rows, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn result(path: &[&str], probs: &[(&str, f64)]) -> SimulationResult {
        SimulationResult {
            critical_path: path.iter().map(|s| s.to_string()).collect(),
            task_completion_probabilities: probs
                .iter()
                .map(|(k, p)| (k.to_string(), *p))
                .collect::<BTreeMap<_, _>>(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_path_has_no_data() {
        let path = summarize(&result(&[], &[]), None);
        assert!(path.is_empty());
        assert_eq!(path.summary.total_tasks, 0);
        assert_eq!(path.summary.high_risk_percent, None);
        assert_eq!(path.summary.average_completion_probability, None);
        assert!(!path.summary.has_data());
    }

    #[test]
    fn test_summary_counts_high_risk() {
        let r = result(
            &["T-1", "T-2", "T-3", "T-4"],
            &[("T-1", 0.9), ("T-2", 0.5), ("T-3", 0.7), ("T-4", 0.3)],
        );
        let path = summarize(&r, None);

        assert_eq!(path.summary.total_tasks, 4);
        assert_eq!(path.summary.high_risk_tasks, 2);
        assert_eq!(path.summary.high_risk_percent, Some(50.0));
        let avg = path.summary.average_completion_probability.unwrap();
        assert!((avg - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_rows_ranked_in_path_order_with_names() {
        let r = result(&["T-2", "T-1"], &[("T-1", 0.9), ("T-2", 0.9)]);
        let mut names = TaskNames::new();
        names.insert("T-2".to_string(), "Build API".to_string());

        let path = summarize(&r, Some(&names));
        assert_eq!(path.rows[0].rank, 1);
        assert_eq!(path.rows[0].task_key, "T-2");
        assert_eq!(path.rows[0].task_name, "Build API");
        assert_eq!(path.rows[1].task_name, UNNAMED_TASK);
    }

    #[test]
    fn test_unknown_path_task_uses_default_probability() {
        let path = summarize(&result(&["GHOST"], &[]), None);
        assert_eq!(path.rows[0].analysis.completion_probability, 0.5);
        assert_eq!(path.summary.high_risk_tasks, 1);
    }
}
