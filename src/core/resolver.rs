//! Task analysis resolution with deterministic fallback
//!
//! When the simulator supplies a per-task detail record it is passed through
//! (only `assignee` and `priority` are defaulted). Otherwise a placeholder
//! record is synthesized from the task's completion probability alone. The
//! placeholder durations are fixed hour ranges, not estimates, and every
//! resolved record carries a [`Provenance`] so consumers can tell the two
//! apart.

use serde::{Deserialize, Serialize};

use crate::core::entity::{Provenance, RiskLevel};
use crate::entities::simulation::{SimulationResult, TaskAnalysis};

/// Completion probability assumed when the task is unknown to the payload
pub const FALLBACK_COMPLETION_PROBABILITY: f64 = 0.5;

/// Placeholder variability for synthesized records
pub const FALLBACK_VARIABILITY: f64 = 0.3;

/// Placeholder hour ranges for synthesized records
pub const FALLBACK_ESTIMATED_HOURS: (f64, f64) = (8.0, 16.0);
pub const FALLBACK_OPTIMISTIC_HOURS: (f64, f64) = (6.0, 12.0);
pub const FALLBACK_PESSIMISTIC_HOURS: (f64, f64) = (16.0, 24.0);

pub const FALLBACK_STATUS: &str = "in progress";
pub const UNKNOWN_STATUS: &str = "unknown";
pub const UNASSIGNED: &str = "unassigned";
pub const DEFAULT_PRIORITY: &str = "normal";

/// Lower bounds of the Low and Medium completion-probability bands
pub const LOW_RISK_THRESHOLD: f64 = 0.8;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.6;

/// Classify a completion probability into a risk band
///
/// Bands are closed on their lower bound: `p ≥ 0.8` is Low,
/// `0.6 ≤ p < 0.8` is Medium, anything else (including NaN) is High.
pub fn classify_risk(completion_probability: f64) -> RiskLevel {
    if completion_probability >= LOW_RISK_THRESHOLD {
        RiskLevel::Low
    } else if completion_probability >= MEDIUM_RISK_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    }
}

/// A duration as reported upstream, or a placeholder range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DurationEstimate {
    /// Exact number of hours from the simulator
    Hours { value: f64 },
    /// Placeholder range in hours
    Range { low: f64, high: f64 },
    /// Upstream record omitted the value
    Unknown,
}

impl DurationEstimate {
    fn from_upstream(value: Option<f64>) -> Self {
        match value {
            Some(value) => DurationEstimate::Hours { value },
            None => DurationEstimate::Unknown,
        }
    }

    fn range((low, high): (f64, f64)) -> Self {
        DurationEstimate::Range { low, high }
    }

    /// Exact hours, when known
    pub fn hours(&self) -> Option<f64> {
        match self {
            DurationEstimate::Hours { value } => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for DurationEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DurationEstimate::Hours { value } => write!(f, "{:.1}h", value),
            DurationEstimate::Range { low, high } => write!(f, "{}-{}h", low, high),
            DurationEstimate::Unknown => write!(f, "-"),
        }
    }
}

/// Normalized per-task analysis record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTaskAnalysis {
    pub task_key: String,
    pub completion_probability: f64,
    pub estimated_duration: DurationEstimate,
    pub optimistic_duration: DurationEstimate,
    pub pessimistic_duration: DurationEstimate,

    /// Coefficient of variation; absent when the upstream record omits it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variability: Option<f64>,

    pub risk_level: RiskLevel,
    pub status: String,
    pub assignee: String,
    pub priority: String,
    pub provenance: Provenance,
}

impl ResolvedTaskAnalysis {
    /// Pass an upstream record through, defaulting only missing labels
    ///
    /// `completion_probability` is used when the record carries none.
    pub fn from_upstream(
        task_key: &str,
        analysis: &TaskAnalysis,
        completion_probability: f64,
    ) -> Self {
        let completion_probability = analysis
            .completion_probability
            .unwrap_or(completion_probability);
        Self {
            task_key: task_key.to_string(),
            completion_probability,
            estimated_duration: DurationEstimate::from_upstream(analysis.estimated_duration),
            optimistic_duration: DurationEstimate::from_upstream(analysis.optimistic_duration),
            pessimistic_duration: DurationEstimate::from_upstream(analysis.pessimistic_duration),
            variability: analysis.variability,
            risk_level: analysis
                .risk_level
                .unwrap_or_else(|| classify_risk(completion_probability)),
            status: analysis
                .status
                .clone()
                .unwrap_or_else(|| UNKNOWN_STATUS.to_string()),
            assignee: analysis
                .assignee
                .clone()
                .unwrap_or_else(|| UNASSIGNED.to_string()),
            priority: analysis
                .priority
                .clone()
                .unwrap_or_else(|| DEFAULT_PRIORITY.to_string()),
            provenance: Provenance::Upstream,
        }
    }

    /// Synthesize a placeholder record from a completion probability
    pub fn fallback(task_key: &str, completion_probability: f64) -> Self {
        Self {
            task_key: task_key.to_string(),
            completion_probability,
            estimated_duration: DurationEstimate::range(FALLBACK_ESTIMATED_HOURS),
            optimistic_duration: DurationEstimate::range(FALLBACK_OPTIMISTIC_HOURS),
            pessimistic_duration: DurationEstimate::range(FALLBACK_PESSIMISTIC_HOURS),
            variability: Some(FALLBACK_VARIABILITY),
            risk_level: classify_risk(completion_probability),
            status: FALLBACK_STATUS.to_string(),
            assignee: UNASSIGNED.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

/// Resolves task keys against one simulation result
#[derive(Debug, Clone, Copy)]
pub struct TaskAnalysisResolver<'a> {
    result: &'a SimulationResult,
}

impl<'a> TaskAnalysisResolver<'a> {
    pub fn new(result: &'a SimulationResult) -> Self {
        Self { result }
    }

    /// Resolve a single task key
    pub fn resolve(&self, task_key: &str) -> ResolvedTaskAnalysis {
        let probability = self
            .result
            .task_completion_probabilities
            .get(task_key)
            .copied()
            .unwrap_or(FALLBACK_COMPLETION_PROBABILITY);

        if let Some(analysis) = self.result.task_analysis(task_key) {
            return ResolvedTaskAnalysis::from_upstream(task_key, analysis, probability);
        }

        tracing::debug!(
            task = task_key,
            probability,
            "no upstream analysis, using fallback record"
        );

        ResolvedTaskAnalysis::fallback(task_key, probability)
    }

    /// Resolve keys in order
    pub fn resolve_all<S: AsRef<str>>(&self, task_keys: &[S]) -> Vec<ResolvedTaskAnalysis> {
        task_keys.iter().map(|k| self.resolve(k.as_ref())).collect()
    }

    /// Resolve every task the payload knows about, in key order
    pub fn resolve_known(&self) -> Vec<ResolvedTaskAnalysis> {
        self.resolve_all(&self.result.task_keys())
    }
}

/// Resolve one task key against a result
pub fn resolve(task_key: &str, result: &SimulationResult) -> ResolvedTaskAnalysis {
    TaskAnalysisResolver::new(result).resolve(task_key)
}
