//! Analysis report - everything derived from one simulation result
//!
//! The report is a plain serializable value; rendering (pretty terminal,
//! JSON/YAML, tables, Markdown) lives in the CLI and template layers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::completion::{rank_completion, CompletionEntry, DEFAULT_TOP_TASKS};
use crate::core::correlation::CorrelationMatrix;
use crate::core::critical_path::{summarize, CriticalPath};
use crate::core::gauge::{gauges, RiskGauge};
use crate::core::histogram::{DurationHistogram, DEFAULT_BINS};
use crate::core::percentile::DurationStats;
use crate::core::resolver::TaskAnalysisResolver;
use crate::core::sensitivity::{rank_by_sensitivity, SensitivityEntry};
use crate::core::tornado::{TornadoEntry, TornadoMetric, TornadoRanker, DEFAULT_TORNADO_LIMIT};
use crate::entities::project::TaskNames;
use crate::entities::simulation::SimulationResult;

/// Working hours in one day
pub const HOURS_PER_WORKDAY: f64 = 8.0;

/// Tolerance for the correlation matrix diagnostics
pub const CORRELATION_TOLERANCE: f64 = 1e-6;

pub fn hours_to_days(hours: f64) -> f64 {
    hours / HOURS_PER_WORKDAY
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("template not found: {0}")]
    MissingTemplate(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),
}

/// A duration in hours and in working days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkDuration {
    pub hours: f64,
    pub days: f64,
}

impl From<f64> for WorkDuration {
    fn from(hours: f64) -> Self {
        Self {
            hours,
            days: hours_to_days(hours),
        }
    }
}

/// Percentile markers and spread of the project duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationMarkers {
    pub p50: WorkDuration,
    pub p80: WorkDuration,
    pub p90: WorkDuration,
    pub mean: WorkDuration,
    pub std_dev: WorkDuration,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<WorkDuration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<WorkDuration>,
}

impl DurationMarkers {
    /// Markers as the simulator reported them
    pub fn from_upstream(result: &SimulationResult) -> Self {
        Self {
            p50: result.p50_duration.into(),
            p80: result.p80_duration.into(),
            p90: result.p90_duration.into(),
            mean: result.mean_duration.into(),
            std_dev: result.standard_deviation.into(),
            min: result.min_duration.map(Into::into),
            max: result.max_duration.map(Into::into),
        }
    }

    /// Markers re-derived from the raw samples
    pub fn from_stats(stats: &DurationStats) -> Self {
        Self {
            p50: stats.p50.into(),
            p80: stats.p80.into(),
            p90: stats.p90.into(),
            mean: stats.mean.into(),
            std_dev: stats.std_dev.into(),
            min: Some(stats.min.into()),
            max: Some(stats.max.into()),
        }
    }
}

/// Knobs for report assembly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportOptions {
    pub histogram_bins: usize,
    pub tornado_limit: usize,
    pub tornado_metric: TornadoMetric,
    pub top_tasks: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            histogram_bins: DEFAULT_BINS,
            tornado_limit: DEFAULT_TORNADO_LIMIT,
            tornado_metric: TornadoMetric::default(),
            top_tasks: DEFAULT_TOP_TASKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub project_key: String,
    pub total_simulations: usize,

    /// Markers reported by the simulator
    pub reported: DurationMarkers,

    /// Markers re-derived from `durationDistribution`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DurationMarkers>,

    pub histogram: DurationHistogram,
    pub critical_path: CriticalPath,
    pub completion_ranking: Vec<CompletionEntry>,
    pub tornado_metric: TornadoMetric,
    pub tornado: Vec<TornadoEntry>,
    pub sensitivity: Vec<SensitivityEntry>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationMatrix>,

    pub gauges: Vec<RiskGauge>,
    pub high_risk_tasks: Vec<String>,
    pub recommendations: Vec<String>,
    pub overall_assessment: String,

    /// Keys resolved from placeholder data rather than upstream detail
    pub fallback_tasks: Vec<String>,

    /// Whether task names were available for the critical path
    pub names_available: bool,

    pub warnings: Vec<String>,
}

impl AnalysisReport {
    pub fn build(
        result: &SimulationResult,
        names: Option<&TaskNames>,
        options: &ReportOptions,
    ) -> Self {
        let mut warnings = Vec::new();
        let resolver = TaskAnalysisResolver::new(result);

        let stats = DurationStats::from_samples(&result.duration_distribution);
        if stats.is_none() {
            warnings.push("no duration samples; distribution unavailable".to_string());
        }

        let critical_path = summarize(result, names);

        let known = resolver.resolve_known();
        let tornado = TornadoRanker::new(options.tornado_metric, options.tornado_limit)
            .rank(&known);
        let sensitivity = rank_by_sensitivity(&known);

        let mut fallback_tasks: Vec<String> = known
            .iter()
            .chain(critical_path.rows.iter().map(|r| &r.analysis))
            .filter(|a| a.is_fallback())
            .map(|a| a.task_key.clone())
            .collect();
        fallback_tasks.sort();
        fallback_tasks.dedup();
        if !fallback_tasks.is_empty() {
            tracing::warn!(
                count = fallback_tasks.len(),
                "tasks without upstream analysis use placeholder values"
            );
        }

        let correlations = CorrelationMatrix::from_result(result);
        if let Some(matrix) = &correlations {
            for warning in matrix.diagnostics(CORRELATION_TOLERANCE) {
                tracing::warn!("{}", warning);
                warnings.push(warning);
            }
        }

        let report = Self {
            project_key: result.project_key.clone(),
            total_simulations: result.simulation_count(),
            reported: DurationMarkers::from_upstream(result),
            derived: stats.as_ref().map(DurationMarkers::from_stats),
            histogram: DurationHistogram::from_samples(
                &result.duration_distribution,
                options.histogram_bins,
            ),
            critical_path,
            completion_ranking: rank_completion(
                &result.task_completion_probabilities,
                options.top_tasks,
            ),
            tornado_metric: options.tornado_metric,
            tornado,
            sensitivity,
            correlations,
            gauges: gauges(&result.risk_analysis),
            high_risk_tasks: result.risk_analysis.high_risk_tasks.clone(),
            recommendations: result.risk_analysis.recommendations.clone(),
            overall_assessment: result.overall_assessment.clone(),
            fallback_tasks,
            names_available: names.is_some(),
            warnings,
        };

        tracing::debug!(
            project = %report.project_key,
            path = report.critical_path.rows.len(),
            tornado = report.tornado.len(),
            "assembled analysis report"
        );

        report
    }
}
