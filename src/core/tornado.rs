//! Tornado ranking - the tasks driving schedule spread

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::entity::Provenance;
use crate::core::resolver::ResolvedTaskAnalysis;
use crate::core::sensitivity::{by_value_desc_then_key, sensitivity_score};

/// Default number of tasks shown in the tornado chart
pub const DEFAULT_TORNADO_LIMIT: usize = 10;

/// Value the tornado chart ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TornadoMetric {
    /// Coefficient of variation
    #[default]
    Variability,
    /// (1 − completion probability) × variability
    Sensitivity,
}

impl TornadoMetric {
    /// Metric value for a record; `None` excludes the record
    pub fn value(&self, analysis: &ResolvedTaskAnalysis) -> Option<f64> {
        let variability = analysis.variability.filter(|v| v.is_finite())?;
        let value = match self {
            TornadoMetric::Variability => variability,
            TornadoMetric::Sensitivity => {
                sensitivity_score(analysis.completion_probability, variability)
            }
        };
        value.is_finite().then_some(value)
    }
}

impl std::fmt::Display for TornadoMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TornadoMetric::Variability => write!(f, "variability"),
            TornadoMetric::Sensitivity => write!(f, "sensitivity"),
        }
    }
}

/// One bar of the tornado chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TornadoEntry {
    pub task_key: String,
    pub value: f64,
    pub variability: f64,
    pub completion_probability: f64,

    /// Fallback bars use placeholder variability
    pub provenance: Provenance,
}

/// Ranks tasks by the chosen metric and keeps the top N
#[derive(Debug, Clone, Copy)]
pub struct TornadoRanker {
    pub metric: TornadoMetric,
    pub limit: usize,
}

impl Default for TornadoRanker {
    fn default() -> Self {
        Self {
            metric: TornadoMetric::Variability,
            limit: DEFAULT_TORNADO_LIMIT,
        }
    }
}

impl TornadoRanker {
    pub fn new(metric: TornadoMetric, limit: usize) -> Self {
        Self { metric, limit }
    }

    /// Rank descending by metric (ties by key), excluding tasks without variability
    pub fn rank<'a, I>(&self, analyses: I) -> Vec<TornadoEntry>
    where
        I: IntoIterator<Item = &'a ResolvedTaskAnalysis>,
    {
        let mut entries: Vec<TornadoEntry> = analyses
            .into_iter()
            .filter_map(|a| {
                let value = self.metric.value(a)?;
                Some(TornadoEntry {
                    task_key: a.task_key.clone(),
                    value,
                    variability: a.variability?,
                    completion_probability: a.completion_probability,
                    provenance: a.provenance,
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            by_value_desc_then_key((a.value, &a.task_key), (b.value, &b.task_key))
        });
        entries.truncate(self.limit);
        entries
    }
}
