//! Sensitivity (impact) scoring
//!
//! score = (1 − completion probability) × variability
//!
//! A task scores high when it is both unlikely to finish on time and widely
//! spread, which is what makes it dominate project risk.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::entity::Provenance;
use crate::core::resolver::ResolvedTaskAnalysis;

/// Impact score for one task
pub fn sensitivity_score(completion_probability: f64, variability: f64) -> f64 {
    (1.0 - completion_probability) * variability
}

/// Descending by value, then ascending by key
pub(crate) fn by_value_desc_then_key(a: (f64, &str), b: (f64, &str)) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1))
}

/// One row of the sensitivity ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    pub task_key: String,
    pub score: f64,
    pub completion_probability: f64,
    pub variability: f64,
    pub provenance: Provenance,
}

impl SensitivityEntry {
    /// Score a resolved record; `None` when it has no usable variability
    pub fn from_analysis(analysis: &ResolvedTaskAnalysis) -> Option<Self> {
        let variability = analysis.variability.filter(|v| v.is_finite())?;
        let score = sensitivity_score(analysis.completion_probability, variability);
        if !score.is_finite() {
            return None;
        }
        Some(Self {
            task_key: analysis.task_key.clone(),
            score,
            completion_probability: analysis.completion_probability,
            variability,
            provenance: analysis.provenance,
        })
    }
}

/// Rank tasks by sensitivity score, highest first, ties by key
pub fn rank_by_sensitivity<'a, I>(analyses: I) -> Vec<SensitivityEntry>
where
    I: IntoIterator<Item = &'a ResolvedTaskAnalysis>,
{
    let mut entries: Vec<SensitivityEntry> = analyses
        .into_iter()
        .filter_map(SensitivityEntry::from_analysis)
        .collect();
    entries.sort_by(|a, b| {
        by_value_desc_then_key((a.score, &a.task_key), (b.score, &b.task_key))
    });
    entries
}
