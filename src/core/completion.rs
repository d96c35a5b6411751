//! Top tasks by completion probability

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::sensitivity::by_value_desc_then_key;

pub const DEFAULT_TOP_TASKS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub task_key: String,
    pub probability: f64,
}

/// Most likely to complete first, ties by key, at most `limit` entries
pub fn rank_completion(probabilities: &BTreeMap<String, f64>, limit: usize) -> Vec<CompletionEntry> {
    let mut entries: Vec<CompletionEntry> = probabilities
        .iter()
        .filter(|(_, p)| !p.is_nan())
        .map(|(k, p)| CompletionEntry {
            task_key: k.clone(),
            probability: *p,
        })
        .collect();
    entries.sort_by(|a, b| {
        by_value_desc_then_key((a.probability, &a.task_key), (b.probability, &b.task_key))
    });
    entries.truncate(limit);
    entries
}
