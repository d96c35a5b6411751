//! Dense correlation matrix over the analyzed tasks
//!
//! The upstream table is sparse and is reproduced as-is: a missing pair
//! becomes exactly `0.0`, and asymmetric entries or a non-unit diagonal are
//! kept. The diagnostics below only report such problems.

use serde::{Deserialize, Serialize};

use crate::entities::simulation::{SimulationResult, SparseCorrelations};

/// Square matrix indexed by `keys`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub keys: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Build a dense matrix for `keys` (sorted and deduplicated) from a sparse table
    pub fn build<S: AsRef<str>>(keys: &[S], table: &SparseCorrelations) -> Self {
        let mut keys: Vec<String> = keys.iter().map(|k| k.as_ref().to_string()).collect();
        keys.sort();
        keys.dedup();

        let values = keys
            .iter()
            .map(|row| {
                let entries = table.get(row);
                keys.iter()
                    .map(|col| entries.and_then(|e| e.get(col)).copied().unwrap_or(0.0))
                    .collect()
            })
            .collect();

        Self { keys, values }
    }

    /// Matrix over the tasks with detail records, when a table was supplied
    pub fn from_result(result: &SimulationResult) -> Option<Self> {
        let table = result.task_correlations.as_ref()?;
        let keys: Vec<&String> = result
            .task_analyses
            .as_ref()
            .map(|m| m.keys().collect())
            .unwrap_or_default();
        let matrix = Self::build(&keys, table);

        tracing::debug!(size = matrix.len(), "built correlation matrix");
        Some(matrix)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Coefficient for a pair of task keys
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.index_of(row)?;
        let j = self.index_of(col)?;
        self.cell(i, j)
    }

    fn cell(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i).and_then(|r| r.get(j)).copied()
    }

    /// One row of `len()` entries per key
    pub fn is_square(&self) -> bool {
        self.values.len() == self.len() && self.values.iter().all(|r| r.len() == self.len())
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.keys.binary_search_by(|k| k.as_str().cmp(key)).ok()
    }

    /// Pairs `(a, b)` with `a < b` whose entries differ by more than `tolerance`
    ///
    /// A pair where only one side has an entry counts as asymmetric.
    pub fn asymmetric_pairs(&self, tolerance: f64) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        for (i, a) in self.keys.iter().enumerate() {
            for (j, b) in self.keys.iter().enumerate().skip(i + 1) {
                let differs = match (self.cell(i, j), self.cell(j, i)) {
                    (Some(x), Some(y)) => (x - y).abs() > tolerance,
                    (None, None) => false,
                    _ => true,
                };
                if differs {
                    pairs.push((a.clone(), b.clone()));
                }
            }
        }
        pairs
    }

    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.asymmetric_pairs(tolerance).is_empty()
    }

    /// Whether every diagonal entry is within `tolerance` of 1
    pub fn has_unit_diagonal(&self, tolerance: f64) -> bool {
        (0..self.len()).all(|i| self.cell(i, i).is_some_and(|d| (d - 1.0).abs() <= tolerance))
    }

    /// Human-readable problems with the matrix, empty when it is well formed
    pub fn diagnostics(&self, tolerance: f64) -> Vec<String> {
        let mut warnings = Vec::new();
        if !self.is_square() {
            warnings.push(format!(
                "correlation matrix is not {0}x{0}",
                self.len()
            ));
        }
        let asymmetric = self.asymmetric_pairs(tolerance);
        if !asymmetric.is_empty() {
            let shown: Vec<String> = asymmetric
                .iter()
                .take(3)
                .map(|(a, b)| format!("{}/{}", a, b))
                .collect();
            warnings.push(format!(
                "correlation matrix is not symmetric ({} pair(s), e.g. {})",
                asymmetric.len(),
                shown.join(", ")
            ));
        }
        if !self.is_empty() && !self.has_unit_diagonal(tolerance) {
            warnings.push("correlation matrix diagonal is not all 1.0".to_string());
        }
        warnings
    }
}
