//! Caller-owned session holding the most recent simulation run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use ulid::Ulid;

use crate::entities::simulation::SimulationResult;

/// One received simulation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRun {
    pub run_id: Ulid,
    pub received_at: DateTime<Utc>,

    /// SHA-256 of the serialized payload, hex encoded
    pub fingerprint: String,

    pub result: SimulationResult,
}

impl SimulationRun {
    pub fn new(result: SimulationResult) -> Self {
        Self {
            run_id: Ulid::new(),
            received_at: Utc::now(),
            fingerprint: fingerprint(&result),
            result,
        }
    }
}

/// Hex SHA-256 of the payload's canonical JSON form
pub fn fingerprint(result: &SimulationResult) -> String {
    let bytes = serde_json::to_vec(result).unwrap_or_default();
    let digest = Sha256::digest(&bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// At most one current run; no implicit persistence
#[derive(Debug, Clone, Default)]
pub struct Session {
    current: Option<SimulationRun>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SimulationRun> {
        self.current.as_ref()
    }

    /// Install a new run, returning the one it replaces
    pub fn replace(&mut self, result: SimulationResult) -> Option<SimulationRun> {
        let run = SimulationRun::new(result);
        tracing::debug!(run_id = %run.run_id, project = %run.result.project_key, "new simulation run");
        self.current.replace(run)
    }

    pub fn clear(&mut self) -> Option<SimulationRun> {
        self.current.take()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}
