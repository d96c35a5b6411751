//! JSON Schema validation of payload documents

use serde::Serialize;
use thiserror::Error;

use crate::schema::registry::{SchemaKind, SchemaRegistry};

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no embedded schema for {0:?}")]
    Missing(SchemaKind),

    #[error("embedded schema is invalid: {0}")]
    Invalid(String),
}

/// One schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// JSON pointer into the document (empty for the root)
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

pub struct Validator {
    inner: jsonschema::Validator,
}

impl Validator {
    pub fn new(registry: &SchemaRegistry, kind: SchemaKind) -> Result<Self, SchemaError> {
        let raw = registry.get(kind).ok_or(SchemaError::Missing(kind))?;
        let schema: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        let inner =
            jsonschema::validator_for(&schema).map_err(|e| SchemaError::Invalid(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn simulation_result() -> Result<Self, SchemaError> {
        Self::new(&SchemaRegistry::new(), SchemaKind::SimulationResult)
    }

    /// Every violation in document order; empty when valid
    pub fn validate(&self, instance: &serde_json::Value) -> Vec<Violation> {
        self.inner
            .iter_errors(instance)
            .map(|e| Violation {
                path: e.instance_path.to_string(),
                message: e.to_string(),
            })
            .collect()
    }

    pub fn is_valid(&self, instance: &serde_json::Value) -> bool {
        self.inner.is_valid(instance)
    }
}
