//! Schema registry - embedded JSON schemas

use rust_embed::Embed;
use std::collections::HashMap;

#[derive(Embed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

/// Documents that have a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    SimulationResult,
}

impl SchemaKind {
    pub fn all() -> &'static [SchemaKind] {
        &[SchemaKind::SimulationResult]
    }

    pub fn filename(&self) -> &'static str {
        match self {
            SchemaKind::SimulationResult => "simulation_result.schema.json",
        }
    }
}

/// Registry of JSON schemas for payload validation
pub struct SchemaRegistry {
    schemas: HashMap<SchemaKind, String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        for kind in SchemaKind::all() {
            if let Some(file) = EmbeddedSchemas::get(kind.filename()) {
                if let Ok(content) = std::str::from_utf8(&file.data) {
                    schemas.insert(*kind, content.to_string());
                }
            }
        }

        Self { schemas }
    }

    pub fn get(&self, kind: SchemaKind) -> Option<&str> {
        self.schemas.get(&kind).map(|s| s.as_str())
    }

    pub fn has_schema(&self, kind: SchemaKind) -> bool {
        self.schemas.contains_key(&kind)
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_schema_present() {
        let registry = SchemaRegistry::new();
        assert!(registry.has_schema(SchemaKind::SimulationResult));
        let schema: serde_json::Value =
            serde_json::from_str(registry.get(SchemaKind::SimulationResult).unwrap()).unwrap();
        assert_eq!(schema["title"], "SimulationResult");
    }
}
