/// Named schema documents: loading, merging and building producers by name.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::factory::SchemaFactory;
use crate::core::producer::{BoxedProducer, ValueError};
use crate::core::scalar::Scalar;

#[derive(Debug, Error)]
pub enum SchemaSetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported schema file extension: {0}")]
    UnsupportedFormat(String),
    #[error("no schema entry named '{0}'")]
    UnknownEntry(String),
    #[error("schema entry '{name}': {source}")]
    Value {
        name: String,
        #[source]
        source: ValueError,
    },
}

/// A document mapping entry names to schema nodes.
///
/// ```text
/// {
///     "enemy_count": {"range": [2, 6]},
///     "loot": [{"weight": 3, "const": "coin"}, {"const": "gem"}],
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSet {
    entries: FxHashMap<String, Value>,
}

impl SchemaSet {
    /// Load from a `.ron` or `.json` file.
    pub fn load(path: &Path) -> Result<SchemaSet, SchemaSetError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("ron") => Self::load_from_ron(path),
            Some("json") => Self::load_from_json(path),
            other => Err(SchemaSetError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    pub fn load_from_ron(path: &Path) -> Result<SchemaSet, SchemaSetError> {
        let contents = std::fs::read_to_string(path)?;
        let set = Self::parse_ron(&contents)?;
        debug!(path = %path.display(), entries = set.len(), "loaded schema set");
        Ok(set)
    }

    pub fn load_from_json(path: &Path) -> Result<SchemaSet, SchemaSetError> {
        let contents = std::fs::read_to_string(path)?;
        let set = Self::parse_json(&contents)?;
        debug!(path = %path.display(), entries = set.len(), "loaded schema set");
        Ok(set)
    }

    pub fn parse_ron(input: &str) -> Result<SchemaSet, SchemaSetError> {
        let entries: FxHashMap<String, Value> = ron::from_str(input)?;
        Ok(SchemaSet { entries })
    }

    pub fn parse_json(input: &str) -> Result<SchemaSet, SchemaSetError> {
        let entries: FxHashMap<String, Value> = serde_json::from_str(input)?;
        Ok(SchemaSet { entries })
    }

    /// Merge another set into this one. Entries from `other` override
    /// entries in `self` with the same name.
    pub fn merge(&mut self, other: SchemaSet) {
        self.entries.extend(other.entries);
    }

    pub fn insert(&mut self, name: impl Into<String>, node: Value) {
        self.entries.insert(name.into(), node);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the producer for `name` using the process-wide random source.
    pub fn producer<T: Scalar>(&self, name: &str) -> Result<BoxedProducer<T>, SchemaSetError> {
        self.producer_with(name, &SchemaFactory::new())
    }

    pub fn producer_with<T: Scalar>(
        &self,
        name: &str,
        factory: &SchemaFactory,
    ) -> Result<BoxedProducer<T>, SchemaSetError> {
        let node = self
            .get(name)
            .ok_or_else(|| SchemaSetError::UnknownEntry(name.to_string()))?;
        factory
            .create::<T, Value>(node)
            .map_err(|source| SchemaSetError::Value {
                name: name.to_string(),
                source,
            })
    }
}
