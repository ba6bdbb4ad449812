//! Semantic values attached to resources and promoted to global scope

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Semantic value keys extracted from manifests
pub mod keys {
    /// Container image, either `{registry, repository, tag}` or a reference string
    pub const IMAGE: &str = "image";
    /// Environment variables, `{NAME: value}` or a list of `{name, value}`
    pub const ENV: &str = "env";
    /// Labels that are not part of the service identity
    pub const COMMON_LABELS: &str = "commonLabels";
}

/// Key under which promoted values live in a parent pack
pub const GLOBAL_KEY: &str = "global";

/// Values container backed by a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub JsonValue);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    /// Insert a top-level key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: JsonValue) {
        if !self.0.is_object() {
            self.0 = JsonValue::Object(serde_json::Map::new());
        }
        if let JsonValue::Object(map) = &mut self.0 {
            map.insert(key.into(), value);
        }
    }

    /// Get a top-level entry without interpreting dots in the key
    pub fn entry(&self, key: &str) -> Option<&JsonValue> {
        self.0.as_object().and_then(|map| map.get(key))
    }

    /// Check if values are empty
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Null => true,
            _ => false,
        }
    }

    /// Wrap these values under the parent `global` key
    ///
    /// ```yaml
    /// imageRegistry: ghcr.io
    /// ```
    ///
    /// becomes
    ///
    /// ```yaml
    /// global:
    ///   imageRegistry: ghcr.io
    /// ```
    pub fn into_global_scope(self) -> Values {
        let mut parent = Values::new();
        if !self.is_empty() {
            parent.insert(GLOBAL_KEY, self.0);
        }
        parent
    }
}
