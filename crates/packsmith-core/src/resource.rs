//! Resource graph model
//!
//! A [`ResourceGraph`] holds every manifest entry keyed by its
//! [`ResourceKey`], plus the [`Relationship`] edges inferred between them.
//! The graph is built once and only read afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::manifest::{self, parse_manifests};
use crate::relationships::infer_relationships;
use crate::values::Values;

/// Identity of a resource: kind, namespace and name
///
/// Ordering is by kind, then namespace, then name. Cluster-scoped resources
/// and resources without an explicit namespace use an empty namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceKey {
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    pub name: String,
}

impl ResourceKey {
    pub fn new(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}/{}", self.kind, self.name)
        } else {
            write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
        }
    }
}

/// A single manifest entry with the values extracted from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedResource {
    pub key: ResourceKey,
    /// The raw manifest object
    pub object: JsonValue,
    /// Semantic values (`image`, `env`, `commonLabels`)
    #[serde(default)]
    pub values: Values,
}

impl ProcessedResource {
    pub fn new(key: ResourceKey, object: JsonValue) -> Self {
        Self {
            key,
            object,
            values: Values::new(),
        }
    }

    /// Build a resource from a manifest object, extracting its values
    ///
    /// Returns `None` when the object has no `kind` or `metadata.name`.
    pub fn from_object(object: JsonValue) -> Option<Self> {
        let kind = object.get("kind").and_then(JsonValue::as_str)?;
        let metadata = object.get("metadata");
        let name = metadata
            .and_then(|m| m.get("name"))
            .and_then(JsonValue::as_str)
            .filter(|n| !n.is_empty())?;
        let namespace = metadata
            .and_then(|m| m.get("namespace"))
            .and_then(JsonValue::as_str)
            .unwrap_or("");

        let key = ResourceKey::new(kind, namespace, name);
        let values = manifest::extract_values(&key.kind, &object);

        Some(Self {
            key,
            object,
            values,
        })
    }

    /// Attach semantic values
    pub fn with_values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    pub fn kind(&self) -> &str {
        &self.key.kind
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn namespace(&self) -> &str {
        &self.key.namespace
    }

    /// Get a label value from `metadata.labels`
    pub fn label(&self, key: &str) -> Option<&str> {
        self.object
            .get("metadata")
            .and_then(|m| m.get("labels"))
            .and_then(|labels| labels.get(key))
            .and_then(JsonValue::as_str)
    }

    /// Get a semantic value by key
    pub fn value(&self, key: &str) -> Option<&JsonValue> {
        self.values.entry(key)
    }
}

/// How a relationship was inferred
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    #[default]
    Unspecified,
    /// Service selector matches a workload's pod labels
    Selector,
    /// `metadata.ownerReferences`
    Owner,
    /// Pod spec references a ConfigMap or Secret
    ConfigRef,
    /// Pod spec mounts a PersistentVolumeClaim
    VolumeClaim,
    /// Pod spec runs as a ServiceAccount
    ServiceAccount,
    /// Ingress routes to a Service
    IngressBackend,
    /// Autoscaler targets a workload
    ScaleTarget,
}

/// A directed edge between two resources
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relationship {
    pub from: ResourceKey,
    pub to: ResourceKey,
    #[serde(default)]
    pub kind: RelationshipKind,
}

impl Relationship {
    pub fn new(from: ResourceKey, to: ResourceKey, kind: RelationshipKind) -> Self {
        Self { from, to, kind }
    }
}

/// Resources keyed by identity plus the relationships between them
#[derive(Debug, Clone, Default)]
pub struct ResourceGraph {
    pub resources: BTreeMap<ResourceKey, ProcessedResource>,
    pub relationships: Vec<Relationship>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from resources, inferring relationships between them
    ///
    /// When two resources share a key the later one wins.
    pub fn from_resources(resources: impl IntoIterator<Item = ProcessedResource>) -> Self {
        let mut graph = Self::new();
        for resource in resources {
            if let Some(previous) = graph.insert(resource) {
                tracing::warn!("duplicate resource {}, keeping the last definition", previous.key);
            }
        }
        graph.relationships = infer_relationships(&graph.resources);
        graph
    }

    /// Parse a multi-document YAML stream into a graph
    pub fn from_manifests(yaml: &str) -> Result<Self> {
        Ok(Self::from_resources(parse_manifests(yaml)?))
    }

    /// Insert a resource under its own key, returning any replaced resource
    pub fn insert(&mut self, resource: ProcessedResource) -> Option<ProcessedResource> {
        self.resources.insert(resource.key.clone(), resource)
    }

    /// Record an edge between two keys
    pub fn relate(&mut self, from: ResourceKey, to: ResourceKey, kind: RelationshipKind) {
        self.relationships.push(Relationship::new(from, to, kind));
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&ProcessedResource> {
        self.resources.get(key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.resources.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
