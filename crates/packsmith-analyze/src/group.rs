//! Service group types

use std::fmt;

use packsmith_core::{ProcessedResource, ResourceKey};
use serde::{Deserialize, Serialize};

/// Which grouping pass produced a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStrategy {
    /// Shared identity label
    Label,
    /// Connected through inferred relationships
    Relationship,
    /// Leftover resources of one namespace
    Namespace,
    /// Leftover resource without a namespace
    Individual,
}

impl GroupingStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Relationship => "relationship",
            Self::Namespace => "namespace",
            Self::Individual => "individual",
        }
    }
}

impl fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bundle of resources deployed as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceGroup {
    pub name: String,
    pub namespace: String,
    pub strategy: GroupingStrategy,
    /// Members in the order they were claimed
    pub resources: Vec<ProcessedResource>,
}

impl ServiceGroup {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        strategy: GroupingStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            strategy,
            resources: Vec::new(),
        }
    }

    /// Keys of all members, in member order
    pub fn keys(&self) -> impl Iterator<Item = &ResourceKey> {
        self.resources.iter().map(|r| &r.key)
    }

    pub fn contains(&self, key: &ResourceKey) -> bool {
        self.keys().any(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
