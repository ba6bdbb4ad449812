//! Grouping configuration

use packsmith_core::labels;

/// Kinds preferred when naming a relationship group
pub const DEFAULT_WORKLOAD_KINDS: [&str; 3] = ["Deployment", "StatefulSet", "DaemonSet"];

/// Configuration for the grouping engine
#[derive(Debug, Clone)]
pub struct GroupingConfig {
    /// Identity labels, highest priority first
    pub label_priority: Vec<String>,

    /// Kinds whose name is used for a relationship group, first match wins
    pub workload_kinds: Vec<String>,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            label_priority: labels::IDENTITY.iter().map(|s| s.to_string()).collect(),
            workload_kinds: DEFAULT_WORKLOAD_KINDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl GroupingConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the identity label priority list
    pub fn with_label_priority<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.label_priority = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the workload kinds used for naming relationship groups
    pub fn with_workload_kinds<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.workload_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn is_workload(&self, kind: &str) -> bool {
        self.workload_kinds.iter().any(|k| k == kind)
    }
}
