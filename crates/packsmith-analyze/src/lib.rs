//! Packsmith Analyze - Split Kubernetes resources into service groups
//!
//! The analysis runs in two stages:
//!
//! 1. [`group_resources`] partitions a [`ResourceGraph`](packsmith_core::ResourceGraph)
//!    into [`ServiceGroup`]s, trying labels first, then relationships, then
//!    namespaces.
//! 2. [`extract_global_values`] finds values shared by several groups so a
//!    parent pack can declare them once under `global`.
//!
//! # Example
//!
//! ```no_run
//! use packsmith_analyze::{extract_global_values, group_resources};
//! use packsmith_core::ResourceGraph;
//!
//! let yaml = std::fs::read_to_string("manifests.yaml").unwrap();
//! let graph = ResourceGraph::from_manifests(&yaml).unwrap();
//!
//! let groups = group_resources(&graph).unwrap();
//! for group in &groups {
//!     println!("{} ({}): {} resources", group.name, group.strategy, group.len());
//! }
//!
//! let global = extract_global_values(&groups);
//! println!("{}", serde_json::to_string_pretty(&global).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod globals;
pub mod group;
pub mod grouping;

pub use config::GroupingConfig;
pub use error::{AnalyzeError, Result};
pub use globals::{extract_global_values, extract_image_registry, extract_shared_entries};
pub use group::{GroupingStrategy, ServiceGroup};
pub use grouping::{GroupingEngine, group_resources};
