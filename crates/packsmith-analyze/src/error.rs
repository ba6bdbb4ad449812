//! Error types for packsmith-analyze

use miette::Diagnostic;
use packsmith_core::ResourceKey;
use thiserror::Error;

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Errors that can occur while analyzing a resource graph
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum AnalyzeError {
    /// A resource is stored under a key that is not its own
    #[error("resource {actual} is stored under key {stored}")]
    #[diagnostic(
        code(packsmith::analyze::key_mismatch),
        help("insert resources with ResourceGraph::insert so the map key matches the resource key")
    )]
    KeyMismatch {
        stored: ResourceKey,
        actual: ResourceKey,
    },
}
