//! Packsmith Core - Core types for turning Kubernetes manifests into packs
//!
//! This crate provides the foundational types used throughout Packsmith:
//! - `ResourceKey` / `ProcessedResource`: one manifest entry and its identity
//! - `ResourceGraph`: resources plus the relationships inferred between them
//! - `Values`: semantic configuration values and their global scope
//! - `ImageReference`: container image reference parsing
//! - Manifest loading and relationship inference

pub mod error;
pub mod image;
pub mod labels;
pub mod manifest;
pub mod relationships;
pub mod resource;
pub mod values;

pub use error::{CoreError, Result};
pub use image::ImageReference;
pub use manifest::{load_manifest_file, parse_manifests};
pub use relationships::infer_relationships;
pub use resource::{ProcessedResource, Relationship, RelationshipKind, ResourceGraph, ResourceKey};
pub use values::Values;
