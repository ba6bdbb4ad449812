//! Core error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to parse manifest: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read manifest {path}: {source}")]
    ManifestFile {
        path: PathBuf,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Invalid manifest document #{document}: {message}")]
    InvalidManifest { document: usize, message: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
