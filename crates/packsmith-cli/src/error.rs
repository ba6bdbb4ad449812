//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use miette::Diagnostic;
use packsmith_analyze::AnalyzeError;
use packsmith_core::CoreError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The input holds nothing to analyze
    #[error("Validation failed: {message}")]
    #[diagnostic(code(packsmith::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A manifest could not be parsed
    #[error("Manifest error: {message}")]
    #[diagnostic(code(packsmith::cli::manifest))]
    Manifest {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Grouping rejected the resource graph
    #[error("Analysis failed: {message}")]
    #[diagnostic(code(packsmith::cli::analysis))]
    Analysis { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(packsmith::cli::io))]
    Io { message: String },

    /// Internal error (serialization, unexpected failure)
    #[error("Internal error: {message}")]
    #[diagnostic(code(packsmith::cli::internal))]
    Internal { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::Manifest { .. } => exit_codes::MANIFEST_ERROR,
            CliError::Analysis { .. } => exit_codes::ANALYSIS_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Internal { .. } => exit_codes::ERROR,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a validation error with help text
    pub fn validation_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    /// Create an IO error for a path
    pub fn io(path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            message: format!("{}: {}", path.display(), err),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let help = match &err {
            CoreError::InvalidManifest { .. } => {
                Some("Every YAML document must be a mapping with kind and metadata.name".to_string())
            }
            _ => None,
        };
        CliError::Manifest {
            message: err.to_string(),
            help,
        }
    }
}

impl From<AnalyzeError> for CliError {
    fn from(err: AnalyzeError) -> Self {
        CliError::Analysis {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
