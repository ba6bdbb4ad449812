//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - the input holds nothing to analyze
pub const VALIDATION_ERROR: i32 = 2;

/// Analysis error - the resource graph could not be grouped
pub const ANALYSIS_ERROR: i32 = 3;

/// Manifest error - a manifest could not be parsed
pub const MANIFEST_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;
