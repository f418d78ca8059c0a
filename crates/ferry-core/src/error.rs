//! Error types for ferry-core

use thiserror::Error;

/// Core error type for sqlferry
///
/// Every variant here is a configuration-level problem: fatal, and raised
/// before any migration subprocess is launched. Per-migration failures are
/// not errors — they are recorded as [`crate::outcome::Outcome`] values so
/// the run can continue.
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParse { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Could not derive a database host from the project URL
    #[error("[E004] Could not extract a project id from '{url}': expected https://<project-id>.supabase.co")]
    ProjectIdUnresolved { url: String },

    /// E005: Database password env var absent or empty
    #[error("[E005] Database password not available: set a non-empty {var} before running migrations")]
    MissingPassword { var: String },

    /// E006: IO error with file path context
    #[error("[E006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
