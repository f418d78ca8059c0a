//! Error types for ferry-exec

use thiserror::Error;

/// Execution-layer errors
///
/// Deliberately small: per-migration failures are `Outcome` values so the
/// run continues, and only environment problems detected *outside* a run
/// surface as errors.
#[derive(Error, Debug)]
pub enum ExecError {
    /// X001: The SQL client binary could not be found or executed
    #[error("[X001] SQL client '{program}' is not available: install PostgreSQL client tools or set `psql_path`")]
    ClientUnavailable { program: String },
}

/// Result type alias for ExecError
pub type ExecResult<T> = Result<T, ExecError>;
