//! ferry-exec - Execution layer for sqlferry
//!
//! This crate provides the `Executor` trait (the seam between the sequential
//! runner and whatever actually applies a migration), the real
//! psql-subprocess implementation, a scripted in-memory fake for tests, and
//! the runner itself.

pub mod error;
pub mod fake;
pub mod psql;
pub mod runner;
pub mod traits;

pub use error::{ExecError, ExecResult};
pub use fake::ScriptedExecutor;
pub use psql::{ConnectionTarget, PsqlExecutor};
pub use runner::run_migrations;
pub use traits::Executor;
