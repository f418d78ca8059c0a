//! ferry-core - Core library for sqlferry
//!
//! This crate provides the shared types used across sqlferry: project
//! configuration parsing, the error taxonomy, migration plan construction,
//! and per-migration outcome / summary types.

pub mod config;
pub mod error;
pub mod migration;
pub mod outcome;

pub use config::{Config, DatabaseConfig};
pub use error::{CoreError, CoreResult};
pub use migration::{build_plan, MigrationItem};
pub use outcome::{ExecutionResult, Outcome, RunSummary};
