//! Scripted in-memory executor for tests
//!
//! Public rather than `#[cfg(test)]` so downstream crates can unit-test
//! against the runner without a database or a psql binary.

use async_trait::async_trait;
use ferry_core::migration::MigrationItem;
use ferry_core::outcome::Outcome;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::traits::Executor;

/// Executor that returns pre-scripted outcomes and records what it applied
pub struct ScriptedExecutor {
    outcomes: HashMap<String, Outcome>,
    default: Outcome,
    applied: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    /// Executor whose default outcome for every file is `Success`
    pub fn succeeding() -> Self {
        Self::new(Outcome::Success)
    }

    /// Executor with an explicit default outcome for unscripted files
    pub fn new(default: Outcome) -> Self {
        Self {
            outcomes: HashMap::new(),
            default,
            applied: Mutex::new(Vec::new()),
        }
    }

    /// Script a specific outcome for one filename
    pub fn with_outcome(mut self, filename: &str, outcome: Outcome) -> Self {
        self.outcomes.insert(filename.to_string(), outcome);
        self
    }

    /// Filenames that were applied, in invocation order
    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().expect("applied lock poisoned").clone()
    }
}

#[async_trait]
impl Executor for ScriptedExecutor {
    async fn apply(&self, item: &MigrationItem) -> Outcome {
        self.applied
            .lock()
            .expect("applied lock poisoned")
            .push(item.filename.clone());
        self.outcomes
            .get(&item.filename)
            .cloned()
            .unwrap_or_else(|| self.default.clone())
    }

    fn describe(&self) -> String {
        "scripted (in-memory)".to_string()
    }
}
