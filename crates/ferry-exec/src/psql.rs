//! psql-backed executor
//!
//! Each migration is applied by one `psql` subprocess scoped to that file,
//! with `-v ON_ERROR_STOP=1` so the client stops at the first SQL error
//! inside the file (fail-fast per file, never across files). The password
//! travels only through the subprocess environment (`PGPASSWORD`), never on
//! the command line where it would leak into the process list.

use async_trait::async_trait;
use ferry_core::migration::MigrationItem;
use ferry_core::outcome::Outcome;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::error::{ExecError, ExecResult};
use crate::traits::Executor;

/// Connection coordinates for the psql client (everything but the secret)
#[derive(Debug, Clone)]
pub struct ConnectionTarget {
    /// psql binary to invoke (name on PATH or absolute path)
    pub psql_path: String,
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database user
    pub user: String,
    /// Database name
    pub dbname: String,
}

/// Executor that shells out to `psql`, one subprocess per migration file
pub struct PsqlExecutor {
    target: ConnectionTarget,
    password: String,
    timeout: Duration,
}

impl PsqlExecutor {
    /// Create an executor for the given target.
    ///
    /// `password` is held only for the lifetime of the executor and is
    /// injected into each subprocess as `PGPASSWORD`.
    pub fn new(target: ConnectionTarget, password: String, timeout: Duration) -> Self {
        Self {
            target,
            password,
            timeout,
        }
    }

    /// Check that the psql binary is available on the system.
    ///
    /// Probes `<psql_path> --version` with output discarded.
    pub fn check_available(psql_path: &str) -> ExecResult<()> {
        match std::process::Command::new(psql_path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) if status.success() => Ok(()),
            _ => Err(ExecError::ClientUnavailable {
                program: psql_path.to_string(),
            }),
        }
    }
}

#[async_trait]
impl Executor for PsqlExecutor {
    async fn apply(&self, item: &MigrationItem) -> Outcome {
        let mut cmd = Command::new(&self.target.psql_path);
        cmd.arg("-h")
            .arg(&self.target.host)
            .arg("-p")
            .arg(self.target.port.to_string())
            .arg("-U")
            .arg(&self.target.user)
            .arg("-d")
            .arg(&self.target.dbname)
            .arg("-f")
            .arg(&item.path)
            .arg("-v")
            .arg("ON_ERROR_STOP=1")
            .env("PGPASSWORD", &self.password)
            .env("PGCONNECT_TIMEOUT", self.timeout.as_secs().to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return Outcome::Failed {
                    exit_code: None,
                    error: format!("failed to launch {}: {}", self.target.psql_path, e),
                };
            }
        };

        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                if output.status.success() {
                    Outcome::Success
                } else {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    Outcome::Failed {
                        exit_code: output.status.code(),
                        error: first_error_line(&stderr),
                    }
                }
            }
            Ok(Err(e)) => Outcome::Failed {
                exit_code: None,
                error: format!("failed to collect psql output: {e}"),
            },
            // The child future is dropped here; kill_on_drop terminates the
            // subprocess and releases its handle.
            Err(_) => Outcome::TimedOut {
                timeout_secs: self.timeout.as_secs(),
            },
        }
    }

    fn describe(&self) -> String {
        format!(
            "{}:{}/{} as {}",
            self.target.host, self.target.port, self.target.dbname, self.target.user
        )
    }
}

/// First non-empty line of the client's stderr, trimmed.
///
/// psql prefixes errors with `psql: error:` or `psql:<file>:<line>:`; one
/// line is enough to identify the failing statement without dumping the
/// whole transcript into the tally.
fn first_error_line(stderr: &str) -> String {
    stderr
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("(no error output)")
        .to_string()
}

#[cfg(test)]
#[path = "psql_test.rs"]
mod tests;
