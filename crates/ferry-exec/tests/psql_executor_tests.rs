//! Integration tests for the psql-backed executor
//!
//! A real database is out of reach here, so these tests point `psql_path`
//! at small shell-script stubs that imitate the client's observable
//! behavior: exit codes, stderr, and hanging past the timeout.

#![cfg(unix)]

use ferry_core::migration::MigrationItem;
use ferry_core::outcome::Outcome;
use ferry_exec::{ConnectionTarget, Executor, PsqlExecutor};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Write an executable shell script stub into `dir`.
fn write_stub(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

fn item_with_file(dir: &Path) -> MigrationItem {
    let path = dir.join("001_create_tables.sql");
    fs::write(&path, "CREATE TABLE IF NOT EXISTS t (id int);").unwrap();
    MigrationItem {
        index: 1,
        filename: "001_create_tables.sql".to_string(),
        path,
    }
}

fn executor_for(stub: &Path, timeout: Duration) -> PsqlExecutor {
    PsqlExecutor::new(
        ConnectionTarget {
            psql_path: stub.display().to_string(),
            host: "127.0.0.1".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            dbname: "postgres".to_string(),
        },
        "test-password".to_string(),
        timeout,
    )
}

#[tokio::test]
async fn exit_zero_is_success() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "psql-ok", "exit 0");
    let executor = executor_for(&stub, Duration::from_secs(5));

    let outcome = executor.apply(&item_with_file(dir.path())).await;
    assert!(outcome.is_success());
}

#[tokio::test]
async fn nonzero_exit_reports_code_and_first_stderr_line() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(
        dir.path(),
        "psql-fail",
        "echo 'psql: error: relation \"t\" already exists' >&2\n\
         echo 'HINT: drop it first' >&2\n\
         exit 3",
    );
    let executor = executor_for(&stub, Duration::from_secs(5));

    let outcome = executor.apply(&item_with_file(dir.path())).await;
    match outcome {
        Outcome::Failed { exit_code, error } => {
            assert_eq!(exit_code, Some(3));
            assert_eq!(error, "psql: error: relation \"t\" already exists");
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn hung_client_times_out_and_is_terminated() {
    let dir = tempfile::tempdir().unwrap();
    let stub = write_stub(dir.path(), "psql-hang", "sleep 30");
    let executor = executor_for(&stub, Duration::from_secs(1));

    let start = Instant::now();
    let outcome = executor.apply(&item_with_file(dir.path())).await;

    assert!(matches!(outcome, Outcome::TimedOut { timeout_secs: 1 }));
    // kill_on_drop reaps the child: we get the outcome at the timeout
    // boundary, not after the stub's full 30s sleep
    assert!(start.elapsed() < Duration::from_secs(10));
}

#[tokio::test]
async fn unlaunchable_client_is_a_failed_outcome() {
    let dir = tempfile::tempdir().unwrap();
    let executor = executor_for(Path::new("/nonexistent/psql"), Duration::from_secs(5));

    let outcome = executor.apply(&item_with_file(dir.path())).await;
    match outcome {
        Outcome::Failed { exit_code, error } => {
            assert_eq!(exit_code, None);
            assert!(error.contains("failed to launch"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn password_reaches_subprocess_env_not_argv() {
    let dir = tempfile::tempdir().unwrap();
    // Stub succeeds only when PGPASSWORD is present in its environment
    let stub = write_stub(
        dir.path(),
        "psql-env",
        "[ \"$PGPASSWORD\" = \"test-password\" ] || exit 9\n\
         for arg in \"$@\"; do [ \"$arg\" = \"test-password\" ] && exit 8; done\n\
         exit 0",
    );
    let executor = executor_for(&stub, Duration::from_secs(5));

    let outcome = executor.apply(&item_with_file(dir.path())).await;
    assert!(outcome.is_success(), "got {outcome:?}");
}

#[tokio::test]
async fn client_receives_migration_path_and_on_error_stop() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("argv.txt");
    let stub = write_stub(
        dir.path(),
        "psql-argv",
        &format!("echo \"$@\" > {}\nexit 0", marker.display()),
    );
    let executor = executor_for(&stub, Duration::from_secs(5));
    let item = item_with_file(dir.path());

    executor.apply(&item).await;

    let argv = fs::read_to_string(&marker).unwrap();
    assert!(argv.contains("ON_ERROR_STOP=1"));
    assert!(argv.contains(&item.path.display().to_string()));
    assert!(argv.contains("-h 127.0.0.1"));
}
