//! Binary tests for argument validation and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

fn queue_migrator() -> Command {
    let mut cmd = Command::cargo_bin("queue-migrator").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("AWS_ACCESS_KEY_ID")
        .env_remove("AWS_SECRET_ACCESS_KEY")
        .env_remove("AWS_SESSION_TOKEN")
        .env_remove("AWS_ENDPOINT_URL");
    cmd
}

#[test]
fn test_help_lists_flags() {
    queue_migrator()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--execute"))
        .stdout(predicate::str::contains("--max-age"));
}

#[test]
fn test_execute_without_destination_exits_with_one() {
    queue_migrator()
        .args(["--source", "orders-dlq", "--execute"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Destination queue is required when executing",
        ));
}

#[test]
fn test_same_source_and_destination_exits_with_one() {
    queue_migrator()
        .args(["--source", "orders", "--dest", "orders", "--execute"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("must be different queues"));
}

#[test]
fn test_missing_source_exits_with_one() {
    queue_migrator()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Source queue is required"));
}

#[test]
fn test_missing_credentials_exits_with_one() {
    queue_migrator()
        .args(["--source", "orders-dlq"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("AWS credentials not found"));
}

#[test]
fn test_invalid_max_age_exits_with_one() {
    queue_migrator()
        .args(["--source", "orders-dlq", "--max-age", "soon"])
        .assert()
        .code(1);
}
