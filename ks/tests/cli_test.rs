//! End-to-end tests for the `kv` binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn kv(store: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kv").expect("kv binary should build");
    cmd.arg("--store").arg(store.path());
    cmd
}

#[test]
fn test_set_get_list_rm() {
    let store = TempDir::new().unwrap();

    kv(&store)
        .args(["set", "scrumData", r#"{"projectName":"demo"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stored"));

    kv(&store)
        .args(["get", "scrumData"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projectName\": \"demo\""));

    kv(&store)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("scrumData"));

    kv(&store).args(["rm", "scrumData"]).assert().success();

    kv(&store)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No keys found"));
}

#[test]
fn test_get_missing_key_fails() {
    let store = TempDir::new().unwrap();
    kv(&store).args(["get", "nothing"]).assert().failure();
}

#[test]
fn test_set_rejects_invalid_json() {
    let store = TempDir::new().unwrap();
    kv(&store).args(["set", "k", "{oops"]).assert().failure();
}
