//! Tests for `homelab generate`.

use crate::support::*;

#[test]
fn test_generate_password() {
    let t = Test::bare();

    let output = t.cmd().args(["generate", "password"]).output().unwrap();
    assert_success(&output);
    assert_generated(stdout(&output).trim_end(), 32);
}

#[test]
fn test_generate_token() {
    let t = Test::bare();

    let output = t.cmd().args(["generate", "token"]).output().unwrap();
    assert_success(&output);
    assert_generated(stdout(&output).trim_end(), 64);
}

#[test]
fn test_generate_differs_each_time() {
    let t = Test::bare();

    let a = stdout(&t.cmd().args(["generate", "password"]).output().unwrap());
    let b = stdout(&t.cmd().args(["generate", "password"]).output().unwrap());
    assert_ne!(a, b);
}

#[test]
fn test_generate_rejects_unknown_kind() {
    let t = Test::bare();

    let output = t.cmd().args(["generate", "pin"]).output().unwrap();
    assert_failure(&output);
}

#[test]
fn test_generate_token_matches_charset() {
    use predicates::prelude::*;

    let t = Test::bare();
    t.cmd()
        .args(["generate", "token"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^[A-Za-z0-9]{64}\n$").unwrap());
}
