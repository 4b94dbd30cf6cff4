//! Tests for `homelab apply`.

use crate::support::*;
use std::fs;

#[test]
fn test_apply_replaces_placeholder() {
    let t = Test::new();
    let path = t.write_env("dns", "PIHOLE_WEBPASSWORD=CHANGEME123\n");

    let output = t.apply(&path);
    assert_success(&output);
    assert_stdout_contains(&output, "dns/PIHOLE_WEBPASSWORD");

    let env = t.read_env("dns");
    assert_eq!(env.lines().count(), 1);
    assert_generated(env_value(&env, "PIHOLE_WEBPASSWORD").unwrap(), 32);
}

#[test]
fn test_apply_stack_from_any_prefix() {
    // The stack comes from the directory name, wherever it lives
    let t = Test::bare();
    let dir = t.root.path().join("some").join("nested").join("dns");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(".env");
    fs::write(&path, "").unwrap();

    assert_success(&t.apply(&path));

    let env = fs::read_to_string(&path).unwrap();
    assert!(env.starts_with("PIHOLE_WEBPASSWORD="));
}

#[test]
fn test_apply_relative_path_from_stack_dir() {
    let t = Test::new();
    let path = t.write_env("dns", "PIHOLE_WEBPASSWORD=CHANGEME\n");

    let output = t
        .cmd()
        .current_dir(t.stack_dir("dns"))
        .args(["apply", ".env"])
        .output()
        .unwrap();
    assert_success(&output);

    let env = fs::read_to_string(&path).unwrap();
    assert_generated(env_value(&env, "PIHOLE_WEBPASSWORD").unwrap(), 32);
}

#[test]
fn test_apply_dotted_relative_path() {
    let t = Test::new();
    t.write_env("dns", "");
    let path = t.write_env("monitoring", "INFLUXDB_ORG=myorg\n");

    let output = t
        .cmd()
        .current_dir(t.stack_dir("dns"))
        .args(["apply", "../monitoring/.env"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "monitoring/INFLUXDB_PASSWORD");

    let env = fs::read_to_string(&path).unwrap();
    assert!(env.starts_with("INFLUXDB_ORG=myorg\n"));
    assert!(env.contains("GRAFANA_ADMIN_PASSWORD="));
}

#[test]
fn test_apply_explicit_stack() {
    let t = Test::bare();
    let path = t.root.path().join("custom.env");
    fs::write(&path, "").unwrap();

    let output = t
        .cmd()
        .args(["apply", "--stack", "dns"])
        .arg(&path)
        .output()
        .unwrap();
    assert_success(&output);

    let env = fs::read_to_string(&path).unwrap();
    assert!(env.starts_with("PIHOLE_WEBPASSWORD="));
}

#[test]
fn test_apply_unknown_stack_is_noop() {
    let t = Test::new();
    let path = t.write_env("unknown-stack", "SECRET=CHANGEME\n");

    let output = t.cmd().args(["apply", "--json"]).arg(&path).output().unwrap();
    assert_success(&output);

    let log: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(log, serde_json::json!([]));
    assert_eq!(t.read_env("unknown-stack"), "SECRET=CHANGEME\n");
}

#[test]
fn test_apply_missing_file_fails() {
    let t = Test::new();
    let path = t.env_path("dns");

    let output = t.apply(&path);
    assert_failure(&output);
    assert_stderr_contains(&output, "env file not found");
    assert!(!path.exists());
}

#[test]
fn test_apply_leaves_set_file_byte_identical() {
    let t = Test::new();
    let contents = "# keep me\nPIHOLE_WEBPASSWORD='already set'   \nTZ=Europe/Berlin";
    let path = t.write_env("dns", contents);

    assert_success(&t.apply(&path));
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}
