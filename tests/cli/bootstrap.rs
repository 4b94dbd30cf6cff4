//! Tests for `homelab bootstrap`.

use crate::support::*;
use std::fs;

#[test]
fn test_bootstrap_creates_env_files_from_templates() {
    let t = Test::with_stacks(&[("dns", DNS_TEMPLATE), ("mqtt", MQTT_TEMPLATE)]);

    let output = t.bootstrap();
    assert_success(&output);
    assert_stdout_contains(&output, "created");
    assert_stdout_contains(&output, "bootstrapped 2 stacks");

    let dns = t.read_env("dns");
    assert!(dns.starts_with("# Pi-hole\nTZ=Etc/UTC\nPIHOLE_WEBPASSWORD="));
    assert_generated(env_value(&dns, "PIHOLE_WEBPASSWORD").unwrap(), 32);

    // Stacks without registered keys are copied verbatim
    assert_eq!(t.read_env("mqtt"), MQTT_TEMPLATE);
}

#[test]
fn test_bootstrap_discloses_generated_values() {
    let t = Test::with_stacks(&[("dns", DNS_TEMPLATE)]);

    let output = t.bootstrap();
    assert_success(&output);

    let password = env_value(&t.read_env("dns"), "PIHOLE_WEBPASSWORD")
        .unwrap()
        .to_string();
    assert_stdout_contains(&output, "Generated values");
    assert_stdout_contains(&output, "dns/PIHOLE_WEBPASSWORD");
    assert_stdout_contains(&output, &password);
}

#[test]
fn test_bootstrap_fills_monitoring_in_place() {
    let t = Test::with_stacks(&[("monitoring", MONITORING_TEMPLATE)]);

    assert_success(&t.bootstrap());

    let env = t.read_env("monitoring");
    let keys: Vec<&str> = env.lines().map(|l| l.split_once('=').unwrap().0).collect();
    assert_eq!(keys, MONITORING_KEYS);

    assert_eq!(env_value(&env, "INFLUXDB_USERNAME"), Some("admin"));
    assert_eq!(env_value(&env, "INFLUXDB_ORG"), Some("pi-homelab"));
    assert_eq!(env_value(&env, "INFLUXDB_BUCKET"), Some("homeassistant"));
    assert_eq!(env_value(&env, "GRAFANA_ADMIN_USER"), Some("admin"));
    assert_generated(env_value(&env, "INFLUXDB_PASSWORD").unwrap(), 32);
    assert_generated(env_value(&env, "INFLUXDB_ADMIN_TOKEN").unwrap(), 64);
    assert_generated(env_value(&env, "GRAFANA_ADMIN_PASSWORD").unwrap(), 32);
}

#[test]
fn test_bootstrap_keeps_operator_values() {
    let t = Test::with_stacks(&[("monitoring", MONITORING_TEMPLATE)]);
    t.write_env(
        "monitoring",
        "INFLUXDB_ORG=myorg\nGRAFANA_ADMIN_PASSWORD=\"my own pass\"\n",
    );

    let report = t.bootstrap_json();

    let env = t.read_env("monitoring");
    assert!(env.starts_with("INFLUXDB_ORG=myorg\nGRAFANA_ADMIN_PASSWORD=\"my own pass\"\n"));

    let origins: Vec<&str> = report["secrets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["origin"].as_str().unwrap())
        .collect();
    assert!(!origins.contains(&"monitoring/INFLUXDB_ORG"));
    assert!(!origins.contains(&"monitoring/GRAFANA_ADMIN_PASSWORD"));
    assert_eq!(origins.len(), 5);
}

#[test]
fn test_bootstrap_is_idempotent() {
    let t = Test::with_stacks(&[("dns", DNS_TEMPLATE), ("monitoring", MONITORING_TEMPLATE)]);

    assert_success(&t.bootstrap());
    let dns = fs::read(t.env_path("dns")).unwrap();
    let monitoring = fs::read(t.env_path("monitoring")).unwrap();

    let output = t.bootstrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no new values written");
    assert_stdout_excludes(&output, "created");

    assert_eq!(fs::read(t.env_path("dns")).unwrap(), dns);
    assert_eq!(fs::read(t.env_path("monitoring")).unwrap(), monitoring);
}

#[test]
fn test_bootstrap_json_report() {
    let t = Test::with_stacks(&[("dns", DNS_TEMPLATE)]);

    let report = t.bootstrap_json();

    assert_eq!(report["stacks"][0]["name"], "dns");
    assert_eq!(report["stacks"][0]["created"], true);
    assert_eq!(report["stacks"][0]["written"][0], "dns/PIHOLE_WEBPASSWORD");
    assert_eq!(report["secrets"][0]["origin"], "dns/PIHOLE_WEBPASSWORD");
    assert_generated(report["secrets"][0]["value"].as_str().unwrap(), 32);
}

#[test]
fn test_bootstrap_with_no_stacks_warns() {
    let t = Test::new();

    let output = t.bootstrap();
    assert_success(&output);
    assert_stdout_contains(&output, "no stacks found");
}

#[test]
fn test_bootstrap_uses_configured_stacks() {
    let t = Test::with_stacks(&[("mqtt", MQTT_TEMPLATE)]);
    t.write_config(
        r#"
[stacks.mqtt]
keys = [
  { key = "MQTT_USER", fixed = "homeassistant" },
  { key = "MQTT_PASSWORD", generate = "password" },
]
"#,
    );

    assert_success(&t.bootstrap());

    let env = t.read_env("mqtt");
    assert!(env.starts_with("MQTT_PORT=1883\nMQTT_USER=homeassistant\nMQTT_PASSWORD="));
    assert_generated(env_value(&env, "MQTT_PASSWORD").unwrap(), 32);
}

#[test]
fn test_bootstrap_honours_custom_layout() {
    let t = Test::bare();
    t.write_config("[install]\ncontainers_dir = \"stacks\"\ntemplate = \"env.template\"\n");
    let dir = t.root.path().join("stacks").join("dns");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("env.template"), DNS_TEMPLATE).unwrap();

    assert_success(&t.bootstrap());

    let env = fs::read_to_string(dir.join(".env")).unwrap();
    assert_generated(env_value(&env, "PIHOLE_WEBPASSWORD").unwrap(), 32);
}

#[test]
fn test_root_flag_overrides_env() {
    let t = Test::with_stacks(&[("dns", DNS_TEMPLATE)]);
    let elsewhere = Test::bare();

    let output = elsewhere
        .cmd()
        .arg("--root")
        .arg(t.root.path())
        .arg("bootstrap")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.env_path("dns").exists());
}
