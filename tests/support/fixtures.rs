//! Test fixtures and constants.

/// Pi-hole template as shipped with the dns stack.
pub const DNS_TEMPLATE: &str = "\
# Pi-hole
TZ=Etc/UTC
PIHOLE_WEBPASSWORD=CHANGEME
";

/// Monitoring template with every key still a placeholder.
pub const MONITORING_TEMPLATE: &str = "\
INFLUXDB_USERNAME=
INFLUXDB_PASSWORD=CHANGEME
INFLUXDB_ORG=
INFLUXDB_BUCKET=
INFLUXDB_ADMIN_TOKEN=CHANGEME_TOKEN
GRAFANA_ADMIN_USER=
GRAFANA_ADMIN_PASSWORD=CHANGEME
";

/// Template for a stack with no registered keys.
pub const MQTT_TEMPLATE: &str = "MQTT_PORT=1883\n";

/// Monitoring keys in resolution order.
pub const MONITORING_KEYS: &[&str] = &[
    "INFLUXDB_USERNAME",
    "INFLUXDB_PASSWORD",
    "INFLUXDB_ORG",
    "INFLUXDB_BUCKET",
    "INFLUXDB_ADMIN_TOKEN",
    "GRAFANA_ADMIN_USER",
    "GRAFANA_ADMIN_PASSWORD",
];
