//! Documents returned by the node endpoints.
//!
//! # Design
//! These structs mirror the admin API's JSON field by field and carry no
//! logic. Every field defaults when the server omits it or sends `null`, and
//! unknown fields are ignored, so older and newer Kong releases decode without
//! changes here.
//! Fields whose shape varies between releases are kept as `serde_json::Value`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decodes an explicit `null` as the field's default, the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Returned by `GET /`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    pub configuration: Option<NodeInfoConfiguration>,
    #[serde(deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lua_version: String,
    pub plugins: Option<NodeInfoPlugins>,
    #[serde(deserialize_with = "null_as_default")]
    pub prng_seeds: BTreeMap<String, i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub tagline: String,
    pub timers: Option<NodeInfoTimers>,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
}

/// The node's effective `kong.conf`, as reported under `configuration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfoConfiguration {
    #[serde(deserialize_with = "null_as_default")]
    pub admin_access_log: String,
    #[serde(deserialize_with = "null_as_default")]
    pub admin_error_log: String,
    #[serde(rename = "admin_ssl_cert_default", deserialize_with = "null_as_default")]
    pub admin_ssl_certificate_default: String,
    #[serde(rename = "admin_ssl_cert_csr_default", deserialize_with = "null_as_default")]
    pub admin_ssl_certificate_csr_default: String,
    #[serde(rename = "admin_ssl_cert_key_default", deserialize_with = "null_as_default")]
    pub admin_ssl_certificate_key_default: String,
    #[serde(deserialize_with = "null_as_default")]
    pub admin_listen: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub admin_listeners: Vec<NodeInfoListener>,

    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_consistency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_keyspace: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_lb_policy: String,
    #[serde(rename = "cassandra_repl_strategy", deserialize_with = "null_as_default")]
    pub cassandra_replication_strategy: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_contact_points: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_data_centers: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_port: i64,
    #[serde(rename = "cassandra_repl_factor", deserialize_with = "null_as_default")]
    pub cassandra_replication_factor: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_schema_consensus_timeout: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_timeout: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub client_body_buffer_size: String,
    #[serde(deserialize_with = "null_as_default")]
    pub client_max_body_size: String,
    #[serde(rename = "client_ssl_cert_csr_default", deserialize_with = "null_as_default")]
    pub client_ssl_certificate_csr_default: String,
    #[serde(rename = "client_ssl_cert_default", deserialize_with = "null_as_default")]
    pub client_ssl_certificate_default: String,
    #[serde(rename = "client_ssl_cert_key_default", deserialize_with = "null_as_default")]
    pub client_ssl_certificate_key_default: String,

    pub custom_plugins: Value,

    #[serde(deserialize_with = "null_as_default")]
    pub database: String,
    #[serde(rename = "db_cache_ttl", deserialize_with = "null_as_default")]
    pub database_cache_ttl: i64,
    #[serde(rename = "db_update_frequency", deserialize_with = "null_as_default")]
    pub database_update_frequency: i64,
    #[serde(rename = "db_update_propagation", deserialize_with = "null_as_default")]
    pub database_update_propagation: i64,

    #[serde(rename = "dns_hostsfile", deserialize_with = "null_as_default")]
    pub dns_hosts_file: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_order: Vec<String>,
    pub dns_resolver: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_not_found_ttl: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_error_ttl: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_stale_ttl: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub error_default_type: String,

    #[serde(deserialize_with = "null_as_default")]
    pub kong_env: String,

    #[serde(deserialize_with = "null_as_default")]
    pub lua_package_cpath: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lua_package_path: String,
    #[serde(deserialize_with = "null_as_default")]
    pub lua_socket_pool_size: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub lua_ssl_verify_depth: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub log_level: String,

    #[serde(rename = "mem_cache_size", deserialize_with = "null_as_default")]
    pub memory_cache_size: String,

    #[serde(rename = "nginx_acc_logs", deserialize_with = "null_as_default")]
    pub nginx_access_logs: String,
    #[serde(rename = "nginx_admin_acc_logs", deserialize_with = "null_as_default")]
    pub nginx_admin_access_log: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_conf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_daemon: String,
    #[serde(rename = "nginx_err_logs", deserialize_with = "null_as_default")]
    pub nginx_error_logs: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_kong_conf: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_pid: String,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_worker_processes: String,

    #[serde(deserialize_with = "null_as_default")]
    pub plugins: BTreeMap<String, bool>,

    #[serde(rename = "pg_database", deserialize_with = "null_as_default")]
    pub postgres_database: String,
    #[serde(rename = "pg_host", deserialize_with = "null_as_default")]
    pub postgres_host: String,
    #[serde(rename = "pg_user", deserialize_with = "null_as_default")]
    pub postgres_username: String,
    #[serde(rename = "pg_port", deserialize_with = "null_as_default")]
    pub postgres_port: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub prefix: String,

    #[serde(deserialize_with = "null_as_default")]
    pub proxy_access_log: String,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_error_log: String,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_listen: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_listeners: Vec<NodeInfoListener>,

    #[serde(deserialize_with = "null_as_default")]
    pub real_ip_header: String,
    #[serde(deserialize_with = "null_as_default")]
    pub real_ip_recursive: String,

    #[serde(rename = "ssl_cert", deserialize_with = "null_as_default")]
    pub ssl_certificate: String,
    #[serde(rename = "ssl_cert_default", deserialize_with = "null_as_default")]
    pub ssl_certificate_default: String,
    #[serde(rename = "ssl_cert_key", deserialize_with = "null_as_default")]
    pub ssl_certificate_key: String,
    #[serde(rename = "ssl_cert_key_default", deserialize_with = "null_as_default")]
    pub ssl_certificate_key_default: String,
    #[serde(rename = "ssl_cert_csr_default", deserialize_with = "null_as_default")]
    pub ssl_certificate_csr_default: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssl_ciphers: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ssl_cipher_suite: String,

    pub trusted_ips: Value,

    #[serde(deserialize_with = "null_as_default")]
    pub upstream_keepalive: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub admin_ssl_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub anonymous_reports: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub client_ssl: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_ssl: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub cassandra_ssl_verify: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub dns_no_sync: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub latency_tokens: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub nginx_optimizations: bool,
    #[serde(rename = "pg_ssl", deserialize_with = "null_as_default")]
    pub postgres_ssl: bool,
    #[serde(rename = "pg_ssl_verify", deserialize_with = "null_as_default")]
    pub postgres_ssl_verify: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub proxy_ssl_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub server_tokens: bool,
}

/// One entry of `admin_listeners` / `proxy_listeners`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfoListener {
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(deserialize_with = "null_as_default")]
    pub listener: String,
    #[serde(deserialize_with = "null_as_default")]
    pub port: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub ssl: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub http2: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfoPlugins {
    #[serde(deserialize_with = "null_as_default")]
    pub available_on_server: BTreeMap<String, bool>,
    #[serde(deserialize_with = "null_as_default")]
    pub enabled_in_cluster: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfoTimers {
    #[serde(deserialize_with = "null_as_default")]
    pub pending: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub running: u64,
}

/// Returned by `GET /status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStatus {
    pub database: Option<NodeStatusDatabase>,
    pub server: Option<NodeStatusServer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStatusDatabase {
    #[serde(deserialize_with = "null_as_default")]
    pub reachable: bool,
}

/// nginx connection counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStatusServer {
    #[serde(deserialize_with = "null_as_default")]
    pub connections_accepted: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections_active: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections_handled: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections_reading: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections_waiting: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub connections_writing: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_requests: u64,
}
