#![recursion_limit = "256"]
use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// What the server answers for one path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: &Value) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain; charset=utf-8",
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as seen by the server. Header names are lowercase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: BTreeMap<String, String>,
}

/// Scripted replies keyed by path, plus a log of every request served.
#[derive(Clone, Debug)]
pub struct MockState {
    replies: Arc<RwLock<HashMap<String, Reply>>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl Default for MockState {
    fn default() -> Self {
        let replies = HashMap::from([
            ("/".to_string(), Reply::json(200, &node_info())),
            ("/status".to_string(), Reply::json(200, &node_status())),
        ]);
        Self {
            replies: Arc::new(RwLock::new(replies)),
            requests: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_reply(&self, path: &str, reply: Reply) {
        self.replies.write().await.insert(path.to_string(), reply);
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }
}

/// Node information as a Kong 1.0 node reports it.
pub fn node_info() -> Value {
    json!({
        "hostname": "kong1",
        "version": "1.0.0",
        "tagline": "Welcome to kong",
        "lua_version": "LuaJIT 2.1.0-beta3",
        "node_id": "6a72192c-a3a1-4c8d-95c6-efabae9fb969",
        "prng_seeds": {"pid: 6": 183184219419_u64},
        "timers": {"pending": 5, "running": 0},
        "plugins": {
            "available_on_server": {
                "basic-auth": true,
                "cors": true,
                "key-auth": true,
                "rate-limiting": true
            },
            "enabled_in_cluster": ["key-auth"]
        },
        "configuration": {
            "admin_listen": ["0.0.0.0:8001", "0.0.0.0:8444 ssl"],
            "admin_listeners": [
                {"ip": "0.0.0.0", "listener": "0.0.0.0:8001", "port": 8001, "ssl": false, "http2": false},
                {"ip": "0.0.0.0", "listener": "0.0.0.0:8444 ssl", "port": 8444, "ssl": true, "http2": false}
            ],
            "proxy_listen": ["0.0.0.0:8000"],
            "proxy_listeners": [
                {"ip": "0.0.0.0", "listener": "0.0.0.0:8000", "port": 8000, "ssl": false, "http2": false}
            ],
            "database": "postgres",
            "pg_host": "kong-database",
            "pg_port": 5432,
            "pg_user": "kong",
            "pg_database": "kong",
            "pg_ssl": false,
            "pg_ssl_verify": false,
            "db_cache_ttl": 0,
            "db_update_frequency": 5,
            "db_update_propagation": 0,
            "dns_order": ["LAST", "SRV", "A", "CNAME"],
            "dns_resolver": null,
            "dns_hostsfile": "/etc/hosts",
            "dns_not_found_ttl": 30,
            "dns_error_ttl": 1,
            "dns_stale_ttl": 4,
            "mem_cache_size": "128m",
            "nginx_worker_processes": "auto",
            "nginx_daemon": "off",
            "log_level": "notice",
            "prefix": "/usr/local/kong",
            "plugins": {"bundled": true},
            "trusted_ips": null,
            "real_ip_header": "X-Real-IP",
            "real_ip_recursive": "off",
            "upstream_keepalive": 60,
            "admin_ssl_enabled": true,
            "proxy_ssl_enabled": false,
            "anonymous_reports": true,
            "server_tokens": true,
            "latency_tokens": true
        }
    })
}

pub fn node_status() -> Value {
    json!({
        "database": {"reachable": true},
        "server": {
            "connections_accepted": 1,
            "connections_active": 1,
            "connections_handled": 1,
            "connections_reading": 0,
            "connections_waiting": 0,
            "connections_writing": 1,
            "total_requests": 1
        }
    })
}

pub fn app(state: MockState) -> Router {
    Router::new().fallback(serve).with_state(state)
}

pub async fn run(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn serve(State(state): State<MockState>, method: Method, uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().to_string();
    tracing::info!(%method, %path, "admin request");

    state.requests.write().await.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        headers: headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    });

    if method != Method::GET {
        return respond(Reply::json(405, &json!({"message": "Method not allowed"})));
    }

    let reply = state.replies.read().await.get(&path).cloned();
    let reply = reply.unwrap_or_else(|| Reply::json(404, &json!({"message": "Not found"})));
    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }
    respond(reply)
}

fn respond(reply: Reply) -> Response {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, reply.content_type)], reply.body).into_response()
}
