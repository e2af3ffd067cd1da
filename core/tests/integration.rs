//! Node accessors against the live mock server.
//!
//! # Design
//! Each test starts the mock admin API on a random port with its own scripted
//! replies, then drives the public client over real HTTP through the default
//! reqwest transport.

use std::time::Duration;

use kong_admin::{
    CancellationToken, Client, Error, NodeApi, RequestContext, TransportError, USER_AGENT,
};
use mock_server::{MockState, Reply};
use serde_json::json;

async fn start(state: MockState) -> Client {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener, state));
    Client::new(&format!("http://{addr}")).unwrap()
}

#[tokio::test]
async fn info_decodes_minimal_document() {
    let state = MockState::new();
    state
        .set_reply(
            "/",
            Reply::json(
                200,
                &json!({"hostname": "kong1", "version": "1.0.0", "tagline": "Welcome to kong"}),
            ),
        )
        .await;
    let client = start(state).await;

    let (info, response) = client.node().info().await.unwrap();

    assert_eq!(info.hostname, "kong1");
    assert_eq!(info.version, "1.0.0");
    assert_eq!(info.tagline, "Welcome to kong");
    assert_eq!(response.status, 200);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("application/json"));
}

#[tokio::test]
async fn info_decodes_full_document() {
    let client = start(MockState::new()).await;

    let (info, _) = client.node().info().await.unwrap();

    let configuration = info.configuration.unwrap();
    assert_eq!(configuration.database, "postgres");
    assert_eq!(configuration.postgres_port, 5432);
    assert_eq!(configuration.admin_listeners.len(), 2);
    assert!(configuration.admin_listeners[1].ssl);
    assert_eq!(info.plugins.unwrap().enabled_in_cluster, vec!["key-auth"]);
    assert_eq!(info.timers.unwrap().pending, 5);
}

#[tokio::test]
async fn status_decodes_counters() {
    let client = start(MockState::new()).await;

    let (status, response) = client.node().status().await.unwrap();

    assert_eq!(response.status, 200);
    assert!(status.database.unwrap().reachable);
    assert_eq!(status.server.unwrap().connections_writing, 1);
}

#[tokio::test]
async fn status_unavailable_renders_server_message() {
    let state = MockState::new();
    state
        .set_reply("/status", Reply::json(503, &json!({"message": "Service Unavailable"})))
        .await;
    let client = start(state).await;

    let err = client.node().status().await.unwrap_err();

    assert_eq!(err.to_string(), "503 Service Unavailable");
    let response = err.response().expect("API errors keep the response");
    assert_eq!(response.status, 503);
}

#[tokio::test]
async fn plain_text_failure_uses_body_as_message() {
    let state = MockState::new();
    state
        .set_reply("/status", Reply::text(502, "An invalid response was received from the upstream server"))
        .await;
    let client = start(state).await;

    let err = client.node().status().await.unwrap_err();

    match &err {
        Error::Response(api) => {
            assert_eq!(api.message(), "An invalid response was received from the upstream server");
            assert_eq!(api.status(), 502);
        }
        other => panic!("expected an API error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_failure_body_uses_placeholder() {
    let state = MockState::new();
    state.set_reply("/", Reply::text(500, "")).await;
    let client = start(state).await;

    let err = client.node().info().await.unwrap_err();

    assert_eq!(err.to_string(), "500 Request error");
    assert!(err.response().is_some());
}

#[tokio::test]
async fn unknown_resource_is_an_api_error() {
    let client = start(MockState::new()).await;
    let request = client
        .new_request(
            RequestContext::background(),
            kong_admin::HttpMethod::Get,
            "/consumers",
            None,
        )
        .unwrap();

    let err = client.send(request).await.unwrap_err();

    assert_eq!(err.to_string(), "404 Not found");
}

#[tokio::test]
async fn garbage_success_body_withholds_response() {
    let state = MockState::new();
    state.set_reply("/", Reply::text(200, "<html>maintenance</html>")).await;
    let client = start(state).await;

    let err = client.node().info().await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn repeated_reads_are_equal() {
    let state = MockState::new();
    let client = start(state.clone()).await;
    let node = client.node();

    let (first, _) = node.info().await.unwrap();
    let (second, _) = node.info().await.unwrap();
    let (first_status, _) = node.status().await.unwrap();
    let (second_status, _) = node.status().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first_status, second_status);
    assert!(state.requests().await.iter().all(|r| r.method == "GET"));
}

#[tokio::test]
async fn requests_carry_fixed_headers() {
    let state = MockState::new();
    let client = start(state.clone()).await;

    client.node().status().await.unwrap();

    let requests = state.requests().await;
    assert_eq!(requests.len(), 1);
    let headers = &requests[0].headers;
    assert_eq!(requests[0].path, "/status");
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["accept"], "application/json");
    assert_eq!(headers["user-agent"], USER_AGENT);
}

#[tokio::test]
async fn cancelled_context_fails_before_sending() {
    let state = MockState::new();
    let client = start(state.clone()).await;
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .node()
        .info_with_context(RequestContext::with_cancellation(token))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Cancelled)));
    assert!(state.requests().await.is_empty());
}

#[tokio::test]
async fn deadline_cuts_slow_reply_short() {
    let state = MockState::new();
    state
        .set_reply(
            "/status",
            Reply::json(200, &mock_server::node_status()).delayed(Duration::from_secs(5)),
        )
        .await;
    let client = start(state).await;

    let err = client
        .node()
        .status_with_context(RequestContext::with_timeout(Duration::from_millis(100)))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::DeadlineExceeded)));
    assert!(err.is_cancelled());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = Client::new(&format!("http://{addr}")).unwrap();

    let err = client.node().status().await.unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Http(_))));
    assert!(err.response().is_none());
}

#[tokio::test]
async fn shared_client_serves_concurrent_callers() {
    let client = start(MockState::new()).await;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let node = client.node();
            tokio::spawn(async move { node.status().await })
        })
        .collect();

    for handle in handles {
        let (status, _) = handle.await.unwrap().unwrap();
        assert!(status.database.unwrap().reachable);
    }
}
