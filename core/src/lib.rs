//! Async client for the Kong admin API.
//!
//! # Overview
//! `Client` resolves resource paths against a base URL, attaches the JSON and
//! identifying headers, executes the request over a pluggable `Transport`
//! (reqwest by default) and classifies the answer: 2xx bodies are decoded into
//! the caller's type, anything else becomes a `ResponseError` carrying the
//! server's message and the response itself.
//!
//! # Design
//! - `Client` is immutable after construction and cheap to clone.
//! - Cancellation and deadlines travel with each request in a `RequestContext`.
//! - The node accessors (`NodeApi`) only pick a path and a target type; all
//!   classification and decoding lives in the client.
//! - Response documents in `types` mirror the admin API and hold no logic.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod node;
pub mod transport;
pub mod types;

pub use client::{Client, ClientBuilder, USER_AGENT};
pub use config::ClientConfig;
pub use error::{Error, ResponseError, Result, TransportError, DEFAULT_ERROR_MESSAGE};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestContext, MEDIA_TYPE};
pub use node::{NodeApi, NodeService, NODE_INFO_PATH, NODE_STATUS_PATH};
pub use transport::{Received, Transport};
pub use types::{
    NodeInfo, NodeInfoConfiguration, NodeInfoListener, NodeInfoPlugins, NodeInfoTimers,
    NodeStatus, NodeStatusDatabase, NodeStatusServer,
};

pub use tokio_util::sync::CancellationToken;
