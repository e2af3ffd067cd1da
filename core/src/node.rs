//! Accessors for the node endpoints of the admin API.
//!
//! # Design
//! `NodeApi` is the capability set callers program against; `NodeService` is
//! the only implementation and simply pairs a fixed path with the client's
//! pipeline. A test double can implement `NodeApi` without a live server.

use async_trait::async_trait;

use crate::client::Client;
use crate::error::Result;
use crate::http::{HttpMethod, HttpResponse, RequestContext};
use crate::types::{NodeInfo, NodeStatus};

pub const NODE_INFO_PATH: &str = "/";
pub const NODE_STATUS_PATH: &str = "/status";

/// Read-only information about a Kong node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Retrieves the node's configuration, plugins and timers.
    async fn info(&self) -> Result<(NodeInfo, HttpResponse)> {
        self.info_with_context(RequestContext::background()).await
    }

    async fn info_with_context(&self, context: RequestContext) -> Result<(NodeInfo, HttpResponse)>;

    /// Retrieves database reachability and connection counters.
    async fn status(&self) -> Result<(NodeStatus, HttpResponse)> {
        self.status_with_context(RequestContext::background()).await
    }

    async fn status_with_context(
        &self,
        context: RequestContext,
    ) -> Result<(NodeStatus, HttpResponse)>;
}

#[derive(Debug, Clone)]
pub struct NodeService {
    client: Client,
}

impl NodeService {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NodeApi for NodeService {
    async fn info_with_context(&self, context: RequestContext) -> Result<(NodeInfo, HttpResponse)> {
        let request = self
            .client
            .new_request(context, HttpMethod::Get, NODE_INFO_PATH, None)?;
        self.client.send_json(request).await
    }

    async fn status_with_context(
        &self,
        context: RequestContext,
    ) -> Result<(NodeStatus, HttpResponse)> {
        let request = self
            .client
            .new_request(context, HttpMethod::Get, NODE_STATUS_PATH, None)?;
        self.client.send_json(request).await
    }
}
