//! Request construction and response classification for the Kong admin API.
//!
//! # Design
//! `Client` holds a transport and a base URL and never changes after
//! construction, so clones can be shared freely across tasks. Every call goes
//! through the same two steps: `new_request` resolves the resource against the
//! base URL and attaches the fixed headers, then `send` / `send_json` executes
//! it and classifies the status code.

use std::sync::Arc;

use bytes::Bytes;
use serde::de::{Deserialize, DeserializeOwned};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, ResponseError, Result};
use crate::http::{
    HttpMethod, HttpRequest, HttpResponse, RequestContext, HEADER_ACCEPT, HEADER_CONTENT_TYPE,
    HEADER_USER_AGENT, MEDIA_TYPE,
};
use crate::node::NodeService;
use crate::transport::{Received, Transport};

/// Value of the `user-agent` header sent with every request.
pub const USER_AGENT: &str = "kong-admin/v0";

/// Client for the Kong admin API.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl Client {
    /// Creates a client for `base_url` using a default reqwest transport.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::builder().base_url(parse_base_url(base_url)?).build()
    }

    /// Creates a client for `base_url` that sends requests through `transport`.
    pub fn with_transport<T: Transport + 'static>(transport: T, base_url: &str) -> Result<Self> {
        Self::builder()
            .transport(transport)
            .base_url(parse_base_url(base_url)?)
            .build()
    }

    /// Creates a client for an already parsed URL using a default transport.
    pub fn from_url(base_url: Url) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    /// Creates a client whose reqwest transport honors the configured timeouts.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = config.build_transport()?;
        Self::with_transport(transport, &config.base_url)
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user_agent(&self) -> &'static str {
        USER_AGENT
    }

    /// Accessors for the node endpoints.
    pub fn node(&self) -> NodeService {
        NodeService::new(self.clone())
    }

    /// Builds a request for `resource`, resolved against the base URL the way
    /// a browser resolves a link: absolute references replace the base,
    /// relative ones are merged with it.
    pub fn new_request(
        &self,
        context: RequestContext,
        method: HttpMethod,
        resource: &str,
        body: Option<Bytes>,
    ) -> Result<HttpRequest> {
        let url = self
            .base_url
            .join(resource)
            .map_err(|source| Error::InvalidPath {
                path: resource.to_string(),
                source,
            })?;

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                (HEADER_CONTENT_TYPE.to_string(), MEDIA_TYPE.to_string()),
                (HEADER_ACCEPT.to_string(), MEDIA_TYPE.to_string()),
                (HEADER_USER_AGENT.to_string(), USER_AGENT.to_string()),
            ],
            body,
            context,
        })
    }

    /// Executes `request` without decoding a successful body.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let received = self.round_trip(request).await?;
        Ok(received.response)
    }

    /// Executes `request` and decodes a successful body as JSON into `T`.
    ///
    /// Only the first JSON value in the body is read; anything after it is
    /// ignored. A body that does not decode yields `Error::Decode` and the
    /// response is dropped: a half-understood success is not handed back.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
    ) -> Result<(T, HttpResponse)> {
        let Received { response, body } = self.round_trip(request).await?;
        let body = body?;
        let value = T::deserialize(&mut serde_json::Deserializer::from_slice(&body))?;
        Ok((value, response))
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<Received> {
        let context = request.context.clone();
        debug!(method = %request.method, url = %request.url, "sending admin API request");

        let received = context.run(self.transport.execute(request)).await?;
        debug!(status = received.response.status, "admin API responded");

        if !received.response.is_success() {
            let Received { response, body } = received;
            return Err(ResponseError::from_body(response, body.as_deref().ok()).into());
        }
        Ok(received)
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    if base_url.is_empty() {
        return Err(Error::Construction("empty base URL is not allowed".to_string()));
    }
    Url::parse(base_url)
        .map_err(|e| Error::Construction(format!("invalid base URL {base_url:?}: {e}")))
}

/// Assembles a `Client`. The base URL is mandatory; the transport defaults to
/// a plain `reqwest::Client`.
#[derive(Debug, Default)]
pub struct ClientBuilder {
    transport: Option<Arc<dyn Transport>>,
    base_url: Option<Url>,
}

impl ClientBuilder {
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Shares a transport already used by other clients.
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn build(self) -> Result<Client> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Construction("empty base URL is not allowed".to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Construction(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }
        let transport = self
            .transport
            .unwrap_or_else(|| Arc::new(reqwest::Client::new()));

        Ok(Client {
            transport,
            base_url,
        })
    }
}
