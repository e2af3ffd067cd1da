//! The seam between the client and the network.
//!
//! `reqwest::Client` implements [`Transport`] and is what `Client` uses unless
//! the caller supplies something else. Tests and embedders can plug in their
//! own implementation without touching the pipeline.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// A response as handed back by a transport.
///
/// The body has already been read to the end. `body` is an `Err` when the
/// status line and headers arrived but reading the body failed.
#[derive(Debug)]
pub struct Received {
    pub response: HttpResponse,
    pub body: Result<Bytes, TransportError>,
}

/// Executes one HTTP exchange.
///
/// Implementations must not interpret the status code; classification is the
/// client's job. They need not enforce `request.context`, the client already
/// races the whole call against it.
#[async_trait]
pub trait Transport: fmt::Debug + Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<Received, TransportError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: HttpRequest) -> Result<Received, TransportError> {
        let mut builder = self.request(request.method.into(), request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let head = HttpResponse {
            status: response.status().as_u16(),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect(),
        };
        let body = response.bytes().await.map_err(TransportError::from);

        Ok(Received {
            response: head,
            body,
        })
    }
}
