//! Error types for the Kong admin client.
//!
//! # Design
//! Non-2xx responses are not failures of the client: they are recovered into a
//! `ResponseError` that keeps the response so callers can still inspect its
//! status and headers. A 2xx response whose body cannot be decoded yields
//! `Error::Decode`, which deliberately carries no response.

use std::fmt;

use serde_json::Value;

use crate::http::HttpResponse;

/// Message rendered when the server gave no usable one.
pub const DEFAULT_ERROR_MESSAGE: &str = "Request error";

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by `Client` and the node accessors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client could not be built: empty, unparseable or
    /// non-hierarchical base URL, or an unbuildable default transport.
    #[error("invalid client configuration: {0}")]
    Construction(String),

    /// The resource path is not a valid URI reference.
    #[error("invalid resource path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered outside the 2xx range.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The server answered 2xx but the body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// The response behind an API error. `None` for every other variant,
    /// including `Decode`.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            Error::Response(err) => Some(&err.response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Error::Transport(TransportError::Cancelled | TransportError::DeadlineExceeded)
        )
    }
}

/// Failures while sending a request or reading its response.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request cancelled")]
    Cancelled,

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    /// Raised by transports other than the bundled reqwest one.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::DeadlineExceeded => true,
            TransportError::Http(err) => err.is_timeout(),
            _ => false,
        }
    }
}

/// A non-2xx answer from the admin API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseError {
    pub response: HttpResponse,
    message: String,
}

impl ResponseError {
    pub fn new(response: HttpResponse, message: impl Into<String>) -> Self {
        Self {
            response,
            message: message.into(),
        }
    }

    /// Builds the error from a failed response and its body, if the body could
    /// be read. The message is the decoded `message` field, else the raw body
    /// text, else unset.
    pub(crate) fn from_body(response: HttpResponse, body: Option<&[u8]>) -> Self {
        let message = match body {
            None | Some([]) => String::new(),
            Some(data) => decode_message(data)
                .unwrap_or_else(|| String::from_utf8_lossy(data).into_owned()),
        };
        Self { response, message }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    /// The server's message, or [`DEFAULT_ERROR_MESSAGE`] when it sent none.
    pub fn message(&self) -> &str {
        if self.message.is_empty() {
            DEFAULT_ERROR_MESSAGE
        } else {
            &self.message
        }
    }
}

/// Reads `message` out of an admin API error document. A `null` document or
/// a missing/`null` field gives an empty message; `None` when the body is not
/// an error document at all (not an object, or a non-string `message`).
fn decode_message(data: &[u8]) -> Option<String> {
    match serde_json::from_slice::<Value>(data).ok()? {
        Value::Null => Some(String::new()),
        Value::Object(mut fields) => match fields.remove("message") {
            None | Some(Value::Null) => Some(String::new()),
            Some(Value::String(message)) => Some(message),
            Some(_) => None,
        },
        _ => None,
    }
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.response.status, self.message())
    }
}

impl std::error::Error for ResponseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(status: u16, body: Option<&[u8]>) -> ResponseError {
        ResponseError::from_body(HttpResponse::new(status), body)
    }

    #[test]
    fn message_is_decoded_from_error_document() {
        let err = failed(503, Some(br#"{"message":"Service Unavailable"}"#));
        assert_eq!(err.message(), "Service Unavailable");
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[test]
    fn raw_text_is_used_when_body_is_not_json() {
        let err = failed(502, Some(b"upstream connect error"));
        assert_eq!(err.message(), "upstream connect error");
        assert_eq!(err.to_string(), "502 upstream connect error");
    }

    #[test]
    fn raw_text_is_used_when_message_has_wrong_type() {
        let err = failed(400, Some(br#"{"message":42}"#));
        assert_eq!(err.message(), r#"{"message":42}"#);
    }

    #[test]
    fn empty_body_falls_back_to_placeholder() {
        let err = failed(404, Some(b""));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
        assert_eq!(err.to_string(), "404 Request error");
    }

    #[test]
    fn unreadable_body_falls_back_to_placeholder() {
        let err = failed(500, None);
        assert_eq!(err.to_string(), "500 Request error");
    }

    #[test]
    fn document_without_message_falls_back_to_placeholder() {
        let err = failed(409, Some(br#"{"name":"unique constraint violation"}"#));
        assert_eq!(err.message(), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn null_document_falls_back_to_placeholder() {
        assert_eq!(failed(500, Some(b"null")).to_string(), "500 Request error");
        assert_eq!(
            failed(500, Some(br#"{"message":null}"#)).to_string(),
            "500 Request error"
        );
    }

    #[test]
    fn non_object_documents_are_kept_verbatim() {
        assert_eq!(failed(500, Some(br#"["boom"]"#)).to_string(), r#"500 ["boom"]"#);
        assert_eq!(failed(500, Some(b"[]")).to_string(), "500 []");
        assert_eq!(failed(500, Some(b"\"oops\"")).to_string(), "500 \"oops\"");
        assert_eq!(failed(500, Some(b"17")).to_string(), "500 17");
    }

    #[test]
    fn document_with_trailing_bytes_is_kept_verbatim() {
        let err = failed(500, Some(b"{\"message\":\"down\"} trailing"));
        assert_eq!(err.message(), r#"{"message":"down"} trailing"#);
    }

    #[test]
    fn api_error_exposes_response() {
        let err = Error::from(failed(401, Some(br#"{"message":"Unauthorized"}"#)));
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "401 Unauthorized");
    }

    #[test]
    fn decode_error_has_no_response() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = Error::from(source);
        assert!(err.response().is_none());
        assert!(err.status().is_none());
    }

    #[test]
    fn cancellation_is_detected() {
        assert!(Error::from(TransportError::Cancelled).is_cancelled());
        assert!(Error::from(TransportError::DeadlineExceeded).is_cancelled());
        assert!(!Error::from(TransportError::Other("reset".into())).is_cancelled());
        assert!(TransportError::DeadlineExceeded.is_timeout());
    }
}
