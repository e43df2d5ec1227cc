//! Error types for request assembly and response interpretation.
//!
//! # Design
//! Failures are grouped by the stage that produces them. `Validation` comes
//! out of `RequestBuilder::build` before any network activity. `Transport`
//! wraps whatever the transport collaborator returned, untouched. `Decode`,
//! `Api` and `Http` come out of `Response` once a status and body exist.
//! Callers that only care about "did the API reject this" can match on
//! `Api` first and fall through to `Http` for bodies that are not the
//! structured `{code, message, details}` shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::HttpMethod;

/// Crate-wide result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every error the builder, the execution boundary, or a response can report.
#[derive(Debug, Error)]
pub enum Error {
    /// The builder state cannot produce a well-formed request.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    /// The transport failed before any response was received.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The response body could not be decoded into the requested type.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The server answered non-2xx with a structured error body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The server answered non-2xx with a body that is not a structured error.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// A typed payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The status code is not one of the codes the caller expected.
    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),
}

impl Error {
    /// Wrap a transport-level failure without altering it.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Transport(Box::new(err))
    }

    /// HTTP status attached to this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Decode(DecodeError::NotSuccess(status)) => Some(*status),
            Error::Api(api) => u16::try_from(api.code).ok(),
            Error::Http { status, .. } | Error::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

/// Builder state rejected by `RequestBuilder::build`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("method is required")]
    MissingMethod,

    #[error("invalid method: {0:?}")]
    InvalidMethod(String),

    #[error("base URL is required")]
    MissingBaseUrl,

    #[error("body is not allowed for {0} requests")]
    BodyNotAllowed(HttpMethod),
}

/// Reasons `Response::decode_json` refuses or fails to produce a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Decoding is not attempted on non-2xx responses.
    #[error("response is not successful (status {0})")]
    NotSuccess(u16),

    #[error("response body is empty")]
    EmptyBody,

    #[error("malformed JSON: {0}")]
    Json(#[source] serde_json::Error),
}

/// Structured error payload, `{"code": int, "message": string, "details": string?}`.
///
/// `code` is overwritten with the real HTTP status when produced by
/// `Response::check_error`, so a server that reports its own internal code
/// still surfaces the status the transport saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) if !details.is_empty() => {
                write!(f, "API error {}: {} ({details})", self.code, self.message)
            }
            _ => write!(f, "API error {}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ApiError {}
