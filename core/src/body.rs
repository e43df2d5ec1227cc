//! Request and response bodies.
//!
//! # Design
//! A `Body` is raw bytes plus the media type that describes them. Outgoing
//! bodies start life as a `Payload`, whose variant decides the media type:
//! text is `text/plain`, raw bytes are `application/octet-stream`, and any
//! structured value is JSON-encoded as `application/json`. Incoming bodies
//! take their media type from the response's `Content-Type` header.

use std::borrow::Cow;

use serde::Serialize;

use crate::content_type::{ContentType, CONTENT_TYPE};
use crate::error::{Error, Result};
use crate::header::Header;

/// A request payload before serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
}

impl Payload {
    /// Capture any serializable value as a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Payload> {
        serde_json::to_value(value)
            .map(Payload::Json)
            .map_err(Error::Serialization)
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

/// Bytes tagged with their media type. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Body {
    content_type: ContentType,
    data: Vec<u8>,
}

impl Body {
    pub fn new(content_type: ContentType, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_type,
            data: data.into(),
        }
    }

    /// Serialize a payload, choosing the media type from its variant.
    pub fn from_payload(payload: Payload) -> Result<Body> {
        let body = match payload {
            Payload::Text(text) => Body::new(ContentType::Text, text),
            Payload::Bytes(bytes) => Body::new(ContentType::OctetStream, bytes),
            Payload::Json(value) => {
                let data = serde_json::to_vec(&value).map_err(Error::Serialization)?;
                Body::new(ContentType::Json, data)
            }
        };
        Ok(body)
    }

    /// Pair drained response bytes with the response's content type.
    pub fn from_transport(headers: &Header, data: Vec<u8>) -> Body {
        Body::new(headers.content_type(), data)
    }

    pub fn content_type(&self) -> &ContentType {
        &self.content_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Body as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Content type line followed by the body; JSON is re-indented.
    pub fn pretty_string(&self) -> String {
        let mut out = format!("{CONTENT_TYPE}: {}\n", self.content_type);
        match self.pretty_json() {
            Some(pretty) => out.push_str(&pretty),
            None => out.push_str(&self.text()),
        }
        out
    }

    fn pretty_json(&self) -> Option<String> {
        if !self.content_type.is_json() {
            return None;
        }
        let value: serde_json::Value = serde_json::from_slice(&self.data).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }
}
