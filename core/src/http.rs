//! Wire types exchanged with the transport collaborator.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds an `HttpRequest` from a frozen `Request` and interprets an
//! `HttpResponse` without ever touching the network; whatever implements
//! `Transport` performs the actual I/O in between.
//!
//! All fields use owned types (`String`, `Vec`) so values can be moved across
//! threads or handed to any client library without lifetime concerns. Header
//! lists may repeat a key, which is how multi-valued transport headers appear.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// GET and HEAD never carry a request body.
    pub fn allows_body(&self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Head)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the upper-case verb exactly; `"get"` is not a method.
impl FromStr for HttpMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::MissingMethod);
        }
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidMethod(s.to_string()))
    }
}

/// An outgoing HTTP request described as plain data.
///
/// Produced by `Request::to_http_request`. The transport is responsible for
/// executing it and returning the corresponding `HttpResponse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Set a header, replacing every existing value under the same
    /// case-insensitive name.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
        self.headers.push((key.to_string(), value.to_string()));
    }
}

/// A fully drained HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`; the body
/// is already in memory, so no connection is held once this value exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}
