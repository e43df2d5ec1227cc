//! Interpreting what came back from the transport.
//!
//! # Design
//! A `Response` is built once, from an already drained `HttpResponse`, and
//! never changes. It borrows the `Request` that produced it purely for
//! diagnostics. Status classification is by range only; decoding is refused
//! outright on non-2xx so an error page that happens to be valid JSON is
//! never mistaken for a result. `check_error` tries the structured
//! `{code, message, details}` shape first and falls back to the raw text.

use std::borrow::Cow;
use std::fmt;

use serde::de::DeserializeOwned;

use crate::body::Body;
use crate::error::{ApiError, DecodeError, Error, Result};
use crate::header::Header;
use crate::http::HttpResponse;
use crate::request::Request;

/// Coarse status class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusCategory {
    pub fn of(status: u16) -> Self {
        match status {
            100..=199 => StatusCategory::Informational,
            200..=299 => StatusCategory::Success,
            300..=399 => StatusCategory::Redirection,
            400..=499 => StatusCategory::ClientError,
            500..=599 => StatusCategory::ServerError,
            _ => StatusCategory::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<'r> {
    request: &'r Request,
    status_code: u16,
    headers: Header,
    body: Body,
}

impl<'r> Response<'r> {
    pub fn new(request: &'r Request, status_code: u16, headers: Header, body: Body) -> Self {
        Self {
            request,
            status_code,
            headers,
            body,
        }
    }

    /// Wrap a transport result. Repeated headers collapse to their first value.
    pub fn from_http(request: &'r Request, raw: HttpResponse) -> Self {
        let headers = Header::from_transport(&raw.headers);
        let body = Body::from_transport(&headers, raw.body);
        Self::new(request, raw.status, headers, body)
    }

    /// The request this response answers.
    pub fn request(&self) -> &'r Request {
        self.request
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn headers(&self) -> &Header {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn text(&self) -> Cow<'_, str> {
        self.body.text()
    }

    pub fn status_category(&self) -> StatusCategory {
        StatusCategory::of(self.status_code)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Decode a successful JSON body into `T`.
    ///
    /// Fails with `DecodeError::NotSuccess` for any non-2xx status without
    /// looking at the body.
    pub fn decode_json<T: DeserializeOwned>(&self) -> Result<T> {
        if !self.is_success() {
            return Err(DecodeError::NotSuccess(self.status_code).into());
        }
        Ok(self.parse_json()?)
    }

    /// `Ok(())` on 2xx. Otherwise an `Error::Api` carrying the real status
    /// as its code when the body is any JSON object (missing fields are left
    /// empty), or `Error::Http` with the raw body for anything else.
    pub fn check_error(&self) -> Result<()> {
        if self.is_success() {
            return Ok(());
        }
        match self.structured_error() {
            Some(mut api) => {
                api.code = i64::from(self.status_code);
                Err(Error::Api(api))
            }
            None => {
                log::debug!(
                    "{} {} -> {}: body is not a structured error",
                    self.request.method(),
                    self.request.url(),
                    self.status_code
                );
                Err(Error::Http {
                    status: self.status_code,
                    body: self.text().into_owned(),
                })
            }
        }
    }

    /// `Ok(())` when the status is one of `expected`.
    pub fn check_status(&self, expected: &[u16]) -> Result<()> {
        if expected.contains(&self.status_code) {
            Ok(())
        } else {
            Err(Error::UnexpectedStatus(self.status_code))
        }
    }

    /// Status line, headers and body for logs. JSON bodies are re-indented.
    pub fn pretty_print(&self) -> String {
        let mut out = match reason_phrase(self.status_code) {
            Some(reason) => format!("Status: {} {reason}\n", self.status_code),
            None => format!("Status: {}\n", self.status_code),
        };
        out.push_str("Headers:\n");
        for (k, v) in self.headers.iter() {
            out.push_str(&format!("  {k}: {v}\n"));
        }
        out.push_str("Body:\n");
        out.push_str(&self.body.pretty_string());
        out
    }

    /// Only a JSON object counts; serde would otherwise accept a sequence
    /// for a struct.
    fn structured_error(&self) -> Option<ApiError> {
        match self.parse_json::<serde_json::Value>() {
            Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    fn parse_json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        if self.body.is_empty() {
            return Err(DecodeError::EmptyBody);
        }
        serde_json::from_slice(self.body.data()).map_err(DecodeError::Json)
    }
}

impl fmt::Display for Response<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty_print())
    }
}

fn reason_phrase(status: u16) -> Option<&'static str> {
    ::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
}
