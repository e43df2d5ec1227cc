//! The frozen request descriptor and its execution boundary.

use std::fmt;

use serde::de::DeserializeOwned;

use crate::auth::Auth;
use crate::body::Body;
use crate::builder::RequestBuilder;
use crate::error::{Error, Result};
use crate::header::Header;
use crate::http::{HttpMethod, HttpRequest};
use crate::response::Response;
use crate::transport::Transport;

/// An immutable, fully composed HTTP request.
///
/// Holds no transport handle, so one value may be executed any number of
/// times, against any transport, from any thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: HttpMethod,
    url: String,
    headers: Header,
    body: Option<Body>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub(crate) fn from_parts(
        method: HttpMethod,
        url: String,
        headers: Header,
        body: Option<Body>,
    ) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn headers(&self) -> &Header {
        &self.headers
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    /// A copy of this request with the authorization header applied.
    pub fn with_auth(&self, auth: &Auth) -> Request {
        let mut authed = self.clone();
        auth.set_auth(&mut authed.headers);
        authed
    }

    /// The transport-native form of this request.
    pub fn to_http_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url.clone(),
            headers: self.headers.to_transport(),
            body: self.body.as_ref().map(|b| b.data().to_vec()),
        }
    }

    /// Send this request through `transport` and wrap the drained result.
    ///
    /// A transport failure is returned as `Error::Transport` and no
    /// `Response` is built. Any status code, including 4xx and 5xx, is a
    /// successful execution.
    pub fn execute<T>(&self, transport: &T) -> Result<Response<'_>>
    where
        T: Transport + ?Sized,
    {
        log::debug!("sending {} {}", self.method, self.url);
        let raw = transport.send(self.to_http_request()).map_err(|e| {
            log::warn!("{} {} failed: {e}", self.method, self.url);
            Error::transport(e)
        })?;
        log::debug!("{} {} -> {}", self.method, self.url, raw.status);
        Ok(Response::from_http(self, raw))
    }

    /// Execute and decode a 2xx JSON body in one step.
    pub fn execute_json<T, Tr>(&self, transport: &Tr) -> Result<T>
    where
        T: DeserializeOwned,
        Tr: Transport + ?Sized,
    {
        self.execute(transport)?.decode_json()
    }

    /// Execute and render the response with `Response::pretty_print`,
    /// whatever its status.
    pub fn execute_pretty<T>(&self, transport: &T) -> Result<String>
    where
        T: Transport + ?Sized,
    {
        Ok(self.execute(transport)?.pretty_print())
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Request {{")?;
        writeln!(f, "    method: {},", self.method)?;
        writeln!(f, "    url: {},", self.url)?;
        writeln!(f, "    headers: {{")?;
        for (k, v) in self.headers.iter() {
            writeln!(f, "        {k}: {v},")?;
        }
        writeln!(f, "    }},")?;
        match &self.body {
            Some(body) => writeln!(f, "    body: {} bytes ({}),", body.len(), body.content_type())?,
            None => writeln!(f, "    body: none,")?,
        }
        write!(f, "}}")
    }
}
