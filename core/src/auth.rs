//! Authorization headers for outgoing requests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::header::Header;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const AUTHORIZATION: &str = "Authorization";

/// How a request proves who is calling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Auth {
    /// `Authorization: Bearer <token>`
    Bearer { token: String },

    /// `Authorization: Basic <base64(username:password)>`
    Basic { username: String, password: String },

    /// `<header>: <key>`
    ApiKey { header: String, key: String },
}

impl Auth {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn api_key(header: impl Into<String>, key: impl Into<String>) -> Self {
        Self::ApiKey {
            header: header.into(),
            key: key.into(),
        }
    }

    /// Name of the header this scheme writes.
    pub fn header_name(&self) -> &str {
        match self {
            Auth::Bearer { .. } | Auth::Basic { .. } => AUTHORIZATION,
            Auth::ApiKey { header, .. } => header.as_str(),
        }
    }

    pub fn header_value(&self) -> String {
        match self {
            Auth::Bearer { token } => build_auth_header("Bearer", token),
            Auth::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{username}:{password}"));
                build_auth_header("Basic", &credentials)
            }
            Auth::ApiKey { key, .. } => key.clone(),
        }
    }

    /// Write this scheme's header, replacing any previous value under the
    /// same name in any casing.
    pub fn set_auth(&self, headers: &mut Header) {
        headers.set(self.header_name(), self.header_value());
    }
}

/// `"<scheme> <credentials>"`, for callers assembling a header by hand.
pub fn build_auth_header(scheme: &str, credentials: &str) -> String {
    format!("{scheme} {credentials}")
}

/// A transport that authenticates every request before passing it on.
#[derive(Debug, Clone)]
pub struct AuthenticatedTransport<T> {
    inner: T,
    auth: Auth,
}

impl<T: Transport> AuthenticatedTransport<T> {
    pub fn new(inner: T, auth: Auth) -> Self {
        Self { inner, auth }
    }

    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for AuthenticatedTransport<T> {
    type Error = T::Error;

    fn send(&self, mut request: HttpRequest) -> Result<HttpResponse, T::Error> {
        request.set_header(self.auth.header_name(), &self.auth.header_value());
        self.inner.send(request)
    }
}
