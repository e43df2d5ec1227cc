//! The seam between request assembly and network I/O.
//!
//! # Design
//! The core never opens a connection. Anything that can turn an
//! `HttpRequest` into a fully drained `HttpResponse` is a `Transport`:
//! a real HTTP client, a test double, or a plain closure. Implementations
//! used from several threads at once must be safe to share themselves; the
//! core adds no synchronization.

use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    /// Connection-level failure, passed through to the caller unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute one request. Every status code is an `Ok`; `Err` means no
    /// response was received.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error>;
}

impl<F, E> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, E> {
        self(request)
    }
}
