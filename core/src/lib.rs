//! Declarative HTTP request assembly and response interpretation.
//!
//! # Overview
//! A `RequestBuilder` accumulates fragments (method, base URL, path, headers,
//! query parameters, body) and `build` validates and freezes them into an
//! immutable `Request`. Executing a request hands a plain-data `HttpRequest`
//! to a `Transport` and wraps the drained result in a `Response`, which
//! classifies the status and decodes bodies.
//!
//! # Design
//! - The core performs no I/O of its own. `Transport` is the only seam to
//!   the network; `UreqTransport` (feature `ureq`, on by default) is a
//!   ready-made blocking implementation.
//! - A `Request` owns no transport handle and can be executed repeatedly
//!   and concurrently. A `Response` borrows its `Request` for diagnostics.
//! - Validation happens once, in `build`, before anything touches the
//!   network.
//!
//! ```no_run
//! # fn main() -> restkit::Result<()> {
//! use restkit::{Auth, Request, UreqTransport};
//!
//! let request = Request::builder()
//!     .with_method("GET")
//!     .with_base_url("https://api.example.com")
//!     .with_path("/v1/items")
//!     .with_query_param([("q", "x")])
//!     .build()?
//!     .with_auth(&Auth::bearer("token"));
//!
//! let response = request.execute(&UreqTransport::new())?;
//! response.check_error()?;
//! let items: Vec<String> = response.decode_json()?;
//! println!("{} items", items.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod body;
pub mod builder;
pub mod content_type;
pub mod error;
pub mod header;
pub mod http;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;
#[cfg(feature = "ureq")]
pub mod ureq_transport;

pub use auth::{build_auth_header, Auth, AuthenticatedTransport};
pub use body::{Body, Payload};
pub use builder::RequestBuilder;
pub use content_type::ContentType;
pub use error::{ApiError, DecodeError, Error, Result, ValidationError};
pub use header::Header;
pub use self::http::{HttpMethod, HttpRequest, HttpResponse};
pub use query::Query;
pub use request::Request;
pub use response::{Response, StatusCategory};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;
