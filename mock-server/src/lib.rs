use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::Path,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// What the server saw, returned verbatim by `/echo`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/echo/{*rest}", any(echo))
        .route("/status/{code}", any(status))
        .route("/bytes/{len}", any(bytes))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Json<Echo> {
    let mut seen = BTreeMap::new();
    for (name, value) in headers.iter() {
        seen.entry(name.as_str().to_string())
            .or_insert_with(|| String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    Json(Echo {
        method: method.as_str().to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: seen,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

/// Answer with the status from the path, replaying the request body and
/// its content type.
async fn status(Path(code): Path<u16>, headers: HeaderMap, body: Bytes) -> Response {
    let Ok(status) = StatusCode::from_u16(code) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let mut response = (status, body).into_response();
    match headers.get(CONTENT_TYPE) {
        Some(content_type) => {
            response.headers_mut().insert(CONTENT_TYPE, content_type.clone());
        }
        None => {
            response.headers_mut().remove(CONTENT_TYPE);
        }
    }
    response
}

/// `len` bytes of `a`, served as octet-stream.
async fn bytes(Path(len): Path<usize>) -> Response {
    (
        [(CONTENT_TYPE, "application/octet-stream")],
        vec![b'a'; len],
    )
        .into_response()
}
