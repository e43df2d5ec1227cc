//! Fluent accumulation of request fragments.
//!
//! # Design
//! `RequestBuilder` is a plain mutable draft. Every `with_*` method records
//! a fragment and returns the builder; nothing is checked until `build`,
//! which validates the whole draft at once and freezes it into a `Request`.
//! `build` borrows the draft, so the same builder can produce any number of
//! independent, structurally equal requests.

use serde::Serialize;

use crate::body::{Body, Payload};
use crate::error::{Error, Result, ValidationError};
use crate::header::Header;
use crate::http::HttpMethod;
use crate::query::Query;
use crate::request::Request;

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    method: String,
    base_url: String,
    path: String,
    headers: Header,
    query: Query,
    body: Option<PendingBody>,
}

/// A body fragment. Serialization failures from `with_json` are held here
/// and reported by `build`.
#[derive(Debug, Clone)]
enum PendingBody {
    Ready(Payload),
    Unserializable(String),
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the method verbatim; it is validated by `build`.
    pub fn with_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    /// Base URL such as `https://api.example.com`.
    pub fn with_base_url(&mut self, base_url: impl Into<String>) -> &mut Self {
        self.base_url = base_url.into();
        self
    }

    /// Path such as `/v1/items`, appended to the base URL as-is.
    pub fn with_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.path = path.into();
        self
    }

    /// Merge headers into the draft. Later values win; keys are never removed.
    pub fn with_header<I, K, V>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.merge(headers);
        self
    }

    /// Merge query parameters into the draft. Later values win.
    pub fn with_query_param<I, K, V>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query.merge(params);
        self
    }

    /// Set the payload, replacing any previous one.
    pub fn with_body(&mut self, payload: impl Into<Payload>) -> &mut Self {
        self.body = Some(PendingBody::Ready(payload.into()));
        self
    }

    /// Set a JSON payload from any serializable value, replacing any previous one.
    pub fn with_json<T: Serialize + ?Sized>(&mut self, value: &T) -> &mut Self {
        self.body = Some(match serde_json::to_value(value) {
            Ok(json) => PendingBody::Ready(Payload::Json(json)),
            Err(e) => PendingBody::Unserializable(e.to_string()),
        });
        self
    }

    /// Validate the draft and freeze it into a `Request`.
    pub fn build(&self) -> Result<Request> {
        let method = self.validate()?;

        let url = format!("{}{}{}", self.base_url, self.path, self.query.to_query_string());
        let mut headers = self.headers.without_empty();

        let body = match &self.body {
            None => None,
            Some(PendingBody::Ready(payload)) => Some(Body::from_payload(payload.clone())?),
            Some(PendingBody::Unserializable(msg)) => {
                return Err(Error::Serialization(serde::ser::Error::custom(msg)));
            }
        };
        if let Some(body) = &body {
            headers.set_content_type(body.content_type());
        }

        log::debug!("built request {method} {url}");
        Ok(Request::from_parts(method, url, headers, body))
    }

    fn validate(&self) -> Result<HttpMethod, ValidationError> {
        let method: HttpMethod = self.method.parse()?;
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingBaseUrl);
        }
        if self.body.is_some() && !method.allows_body() {
            return Err(ValidationError::BodyNotAllowed(method));
        }
        Ok(method)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use serde::ser::{Serialize, Serializer};

    use super::*;
    use crate::content_type::ContentType;

    fn get(path: &str) -> RequestBuilder {
        let mut b = RequestBuilder::new();
        b.with_method("GET").with_base_url("https://api.example.com").with_path(path);
        b
    }

    #[test]
    fn composes_base_path_and_query() {
        let req = get("/v1/items").with_query_param([("q", "x")]).build().unwrap();
        assert_eq!(req.url(), "https://api.example.com/v1/items?q=x");
        assert_eq!(req.method(), HttpMethod::Get);
        assert!(req.body().is_none());
    }

    #[test]
    fn slashes_are_not_normalized() {
        let req = RequestBuilder::new()
            .with_method("GET")
            .with_base_url("https://api.example.com/")
            .with_path("/items")
            .build()
            .unwrap();
        assert_eq!(req.url(), "https://api.example.com//items");
    }

    #[test]
    fn missing_path_uses_base_url_alone() {
        let req = get("").build().unwrap();
        assert_eq!(req.url(), "https://api.example.com");
    }

    #[test]
    fn empty_query_values_are_dropped() {
        let req = get("/search")
            .with_query_param([("q", "rust"), ("page", "")])
            .build()
            .unwrap();
        assert_eq!(req.url(), "https://api.example.com/search?q=rust");
    }

    #[test]
    fn only_empty_query_values_add_no_question_mark() {
        let req = get("/search").with_query_param([("page", "")]).build().unwrap();
        assert_eq!(req.url(), "https://api.example.com/search");
    }

    #[test]
    fn empty_header_values_are_dropped() {
        let req = get("/")
            .with_header([("X-Trace", ""), ("Accept", "application/json")])
            .build()
            .unwrap();
        assert_eq!(req.headers().len(), 1);
        assert!(!req.headers().contains_key("X-Trace"));
        assert_eq!(req.headers().get("Accept"), Some("application/json"));
    }

    #[test]
    fn later_header_merges_overwrite_earlier_ones() {
        let mut first = HashMap::new();
        first.insert("X-Version", "1");
        first.insert("X-Keep", "kept");
        let req = get("/")
            .with_header(first)
            .with_header(BTreeMap::from([("X-Version", "2")]))
            .build()
            .unwrap();
        assert_eq!(req.headers().get("X-Version"), Some("2"));
        assert_eq!(req.headers().get("X-Keep"), Some("kept"));
    }

    #[test]
    fn header_casing_is_preserved() {
        let req = get("/").with_header([("x-lower", "1")]).build().unwrap();
        assert_eq!(req.headers().iter().next(), Some(("x-lower", "1")));
    }

    #[test]
    fn missing_method_fails() {
        let err = RequestBuilder::new()
            .with_base_url("https://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingMethod)));
    }

    #[test]
    fn unknown_method_fails() {
        let err = RequestBuilder::new()
            .with_method("FETCH")
            .with_base_url("https://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::InvalidMethod(m)) if m == "FETCH"));
    }

    #[test]
    fn missing_base_url_fails() {
        let err = RequestBuilder::new().with_method("GET").with_path("/x").build().unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingBaseUrl)));
    }

    #[test]
    fn body_on_get_or_head_fails() {
        for method in ["GET", "HEAD"] {
            for payload in [Payload::from("x"), Payload::from(vec![1u8]), Payload::from(serde_json::json!({"a": 1}))] {
                let err = RequestBuilder::new()
                    .with_method(method)
                    .with_base_url("https://api.example.com")
                    .with_body(payload)
                    .build()
                    .unwrap_err();
                assert!(
                    matches!(err, Error::Validation(ValidationError::BodyNotAllowed(_))),
                    "{method}: {err}"
                );
            }
        }
    }

    #[test]
    fn body_is_allowed_for_other_methods() {
        for method in ["POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            let req = RequestBuilder::new()
                .with_method(method)
                .with_base_url("https://api.example.com")
                .with_body("payload")
                .build()
                .unwrap();
            assert_eq!(req.body().unwrap().data(), b"payload", "{method}");
        }
    }

    #[test]
    fn json_body_overrides_caller_content_type() {
        let req = RequestBuilder::new()
            .with_method("POST")
            .with_base_url("https://api.example.com")
            .with_header([("content-type", "text/xml"), ("Content-Type", "text/html")])
            .with_json(&serde_json::json!({"name": "widget"}))
            .build()
            .unwrap();
        assert_eq!(req.headers().content_type(), ContentType::Json);
        assert_eq!(req.headers().get("Content-Type"), Some("application/json"));
        assert_eq!(req.headers().len(), 1);
    }

    #[test]
    fn content_type_follows_payload_shape() {
        let cases = [
            (Payload::from("text"), ContentType::Text),
            (Payload::from(b"raw".as_slice()), ContentType::OctetStream),
            (Payload::from(serde_json::json!([1, 2])), ContentType::Json),
        ];
        for (payload, expected) in cases {
            let req = RequestBuilder::new()
                .with_method("PUT")
                .with_base_url("https://api.example.com")
                .with_body(payload)
                .build()
                .unwrap();
            assert_eq!(req.headers().content_type(), expected);
            assert_eq!(req.body().unwrap().content_type(), &expected);
        }
    }

    #[test]
    fn second_body_replaces_first() {
        let req = RequestBuilder::new()
            .with_method("POST")
            .with_base_url("https://api.example.com")
            .with_body("first")
            .with_body(vec![2u8, 3])
            .build()
            .unwrap();
        assert_eq!(req.body().unwrap().data(), &[2, 3]);
        assert_eq!(req.headers().content_type(), ContentType::OctetStream);
    }

    #[test]
    fn building_twice_yields_equal_independent_requests() {
        let mut builder = get("/items");
        builder.with_header([("Accept", "*/*")]);
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a, b);

        builder.with_header([("Accept", "text/plain")]);
        let c = builder.build().unwrap();
        assert_eq!(a.headers().get("Accept"), Some("*/*"));
        assert_eq!(c.headers().get("Accept"), Some("text/plain"));
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot serialize"))
        }
    }

    #[test]
    fn serialization_failure_is_reported_by_build() {
        let err = RequestBuilder::new()
            .with_method("POST")
            .with_base_url("https://api.example.com")
            .with_json(&Unserializable)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("cannot serialize"));
    }

    #[test]
    fn validation_runs_before_serialization() {
        let err = RequestBuilder::new()
            .with_method("GET")
            .with_base_url("https://api.example.com")
            .with_json(&Unserializable)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::BodyNotAllowed(HttpMethod::Get))));
    }
}
