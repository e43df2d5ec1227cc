//! Verify building and response interpretation against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each build case describes builder fragments and either the expected
//! request or the expected validation failure. Each response case describes
//! a simulated transport response and how it must be classified, decoded and
//! checked. JSON bodies are compared as parsed values so field order does
//! not matter.

use std::collections::BTreeMap;

use restkit::{
    Error, HttpMethod, HttpResponse, Payload, Request, RequestBuilder, Response, ValidationError,
};
use serde_json::Value;

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    s.parse().unwrap_or_else(|_| panic!("unknown method: {s}"))
}

fn string_map(value: &Value) -> BTreeMap<String, String> {
    value
        .as_object()
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap().to_string()))
                .collect()
        })
        .unwrap_or_default()
}

fn payload(spec: &Value) -> Payload {
    let value = &spec["value"];
    match spec["kind"].as_str().unwrap() {
        "text" => Payload::Text(value.as_str().unwrap().to_string()),
        "bytes" => Payload::Bytes(
            value
                .as_array()
                .unwrap()
                .iter()
                .map(|b| b.as_u64().unwrap() as u8)
                .collect(),
        ),
        "json" => Payload::Json(value.clone()),
        other => panic!("unknown body kind: {other}"),
    }
}

fn builder_from(input: &Value) -> RequestBuilder {
    let mut builder = RequestBuilder::new();
    builder
        .with_method(input["method"].as_str().unwrap_or_default())
        .with_base_url(input["base_url"].as_str().unwrap_or_default())
        .with_path(input["path"].as_str().unwrap_or_default())
        .with_header(string_map(&input["headers"]))
        .with_query_param(string_map(&input["query"]));
    if !input["body"].is_null() {
        builder.with_body(payload(&input["body"]));
    }
    builder
}

fn assert_body(name: &str, request: &Request, expected: &Value) {
    if expected.is_null() {
        assert!(request.body().is_none(), "{name}: body should be None");
        return;
    }
    let data = request.body().unwrap().data();
    match expected["kind"].as_str().unwrap() {
        "json" => {
            let sent: Value = serde_json::from_slice(data).unwrap();
            assert_eq!(sent, expected["value"], "{name}: body");
        }
        _ => match payload(expected) {
            Payload::Text(text) => assert_eq!(data, text.as_bytes(), "{name}: body"),
            Payload::Bytes(bytes) => assert_eq!(data, bytes.as_slice(), "{name}: body"),
            Payload::Json(_) => unreachable!(),
        },
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let raw = include_str!("../../test-vectors/build.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let result = builder_from(&case["input"]).build();

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            let validation = match err {
                Error::Validation(validation) => validation,
                other => panic!("{name}: expected validation error, got {other:?}"),
            };
            let matched = match expected_error.as_str().unwrap() {
                "MissingMethod" => matches!(validation, ValidationError::MissingMethod),
                "InvalidMethod" => matches!(validation, ValidationError::InvalidMethod(_)),
                "MissingBaseUrl" => matches!(validation, ValidationError::MissingBaseUrl),
                "BodyNotAllowed" => matches!(validation, ValidationError::BodyNotAllowed(_)),
                other => panic!("{name}: unknown expected_error: {other}"),
            };
            assert!(matched, "{name}: got {validation:?}");
            continue;
        }

        let req = result.unwrap_or_else(|e| panic!("{name}: build failed: {e}"));
        let expected = &case["expected_request"];
        assert_eq!(req.method(), parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url(), expected["url"].as_str().unwrap(), "{name}: url");

        let headers: BTreeMap<String, String> = req
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(headers, string_map(&expected["headers"]), "{name}: headers");

        assert_body(name, &req, &expected["body"]);
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/response.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let request = Request::builder()
        .with_method("GET")
        .with_base_url("http://localhost:3000")
        .build()
        .unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let sim = &case["simulated_response"];
        let expected = &case["expected"];

        let mut headers = Vec::new();
        if let Some(ct) = sim["content_type"].as_str() {
            headers.push(("Content-Type".to_string(), ct.to_string()));
        }
        let response = Response::from_http(
            &request,
            HttpResponse {
                status: sim["status"].as_u64().unwrap() as u16,
                headers,
                body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
            },
        );

        // Classification
        let class = [
            response.is_success(),
            response.is_client_error(),
            response.is_server_error(),
        ];
        let expected_class = match expected["class"].as_str().unwrap() {
            "success" => [true, false, false],
            "client_error" => [false, true, false],
            "server_error" => [false, false, true],
            "none" => [false, false, false],
            other => panic!("{name}: unknown class: {other}"),
        };
        assert_eq!(class, expected_class, "{name}: class");

        // Decode
        let decoded = response.decode_json::<Value>();
        match expected["decode"].as_str().unwrap() {
            "ok" => assert_eq!(decoded.unwrap(), expected["decoded"], "{name}: decoded"),
            kind => {
                let err = decoded.unwrap_err();
                let ok = match kind {
                    "NotSuccess" => matches!(err, Error::Decode(restkit::DecodeError::NotSuccess(_))),
                    "EmptyBody" => matches!(err, Error::Decode(restkit::DecodeError::EmptyBody)),
                    "Json" => matches!(err, Error::Decode(restkit::DecodeError::Json(_))),
                    other => panic!("{name}: unknown decode outcome: {other}"),
                };
                assert!(ok, "{name}: expected {kind}, got {err:?}");
            }
        }

        // Check error
        let checked = response.check_error();
        match expected["check_error"].as_str().unwrap() {
            "ok" => assert!(checked.is_ok(), "{name}: check_error should pass"),
            "Api" => match checked.unwrap_err() {
                Error::Api(api) => {
                    let api_json = serde_json::to_value(&api).unwrap();
                    assert_eq!(api_json, expected["api"], "{name}: api error");
                }
                other => panic!("{name}: expected API error, got {other:?}"),
            },
            "Http" => match checked.unwrap_err() {
                Error::Http { status, body } => {
                    assert_eq!(status, response.status_code(), "{name}: status");
                    assert_eq!(body, expected["error_body"].as_str().unwrap(), "{name}: body");
                }
                other => panic!("{name}: expected generic HTTP error, got {other:?}"),
            },
            other => panic!("{name}: unknown check_error outcome: {other}"),
        }
    }
}
