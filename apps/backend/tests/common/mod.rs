#![allow(dead_code)]

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Check that the trace_id in the body matches the x-trace-id header
pub fn assert_trace_id_matches(json: &Value, header_trace_id: &str) {
    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, header_trace_id,
        "trace_id in body should match x-trace-id header"
    );
}

/// Validate the problem-details body and the status-specific headers.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: Option<&str>,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("x-trace-id header should be present and valid UTF-8")
        .to_string();
    assert!(!trace_id.is_empty(), "x-trace-id header should not be empty");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    // 401 carries a Bearer challenge; nothing else does.
    let www_auth = headers
        .get("WWW-Authenticate")
        .and_then(|v| v.to_str().ok());
    if expected_status == 401 {
        assert_eq!(www_auth, Some("Bearer"));
    } else {
        assert!(
            www_auth.is_none(),
            "{expected_status} responses must not have WWW-Authenticate"
        );
    }

    let body = test::read_body(resp).await;
    let body_str = std::str::from_utf8(&body).expect("Response body should be valid UTF-8");
    let problem: Value = serde_json::from_str(body_str).unwrap_or_else(|_| {
        panic!("Failed to parse error body as ProblemDetails. Raw body: {body_str}")
    });

    for key in ["type", "title", "status", "detail", "code", "trace_id"] {
        assert!(problem.get(key).is_some(), "{key} field should be present");
    }

    assert_eq!(problem["code"], expected_code);
    assert_eq!(problem["status"], expected_status);
    if let Some(detail) = expected_detail {
        assert_eq!(problem["detail"], detail);
    }
    assert_trace_id_matches(&problem, &trace_id);

    let type_value = problem["type"].as_str().expect("type should be a string");
    assert_eq!(type_value, format!("https://goals.app/errors/{expected_code}"));
}
