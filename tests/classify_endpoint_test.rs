//! Integration tests for GET /api/classify-number

mod common;

use anyhow::Result;
use axum::http::{header, Request, StatusCode};
use common::{get, router_with};
use number_classifier::facts::FactOutcome;
use number_classifier::testing::MockFactSource;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[tokio::test]
async fn test_classifies_four_with_fact() -> Result<()> {
    let facts = Arc::new(
        MockFactSource::builder()
            .with_fact(4, "4 is the number of...")
            .build(),
    );

    let response = get(router_with(facts), "/api/classify-number?number=4").await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text(),
        r#"{"number":4,"is_prime":false,"is_perfect":false,"properties":["even"],"digit_sum":4,"fun_fact":"4 is the number of..."}"#
    );
    Ok(())
}

#[tokio::test]
async fn test_timeout_still_returns_classification() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::Timeout));

    let response = get(router_with(facts), "/api/classify-number?number=371").await?;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json()?,
        json!({
            "number": 371,
            "is_prime": false,
            "is_perfect": false,
            "properties": ["armstrong", "odd"],
            "digit_sum": 11,
            "fun_fact": "Fact request timed out"
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_lookup_failures_never_change_status() -> Result<()> {
    let cases = [
        (FactOutcome::NotFound, "No fun fact available for 28"),
        (
            FactOutcome::Failed("connection refused".to_string()),
            "No fun fact available for 28",
        ),
        (FactOutcome::Found(String::new()), "No fun fact available for 28"),
        (FactOutcome::Timeout, "Fact request timed out"),
    ];

    for (outcome, expected) in cases {
        let facts = Arc::new(MockFactSource::always(outcome.clone()));
        let response = get(router_with(facts), "/api/classify-number?number=28").await?;

        assert_eq!(response.status, StatusCode::OK, "outcome {outcome:?}");
        let body = response.json()?;
        assert_eq!(body["is_perfect"], json!(true));
        assert_eq!(body["fun_fact"], json!(expected), "outcome {outcome:?}");
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_input_is_rejected() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::Found("x".into())));

    let response = get(router_with(facts.clone()), "/api/classify-number?number=abc").await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()?, json!({"number": "abc", "error": true}));
    assert_eq!(facts.get_call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_malformed_numbers_are_rejected() -> Result<()> {
    // percent-encoded forms of "1.5", "1e3", " 7", "+7" and ""
    let cases = [
        ("1.5", "1.5"),
        ("1e3", "1e3"),
        ("%207", " 7"),
        ("%2B7", "+7"),
        ("", ""),
    ];

    for (encoded, raw) in cases {
        let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));
        let uri = format!("/api/classify-number?number={encoded}");
        let response = get(router_with(facts), &uri).await?;

        assert_eq!(response.status, StatusCode::BAD_REQUEST, "input {raw:?}");
        assert_eq!(response.json()?, json!({"number": raw, "error": true}));
    }
    Ok(())
}

#[tokio::test]
async fn test_missing_parameter_echoes_null() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));

    for uri in ["/api/classify-number", "/api/classify-number?other=5"] {
        let response = get(router_with(facts.clone()), uri).await?;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()?, json!({"number": null, "error": true}));
    }
    Ok(())
}

#[tokio::test]
async fn test_repeated_parameter_uses_first_value() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));

    let response = get(
        router_with(facts.clone()),
        "/api/classify-number?number=4&number=5",
    )
    .await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()?["number"], json!(4));

    let response = get(
        router_with(facts.clone()),
        "/api/classify-number?number=abc&number=5",
    )
    .await?;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()?, json!({"number": "abc", "error": true}));

    let looked_up: Vec<i64> = facts.calls().into_iter().map(|(n, _)| n).collect();
    assert_eq!(looked_up, vec![4]);
    Ok(())
}

#[tokio::test]
async fn test_unsafe_integer_is_rejected() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));

    let response = get(
        router_with(facts),
        "/api/classify-number?number=9007199254740992",
    )
    .await?;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json()?,
        json!({"number": "9007199254740992", "error": true})
    );
    Ok(())
}

#[tokio::test]
async fn test_negative_and_zero_pass_through() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));

    let response = get(router_with(facts.clone()), "/api/classify-number?number=-153").await?;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json()?,
        json!({
            "number": -153,
            "is_prime": false,
            "is_perfect": false,
            "properties": ["odd"],
            "digit_sum": 9,
            "fun_fact": "No fun fact available for -153"
        })
    );

    let response = get(router_with(facts), "/api/classify-number?number=0").await?;
    let body = response.json()?;
    assert_eq!(body["number"], json!(0));
    assert_eq!(body["properties"], json!(["armstrong", "even"]));
    assert_eq!(body["digit_sum"], json!(0));
    Ok(())
}

#[tokio::test]
async fn test_repeated_requests_are_identical() -> Result<()> {
    let facts = Arc::new(
        MockFactSource::builder()
            .with_fact(9474, "9474 is a narcissistic number.")
            .build(),
    );
    let router = router_with(facts.clone());

    let first = get(router.clone(), "/api/classify-number?number=9474").await?;
    let second = get(router, "/api/classify-number?number=9474").await?;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
    assert_eq!(facts.get_call_count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_cors_allows_any_origin() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));
    let request = Request::builder()
        .uri("/api/classify-number?number=7")
        .header(header::ORIGIN, "https://example.com")
        .body(axum::body::Body::empty())?;

    let response = router_with(facts).oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_route_is_not_found() -> Result<()> {
    let facts = Arc::new(MockFactSource::always(FactOutcome::NotFound));

    let response = get(router_with(facts), "/api/classify?number=4").await?;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    Ok(())
}
