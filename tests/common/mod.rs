//! Common test utilities and helpers

#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body, Bytes},
    http::{Request, StatusCode},
    Router,
};
use number_classifier::{
    api_server::ClassifierApiServer, config::ServerConfig, response::NumberClassifier,
    testing::MockFactSource,
};
use std::sync::Arc;
use tower::ServiceExt;

/// Build the application router around a mock fact source
pub fn router_with(facts: Arc<MockFactSource>) -> Router {
    let addr = ServerConfig::default().bind_address();
    ClassifierApiServer::new(NumberClassifier::new(facts), addr).build_router()
}

/// Response captured from a single request
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Send a GET request through the router without binding a socket
pub async fn get(router: Router, uri: &str) -> Result<TestResponse> {
    let request = Request::builder().uri(uri).body(Body::empty())?;
    let response = router.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(TestResponse { status, body })
}
