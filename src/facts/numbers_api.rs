//! Numbers API client
//!
//! Fetches math facts from `GET {base_url}/{number}/math`. The service answers
//! with plain text by default and with `{"text": ..., "found": ...}` when asked
//! for JSON, so both bodies are understood.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{FactOutcome, FactSource};
use crate::error::{ClassifierError, ErrorCode, Result};

pub const DEFAULT_BASE_URL: &str = "http://numbersapi.com";

pub const DEFAULT_FACT_TIMEOUT: Duration = Duration::from_millis(500);

/// reqwest-backed [`FactSource`]
#[derive(Debug, Clone)]
pub struct NumbersApiClient {
    client: Client,
    base_url: String,
}

impl NumbersApiClient {
    /// Create a client for the given service root
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("number-classifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ClassifierError::server_with_code(
                    ErrorCode::SERVER_HTTP_CLIENT,
                    format!("Failed to create HTTP client: {e}"),
                )
                .with_source(e)
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn fact_url(&self, number: i64) -> String {
        format!("{}/{}/math", self.base_url, number)
    }

    /// Make a single lookup; the caller bounds total time
    async fn request_fact(&self, url: &str, timeout: Duration) -> FactOutcome {
        let response = match self
            .client
            .get(url)
            .header(header::ACCEPT, "text/plain, application/json")
            .timeout(timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return transport_failure(e),
        };

        match response.status() {
            StatusCode::NOT_FOUND => return FactOutcome::NotFound,
            status if !status.is_success() => {
                return FactOutcome::Failed(format!("HTTP status {status}"));
            }
            _ => {}
        }

        match response.text().await {
            Ok(body) => parse_fact_body(&body),
            Err(e) => transport_failure(e),
        }
    }
}

#[async_trait]
impl FactSource for NumbersApiClient {
    async fn fetch_fact(&self, number: i64, timeout: Duration) -> FactOutcome {
        let url = self.fact_url(number);
        debug!("Requesting fun fact from {}", url);

        // reqwest's timeout does not cover a body that trickles in slowly
        let outcome = match tokio::time::timeout(timeout, self.request_fact(&url, timeout)).await
        {
            Ok(outcome) => outcome,
            Err(_) => FactOutcome::Timeout,
        };

        match &outcome {
            FactOutcome::Found(_) | FactOutcome::NotFound => {
                debug!("Fact lookup for {} {}", number, outcome)
            }
            FactOutcome::Timeout | FactOutcome::Failed(_) => {
                warn!("Fact lookup for {} {}", number, outcome)
            }
        }
        outcome
    }
}

#[derive(Debug, Deserialize)]
struct StructuredFact {
    text: Option<String>,
    #[serde(default = "default_found")]
    found: bool,
}

fn default_found() -> bool {
    true
}

/// Pure: Interpret a response body in either supported format
///
/// Fact text is returned verbatim; blank facts are handled by the response layer.
fn parse_fact_body(body: &str) -> FactOutcome {
    if let Ok(fact) = serde_json::from_str::<StructuredFact>(body) {
        return match fact.text {
            Some(text) if fact.found => FactOutcome::Found(text),
            _ => FactOutcome::NotFound,
        };
    }
    FactOutcome::Found(body.to_string())
}

fn transport_failure(error: reqwest::Error) -> FactOutcome {
    if error.is_timeout() {
        FactOutcome::Timeout
    } else {
        FactOutcome::Failed(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text_body() {
        assert_eq!(
            parse_fact_body("4 is the number of ..."),
            FactOutcome::Found("4 is the number of ...".to_string())
        );
    }

    #[test]
    fn test_fact_text_is_kept_verbatim() {
        assert_eq!(
            parse_fact_body("  4 is the number of ...\n"),
            FactOutcome::Found("  4 is the number of ...\n".to_string())
        );
        let body = r#"{"text": " 6 is perfect. ", "found": true}"#;
        assert_eq!(
            parse_fact_body(body),
            FactOutcome::Found(" 6 is perfect. ".to_string())
        );
    }

    #[test]
    fn test_parse_bare_number_body_as_text() {
        // valid JSON, but not the structured format
        assert_eq!(parse_fact_body("42"), FactOutcome::Found("42".to_string()));
    }

    #[test]
    fn test_parse_structured_body() {
        let body = r#"{"text": "6 is the smallest perfect number.", "number": 6, "found": true, "type": "math"}"#;
        assert_eq!(
            parse_fact_body(body),
            FactOutcome::Found("6 is the smallest perfect number.".to_string())
        );
    }

    #[test]
    fn test_parse_structured_not_found() {
        let body = r#"{"text": "31337 is an uninteresting number.", "found": false}"#;
        assert_eq!(parse_fact_body(body), FactOutcome::NotFound);
        assert_eq!(parse_fact_body("{}"), FactOutcome::NotFound);
    }

    #[test]
    fn test_empty_body_is_an_empty_fact() {
        assert_eq!(parse_fact_body(""), FactOutcome::Found(String::new()));
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = NumbersApiClient::new("http://localhost:9999/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:9999");
        assert_eq!(client.fact_url(-7), "http://localhost:9999/-7/math");
    }
}
