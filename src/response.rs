//! Response assembly
//!
//! Drives a request through validation, classification and fact lookup and
//! produces the reply body. A request either ends `Rejected` (400, nothing
//! computed, no lookup made) or `Classified` (200, always carrying every
//! classification field). Lookup failures only ever change `fun_fact`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::classify::{Classification, Property};
use crate::config::ServerConfig;
use crate::facts::{FactOutcome, FactSource, DEFAULT_FACT_TIMEOUT};
use crate::validate::{parse_number, ValidationError};

pub const TIMEOUT_FACT: &str = "Fact request timed out";

pub const GENERIC_FACT_FAILURE: &str = "Could not retrieve fun fact";

/// Which placeholder replaces a fact the lookup could not deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Timeouts say so; other failures read like a missing fact
    #[default]
    DistinguishTimeout,
    /// Timeouts and transport failures share one generic message
    Generic,
}

/// Placeholder for numbers the service knows nothing about
pub fn missing_fact(number: i64) -> String {
    format!("No fun fact available for {number}")
}

/// Pure: Turn a lookup outcome into the `fun_fact` text
pub fn resolve_fun_fact(number: i64, outcome: FactOutcome, policy: FallbackPolicy) -> String {
    match (outcome, policy) {
        (FactOutcome::Found(text), _) if !text.trim().is_empty() => text,
        (FactOutcome::Found(_), _) | (FactOutcome::NotFound, _) => missing_fact(number),
        (FactOutcome::Timeout, FallbackPolicy::DistinguishTimeout) => TIMEOUT_FACT.to_string(),
        (FactOutcome::Failed(_), FallbackPolicy::DistinguishTimeout) => missing_fact(number),
        (FactOutcome::Timeout | FactOutcome::Failed(_), FallbackPolicy::Generic) => {
            GENERIC_FACT_FAILURE.to_string()
        }
    }
}

/// Body of a successful classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub number: i64,
    pub is_prime: bool,
    pub is_perfect: bool,
    pub properties: Vec<Property>,
    pub digit_sum: u64,
    pub fun_fact: String,
}

impl ClassificationResult {
    pub fn new(classification: Classification, fun_fact: String) -> Self {
        Self {
            number: classification.number,
            is_prime: classification.is_prime,
            is_perfect: classification.is_perfect,
            properties: classification.properties,
            digit_sum: classification.digit_sum,
            fun_fact,
        }
    }
}

/// Body of a rejected request; `number` echoes the raw input or is `null`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub number: Option<String>,
    pub error: bool,
}

impl From<&ValidationError> for ErrorResult {
    fn from(error: &ValidationError) -> Self {
        Self {
            number: error.raw().map(str::to_string),
            error: true,
        }
    }
}

/// Terminal state of a classification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyReply {
    Rejected(ErrorResult),
    Classified(ClassificationResult),
}

impl ClassifyReply {
    pub fn status(&self) -> StatusCode {
        match self {
            ClassifyReply::Rejected(_) => StatusCode::BAD_REQUEST,
            ClassifyReply::Classified(_) => StatusCode::OK,
        }
    }
}

impl IntoResponse for ClassifyReply {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ClassifyReply::Rejected(body) => (status, Json(body)).into_response(),
            ClassifyReply::Classified(body) => (status, Json(body)).into_response(),
        }
    }
}

/// Classifies numbers and decorates them with a fun fact
#[derive(Clone)]
pub struct NumberClassifier {
    facts: Arc<dyn FactSource>,
    fact_timeout: Duration,
    fallback_policy: FallbackPolicy,
}

impl NumberClassifier {
    pub fn new(facts: Arc<dyn FactSource>) -> Self {
        Self {
            facts,
            fact_timeout: DEFAULT_FACT_TIMEOUT,
            fallback_policy: FallbackPolicy::default(),
        }
    }

    /// Create a classifier using the lookup settings from `config`
    pub fn from_config(config: &ServerConfig, facts: Arc<dyn FactSource>) -> Self {
        Self::new(facts)
            .with_fact_timeout(config.fact_timeout)
            .with_fallback_policy(config.fallback_policy)
    }

    pub fn with_fact_timeout(mut self, timeout: Duration) -> Self {
        self.fact_timeout = timeout;
        self
    }

    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback_policy = policy;
        self
    }

    /// Run a raw `number` query value through the whole request lifecycle
    pub async fn classify_query(&self, raw: Option<&str>) -> ClassifyReply {
        match parse_number(raw) {
            Ok(number) => ClassifyReply::Classified(self.classify(number).await),
            Err(e) => {
                debug!("Rejected classification request [E{:04}]: {}", e.code(), e);
                ClassifyReply::Rejected(ErrorResult::from(&e))
            }
        }
    }

    /// Classify an already validated number
    pub async fn classify(&self, number: i64) -> ClassificationResult {
        // trial division near 2^53 takes tens of millions of steps
        let arithmetic = tokio::task::spawn_blocking(move || Classification::of(number));
        let lookup = self.facts.fetch_fact(number, self.fact_timeout);
        let (classification, outcome) = tokio::join!(arithmetic, lookup);

        let classification = match classification {
            Ok(classification) => classification,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!("Blocking classification for {} was cancelled: {}", number, e);
                Classification::of(number)
            }
        };

        let fun_fact = resolve_fun_fact(number, outcome, self.fallback_policy);
        ClassificationResult::new(classification, fun_fact)
    }
}
