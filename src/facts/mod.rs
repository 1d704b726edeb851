//! Fun fact lookup
//!
//! Provides a trait-based abstraction over the third-party trivia service so
//! the response assembler can be exercised without network access. Lookups
//! never fail with an error: every way a lookup can go wrong is a
//! [`FactOutcome`] variant the caller degrades gracefully from.

use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

pub mod numbers_api;

pub use numbers_api::{NumbersApiClient, DEFAULT_BASE_URL, DEFAULT_FACT_TIMEOUT};

/// Result of a single fact lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FactOutcome {
    /// The service answered with a fact (possibly empty)
    Found(String),
    /// The service has no fact for this number
    NotFound,
    /// No complete answer arrived within the timeout
    Timeout,
    /// Transport, status or decoding failure
    Failed(String),
}

impl fmt::Display for FactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactOutcome::Found(text) => write!(f, "found ({} bytes)", text.len()),
            FactOutcome::NotFound => f.write_str("not found"),
            FactOutcome::Timeout => f.write_str("timed out"),
            FactOutcome::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Source of trivia facts about integers
///
/// Implementations must honour `timeout` themselves and report expiry as
/// [`FactOutcome::Timeout`]. No retries are expected.
#[async_trait]
pub trait FactSource: Send + Sync {
    async fn fetch_fact(&self, number: i64, timeout: Duration) -> FactOutcome;
}
