use crate::facts::{FactOutcome, FactSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Builder for creating configured MockFactSource instances
pub struct MockFactSourceBuilder {
    outcomes: HashMap<i64, FactOutcome>,
    default_outcome: FactOutcome,
    delay: Option<Duration>,
}

impl MockFactSourceBuilder {
    pub fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            default_outcome: FactOutcome::NotFound,
            delay: None,
        }
    }

    /// Answer lookups for `number` with `outcome`
    pub fn with_outcome(mut self, number: i64, outcome: FactOutcome) -> Self {
        self.outcomes.insert(number, outcome);
        self
    }

    /// Answer lookups for `number` with a fact
    pub fn with_fact(self, number: i64, text: impl Into<String>) -> Self {
        self.with_outcome(number, FactOutcome::Found(text.into()))
    }

    pub fn with_default(mut self, outcome: FactOutcome) -> Self {
        self.default_outcome = outcome;
        self
    }

    /// Simulate a slow service; delays past the timeout report `Timeout`
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn build(self) -> MockFactSource {
        MockFactSource {
            outcomes: self.outcomes,
            default_outcome: self.default_outcome,
            delay: self.delay,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for MockFactSourceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock implementation of FactSource for testing
pub struct MockFactSource {
    outcomes: HashMap<i64, FactOutcome>,
    default_outcome: FactOutcome,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<(i64, Duration)>>>,
}

impl MockFactSource {
    pub fn builder() -> MockFactSourceBuilder {
        MockFactSourceBuilder::new()
    }

    /// Every lookup returns `outcome`
    pub fn always(outcome: FactOutcome) -> Self {
        Self::builder().with_default(outcome).build()
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Numbers and timeouts of every lookup made so far
    pub fn calls(&self) -> Vec<(i64, Duration)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FactSource for MockFactSource {
    async fn fetch_fact(&self, number: i64, timeout: Duration) -> FactOutcome {
        self.calls.lock().unwrap().push((number, timeout));

        if let Some(delay) = self.delay {
            if delay >= timeout {
                tokio::time::sleep(timeout).await;
                return FactOutcome::Timeout;
            }
            tokio::time::sleep(delay).await;
        }

        self.outcomes
            .get(&number)
            .cloned()
            .unwrap_or_else(|| self.default_outcome.clone())
    }
}
