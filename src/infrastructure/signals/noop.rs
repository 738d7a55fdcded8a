//! Neutral signal providers used when no API key is configured and in tests.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::signals::{SentimentSource, TrendsSource};

pub struct NoopSignals;

#[async_trait]
impl SentimentSource for NoopSignals {
    fn name(&self) -> &str {
        "noop"
    }

    async fn score(&self, _symbol: &str) -> Result<f64, DomainError> {
        Ok(0.0)
    }
}

#[async_trait]
impl TrendsSource for NoopSignals {
    async fn interest(&self, _term: &str) -> Result<Option<f64>, DomainError> {
        Ok(None)
    }
}
