//! Auxiliary signal ports: headline sentiment and search-trend interest.

use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Headline sentiment for a symbol, scored into [-1.0, 1.0].
#[async_trait]
pub trait SentimentSource: Send + Sync {
    fn name(&self) -> &str;

    async fn score(&self, symbol: &str) -> Result<f64, DomainError>;
}

/// Search-trend interest for a term, 0-100 when available.
#[async_trait]
pub trait TrendsSource: Send + Sync {
    async fn interest(&self, term: &str) -> Result<Option<f64>, DomainError>;
}
