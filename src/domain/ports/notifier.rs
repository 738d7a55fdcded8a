use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Push channel for daily summaries and failure alerts. Implementations
/// without credentials log a warning and succeed; notification is
/// best-effort and must never fail a collection or decision run.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, title: &str, message: &str) -> Result<(), DomainError>;
}
