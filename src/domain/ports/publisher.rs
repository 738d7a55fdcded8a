use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Remote archive for snapshot/decision documents (e.g. a data repository
/// on GitHub). `publish` has create-or-update semantics. Like the
/// notifier, unconfigured implementations warn and succeed.
#[async_trait]
pub trait ArchivePublisher: Send + Sync {
    /// Store `content` at `path` inside the archive.
    async fn publish(&self, path: &str, content: &str) -> Result<(), DomainError>;
}
