use chrono::NaiveDate;

use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;

/// Date-range filter shared by the snapshot and decision repositories.
#[derive(Debug, Clone, Default)]
pub struct DateFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<usize>,
}

pub trait SnapshotRepository: Send + Sync {
    /// Insert the day's snapshot, replacing any earlier row for the same date.
    fn upsert(&self, snapshot: &Snapshot) -> Result<(), DomainError>;

    fn get(&self, date: NaiveDate) -> Result<Option<Snapshot>, DomainError>;

    fn latest(&self) -> Result<Option<Snapshot>, DomainError>;

    /// Newest first.
    fn list(&self, filter: &DateFilter) -> Result<Vec<Snapshot>, DomainError>;
}
