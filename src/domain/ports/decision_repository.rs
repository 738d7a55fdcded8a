use chrono::NaiveDate;

use crate::domain::entities::decision::DecisionRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::DateFilter;

pub trait DecisionRepository: Send + Sync {
    /// Insert the day's decision, replacing any earlier row for the same date.
    fn upsert(&self, record: &DecisionRecord) -> Result<(), DomainError>;

    fn get(&self, date: NaiveDate) -> Result<Option<DecisionRecord>, DomainError>;

    /// Newest first.
    fn list(&self, filter: &DateFilter) -> Result<Vec<DecisionRecord>, DomainError>;
}
