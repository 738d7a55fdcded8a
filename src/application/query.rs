//! Read-side queries over stored snapshots and decisions.

use std::sync::Arc;

use crate::domain::entities::decision::DecisionRecord;
use crate::domain::entities::snapshot::Snapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_repository::DecisionRepository;
use crate::domain::ports::snapshot_repository::{DateFilter, SnapshotRepository};

pub struct QueryUseCase {
    snapshots: Arc<dyn SnapshotRepository>,
    decisions: Arc<dyn DecisionRepository>,
}

impl QueryUseCase {
    pub fn new(
        snapshots: Arc<dyn SnapshotRepository>,
        decisions: Arc<dyn DecisionRepository>,
    ) -> Self {
        Self {
            snapshots,
            decisions,
        }
    }

    pub fn snapshots(&self, filter: &DateFilter) -> Result<Vec<Snapshot>, DomainError> {
        self.snapshots.list(filter)
    }

    pub fn latest_snapshot(&self) -> Result<Option<Snapshot>, DomainError> {
        self.snapshots.latest()
    }

    pub fn decisions(&self, filter: &DateFilter) -> Result<Vec<DecisionRecord>, DomainError> {
        self.decisions.list(filter)
    }
}
