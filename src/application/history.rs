use std::sync::Arc;

use tracing::info;

use crate::application::fetch::DataSource;
use crate::domain::entities::snapshot::InsightSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::{SnapshotHeader, SnapshotRepository, StoredSnapshot};

pub struct HistoryUseCase {
    repo: Arc<dyn SnapshotRepository>,
}

impl HistoryUseCase {
    pub fn new(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }

    /// Archive a computed snapshot, tagged with where its data came from.
    pub fn record(&self, source: &DataSource, snapshot: &InsightSnapshot) -> Result<StoredSnapshot, DomainError> {
        let stored = StoredSnapshot {
            id: uuid::Uuid::new_v4().to_string(),
            captured_at: snapshot.timestamp,
            source: source.label().to_string(),
            total_stocks: snapshot.total_stocks,
            snapshot: snapshot.clone(),
        };
        self.repo.save(&stored)?;
        info!(id = %stored.id, source = %stored.source, "snapshot archived");
        Ok(stored)
    }

    pub fn list(&self, limit: usize) -> Result<Vec<SnapshotHeader>, DomainError> {
        self.repo.list(limit)
    }

    pub fn latest(&self) -> Result<Option<StoredSnapshot>, DomainError> {
        self.repo.latest()
    }

    pub fn get(&self, id: &str) -> Result<Option<StoredSnapshot>, DomainError> {
        self.repo.get(id)
    }
}
