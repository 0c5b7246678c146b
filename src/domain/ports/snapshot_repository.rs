use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::snapshot::InsightSnapshot;
use crate::domain::error::DomainError;

/// An archived insight snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSnapshot {
    pub id: String,
    pub captured_at: DateTime<Utc>,
    /// "live" or "fallback"
    pub source: String,
    pub total_stocks: usize,
    pub snapshot: InsightSnapshot,
}

/// Listing row without the snapshot body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SnapshotHeader {
    pub id: String,
    pub captured_at: DateTime<Utc>,
    pub source: String,
    pub total_stocks: usize,
}

pub trait SnapshotRepository: Send + Sync {
    fn save(&self, snapshot: &StoredSnapshot) -> Result<(), DomainError>;
    /// Most recent first.
    fn list(&self, limit: usize) -> Result<Vec<SnapshotHeader>, DomainError>;
    fn latest(&self) -> Result<Option<StoredSnapshot>, DomainError>;
    fn get(&self, id: &str) -> Result<Option<StoredSnapshot>, DomainError>;
}
