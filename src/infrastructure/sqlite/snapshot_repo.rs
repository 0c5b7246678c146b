use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::*;
use chrono::DateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Mutex;

pub struct SqliteSnapshotRepo {
    conn: Mutex<Connection>,
}

impl SqliteSnapshotRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn parse_time(s: &str) -> chrono::DateTime<chrono::Utc> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .unwrap_or_else(|_| {
                tracing::warn!(value = s, "invalid captured_at in archive, using now");
                chrono::Utc::now()
            })
    }

    fn row_to_header(row: &rusqlite::Row) -> Result<SnapshotHeader, rusqlite::Error> {
        let captured_str: String = row.get(1)?;
        let total: i64 = row.get(3)?;
        Ok(SnapshotHeader {
            id: row.get(0)?,
            captured_at: Self::parse_time(&captured_str),
            source: row.get(2)?,
            total_stocks: total.max(0) as usize,
        })
    }

    fn decode(header: SnapshotHeader, body: &str) -> Result<StoredSnapshot, DomainError> {
        let snapshot = serde_json::from_str(body)
            .map_err(|e| DomainError::Parse(format!("Corrupt snapshot {}: {e}", header.id)))?;
        Ok(StoredSnapshot {
            id: header.id,
            captured_at: header.captured_at,
            source: header.source,
            total_stocks: header.total_stocks,
            snapshot,
        })
    }

    fn query_one(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Option<StoredSnapshot>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let found = conn
            .query_row(sql, args, |row| {
                let body: String = row.get(4)?;
                Ok((Self::row_to_header(row)?, body))
            })
            .optional()
            .map_err(|e| DomainError::Database(format!("Failed to load snapshot: {e}")))?;

        found
            .map(|(header, body)| Self::decode(header, &body))
            .transpose()
    }
}

impl SnapshotRepository for SqliteSnapshotRepo {
    fn save(&self, snapshot: &StoredSnapshot) -> Result<(), DomainError> {
        let body = serde_json::to_string(&snapshot.snapshot)?;
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            "INSERT INTO insight_snapshots (id, captured_at, source, total_stocks, body)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot.id,
                snapshot.captured_at.to_rfc3339(),
                snapshot.source,
                snapshot.total_stocks as i64,
                body,
            ],
        )
        .map_err(|e| DomainError::Database(format!("Failed to save snapshot: {e}")))?;
        Ok(())
    }

    fn list(&self, limit: usize) -> Result<Vec<SnapshotHeader>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn.prepare(
            "SELECT id, captured_at, source, total_stocks FROM insight_snapshots
             ORDER BY captured_at DESC, rowid DESC LIMIT ?1",
        )?;
        let headers = stmt
            .query_map(params![limit as i64], Self::row_to_header)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(headers)
    }

    fn latest(&self) -> Result<Option<StoredSnapshot>, DomainError> {
        self.query_one(
            "SELECT id, captured_at, source, total_stocks, body FROM insight_snapshots
             ORDER BY captured_at DESC, rowid DESC LIMIT 1",
            &[],
        )
    }

    fn get(&self, id: &str) -> Result<Option<StoredSnapshot>, DomainError> {
        self.query_one(
            "SELECT id, captured_at, source, total_stocks, body FROM insight_snapshots WHERE id = ?1",
            &[&id],
        )
    }
}
