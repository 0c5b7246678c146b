use rusqlite::Connection;

use crate::domain::error::DomainError;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS insight_snapshots (
            id TEXT PRIMARY KEY,
            captured_at TEXT NOT NULL,
            source TEXT NOT NULL,
            total_stocks INTEGER NOT NULL,
            body TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_snapshots_captured ON insight_snapshots(captured_at);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
