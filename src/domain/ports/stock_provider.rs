use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::stock_table::StockTable;

/// Source of whole-market screener snapshots.
///
/// A provider returns the full table in one call; nothing is streamed.
/// Callers bound the call with a deadline, so implementations need not
/// enforce their own timeout.
#[async_trait]
pub trait StockProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the current snapshot.
    async fn fetch(&self) -> Result<StockTable, ProviderError>;
}

/// Why a provider could not produce a table.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("screener answered HTTP {status} for market {market}")]
    Status { status: u16, market: String },

    #[error("malformed stock table: {0}")]
    Malformed(String),

    #[error("cannot read {path}: {reason}")]
    Source { path: String, reason: String },

    #[error("unsupported source {0} (expected .json or .csv)")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let status = ProviderError::Status {
            status: 503,
            market: "egypt".into(),
        };
        assert_eq!(status.to_string(), "screener answered HTTP 503 for market egypt");

        let source = ProviderError::Source {
            path: "data/egx.csv".into(),
            reason: "No such file or directory".into(),
        };
        assert_eq!(source.to_string(), "cannot read data/egx.csv: No such file or directory");
    }
}
