//! Fetch use case: calls the configured provider under a deadline and
//! falls back to a deterministic dataset when the live fetch does not
//! produce a usable table.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::entities::stock_table::StockTable;
use crate::domain::error::DomainError;
use crate::domain::ports::stock_provider::StockProvider;

/// Why the fallback dataset was used.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    TimedOut,
    Failed(String),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataSource {
    Live { provider: String },
    Fallback { provider: String, cause: FallbackReason },
}

impl DataSource {
    pub fn is_live(&self) -> bool {
        matches!(self, DataSource::Live { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            DataSource::Live { .. } => "live",
            DataSource::Fallback { .. } => "fallback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub table: StockTable,
    pub source: DataSource,
}

pub struct FetchUseCase {
    primary: Arc<dyn StockProvider>,
    fallback: Arc<dyn StockProvider>,
    timeout: Duration,
}

impl FetchUseCase {
    pub fn new(primary: Arc<dyn StockProvider>, fallback: Arc<dyn StockProvider>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback,
            timeout,
        }
    }

    /// Fetch from the primary provider, bounded by the configured timeout.
    ///
    /// On timeout the spawned fetch is left to finish on its own and its
    /// result is discarded. Errors and empty tables also fall back. Only an
    /// unusable fallback is reported as [`DomainError::ProviderUnavailable`].
    pub async fn fetch(&self) -> Result<FetchOutcome, DomainError> {
        let provider = self.primary.clone();
        info!(provider = provider.name(), timeout_secs = self.timeout.as_secs_f64(), "fetching stock table");

        let handle = tokio::spawn(async move { provider.fetch().await });

        let cause = match tokio::time::timeout(self.timeout, handle).await {
            Ok(Ok(Ok(table))) if !table.is_empty() => {
                info!(provider = self.primary.name(), rows = table.len(), "fetched live table");
                return Ok(FetchOutcome {
                    table,
                    source: DataSource::Live {
                        provider: self.primary.name().to_string(),
                    },
                });
            }
            Ok(Ok(Ok(_))) => FallbackReason::Empty,
            Ok(Ok(Err(e))) => FallbackReason::Failed(e.to_string()),
            Ok(Err(join_err)) => FallbackReason::Failed(format!("fetch task failed: {join_err}")),
            Err(_) => FallbackReason::TimedOut,
        };

        warn!(provider = self.primary.name(), cause = ?cause, "live fetch unusable, using fallback data");
        self.use_fallback(cause).await
    }

    async fn use_fallback(&self, cause: FallbackReason) -> Result<FetchOutcome, DomainError> {
        let table = self.fallback.fetch().await.map_err(|e| {
            DomainError::ProviderUnavailable(format!("fallback provider '{}' failed: {e}", self.fallback.name()))
        })?;

        if table.is_empty() {
            return Err(DomainError::ProviderUnavailable(format!(
                "fallback provider '{}' returned no rows",
                self.fallback.name()
            )));
        }

        Ok(FetchOutcome {
            table,
            source: DataSource::Fallback {
                provider: self.fallback.name().to_string(),
                cause,
            },
        })
    }
}
