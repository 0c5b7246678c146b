pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::fetch::{DataSource, FetchOutcome, FetchUseCase};
use crate::application::history::HistoryUseCase;
use crate::application::insights::InsightsUseCase;
use crate::application::listing::{ListStocksUseCase, StockFilter};
use crate::application::projection::to_detail_record;
use crate::config::{ProviderKind, Settings};
use crate::domain::entities::records::{DetailRecord, ProjectionDefaults, SummaryRecord};
use crate::domain::entities::snapshot::InsightSnapshot;
use crate::domain::error::DomainError;
use crate::domain::ports::snapshot_repository::{SnapshotHeader, SnapshotRepository, StoredSnapshot};
use crate::domain::ports::stock_provider::StockProvider;
use crate::infrastructure::providers::{FileProvider, SampleProvider, ScreenerProvider};
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::snapshot_repo::SqliteSnapshotRepo;
use rusqlite::Connection;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// One insight computation together with where its data came from.
#[derive(Debug, Clone)]
pub struct InsightRun {
    pub source: DataSource,
    pub snapshot: InsightSnapshot,
}

pub struct EgxInsights {
    fetch_uc: FetchUseCase,
    insights_uc: InsightsUseCase,
    listing_uc: ListStocksUseCase,
    history_uc: HistoryUseCase,
    defaults: ProjectionDefaults,
}

impl EgxInsights {
    pub fn new(settings: &Settings) -> Result<Self, DomainError> {
        let primary: Arc<dyn StockProvider> = match &settings.provider {
            ProviderKind::Sample => Arc::new(SampleProvider),
            ProviderKind::Screener => Arc::new(ScreenerProvider::new(settings.market.clone())),
            ProviderKind::File(path) => Arc::new(FileProvider::new(path)),
        };

        Self::with_providers(&settings.db_path, primary, Arc::new(SampleProvider), settings)
    }

    pub fn with_providers(
        db_path: &str,
        primary: Arc<dyn StockProvider>,
        fallback: Arc<dyn StockProvider>,
        settings: &Settings,
    ) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;

        run_migrations(&conn)?;

        let snapshot_repo: Arc<dyn SnapshotRepository> = Arc::new(SqliteSnapshotRepo::new(conn));

        Ok(Self {
            fetch_uc: FetchUseCase::new(primary, fallback, settings.fetch_timeout),
            insights_uc: InsightsUseCase::new(settings.limit),
            listing_uc: ListStocksUseCase::new(settings.defaults.clone()),
            history_uc: HistoryUseCase::new(snapshot_repo),
            defaults: settings.defaults.clone(),
        })
    }

    pub async fn fetch(&self) -> Result<FetchOutcome, DomainError> {
        self.fetch_uc.fetch().await
    }

    /// Fetch a fresh table and compute every insight view. `limit`
    /// overrides the configured per-view row count.
    pub async fn insights(&self, limit: Option<usize>) -> Result<InsightRun, DomainError> {
        let FetchOutcome { table, source } = self.fetch().await?;
        let snapshot = match limit {
            Some(n) => InsightsUseCase::new(n).compute(&table),
            None => self.insights_uc.compute(&table),
        };
        Ok(InsightRun { source, snapshot })
    }

    /// [`Self::insights`], then archive the snapshot.
    pub async fn insights_and_record(&self, limit: Option<usize>) -> Result<(InsightRun, StoredSnapshot), DomainError> {
        let run = self.insights(limit).await?;
        let stored = self.history_uc.record(&run.source, &run.snapshot)?;
        Ok((run, stored))
    }

    pub async fn stocks(&self, filter: &StockFilter) -> Result<Vec<SummaryRecord>, DomainError> {
        let outcome = self.fetch().await?;
        Ok(self.listing_uc.execute(&outcome.table, filter))
    }

    /// Full detail for one symbol. The lookup itself is exact, so the
    /// symbol is upper-cased first.
    pub async fn stock_detail(&self, symbol: &str) -> Result<DetailRecord, DomainError> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DomainError::InvalidInput("symbol must not be empty".into()));
        }
        let outcome = self.fetch().await?;
        to_detail_record(&outcome.table, &symbol, &self.defaults)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<SnapshotHeader>, DomainError> {
        self.history_uc.list(limit)
    }

    pub fn latest(&self) -> Result<Option<StoredSnapshot>, DomainError> {
        self.history_uc.latest()
    }

    pub fn snapshot(&self, id: &str) -> Result<Option<StoredSnapshot>, DomainError> {
        self.history_uc.get(id)
    }
}

/// Install the global `tracing` subscriber. Logs go to stderr so stdout
/// stays machine-readable; `RUST_LOG` overrides the `info` default.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
}
