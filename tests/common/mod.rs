//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use egx_insights::config::Settings;
use egx_insights::domain::entities::stock_table::StockTable;
use egx_insights::domain::ports::stock_provider::{ProviderError, StockProvider};
use egx_insights::infrastructure::providers::sample::sample_table;
use egx_insights::infrastructure::providers::SampleProvider;
use egx_insights::EgxInsights;
use std::sync::Arc;
use std::time::Duration;

pub fn settings() -> Settings {
    Settings {
        fetch_timeout: Duration::from_millis(200),
        ..Settings::default()
    }
}

pub fn setup() -> EgxInsights {
    setup_with(Arc::new(SampleProvider))
}

pub fn setup_with(primary: Arc<dyn StockProvider>) -> EgxInsights {
    EgxInsights::with_providers(":memory:", primary, Arc::new(SampleProvider), &settings()).unwrap()
}

pub fn sample() -> StockTable {
    sample_table().unwrap()
}

/// Serves a fixed table.
pub struct StaticProvider(pub StockTable);

#[async_trait]
impl StockProvider for StaticProvider {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        Ok(self.0.clone())
    }
}

/// Sleeps past any test deadline before answering.
pub struct SlowProvider(pub Duration);

#[async_trait]
impl StockProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        tokio::time::sleep(self.0).await;
        Ok(sample_table().unwrap())
    }
}

pub struct FailingProvider;

#[async_trait]
impl StockProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        Err(ProviderError::Request("connection refused".into()))
    }
}
