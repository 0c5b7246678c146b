mod common;

use common::{FailingProvider, SlowProvider, StaticProvider};
use egx_insights::application::fetch::{DataSource, FallbackReason, FetchUseCase};
use egx_insights::domain::entities::stock_table::{Column, StockTable};
use egx_insights::domain::error::DomainError;
use egx_insights::infrastructure::providers::SampleProvider;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn fetcher(primary: Arc<dyn egx_insights::domain::ports::stock_provider::StockProvider>) -> FetchUseCase {
    FetchUseCase::new(primary, Arc::new(SampleProvider), Duration::from_millis(100))
}

#[tokio::test]
async fn test_live_table_is_used() {
    let table = StockTable::new(vec![Column::from_values("Symbol", vec!["AAA"])]).unwrap();
    let outcome = fetcher(Arc::new(StaticProvider(table))).fetch().await.unwrap();

    assert!(outcome.source.is_live());
    assert_eq!(outcome.table.len(), 1);
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let started = Instant::now();
    let outcome = fetcher(Arc::new(SlowProvider(Duration::from_secs(30))))
        .fetch()
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        outcome.source,
        DataSource::Fallback {
            provider: "sample".into(),
            cause: FallbackReason::TimedOut,
        }
    );
    assert_eq!(outcome.table.len(), 5);
}

#[tokio::test]
async fn test_provider_error_falls_back() {
    let outcome = fetcher(Arc::new(FailingProvider)).fetch().await.unwrap();
    match outcome.source {
        DataSource::Fallback {
            cause: FallbackReason::Failed(msg),
            ..
        } => assert!(msg.contains("connection refused")),
        other => panic!("unexpected source {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_live_table_falls_back() {
    let outcome = fetcher(Arc::new(StaticProvider(StockTable::empty()))).fetch().await.unwrap();
    assert_eq!(outcome.source.label(), "fallback");
    assert!(matches!(
        outcome.source,
        DataSource::Fallback {
            cause: FallbackReason::Empty,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unusable_fallback_is_unavailable() {
    let uc = FetchUseCase::new(
        Arc::new(FailingProvider),
        Arc::new(StaticProvider(StockTable::empty())),
        Duration::from_millis(100),
    );
    assert!(matches!(uc.fetch().await, Err(DomainError::ProviderUnavailable(_))));

    let uc = FetchUseCase::new(Arc::new(FailingProvider), Arc::new(FailingProvider), Duration::from_millis(100));
    assert!(matches!(uc.fetch().await, Err(DomainError::ProviderUnavailable(_))));
}

#[tokio::test]
async fn test_facade_reports_fallback_source() {
    let app = common::setup_with(Arc::new(SlowProvider(Duration::from_secs(30))));
    let run = app.insights(None).await.unwrap();

    assert!(!run.source.is_live());
    assert_eq!(run.snapshot.total_stocks, 5);
}
