mod common;

use common::StaticProvider;
use egx_insights::application::listing::StockFilter;
use egx_insights::domain::entities::stock_table::{Column, StockTable};
use egx_insights::domain::error::DomainError;
use egx_insights::domain::values::labels::*;
use std::sync::Arc;

fn symbols(records: &[egx_insights::domain::entities::records::SummaryRecord]) -> Vec<&str> {
    records.iter().map(|r| r.symbol.as_str()).collect()
}

#[tokio::test]
async fn test_list_sorted_by_market_cap() {
    let app = common::setup();
    let stocks = app.stocks(&StockFilter::default()).await.unwrap();

    assert_eq!(symbols(&stocks), vec!["COMI", "SWDY", "EFID", "ORAS", "PHDC"]);
    assert_eq!(stocks[0].weekly_performance, 3.2);
    assert_eq!(stocks[0].country, "Egypt");
    assert_eq!(stocks[0].exchange, "EGX");
}

#[tokio::test]
async fn test_list_filters() {
    let app = common::setup();

    let financial = StockFilter {
        sector: Some("financial".into()),
        ..StockFilter::default()
    };
    assert_eq!(symbols(&app.stocks(&financial).await.unwrap()), vec!["COMI", "EFID"]);

    let large = StockFilter {
        min_market_cap: Some(10e9),
        max_market_cap: Some(20e9),
        ..StockFilter::default()
    };
    assert_eq!(symbols(&app.stocks(&large).await.unwrap()), vec!["SWDY", "EFID"]);

    let search = StockFilter {
        search: Some("BANK".into()),
        ..StockFilter::default()
    };
    assert_eq!(symbols(&app.stocks(&search).await.unwrap()), vec!["COMI"]);

    let none = StockFilter {
        industry: Some("mining".into()),
        ..StockFilter::default()
    };
    assert!(app.stocks(&none).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_market_cap_fails_bounds() {
    let table = StockTable::new(vec![
        Column::from_values(SYMBOL, vec!["AAA", "BBB"]),
        Column::new(MARKET_CAP, vec![egx_insights::domain::entities::stock_table::Cell::Null, 5.0e9.into()]),
    ])
    .unwrap();
    let app = common::setup_with(Arc::new(StaticProvider(table)));

    let filter = StockFilter {
        max_market_cap: Some(10e9),
        ..StockFilter::default()
    };
    assert_eq!(symbols(&app.stocks(&filter).await.unwrap()), vec!["BBB"]);
    assert_eq!(app.stocks(&StockFilter::default()).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_stock_detail() {
    let app = common::setup();
    let detail = app.stock_detail("comi").await.unwrap();

    assert_eq!(detail.symbol, "COMI");
    assert_eq!(detail.name, "Commercial International Bank");
    assert_eq!(detail.description, "Leading commercial bank in Egypt");
    assert_eq!(detail.volume, 1_500_000);
    assert_eq!(detail.yearly_performance, 15.3);
    assert_eq!(detail.currency, "EGP");
    // Columns the sample lacks default to zero.
    assert_eq!(detail.all_time_high, 0.0);
}

#[tokio::test]
async fn test_stock_detail_not_found() {
    let app = common::setup();
    let err = app.stock_detail("XXXX").await.unwrap_err();

    assert!(matches!(err, DomainError::SymbolNotFound(ref s) if s == "XXXX"));
    assert_eq!(err.to_string(), "Stock with symbol XXXX not found");
    assert!(matches!(app.stock_detail("  ").await, Err(DomainError::InvalidInput(_))));
}
