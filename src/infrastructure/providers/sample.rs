use async_trait::async_trait;

use crate::domain::entities::stock_table::{Column, StockTable};
use crate::domain::ports::stock_provider::{ProviderError, StockProvider};
use crate::domain::values::labels::*;

/// Deterministic five-row EGX dataset, served when the live screener is
/// unreachable.
pub struct SampleProvider;

#[async_trait]
impl StockProvider for SampleProvider {
    fn name(&self) -> &str {
        "sample"
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        sample_table().map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

pub fn sample_table() -> Result<StockTable, crate::domain::error::DomainError> {
    StockTable::new(vec![
        Column::from_values(SYMBOL, vec!["COMI", "ORAS", "EFID", "PHDC", "SWDY"]),
        Column::from_values(
            NAME,
            vec![
                "Commercial International Bank",
                "Orascom Construction",
                "EFG Hermes Holding",
                "Palm Hills Development",
                "El Sewedy Electric",
            ],
        ),
        Column::from_values(
            DESCRIPTION,
            vec![
                "Leading commercial bank in Egypt",
                "Leading construction and engineering company",
                "Leading investment bank and financial services",
                "Real estate development company",
                "Electrical equipment and infrastructure company",
            ],
        ),
        Column::from_values(PRICE, vec![45.50, 12.80, 18.90, 2.15, 25.40]),
        Column::from_values(CHANGE_PCT, vec![2.5, -1.2, 4.8, 0.5, 3.2]),
        Column::from_values(VOLUME, vec![1_500_000_i64, 800_000, 1_200_000, 2_000_000, 950_000]),
        Column::from_values(MARKET_CAP, vec![50.0e9, 8.0e9, 12.0e9, 3.5e9, 15.0e9]),
        Column::from_values(PE_TTM, vec![8.5, 12.3, 15.2, 6.8, 9.8]),
        Column::from_values(TECHNICAL_RATING, vec![1.2, -0.8, 2.1, 0.3, 1.5]),
        Column::from_values(PERF_WEEK, vec![3.2, -2.1, 6.5, 1.2, 4.8]),
        Column::from_values(PERF_MONTH, vec![8.5, -5.3, 12.8, 3.5, 9.2]),
        Column::from_values(PERF_YEAR, vec![15.3, 8.7, 22.5, -5.2, 18.7]),
        Column::from_values(
            SECTOR,
            vec!["Financial Services", "Industrials", "Financial Services", "Real Estate", "Industrials"],
        ),
        Column::from_values(
            INDUSTRY,
            vec!["Banking", "Construction", "Investment Banking", "Real Estate", "Electrical Equipment"],
        ),
        Column::from_values(RSI_14, vec![65.5, 35.2, 72.3, 48.7, 68.9]),
        Column::from_values(MACD_LEVEL, vec![0.8, -0.3, 1.2, 0.1, 0.9]),
        Column::from_values(MACD_SIGNAL, vec![0.6, -0.1, 0.9, 0.2, 0.7]),
        Column::from_values(REVENUE_TTM_YOY, vec![12.5, 5.8, 18.7, -2.3, 15.3]),
        Column::from_values(EPS_DILUTED_TTM_YOY, vec![8.3, 3.2, 15.3, -8.5, 12.7]),
        Column::from_values(ROE_TTM, vec![18.5, 12.3, 22.1, 8.9, 16.8]),
        Column::from_values(GROSS_MARGIN_TTM, vec![45.2, 28.5, 52.8, 35.2, 42.5]),
        Column::from_values(OPERATING_MARGIN_TTM, vec![25.8, 15.2, 32.5, 18.7, 22.3]),
        Column::from_values(NET_MARGIN_TTM, vec![15.3, 8.7, 18.9, 12.3, 13.7]),
        Column::from_values(DIVIDEND_YIELD_FWD, vec![4.2, 2.1, 3.8, 5.5, 2.8]),
    ])
}
