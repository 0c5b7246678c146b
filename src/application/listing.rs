use crate::application::projection::to_summary_records;
use crate::domain::entities::records::{ProjectionDefaults, SummaryRecord};
use crate::domain::entities::stock_table::StockTable;

/// Optional filters for the stock listing. All set filters must match.
#[derive(Debug, Clone, Default)]
pub struct StockFilter {
    /// Case-insensitive substring of the sector
    pub sector: Option<String>,
    /// Case-insensitive substring of the industry
    pub industry: Option<String>,
    pub min_market_cap: Option<f64>,
    pub max_market_cap: Option<f64>,
    /// Case-insensitive substring of the symbol or the name
    pub search: Option<String>,
}

impl StockFilter {
    pub fn matches(&self, record: &SummaryRecord) -> bool {
        if let Some(sector) = &self.sector {
            if !contains_ci(&record.sector, sector) {
                return false;
            }
        }
        if let Some(industry) = &self.industry {
            if !contains_ci(&record.industry, industry) {
                return false;
            }
        }
        // A zero market cap means "unknown" and never satisfies a bound.
        let cap = record.market_capitalization;
        if let Some(min) = self.min_market_cap {
            if cap == 0.0 || cap < min {
                return false;
            }
        }
        if let Some(max) = self.max_market_cap {
            if cap == 0.0 || cap > max {
                return false;
            }
        }
        if let Some(search) = &self.search {
            if !contains_ci(&record.symbol, search) && !contains_ci(&record.name, search) {
                return false;
            }
        }
        true
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub struct ListStocksUseCase {
    defaults: ProjectionDefaults,
}

impl ListStocksUseCase {
    pub fn new(defaults: ProjectionDefaults) -> Self {
        Self { defaults }
    }

    /// Summary records passing `filter`, largest market cap first.
    pub fn execute(&self, table: &StockTable, filter: &StockFilter) -> Vec<SummaryRecord> {
        let mut records: Vec<SummaryRecord> = to_summary_records(table, &self.defaults)
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect();

        records.sort_by(|a, b| b.market_capitalization.total_cmp(&a.market_capitalization));
        records
    }
}
