//! Insights use case: scores and ranks one screener table into every
//! insight view and assembles an [`InsightSnapshot`].

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::application::ranking::{
    format_rows, sector_changes, select_top, select_top_by, select_top_filtered, Order, RowFilter,
};
use crate::application::scoring::{self, Predicate};
use crate::domain::entities::snapshot::{InsightSnapshot, MarketOverview, RankedStock};
use crate::domain::entities::stock_table::StockTable;
use crate::domain::values::aggregate::{mean, saturating_sum};
use crate::domain::values::labels::*;

pub const DEFAULT_LIMIT: usize = 10;

const SIGNAL_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, CHANGE_PCT, TECHNICAL_RATING];
const SHORT_TERM_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, WEEKLY_PERFORMANCE, RSI_7];
const MEDIUM_TERM_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, MONTHLY_PERFORMANCE, CHANGE_1M_PCT];
const LONG_TERM_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, YEARLY_PERFORMANCE, ROE_TTM];
const VALUATION_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, PE_TTM, PB_MRQ];
const VOLUME_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, VOLUME, RELATIVE_VOLUME];
const MOMENTUM_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, MOMENTUM_10, CHANGE_PCT];
const DIVIDEND_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, DIVIDEND_YIELD_FWD, DPS_FY];
const GROWTH_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, REVENUE_TTM_YOY, EPS_DILUTED_TTM_YOY];
const MOVER_COLUMNS: &[&str] = &[SYMBOL, NAME, PRICE, CHANGE_PCT];

pub struct InsightsUseCase {
    limit: usize,
}

impl Default for InsightsUseCase {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT)
    }
}

impl InsightsUseCase {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Compute every view, stamped with the current time.
    pub fn compute(&self, table: &StockTable) -> InsightSnapshot {
        self.compute_at(table, Utc::now())
    }

    /// Compute every view with a caller-supplied timestamp. A pure function
    /// of `table` and `timestamp`.
    pub fn compute_at(&self, table: &StockTable, timestamp: DateTime<Utc>) -> InsightSnapshot {
        if table.is_empty() {
            debug!("empty table, returning empty snapshot");
            return InsightSnapshot::empty(timestamp);
        }

        let snapshot = InsightSnapshot {
            timestamp,
            total_stocks: table.len(),
            market_overview: market_overview(table),
            top_bullish: self.scored(table, "top_bullish", &scoring::bullish(), SIGNAL_COLUMNS),
            top_bearish: self.scored(table, "top_bearish", &scoring::bearish(), SIGNAL_COLUMNS),
            best_short_term: self.short_term(table),
            best_medium_term: self.ranked(table, "best_medium_term", MONTHLY_PERFORMANCE, MEDIUM_TERM_COLUMNS),
            best_long_term: self.scored(table, "best_long_term", &scoring::long_term(), LONG_TERM_COLUMNS),
            overpriced: self.filtered(
                table,
                "overpriced",
                RowFilter::Overpriced,
                PE_TTM,
                Order::Descending,
                VALUATION_COLUMNS,
            ),
            underpriced: self.filtered(
                table,
                "underpriced",
                RowFilter::Underpriced,
                PE_TTM,
                Order::Ascending,
                VALUATION_COLUMNS,
            ),
            volume_leaders: self.ranked(table, "volume_leaders", VOLUME, VOLUME_COLUMNS),
            momentum_stocks: self.ranked(table, "momentum_stocks", MOMENTUM_10, MOMENTUM_COLUMNS),
            dividend_stocks: self.filtered(
                table,
                "dividend_stocks",
                RowFilter::Dividend,
                DIVIDEND_YIELD_FWD,
                Order::Descending,
                DIVIDEND_COLUMNS,
            ),
            growth_stocks: self.scored(table, "growth_stocks", &scoring::growth(), GROWTH_COLUMNS),
            top_positive_movers: self.filtered(
                table,
                "top_positive_movers",
                RowFilter::PositiveMovers,
                CHANGE_PCT,
                Order::Descending,
                MOVER_COLUMNS,
            ),
            top_negative_movers: self.filtered(
                table,
                "top_negative_movers",
                RowFilter::NegativeMovers,
                CHANGE_PCT,
                Order::Ascending,
                MOVER_COLUMNS,
            ),
            top_sectors_change: sector_changes(table, self.limit),
        };

        info!(
            total_stocks = snapshot.total_stocks,
            sectors = snapshot.top_sectors_change.len(),
            "insights computed"
        );
        snapshot
    }

    fn scored(
        &self,
        table: &StockTable,
        view: &str,
        predicates: &[Predicate],
        columns: &[&str],
    ) -> Vec<RankedStock> {
        let scores: Vec<Option<f64>> = scoring::score(table, predicates)
            .into_iter()
            .map(|s| Some(s as f64))
            .collect();
        let rows = select_top_by(&scores, self.limit, Order::Descending);
        debug!(view, rows = rows.len(), "scored view");
        format_rows(table, &rows, columns)
    }

    fn ranked(&self, table: &StockTable, view: &str, key: &str, columns: &[&str]) -> Vec<RankedStock> {
        let rows = select_top(table, key, self.limit, Order::Descending);
        debug!(view, rows = rows.len(), "ranked view");
        format_rows(table, &rows, columns)
    }

    fn filtered(
        &self,
        table: &StockTable,
        view: &str,
        filter: RowFilter,
        key: &str,
        order: Order,
        columns: &[&str],
    ) -> Vec<RankedStock> {
        let rows = select_top_filtered(table, filter, key, self.limit, order);
        debug!(view, rows = rows.len(), "filtered view");
        format_rows(table, &rows, columns)
    }

    // Short-term picks also need RSI(7) for display; without it the view is
    // skipped entirely.
    fn short_term(&self, table: &StockTable) -> Vec<RankedStock> {
        if !table.has_column(RSI_7) {
            debug!(view = "best_short_term", "RSI(7) column missing");
            return vec![];
        }
        self.ranked(table, "best_short_term", WEEKLY_PERFORMANCE, SHORT_TERM_COLUMNS)
    }
}

/// Total market cap, mean P/E and mean volume over finite cells. Each is
/// `0.0` when the column is absent or holds no finite value; the total
/// saturates rather than overflowing.
pub fn market_overview(table: &StockTable) -> MarketOverview {
    MarketOverview {
        total_market_cap: column_sum(table, MARKET_CAP),
        average_pe_ratio: column_mean(table, PE_TTM),
        average_volume: column_mean(table, VOLUME),
    }
}

fn column_sum(table: &StockTable, label: &str) -> f64 {
    table
        .numeric(label)
        .map(|values| saturating_sum(values.into_iter().flatten()))
        .unwrap_or(0.0)
}

fn column_mean(table: &StockTable, label: &str) -> f64 {
    table
        .numeric(label)
        .and_then(|values| mean(values.into_iter().flatten()))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::stock_table::{Cell, Column};

    #[test]
    fn test_overview_skips_non_finite() {
        let t = StockTable::new(vec![
            Column::new(MARKET_CAP, vec![Cell::Float(10.0), Cell::Float(f64::NAN), Cell::Int(5)]),
            Column::new(PE_TTM, vec![Cell::Float(f64::INFINITY), Cell::Float(4.0), Cell::Float(8.0)]),
        ])
        .unwrap();
        let overview = market_overview(&t);
        assert_eq!(overview.total_market_cap, 15.0);
        assert_eq!(overview.average_pe_ratio, 6.0);
        assert_eq!(overview.average_volume, 0.0);
    }

    #[test]
    fn test_overview_stays_finite_for_huge_values() {
        let t = StockTable::new(vec![
            Column::from_values(MARKET_CAP, vec![1e308, 1e308]),
            Column::from_values(VOLUME, vec![1e308, 1e308]),
        ])
        .unwrap();
        let overview = market_overview(&t);
        assert_eq!(overview.total_market_cap, f64::MAX);
        assert_eq!(overview.average_volume, 1e308);

        let json = serde_json::to_value(&overview).unwrap();
        assert!(json["total_market_cap"].is_f64());
        assert!(json["average_volume"].is_f64());
    }

    #[test]
    fn test_limit_caps_every_view() {
        let n = 25;
        let t = StockTable::new(vec![
            Column::from_values(SYMBOL, (0..n).map(|i| format!("S{i}")).collect()),
            Column::from_values(CHANGE_PCT, (0..n).map(|i| i as f64 - 12.0).collect()),
            Column::from_values(VOLUME, (0..n).map(|i| i as f64 * 1000.0).collect()),
        ])
        .unwrap();

        let snapshot = InsightsUseCase::new(3).compute(&t);
        for (name, view) in snapshot.ranked_views() {
            assert!(view.len() <= 3, "{name} has {} rows", view.len());
        }
        assert_eq!(snapshot.top_positive_movers.len(), 3);
        assert_eq!(snapshot.top_positive_movers[0].symbol(), Some("S24"));
        assert_eq!(snapshot.top_negative_movers[0].symbol(), Some("S0"));
    }
}
