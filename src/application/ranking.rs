//! Top-N / bottom-N selection over a [`StockTable`].
//!
//! Selection is a stable sort on a finite sort key followed by a truncate,
//! so rows with equal keys keep their source order. Rows whose key is
//! missing or non-finite never appear in a ranking.

use std::collections::BTreeMap;

use tracing::debug;

use crate::application::scoring::Predicate;
use crate::domain::entities::snapshot::{RankedStock, SectorChange};
use crate::domain::entities::stock_table::{Cell, StockTable};
use crate::domain::values::aggregate::mean;
use crate::domain::values::coercion::ranked_value;
use crate::domain::values::labels;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Largest first
    #[default]
    Descending,
    /// Smallest first
    Ascending,
}

/// Indices of the top `n` rows by `values`, skipping `None`.
pub fn select_top_by(values: &[Option<f64>], n: usize, order: Order) -> Vec<usize> {
    let mut ranked: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();

    ranked.sort_by(|a, b| match order {
        Order::Descending => b.1.total_cmp(&a.1),
        Order::Ascending => a.1.total_cmp(&b.1),
    });
    ranked.truncate(n);
    ranked.into_iter().map(|(i, _)| i).collect()
}

/// Indices of the top `n` rows by column `key`. Empty when the column is
/// absent.
pub fn select_top(table: &StockTable, key: &str, n: usize, order: Order) -> Vec<usize> {
    match table.numeric(key) {
        Some(values) => select_top_by(&values, n, order),
        None => {
            debug!(key, "ranking column missing");
            vec![]
        }
    }
}

/// [`select_top`] restricted to rows passing `filter`. Empty when the key or
/// any filter column is absent.
pub fn select_top_filtered(
    table: &StockTable,
    filter: RowFilter,
    key: &str,
    n: usize,
    order: Order,
) -> Vec<usize> {
    let (Some(mut values), Some(mask)) = (table.numeric(key), filter.mask(table)) else {
        debug!(key, ?filter, "filter or ranking column missing");
        return vec![];
    };

    for (v, keep) in values.iter_mut().zip(mask) {
        if !keep {
            *v = None;
        }
    }
    select_top_by(&values, n, order)
}

/// Pre-ranking row filters used by the valuation, dividend and mover views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFilter {
    /// 0 < P/E < 1000
    Overpriced,
    /// 0 < P/E < 15 and 0 < P/B < 3
    Underpriced,
    /// forward dividend yield > 0
    Dividend,
    /// change % > 0
    PositiveMovers,
    /// change % < 0
    NegativeMovers,
}

impl RowFilter {
    fn predicates(self) -> Vec<Predicate> {
        match self {
            RowFilter::Overpriced => vec![
                Predicate::gt(labels::PE_TTM, 0.0),
                Predicate::lt(labels::PE_TTM, 1000.0),
            ],
            RowFilter::Underpriced => vec![
                Predicate::gt(labels::PE_TTM, 0.0),
                Predicate::lt(labels::PE_TTM, 15.0),
                Predicate::gt(labels::PB_MRQ, 0.0),
                Predicate::lt(labels::PB_MRQ, 3.0),
            ],
            RowFilter::Dividend => vec![Predicate::gt(labels::DIVIDEND_YIELD_FWD, 0.0)],
            RowFilter::PositiveMovers => vec![Predicate::gt(labels::CHANGE_PCT, 0.0)],
            RowFilter::NegativeMovers => vec![Predicate::lt(labels::CHANGE_PCT, 0.0)],
        }
    }

    /// Row mask (all predicates hold), or `None` if a column is missing.
    pub fn mask(self, table: &StockTable) -> Option<Vec<bool>> {
        let mut mask = vec![true; table.len()];
        for predicate in self.predicates() {
            let hits = predicate.evaluate(table)?;
            for (m, hit) in mask.iter_mut().zip(hits) {
                *m &= hit;
            }
        }
        Some(mask)
    }
}

/// Project `rows` onto the display `columns` that exist in the table.
pub fn format_rows(table: &StockTable, rows: &[usize], columns: &[&str]) -> Vec<RankedStock> {
    let available: Vec<&str> = columns
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();

    rows.iter()
        .filter_map(|&i| table.row(i))
        .map(|row| {
            RankedStock::new(
                available
                    .iter()
                    .map(|&c| (c.to_string(), ranked_value(row.get(c))))
                    .collect(),
            )
        })
        .collect()
}

/// Mean change % per sector, best first, at most `n` sectors.
///
/// Rows without a sector are ignored. A sector whose rows carry no finite
/// change reports `0.0` and sorts after every sector with data. Ties keep
/// alphabetical sector order.
pub fn sector_changes(table: &StockTable, n: usize) -> Vec<SectorChange> {
    let (Some(sectors), Some(changes)) = (table.column(labels::SECTOR), table.numeric(labels::CHANGE_PCT))
    else {
        debug!("sector or change column missing");
        return vec![];
    };

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (cell, change) in sectors.cells().iter().zip(changes) {
        let sector = match cell {
            Cell::Text(s) => s.clone(),
            Cell::Int(v) => v.to_string(),
            Cell::Float(v) if v.is_finite() => v.to_string(),
            _ => continue,
        };
        groups.entry(sector).or_default().extend(change);
    }

    let mut means: Vec<(String, Option<f64>)> = groups
        .into_iter()
        .map(|(sector, changes)| (sector, mean(changes)))
        .collect();

    means.sort_by(|a, b| match (a.1, b.1) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    means.truncate(n);

    means
        .into_iter()
        .map(|(sector, mean)| SectorChange {
            sector,
            change: mean.unwrap_or(0.0),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::stock_table::Column;

    #[test]
    fn test_select_top_is_stable_on_ties() {
        let values = [Some(2.0), Some(3.0), Some(2.0), None, Some(3.0)];
        assert_eq!(select_top_by(&values, 10, Order::Descending), vec![1, 4, 0, 2]);
        assert_eq!(select_top_by(&values, 10, Order::Ascending), vec![0, 2, 1, 4]);
        assert_eq!(select_top_by(&values, 2, Order::Descending), vec![1, 4]);
        assert!(select_top_by(&values, 0, Order::Descending).is_empty());
    }

    #[test]
    fn test_select_top_missing_key_is_empty() {
        let t = StockTable::new(vec![Column::from_values("Volume", vec![1.0, 2.0])]).unwrap();
        assert!(select_top(&t, "Momentum (10)", 10, Order::Descending).is_empty());
        assert_eq!(select_top(&t, "Volume", 10, Order::Descending), vec![1, 0]);
    }

    #[test]
    fn test_underpriced_requires_both_ratios() {
        let t = StockTable::new(vec![
            Column::from_values(labels::PE_TTM, vec![8.0, 12.0, 20.0, -3.0]),
            Column::from_values(labels::PB_MRQ, vec![1.0, 3.0, 1.0, 1.0]),
        ])
        .unwrap();
        assert_eq!(
            select_top_filtered(&t, RowFilter::Underpriced, labels::PE_TTM, 10, Order::Ascending),
            vec![0]
        );

        let pe_only = StockTable::new(vec![Column::from_values(labels::PE_TTM, vec![8.0])]).unwrap();
        assert!(
            select_top_filtered(&pe_only, RowFilter::Underpriced, labels::PE_TTM, 10, Order::Ascending)
                .is_empty()
        );
    }

    #[test]
    fn test_format_rows_skips_absent_columns() {
        let t = StockTable::new(vec![
            Column::from_values(labels::SYMBOL, vec!["COMI"]),
            Column::new(labels::PRICE, vec![Cell::Float(f64::NAN)]),
        ])
        .unwrap();
        let rows = format_rows(&t, &[0], &[labels::SYMBOL, labels::NAME, labels::PRICE]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].labels().collect::<Vec<_>>(), vec!["Symbol", "Price"]);
        assert_eq!(rows[0].get("Price"), Some(&crate::domain::values::coercion::RankedValue::Null));
    }

    #[test]
    fn test_sector_changes_mean_and_order() {
        let t = StockTable::new(vec![
            Column::new(
                labels::SECTOR,
                vec!["Financials".into(), "Industrials".into(), "Financials".into(), Cell::Null, "Energy".into()],
            ),
            Column::new(
                labels::CHANGE_PCT,
                vec![Cell::Float(2.0), Cell::Float(-1.0), Cell::Float(4.0), Cell::Float(9.0), Cell::Float(f64::NAN)],
            ),
        ])
        .unwrap();

        let sectors = sector_changes(&t, 10);
        let names: Vec<&str> = sectors.iter().map(|s| s.sector.as_str()).collect();
        assert_eq!(names, vec!["Financials", "Industrials", "Energy"]);
        assert_eq!(sectors[0].change, 3.0);
        assert_eq!(sectors[2].change, 0.0);

        assert_eq!(sector_changes(&t, 1).len(), 1);
    }

    #[test]
    fn test_sector_mean_of_huge_changes_is_finite() {
        let t = StockTable::new(vec![
            Column::from_values(labels::SECTOR, vec!["Energy", "Energy"]),
            Column::from_values(labels::CHANGE_PCT, vec![1e308, 1e308]),
        ])
        .unwrap();
        assert_eq!(sector_changes(&t, 10)[0].change, 1e308);
    }
}
