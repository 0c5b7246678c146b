//! Listing and detail projections of a screener table.

use crate::domain::entities::records::{DetailRecord, ProjectionDefaults, SummaryRecord};
use crate::domain::entities::stock_table::StockTable;
use crate::domain::error::DomainError;
use crate::domain::values::coercion::safe_string;
use crate::domain::values::labels;

/// One summary record per row, in table order.
pub fn to_summary_records(table: &StockTable, defaults: &ProjectionDefaults) -> Vec<SummaryRecord> {
    table
        .rows()
        .map(|row| SummaryRecord::from_row(row, defaults))
        .collect()
}

/// Detail record for the first row whose symbol equals `symbol` exactly.
///
/// The comparison is case-sensitive; callers normalise the query (the CLI
/// upper-cases it) before calling.
pub fn to_detail_record(
    table: &StockTable,
    symbol: &str,
    defaults: &ProjectionDefaults,
) -> Result<DetailRecord, DomainError> {
    table
        .rows()
        .find(|row| {
            let cell = row.get(labels::SYMBOL);
            cell.is_some_and(|c| !c.is_null()) && safe_string(cell, "") == symbol
        })
        .map(|row| DetailRecord::from_row(row, defaults))
        .ok_or_else(|| DomainError::SymbolNotFound(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::stock_table::{Cell, Column};

    fn table() -> StockTable {
        StockTable::new(vec![
            Column::from_values(labels::SYMBOL, vec!["COMI", "ORAS"]),
            Column::new(labels::PRICE, vec![Cell::Float(45.5), Cell::Float(f64::INFINITY)]),
            Column::new(labels::VOLUME, vec![Cell::Float(1_500_000.0), Cell::Null]),
        ])
        .unwrap()
    }

    #[test]
    fn test_summary_defaults() {
        let records = to_summary_records(&table(), &ProjectionDefaults::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].volume, 1_500_000);
        assert_eq!(records[1].price, 0.0);
        assert_eq!(records[1].volume, 0);
        assert_eq!(records[1].name, "");
        assert_eq!(records[1].exchange, "EGX");
    }

    #[test]
    fn test_summary_of_empty_table() {
        assert!(to_summary_records(&StockTable::empty(), &ProjectionDefaults::default()).is_empty());
    }

    #[test]
    fn test_detail_lookup_is_case_sensitive() {
        let defaults = ProjectionDefaults::default();
        let t = table();
        assert_eq!(to_detail_record(&t, "COMI", &defaults).unwrap().price, 45.5);
        assert!(matches!(
            to_detail_record(&t, "comi", &defaults),
            Err(DomainError::SymbolNotFound(s)) if s == "comi"
        ));
    }

    #[test]
    fn test_null_symbol_never_matches_empty_query() {
        let t = StockTable::new(vec![Column::new(labels::SYMBOL, vec![Cell::Null])]).unwrap();
        assert!(to_detail_record(&t, "", &ProjectionDefaults::default()).is_err());
    }
}
