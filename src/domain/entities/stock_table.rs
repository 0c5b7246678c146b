//! In-memory screener snapshot.
//!
//! A [`StockTable`] is a column-oriented view of one provider fetch: each
//! column is keyed by its human-readable label ("Price", "Change %",
//! "Relative Strength Index (14)") and holds one [`Cell`] per ticker. Tables
//! are immutable once built, so a single table can back any number of
//! concurrent insight computations without locking.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// A single raw value as delivered by the provider.
///
/// Floats may be NaN or infinite; nothing is cleaned at this layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Null,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Finite numeric view of the cell. Text, null and non-finite floats
    /// yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) if v.is_finite() => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Convert a JSON scalar. Nested arrays and objects are kept as their
    /// JSON text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Int(*b as i64),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            other => Cell::Text(other.to_string()),
        }
    }

    /// Interpret a raw text field (CSV cell). Empty strings are null,
    /// integers and floats are recognised, anything else stays text.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Cell::Null;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Cell::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Cell::Float(f);
        }
        Cell::Text(raw.to_string())
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Int(v)
    }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self {
        Cell::Text(v.to_string())
    }
}

impl From<String> for Cell {
    fn from(v: String) -> Self {
        Cell::Text(v)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Cell::Null)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    /// Convenience constructor for a column built from anything convertible
    /// into a [`Cell`].
    pub fn from_values<T: Into<Cell>>(name: impl Into<String>, values: Vec<T>) -> Self {
        Self::new(name, values.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Finite numeric value per row (`None` for null/text/NaN/inf).
    pub fn numeric(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::as_f64).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StockTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
    rows: usize,
}

impl StockTable {
    /// Build a table from columns. All columns must have the same length
    /// and labels must be unique.
    pub fn new(columns: Vec<Column>) -> Result<Self, DomainError> {
        let rows = columns.first().map(Column::len).unwrap_or(0);
        let mut index = HashMap::with_capacity(columns.len());

        for (i, col) in columns.iter().enumerate() {
            if col.len() != rows {
                return Err(DomainError::InvalidInput(format!(
                    "Column '{}' has {} rows, expected {rows}",
                    col.name(),
                    col.len()
                )));
            }
            if index.insert(col.name().to_string(), i).is_some() {
                return Err(DomainError::InvalidInput(format!(
                    "Duplicate column label '{}'",
                    col.name()
                )));
            }
        }

        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from row-oriented records. The column set is the union
    /// of all record keys in first-seen order; keys a record lacks become
    /// [`Cell::Null`].
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut labels: Vec<String> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for record in records {
            for key in record.keys() {
                if !seen.contains_key(key) {
                    seen.insert(key.clone(), labels.len());
                    labels.push(key.clone());
                }
            }
        }

        let columns = labels
            .into_iter()
            .map(|label| {
                let cells = records
                    .iter()
                    .map(|r| r.get(&label).map(Cell::from_json).unwrap_or_default())
                    .collect();
                Column::new(label, cells)
            })
            .collect::<Vec<_>>();

        Self {
            rows: records.len(),
            index: seen,
            columns,
        }
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.index.get(label).map(|&i| &self.columns[i])
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::name)
    }

    pub fn row(&self, index: usize) -> Option<RowRef<'_>> {
        (index < self.rows).then_some(RowRef { table: self, index })
    }

    pub fn rows(&self) -> impl Iterator<Item = RowRef<'_>> {
        (0..self.rows).map(move |index| RowRef { table: self, index })
    }

    /// Finite numeric values of a column, or `None` if the column is absent.
    pub fn numeric(&self, label: &str) -> Option<Vec<Option<f64>>> {
        self.column(label).map(Column::numeric)
    }
}

/// Borrowed view of one row of a [`StockTable`].
#[derive(Debug, Clone, Copy)]
pub struct RowRef<'a> {
    table: &'a StockTable,
    index: usize,
}

impl<'a> RowRef<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell for `label`, or `None` when the table has no such column.
    pub fn get(&self, label: &str) -> Option<&'a Cell> {
        self.table.column(label).and_then(|c| c.get(self.index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ragged_columns_rejected() {
        let result = StockTable::new(vec![
            Column::from_values("Symbol", vec!["A", "B"]),
            Column::from_values("Price", vec![1.0]),
        ]);
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = StockTable::new(vec![
            Column::from_values("Price", vec![1.0]),
            Column::from_values("Price", vec![2.0]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_records_fills_missing_keys_with_null() {
        let records = vec![
            json!({"Symbol": "COMI", "Price": 45.5}),
            json!({"Symbol": "ORAS", "Sector": "Industrials"}),
        ];
        let records: Vec<Map<String, Value>> = records
            .into_iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect();

        let table = StockTable::from_records(&records);
        assert_eq!(table.len(), 2);
        assert_eq!(table.labels().collect::<Vec<_>>(), vec!["Price", "Symbol", "Sector"]);

        let second = table.row(1).unwrap();
        assert!(second.get("Price").unwrap().is_null());
        assert_eq!(second.get("Sector"), Some(&Cell::Text("Industrials".into())));
        assert!(second.get("Volume").is_none());
    }

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse(""), Cell::Null);
        assert_eq!(Cell::parse("42"), Cell::Int(42));
        assert_eq!(Cell::parse("2.5"), Cell::Float(2.5));
        assert_eq!(Cell::parse("Banking"), Cell::Text("Banking".into()));
        assert!(Cell::parse("nan").as_f64().is_none());
    }

    #[test]
    fn test_as_f64_rejects_non_finite() {
        assert_eq!(Cell::Float(f64::INFINITY).as_f64(), None);
        assert_eq!(Cell::Float(f64::NAN).as_f64(), None);
        assert_eq!(Cell::Int(3).as_f64(), Some(3.0));
        assert_eq!(Cell::Text("3".into()).as_f64(), None);
    }
}
