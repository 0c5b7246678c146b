use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::entities::stock_table::{Cell, Column, StockTable};
use crate::domain::ports::stock_provider::{ProviderError, StockProvider};

/// Loads a screener export from disk: `.json` (array of records) or `.csv`
/// (header row of labels).
pub struct FileProvider {
    path: PathBuf,
    name: String,
}

impl FileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("file:{}", path.display());
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StockProvider for FileProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        let ext = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let parse: fn(&str) -> Result<StockTable, ProviderError> = match ext.as_deref() {
            Some("json") => parse_json,
            Some("csv") => parse_csv,
            _ => return Err(ProviderError::Unsupported(self.path.display().to_string())),
        };

        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| ProviderError::Source {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })?;

        parse(&text)
    }
}

pub fn parse_json(text: &str) -> Result<StockTable, ProviderError> {
    let records: Vec<Map<String, Value>> =
        serde_json::from_str(text).map_err(|e| ProviderError::Malformed(format!("Expected an array of records: {e}")))?;
    Ok(StockTable::from_records(&records))
}

pub fn parse_csv(text: &str) -> Result<StockTable, ProviderError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ProviderError::Malformed(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| ProviderError::Malformed(format!("CSV row {}: {e}", line + 1)))?;
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            column.push(Cell::parse(field));
        }
    }

    let columns = headers
        .iter()
        .zip(columns)
        .map(|(label, cells)| Column::new(label, cells))
        .collect();

    StockTable::new(columns).map_err(|e| ProviderError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_types_cells() {
        let table = parse_csv("Symbol,Price,Sector\nCOMI,45.5,Financial Services\nORAS,,Industrials\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.numeric("Price").unwrap(), vec![Some(45.5), None]);
        assert_eq!(table.row(1).and_then(|r| r.get("Symbol")).and_then(|c| c.as_str()), Some("ORAS"));
    }

    #[test]
    fn test_parse_csv_ragged_row_fails() {
        assert!(matches!(parse_csv("Symbol,Price\nCOMI\n"), Err(ProviderError::Malformed(_))));
    }

    #[test]
    fn test_parse_json_requires_array() {
        assert!(parse_json(r#"{"Symbol": "COMI"}"#).is_err());
        let table = parse_json(r#"[{"Symbol": "COMI", "Price": 45.5}]"#).unwrap();
        assert_eq!(table.numeric("Price").unwrap(), vec![Some(45.5)]);
    }
}
