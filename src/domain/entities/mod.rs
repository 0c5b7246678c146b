pub mod records;
pub mod snapshot;
pub mod stock_table;
