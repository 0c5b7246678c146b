pub mod snapshot_repository;
pub mod stock_provider;
