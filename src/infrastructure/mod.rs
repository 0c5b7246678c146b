pub mod providers;
pub mod sqlite;
