pub mod aggregate;
pub mod coercion;
pub mod labels;
