pub mod fetch;
pub mod history;
pub mod insights;
pub mod listing;
pub mod projection;
pub mod ranking;
pub mod scoring;
