pub mod file;
pub mod sample;
pub mod screener;

pub use file::FileProvider;
pub use sample::SampleProvider;
pub use screener::ScreenerProvider;
