//! Screener column labels used by the scoring and ranking views.
//!
//! The detail projection carries its own full label catalogue next to the
//! record it fills; these are the labels the insight views key on.

pub const SYMBOL: &str = "Symbol";
pub const NAME: &str = "Name";
pub const DESCRIPTION: &str = "Description";
pub const COUNTRY: &str = "Country";
pub const CURRENCY: &str = "Currency";
pub const EXCHANGE: &str = "Exchange";
pub const SECTOR: &str = "Sector";
pub const INDUSTRY: &str = "Industry";

pub const PRICE: &str = "Price";
pub const CHANGE_PCT: &str = "Change %";
pub const CHANGE_1M_PCT: &str = "Change 1M, %";
pub const VOLUME: &str = "Volume";
pub const RELATIVE_VOLUME: &str = "Relative Volume";
pub const MARKET_CAP: &str = "Market Capitalization";

pub const PE_TTM: &str = "Price to Earnings Ratio (TTM)";
pub const PB_MRQ: &str = "Price to Book (MRQ)";

pub const TECHNICAL_RATING: &str = "Technical Rating";
pub const RSI_14: &str = "Relative Strength Index (14)";
pub const RSI_7: &str = "Relative Strength Index (7)";
pub const MACD_LEVEL: &str = "MACD Level (12, 26)";
pub const MACD_SIGNAL: &str = "MACD Signal (12, 26)";
pub const MOMENTUM_10: &str = "Momentum (10)";

pub const DIVIDEND_YIELD_FWD: &str = "Dividend Yield Forward";
pub const DPS_FY: &str = "Dividends per Share (FY)";

pub const ROE_TTM: &str = "Return on Equity (TTM)";
pub const EPS_DILUTED_TTM_YOY: &str = "EPS Diluted (TTM YoY Growth)";
pub const REVENUE_TTM_YOY: &str = "Revenue (TTM YoY Growth)";
pub const EBITDA_TTM_YOY: &str = "EBITDA (TTM YoY Growth)";

pub const GROSS_MARGIN_TTM: &str = "Gross Margin (TTM)";
pub const OPERATING_MARGIN_TTM: &str = "Operating Margin (TTM)";
pub const NET_MARGIN_TTM: &str = "Net Margin (TTM)";

// Ranked views key on these.
pub const WEEKLY_PERFORMANCE: &str = "Weekly Performance";
pub const MONTHLY_PERFORMANCE: &str = "Monthly Performance";
pub const YEARLY_PERFORMANCE: &str = "Yearly Performance";

// Summary and detail projections read these.
pub const PERF_WEEK: &str = "Performance (Week)";
pub const PERF_MONTH: &str = "Performance (Month)";
pub const PERF_YEAR: &str = "Performance (Year)";
