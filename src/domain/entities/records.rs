//! Fixed-schema projections of a screener row.
//!
//! [`SummaryRecord`] backs stock listings, [`DetailRecord`] backs the
//! single-stock view. Every field is always present: numerics default to
//! `0`, strings to `""`, except country/currency/exchange which default to
//! the configured market (see [`ProjectionDefaults`]).

use serde::{Deserialize, Serialize};

use crate::domain::entities::stock_table::RowRef;
use crate::domain::values::coercion::{safe_float, safe_int, safe_string};
use crate::domain::values::labels;

/// Defaults for identity strings a screener export may omit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDefaults {
    pub country: String,
    pub currency: String,
    pub exchange: String,
}

impl Default for ProjectionDefaults {
    fn default() -> Self {
        Self {
            country: "Egypt".into(),
            currency: "EGP".into(),
            exchange: "EGX".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub symbol: String,
    pub name: String,
    pub price: f64,
    pub change_percent: f64,
    pub volume: i64,
    pub market_capitalization: f64,
    pub price_to_earnings_ratio_ttm: f64,
    pub technical_rating: f64,
    pub weekly_performance: f64,
    pub monthly_performance: f64,
    pub yearly_performance: f64,
    pub dividend_yield_forward: f64,
    pub sector: String,
    pub industry: String,
    pub country: String,
    pub currency: String,
    pub exchange: String,
}

impl SummaryRecord {
    pub fn from_row(row: RowRef<'_>, defaults: &ProjectionDefaults) -> Self {
        let f = |label: &str| safe_float(row.get(label), 0.0);
        let s = |label: &str, default: &str| safe_string(row.get(label), default);

        Self {
            symbol: s(labels::SYMBOL, ""),
            name: s(labels::NAME, ""),
            price: f(labels::PRICE),
            change_percent: f(labels::CHANGE_PCT),
            volume: safe_int(row.get(labels::VOLUME), 0),
            market_capitalization: f(labels::MARKET_CAP),
            price_to_earnings_ratio_ttm: f(labels::PE_TTM),
            technical_rating: f(labels::TECHNICAL_RATING),
            weekly_performance: f(labels::PERF_WEEK),
            monthly_performance: f(labels::PERF_MONTH),
            yearly_performance: f(labels::PERF_YEAR),
            dividend_yield_forward: f(labels::DIVIDEND_YIELD_FWD),
            sector: s(labels::SECTOR, ""),
            industry: s(labels::INDUSTRY, ""),
            country: s(labels::COUNTRY, &defaults.country),
            currency: s(labels::CURRENCY, &defaults.currency),
            exchange: s(labels::EXCHANGE, &defaults.exchange),
        }
    }
}

/// Generates [`DetailRecord`] and its row projection from one catalogue of
/// `field: Kind = "Screener Label"` entries, so the struct and the label map
/// cannot drift apart.
macro_rules! detail_record {
    (@ty Float) => { f64 };
    (@ty Int) => { i64 };
    (@ty Text) => { String };
    (@ty Country) => { String };
    (@ty Currency) => { String };
    (@ty Exchange) => { String };

    (@get Float, $row:ident, $label:literal, $d:ident) => { safe_float($row.get($label), 0.0) };
    (@get Int, $row:ident, $label:literal, $d:ident) => { safe_int($row.get($label), 0) };
    (@get Text, $row:ident, $label:literal, $d:ident) => { safe_string($row.get($label), "") };
    (@get Country, $row:ident, $label:literal, $d:ident) => { safe_string($row.get($label), &$d.country) };
    (@get Currency, $row:ident, $label:literal, $d:ident) => { safe_string($row.get($label), &$d.currency) };
    (@get Exchange, $row:ident, $label:literal, $d:ident) => { safe_string($row.get($label), &$d.exchange) };

    ( $( $field:ident : $kind:ident = $label:literal ),* $(,)? ) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct DetailRecord {
            $( pub $field: detail_record!(@ty $kind), )*
        }

        impl DetailRecord {
            /// `(field, screener label)` for every field, in output order.
            pub const FIELDS: &'static [(&'static str, &'static str)] =
                &[ $( (stringify!($field), $label) ),* ];

            pub fn from_row(row: RowRef<'_>, defaults: &ProjectionDefaults) -> Self {
                Self {
                    $( $field: detail_record!(@get $kind, row, $label, defaults), )*
                }
            }
        }
    };
}

detail_record! {
    // Identity
    symbol: Text = "Symbol",
    name: Text = "Name",
    description: Text = "Description",
    country: Country = "Country",
    currency: Currency = "Currency",
    exchange: Exchange = "Exchange",
    industry: Text = "Industry",
    sector: Text = "Sector",
    submarket: Text = "Submarket",
    subtype: Text = "Subtype",
    type_field: Text = "Type",
    logoid: Text = "LogoID",

    // Price
    price: Float = "Price",
    open_price: Float = "Open",
    high: Float = "High",
    low: Float = "Low",
    close_price: Float = "Close",
    change: Float = "Change",
    change_percent: Float = "Change %",
    change_from_open: Float = "Change from Open",
    change_from_open_percent: Float = "Change from Open %",
    gap_percent: Float = "Gap %",

    // Volume
    volume: Int = "Volume",
    volume_price: Float = "Volume Price",
    volume_weighted_average_price: Float = "Volume Weighted Average Price",
    relative_volume: Float = "Relative Volume",
    relative_volume_at_time: Float = "Relative Volume at Time",

    // Performance
    weekly_performance: Float = "Performance (Week)",
    monthly_performance: Float = "Performance (Month)",
    yearly_performance: Float = "Performance (Year)",
    ytd_performance: Float = "Performance (YTD)",
    five_year_performance: Float = "Performance (5Y)",
    all_time_performance: Float = "Performance (All)",
    three_month_performance: Float = "Performance (3M)",
    six_month_performance: Float = "Performance (6M)",

    // Highs and lows
    all_time_high: Float = "All Time High",
    all_time_low: Float = "All Time Low",
    fifty_two_week_high: Float = "52W High",
    fifty_two_week_low: Float = "52W Low",
    one_month_high: Float = "1M High",
    one_month_low: Float = "1M Low",
    three_month_high: Float = "3M High",
    three_month_low: Float = "3M Low",
    six_month_high: Float = "6M High",
    six_month_low: Float = "6M Low",

    // Capitalization
    market_capitalization: Float = "Market Capitalization",
    enterprise_value: Float = "Enterprise Value",
    shares_outstanding: Float = "Shares Outstanding",
    shares_float: Float = "Shares Float",

    // Valuation
    price_to_earnings_ratio_ttm: Float = "Price to Earnings Ratio (TTM)",
    price_to_book_fy: Float = "Price to Book (FY)",
    price_to_book_mrq: Float = "Price to Book (MRQ)",
    price_to_sales_fy: Float = "Price to Sales (FY)",
    price_to_revenue_ratio_ttm: Float = "Price to Revenue Ratio (TTM)",
    price_to_free_cash_flow_ttm: Float = "Price to Free Cash Flow (TTM)",
    enterprise_value_ebitda_ttm: Float = "Enterprise Value EBITDA (TTM)",

    // EPS
    basic_eps_fy: Float = "Basic EPS (FY)",
    basic_eps_ttm: Float = "Basic EPS (TTM)",
    eps_diluted_fy: Float = "EPS Diluted (FY)",
    eps_diluted_mrq: Float = "EPS Diluted (MRQ)",
    eps_diluted_ttm: Float = "EPS Diluted (TTM)",
    eps_forecast_mrq: Float = "EPS Forecast (MRQ)",

    // Growth
    revenue_annual_yoy_growth: Float = "Revenue (Annual YoY Growth)",
    revenue_quarterly_qoq_growth: Float = "Revenue (Quarterly QoQ Growth)",
    revenue_quarterly_yoy_growth: Float = "Revenue (Quarterly YoY Growth)",
    revenue_ttm_yoy_growth: Float = "Revenue (TTM YoY Growth)",
    eps_diluted_annual_yoy_growth: Float = "EPS Diluted (Annual YoY Growth)",
    eps_diluted_quarterly_qoq_growth: Float = "EPS Diluted (Quarterly QoQ Growth)",
    eps_diluted_quarterly_yoy_growth: Float = "EPS Diluted (Quarterly YoY Growth)",
    eps_diluted_ttm_yoy_growth: Float = "EPS Diluted (TTM YoY Growth)",
    ebitda_annual_yoy_growth: Float = "EBITDA (Annual YoY Growth)",
    ebitda_quarterly_qoq_growth: Float = "EBITDA (Quarterly QoQ Growth)",
    ebitda_quarterly_yoy_growth: Float = "EBITDA (Quarterly YoY Growth)",
    ebitda_ttm_yoy_growth: Float = "EBITDA (TTM YoY Growth)",

    // Margins
    gross_margin_fy: Float = "Gross Margin (FY)",
    gross_margin_ttm: Float = "Gross Margin (TTM)",
    operating_margin_fy: Float = "Operating Margin (FY)",
    operating_margin_ttm: Float = "Operating Margin (TTM)",
    net_margin_fy: Float = "Net Margin (FY)",
    net_margin_ttm: Float = "Net Margin (TTM)",
    pretax_margin_ttm: Float = "Pretax Margin (TTM)",
    free_cash_flow_margin_fy: Float = "Free Cash Flow Margin (FY)",
    free_cash_flow_margin_ttm: Float = "Free Cash Flow Margin (TTM)",

    // Returns
    return_on_assets_ttm: Float = "Return on Assets (TTM)",
    return_on_equity_ttm: Float = "Return on Equity (TTM)",
    return_on_invested_capital_ttm: Float = "Return on Invested Capital (TTM)",

    // Debt
    debt_to_equity_ratio_mrq: Float = "Debt to Equity Ratio (MRQ)",
    current_ratio_mrq: Float = "Current Ratio (MRQ)",
    quick_ratio_mrq: Float = "Quick Ratio (MRQ)",

    // Dividends
    dividend_yield_forward: Float = "Dividend Yield Forward",
    dividends_per_share_fy: Float = "Dividends per Share (FY)",
    dividends_per_share_mrq: Float = "Dividends per Share (MRQ)",
    dividends_per_share_annual_yoy_growth: Float = "Dividends per Share (Annual YoY Growth)",
    dividends_paid_fy: Float = "Dividends Paid (FY)",

    // Oscillators and indicators
    relative_strength_index_14: Float = "Relative Strength Index (14)",
    relative_strength_index_7: Float = "Relative Strength Index (7)",
    macd_level_12_26: Float = "MACD Level (12, 26)",
    macd_signal_12_26: Float = "MACD Signal (12, 26)",
    stochastic_k_14_3_3: Float = "Stochastic %K (14, 3, 3)",
    stochastic_d_14_3_3: Float = "Stochastic %D (14, 3, 3)",
    stochastic_rsi_fast_3_3_14_14: Float = "Stochastic RSI Fast (3, 3, 14, 14)",
    stochastic_rsi_slow_3_3_14_14: Float = "Stochastic RSI Slow (3, 3, 14, 14)",
    williams_percent_range_14: Float = "Williams Percent Range (14)",
    average_directional_index_14: Float = "Average Directional Index (14)",
    positive_directional_indicator_14: Float = "Positive Directional Indicator (14)",
    negative_directional_indicator_14: Float = "Negative Directional Indicator (14)",
    commodity_channel_index_20: Float = "Commodity Channel Index (20)",
    ultimate_oscillator_7_14_28: Float = "Ultimate Oscillator (7, 14, 28)",
    awesome_oscillator: Float = "Awesome Oscillator",
    momentum_10: Float = "Momentum (10)",
    rate_of_change_9: Float = "Rate of Change (9)",
    bull_bear_power: Float = "Bull Bear Power",

    // Moving averages
    simple_moving_average_5: Float = "Simple Moving Average (5)",
    simple_moving_average_10: Float = "Simple Moving Average (10)",
    simple_moving_average_20: Float = "Simple Moving Average (20)",
    simple_moving_average_30: Float = "Simple Moving Average (30)",
    simple_moving_average_50: Float = "Simple Moving Average (50)",
    simple_moving_average_100: Float = "Simple Moving Average (100)",
    simple_moving_average_200: Float = "Simple Moving Average (200)",
    exponential_moving_average_5: Float = "Exponential Moving Average (5)",
    exponential_moving_average_10: Float = "Exponential Moving Average (10)",
    exponential_moving_average_20: Float = "Exponential Moving Average (20)",
    exponential_moving_average_30: Float = "Exponential Moving Average (30)",
    exponential_moving_average_50: Float = "Exponential Moving Average (50)",
    exponential_moving_average_100: Float = "Exponential Moving Average (100)",
    exponential_moving_average_200: Float = "Exponential Moving Average (200)",
    hull_moving_average_9: Float = "Hull Moving Average (9)",
    volume_weighted_moving_average_20: Float = "Volume Weighted Moving Average (20)",

    // Bands
    bollinger_upper_band_20: Float = "Bollinger Upper Band (20)",
    bollinger_lower_band_20: Float = "Bollinger Lower Band (20)",

    // Ichimoku cloud
    ichimoku_conversion_line_9_26_52_26: Float = "Ichimoku Conversion Line (9, 26, 52, 26)",
    ichimoku_base_line_9_26_52_26: Float = "Ichimoku Base Line (9, 26, 52, 26)",
    ichimoku_leading_span_a_9_26_52_26: Float = "Ichimoku Leading Span A (9, 26, 52, 26)",
    ichimoku_leading_span_b_9_26_52_26: Float = "Ichimoku Leading Span B (9, 26, 52, 26)",

    // Other technicals
    parabolic_sar: Float = "Parabolic SAR",
    average_true_range_14: Float = "Average True Range (14)",
    average_day_range_14: Float = "Average Day Range (14)",
    volatility: Float = "Volatility",
    volatility_week: Float = "Volatility Week",
    volatility_month: Float = "Volatility Month",
    aroon_up_14: Float = "Aroon Up (14)",
    aroon_down_14: Float = "Aroon Down (14)",
    money_flow_14: Float = "Money Flow (14)",
    chaikin_money_flow_20: Float = "Chaikin Money Flow (20)",

    // Ratings
    technical_rating: Float = "Technical Rating",
    oscillators_rating: Float = "Oscillators Rating",
    moving_averages_rating: Float = "Moving Averages Rating",

    // Beta
    one_year_beta: Float = "1 Year Beta",
}
