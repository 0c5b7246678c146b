use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::entities::stock_table::{Cell, Column, StockTable};
use crate::domain::ports::stock_provider::{ProviderError, StockProvider};
use crate::domain::values::labels::*;

const SCAN_URL: &str = "https://scanner.tradingview.com";
const RANGE: [usize; 2] = [0, 500];

/// Scanner field codes and the table labels each one fills. `close` backs
/// both "Price" and "Close"; performance fields feed both label families.
/// `name` is the ticker name and `description` the company's long name.
const FIELDS: &[(&str, &[&str])] = &[
    // Identity
    ("name", &[NAME]),
    ("description", &[DESCRIPTION]),
    ("country", &[COUNTRY]),
    ("currency", &[CURRENCY]),
    ("exchange", &[EXCHANGE]),
    ("industry", &[INDUSTRY]),
    ("sector", &[SECTOR]),
    ("submarket", &["Submarket"]),
    ("subtype", &["Subtype"]),
    ("type", &["Type"]),
    ("logoid", &["LogoID"]),
    // Price
    ("close", &[PRICE, "Close"]),
    ("open", &["Open"]),
    ("high", &["High"]),
    ("low", &["Low"]),
    ("change_abs", &["Change"]),
    ("change", &[CHANGE_PCT]),
    ("change|1M", &[CHANGE_1M_PCT]),
    ("change_from_open_abs", &["Change from Open"]),
    ("change_from_open", &["Change from Open %"]),
    ("gap", &["Gap %"]),
    // Volume
    ("volume", &[VOLUME]),
    ("Value.Traded", &["Volume Price"]),
    ("VWAP", &["Volume Weighted Average Price"]),
    ("relative_volume_10d_calc", &[RELATIVE_VOLUME]),
    ("relative_volume_intraday|5", &["Relative Volume at Time"]),
    // Performance
    ("Perf.W", &[WEEKLY_PERFORMANCE, PERF_WEEK]),
    ("Perf.1M", &[MONTHLY_PERFORMANCE, PERF_MONTH]),
    ("Perf.Y", &[YEARLY_PERFORMANCE, PERF_YEAR]),
    ("Perf.YTD", &["Performance (YTD)"]),
    ("Perf.5Y", &["Performance (5Y)"]),
    ("Perf.All", &["Performance (All)"]),
    ("Perf.3M", &["Performance (3M)"]),
    ("Perf.6M", &["Performance (6M)"]),
    // Highs and lows
    ("all_time_high", &["All Time High"]),
    ("all_time_low", &["All Time Low"]),
    ("price_52_week_high", &["52W High"]),
    ("price_52_week_low", &["52W Low"]),
    ("High.1M", &["1M High"]),
    ("Low.1M", &["1M Low"]),
    ("High.3M", &["3M High"]),
    ("Low.3M", &["3M Low"]),
    ("High.6M", &["6M High"]),
    ("Low.6M", &["6M Low"]),
    // Capitalization
    ("market_cap_basic", &[MARKET_CAP]),
    ("enterprise_value_fq", &["Enterprise Value"]),
    ("total_shares_outstanding_fundamental", &["Shares Outstanding"]),
    ("float_shares_outstanding", &["Shares Float"]),
    // Valuation
    ("price_earnings_ttm", &[PE_TTM]),
    ("price_book_ratio", &["Price to Book (FY)"]),
    ("price_book_fq", &[PB_MRQ]),
    ("price_sales_ratio", &["Price to Sales (FY)"]),
    ("price_revenue_ttm", &["Price to Revenue Ratio (TTM)"]),
    ("price_free_cash_flow_ttm", &["Price to Free Cash Flow (TTM)"]),
    ("enterprise_value_ebitda_ttm", &["Enterprise Value EBITDA (TTM)"]),
    // EPS
    ("basic_eps_net_income", &["Basic EPS (FY)"]),
    ("earnings_per_share_basic_ttm", &["Basic EPS (TTM)"]),
    ("last_annual_eps", &["EPS Diluted (FY)"]),
    ("earnings_per_share_fq", &["EPS Diluted (MRQ)"]),
    ("earnings_per_share_diluted_ttm", &["EPS Diluted (TTM)"]),
    ("earnings_per_share_forecast_next_fq", &["EPS Forecast (MRQ)"]),
    // Growth
    ("total_revenue_yoy_growth_fy", &["Revenue (Annual YoY Growth)"]),
    ("total_revenue_qoq_growth_fq", &["Revenue (Quarterly QoQ Growth)"]),
    ("total_revenue_yoy_growth_fq", &["Revenue (Quarterly YoY Growth)"]),
    ("total_revenue_yoy_growth_ttm", &[REVENUE_TTM_YOY]),
    ("earnings_per_share_diluted_yoy_growth_fy", &["EPS Diluted (Annual YoY Growth)"]),
    ("earnings_per_share_diluted_qoq_growth_fq", &["EPS Diluted (Quarterly QoQ Growth)"]),
    ("earnings_per_share_diluted_yoy_growth_fq", &["EPS Diluted (Quarterly YoY Growth)"]),
    ("earnings_per_share_diluted_yoy_growth_ttm", &[EPS_DILUTED_TTM_YOY]),
    ("ebitda_yoy_growth_fy", &["EBITDA (Annual YoY Growth)"]),
    ("ebitda_qoq_growth_fq", &["EBITDA (Quarterly QoQ Growth)"]),
    ("ebitda_yoy_growth_fq", &["EBITDA (Quarterly YoY Growth)"]),
    ("ebitda_yoy_growth_ttm", &[EBITDA_TTM_YOY]),
    // Margins
    ("gross_margin_fy", &["Gross Margin (FY)"]),
    ("gross_margin_ttm", &[GROSS_MARGIN_TTM]),
    ("operating_margin_fy", &["Operating Margin (FY)"]),
    ("operating_margin_ttm", &[OPERATING_MARGIN_TTM]),
    ("net_margin_fy", &["Net Margin (FY)"]),
    ("net_margin_ttm", &[NET_MARGIN_TTM]),
    ("pre_tax_margin_ttm", &["Pretax Margin (TTM)"]),
    ("free_cash_flow_margin_fy", &["Free Cash Flow Margin (FY)"]),
    ("free_cash_flow_margin_ttm", &["Free Cash Flow Margin (TTM)"]),
    // Returns
    ("return_on_assets", &["Return on Assets (TTM)"]),
    ("return_on_equity", &[ROE_TTM]),
    ("return_on_invested_capital", &["Return on Invested Capital (TTM)"]),
    // Debt
    ("debt_to_equity", &["Debt to Equity Ratio (MRQ)"]),
    ("current_ratio", &["Current Ratio (MRQ)"]),
    ("quick_ratio", &["Quick Ratio (MRQ)"]),
    // Dividends
    ("dividends_yield_current", &[DIVIDEND_YIELD_FWD]),
    ("dps_common_stock_prim_issue_fy", &[DPS_FY]),
    ("dps_common_stock_prim_issue_fq", &["Dividends per Share (MRQ)"]),
    ("dps_common_stock_prim_issue_yoy_growth_fy", &["Dividends per Share (Annual YoY Growth)"]),
    ("dividends_paid", &["Dividends Paid (FY)"]),
    // Oscillators
    ("RSI", &[RSI_14]),
    ("RSI7", &[RSI_7]),
    ("MACD.macd", &[MACD_LEVEL]),
    ("MACD.signal", &[MACD_SIGNAL]),
    ("Stoch.K", &["Stochastic %K (14, 3, 3)"]),
    ("Stoch.D", &["Stochastic %D (14, 3, 3)"]),
    ("Stoch.RSI.K", &["Stochastic RSI Fast (3, 3, 14, 14)"]),
    ("Stoch.RSI.D", &["Stochastic RSI Slow (3, 3, 14, 14)"]),
    ("W.R", &["Williams Percent Range (14)"]),
    ("ADX", &["Average Directional Index (14)"]),
    ("ADX+DI", &["Positive Directional Indicator (14)"]),
    ("ADX-DI", &["Negative Directional Indicator (14)"]),
    ("CCI20", &["Commodity Channel Index (20)"]),
    ("UO", &["Ultimate Oscillator (7, 14, 28)"]),
    ("AO", &["Awesome Oscillator"]),
    ("Mom", &[MOMENTUM_10]),
    ("ROC", &["Rate of Change (9)"]),
    ("BBPower", &["Bull Bear Power"]),
    // Moving averages
    ("SMA5", &["Simple Moving Average (5)"]),
    ("SMA10", &["Simple Moving Average (10)"]),
    ("SMA20", &["Simple Moving Average (20)"]),
    ("SMA30", &["Simple Moving Average (30)"]),
    ("SMA50", &["Simple Moving Average (50)"]),
    ("SMA100", &["Simple Moving Average (100)"]),
    ("SMA200", &["Simple Moving Average (200)"]),
    ("EMA5", &["Exponential Moving Average (5)"]),
    ("EMA10", &["Exponential Moving Average (10)"]),
    ("EMA20", &["Exponential Moving Average (20)"]),
    ("EMA30", &["Exponential Moving Average (30)"]),
    ("EMA50", &["Exponential Moving Average (50)"]),
    ("EMA100", &["Exponential Moving Average (100)"]),
    ("EMA200", &["Exponential Moving Average (200)"]),
    ("HullMA9", &["Hull Moving Average (9)"]),
    ("VWMA", &["Volume Weighted Moving Average (20)"]),
    // Bands and Ichimoku
    ("BB.upper", &["Bollinger Upper Band (20)"]),
    ("BB.lower", &["Bollinger Lower Band (20)"]),
    ("Ichimoku.CLine", &["Ichimoku Conversion Line (9, 26, 52, 26)"]),
    ("Ichimoku.BLine", &["Ichimoku Base Line (9, 26, 52, 26)"]),
    ("Ichimoku.Lead1", &["Ichimoku Leading Span A (9, 26, 52, 26)"]),
    ("Ichimoku.Lead2", &["Ichimoku Leading Span B (9, 26, 52, 26)"]),
    // Other technicals
    ("P.SAR", &["Parabolic SAR"]),
    ("ATR", &["Average True Range (14)"]),
    ("ADR", &["Average Day Range (14)"]),
    ("Volatility.D", &["Volatility"]),
    ("Volatility.W", &["Volatility Week"]),
    ("Volatility.M", &["Volatility Month"]),
    ("Aroon.Up", &["Aroon Up (14)"]),
    ("Aroon.Down", &["Aroon Down (14)"]),
    ("MoneyFlow", &["Money Flow (14)"]),
    ("ChaikinMoneyFlow", &["Chaikin Money Flow (20)"]),
    // Ratings
    ("Recommend.All", &[TECHNICAL_RATING]),
    ("Recommend.Other", &["Oscillators Rating"]),
    ("Recommend.MA", &["Moving Averages Rating"]),
    ("beta_1_year", &["1 Year Beta"]),
];

/// Live market screener. One POST returns up to 500 rows for the market.
pub struct ScreenerProvider {
    market: String,
    base_url: String,
    client: reqwest::Client,
}

impl ScreenerProvider {
    pub fn new(market: impl Into<String>) -> Self {
        Self::with_base_url(market, SCAN_URL)
    }

    pub fn with_base_url(market: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .user_agent(
                    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
                     AppleWebKit/537.36 (KHTML, like Gecko) \
                     Chrome/120.0.0.0 Safari/537.36",
                )
                .build()
                .unwrap_or_default(),
        }
    }

    fn request_body(&self) -> Value {
        let columns: Vec<&str> = FIELDS.iter().map(|(code, _)| *code).collect();
        json!({
            "filter": [],
            "options": { "lang": "en" },
            "markets": [self.market],
            "symbols": { "query": { "types": [] }, "tickers": [] },
            "columns": columns,
            "sort": { "sortBy": "market_cap_basic", "sortOrder": "desc" },
            "range": RANGE,
        })
    }
}

#[derive(Debug, serde::Deserialize)]
struct ScanResponse {
    #[serde(default, rename = "totalCount")]
    total_count: Option<u64>,
    #[serde(default)]
    data: Vec<ScanRow>,
}

#[derive(Debug, serde::Deserialize)]
struct ScanRow {
    s: String,
    #[serde(default)]
    d: Vec<Value>,
}

#[async_trait]
impl StockProvider for ScreenerProvider {
    fn name(&self) -> &str {
        "screener"
    }

    async fn fetch(&self) -> Result<StockTable, ProviderError> {
        let url = format!("{}/{}/scan", self.base_url.trim_end_matches('/'), self.market);

        let resp = self
            .client
            .post(&url)
            .json(&self.request_body())
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(ProviderError::Status {
                status: resp.status().as_u16(),
                market: self.market.clone(),
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        parse_scan(body)
    }
}

/// Turn a raw scan response into a table keyed by human-readable labels.
pub fn parse_scan(body: Value) -> Result<StockTable, ProviderError> {
    let response: ScanResponse =
        serde_json::from_value(body).map_err(|e| ProviderError::Malformed(format!("Bad scan response: {e}")))?;

    tracing::debug!(
        total = response.total_count.unwrap_or_default(),
        rows = response.data.len(),
        "scan response received"
    );

    let mut symbols = Vec::with_capacity(response.data.len());
    let mut values: Vec<Vec<Cell>> = vec![Vec::with_capacity(response.data.len()); FIELDS.len()];

    for row in &response.data {
        if row.d.len() != FIELDS.len() {
            return Err(ProviderError::Malformed(format!(
                "Row {} has {} fields, expected {}",
                row.s,
                row.d.len(),
                FIELDS.len()
            )));
        }
        // "EGX:COMI" -> "COMI"
        let ticker = row.s.rsplit(':').next().unwrap_or(&row.s);
        symbols.push(Cell::from(ticker));
        for (column, raw) in values.iter_mut().zip(&row.d) {
            column.push(Cell::from_json(raw));
        }
    }

    let mut columns = vec![Column::new(SYMBOL, symbols)];
    for ((_, labels), cells) in FIELDS.iter().zip(values) {
        for label in *labels {
            columns.push(Column::new(*label, cells.clone()));
        }
    }

    StockTable::new(columns).map_err(|e| ProviderError::Malformed(e.to_string()))
}
