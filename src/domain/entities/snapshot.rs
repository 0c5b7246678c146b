use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::domain::values::coercion::RankedValue;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_market_cap: f64,
    pub average_pe_ratio: f64,
    pub average_volume: f64,
}

/// One entry of a ranked view: the view's display columns for a single
/// stock, in display order. Columns the source table lacked are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedStock {
    fields: Vec<(String, RankedValue)>,
}

impl RankedStock {
    pub fn new(fields: Vec<(String, RankedValue)>) -> Self {
        Self { fields }
    }

    pub fn get(&self, label: &str) -> Option<&RankedValue> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    /// Shorthand for the "Symbol" text field.
    pub fn symbol(&self) -> Option<&str> {
        self.get("Symbol").and_then(RankedValue::as_str)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for RankedStock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (label, value) in &self.fields {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RankedStock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RankedStockVisitor;

        impl<'de> Visitor<'de> for RankedStockVisitor {
            type Value = RankedStock;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of column label to number, string or null")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, raw)) = access.next_entry::<String, serde_json::Value>()? {
                    let value = match raw {
                        serde_json::Value::Number(n) => {
                            n.as_f64().map(RankedValue::Number).unwrap_or(RankedValue::Null)
                        }
                        serde_json::Value::String(s) => RankedValue::Text(s),
                        serde_json::Value::Null => RankedValue::Null,
                        other => RankedValue::Text(other.to_string()),
                    };
                    fields.push((label, value));
                }
                Ok(RankedStock { fields })
            }
        }

        deserializer.deserialize_map(RankedStockVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorChange {
    pub sector: String,
    pub change: f64,
}

/// Every derived view for one table, computed in a single pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSnapshot {
    pub timestamp: DateTime<Utc>,
    pub total_stocks: usize,
    pub market_overview: MarketOverview,
    pub top_bullish: Vec<RankedStock>,
    pub top_bearish: Vec<RankedStock>,
    pub best_short_term: Vec<RankedStock>,
    pub best_medium_term: Vec<RankedStock>,
    pub best_long_term: Vec<RankedStock>,
    pub overpriced: Vec<RankedStock>,
    pub underpriced: Vec<RankedStock>,
    pub volume_leaders: Vec<RankedStock>,
    pub momentum_stocks: Vec<RankedStock>,
    pub dividend_stocks: Vec<RankedStock>,
    pub growth_stocks: Vec<RankedStock>,
    pub top_positive_movers: Vec<RankedStock>,
    pub top_negative_movers: Vec<RankedStock>,
    pub top_sectors_change: Vec<SectorChange>,
}

impl InsightSnapshot {
    /// Snapshot of an empty table: zero overview, every view empty.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            total_stocks: 0,
            market_overview: MarketOverview::default(),
            top_bullish: vec![],
            top_bearish: vec![],
            best_short_term: vec![],
            best_medium_term: vec![],
            best_long_term: vec![],
            overpriced: vec![],
            underpriced: vec![],
            volume_leaders: vec![],
            momentum_stocks: vec![],
            dividend_stocks: vec![],
            growth_stocks: vec![],
            top_positive_movers: vec![],
            top_negative_movers: vec![],
            top_sectors_change: vec![],
        }
    }

    /// `(view name, entries)` for every ranked stock view, in output order.
    pub fn ranked_views(&self) -> [(&'static str, &[RankedStock]); 13] {
        [
            ("top_bullish", self.top_bullish.as_slice()),
            ("top_bearish", self.top_bearish.as_slice()),
            ("best_short_term", self.best_short_term.as_slice()),
            ("best_medium_term", self.best_medium_term.as_slice()),
            ("best_long_term", self.best_long_term.as_slice()),
            ("overpriced", self.overpriced.as_slice()),
            ("underpriced", self.underpriced.as_slice()),
            ("volume_leaders", self.volume_leaders.as_slice()),
            ("momentum_stocks", self.momentum_stocks.as_slice()),
            ("dividend_stocks", self.dividend_stocks.as_slice()),
            ("growth_stocks", self.growth_stocks.as_slice()),
            ("top_positive_movers", self.top_positive_movers.as_slice()),
            ("top_negative_movers", self.top_negative_movers.as_slice()),
        ]
    }
}
