//! Environment-driven settings.

use std::time::Duration;

use tracing::warn;

use crate::application::insights::DEFAULT_LIMIT;
use crate::domain::entities::records::ProjectionDefaults;

pub const DEFAULT_DB_PATH: &str = "./egx-insights.db";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MARKET: &str = "egypt";

/// Where stock tables come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    /// The built-in five-row dataset
    Sample,
    /// The live market screener
    Screener,
    /// A `.json` or `.csv` export on disk
    File(String),
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("provider must not be empty".into()),
            "sample" => Ok(ProviderKind::Sample),
            "screener" => Ok(ProviderKind::Screener),
            path => Ok(ProviderKind::File(path.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: String,
    pub limit: usize,
    pub fetch_timeout: Duration,
    pub provider: ProviderKind,
    pub market: String,
    pub defaults: ProjectionDefaults,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.into(),
            limit: DEFAULT_LIMIT,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            provider: ProviderKind::Screener,
            market: DEFAULT_MARKET.into(),
            defaults: ProjectionDefaults::default(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup. Malformed values keep the
    /// default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(path) = lookup("EGX_INSIGHTS_DB") {
            settings.db_path = path;
        }
        if let Some(limit) = parse_var(&lookup, "EGX_INSIGHTS_LIMIT") {
            settings.limit = limit;
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "EGX_INSIGHTS_FETCH_TIMEOUT_SECS") {
            settings.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(provider) = parse_var(&lookup, "EGX_INSIGHTS_PROVIDER") {
            settings.provider = provider;
        }
        if let Some(market) = lookup("EGX_INSIGHTS_MARKET") {
            settings.market = market.to_lowercase();
        }
        if let Some(country) = lookup("EGX_INSIGHTS_COUNTRY") {
            settings.defaults.country = country;
        }
        if let Some(currency) = lookup("EGX_INSIGHTS_CURRENCY") {
            settings.defaults.currency = currency;
        }
        if let Some(exchange) = lookup("EGX_INSIGHTS_EXCHANGE") {
            settings.defaults.exchange = exchange;
        }

        settings
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring malformed setting");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let s = Settings::from_lookup(lookup(&[]));
        assert_eq!(s.db_path, DEFAULT_DB_PATH);
        assert_eq!(s.limit, 10);
        assert_eq!(s.fetch_timeout, Duration::from_secs(10));
        assert_eq!(s.provider, ProviderKind::Screener);
        assert_eq!(s.defaults.country, "Egypt");
    }

    #[test]
    fn test_overrides() {
        let s = Settings::from_lookup(lookup(&[
            ("EGX_INSIGHTS_LIMIT", "5"),
            ("EGX_INSIGHTS_FETCH_TIMEOUT_SECS", "3"),
            ("EGX_INSIGHTS_PROVIDER", "data/egx.csv"),
            ("EGX_INSIGHTS_MARKET", "KSA"),
            ("EGX_INSIGHTS_CURRENCY", "SAR"),
        ]));
        assert_eq!(s.limit, 5);
        assert_eq!(s.fetch_timeout, Duration::from_secs(3));
        assert_eq!(s.provider, ProviderKind::File("data/egx.csv".into()));
        assert_eq!(s.market, "ksa");
        assert_eq!(s.defaults.currency, "SAR");
    }

    #[test]
    fn test_malformed_numbers_keep_defaults() {
        let s = Settings::from_lookup(lookup(&[
            ("EGX_INSIGHTS_LIMIT", "ten"),
            ("EGX_INSIGHTS_FETCH_TIMEOUT_SECS", "-1"),
        ]));
        assert_eq!(s.limit, DEFAULT_LIMIT);
        assert_eq!(s.fetch_timeout, Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("sample".parse::<ProviderKind>().unwrap(), ProviderKind::Sample);
        assert!("  ".parse::<ProviderKind>().is_err());
    }
}
