//! Raw and normalized market metrics
//!
//! The data provider returns a loosely-typed bag of fields; any field may be
//! absent or carry an unexpected shape (plain number, numeric string, or
//! Yahoo's `{"raw": .., "fmt": ..}` wrapper). [`normalize`] is the single
//! place where that bag is turned into a fixed-shape record with explicit
//! sentinels, so no downstream consumer ever has to guess at presence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback currency when the provider omits one
pub const DEFAULT_CURRENCY: &str = "USD";

/// One entry of the short recent-price-history series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosingPrice {
    /// Trading day
    pub date: NaiveDate,
    /// Closing price on that day
    pub close: f64,
}

/// Unvalidated response from the data provider
///
/// Owned transiently by the pipeline during a single request; never
/// persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Named fundamental/quote fields, as returned by the provider
    pub info: serde_json::Map<String, Value>,

    /// Short recent-price-history series, oldest first
    pub history: Vec<ClosingPrice>,
}

impl RawMetrics {
    /// The all-absent value substituted when the data fetch fails
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when no field and no history entry is present
    pub fn is_empty(&self) -> bool {
        self.info.is_empty() && self.history.is_empty()
    }
}

/// Fixed-shape metrics record with explicit "not available" sentinels
///
/// Every field the analytical framework references has a slot here; `None`
/// is the sentinel rendered as a literal `N/A` downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    /// Current price, resolved by priority: last history close (rounded to
    /// 2 decimal places), then the provider's direct quote field
    /// (unrounded), then the sentinel
    pub current_price: Option<f64>,
    /// Trading currency, defaulted when the provider omits it
    pub currency: String,
    /// Market capitalization
    pub market_cap: Option<f64>,
    /// Trailing price/earnings ratio
    pub trailing_pe: Option<f64>,
    /// Forward price/earnings ratio
    pub forward_pe: Option<f64>,
    /// PEG ratio
    pub peg_ratio: Option<f64>,
    /// Price/book ratio
    pub price_to_book: Option<f64>,
    /// Revenue growth, year over year
    pub revenue_growth: Option<f64>,
    /// 52-week high
    pub fifty_two_week_high: Option<f64>,
    /// 52-week low
    pub fifty_two_week_low: Option<f64>,
    /// Sector classification
    pub sector: Option<String>,
    /// Industry classification
    pub industry: Option<String>,
}

/// Normalize a raw provider response into the fixed metrics record
///
/// Pure and infallible: a missing or type-mismatched field yields the
/// sentinel for its slot rather than an error.
pub fn normalize(raw: &RawMetrics) -> NormalizedMetrics {
    let current_price = raw
        .history
        .last()
        .map(|entry| round_2dp(entry.close))
        .or_else(|| number_field(raw, "currentPrice"));

    NormalizedMetrics {
        current_price,
        currency: string_field(raw, "currency").unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        market_cap: number_field(raw, "marketCap"),
        trailing_pe: number_field(raw, "trailingPE"),
        forward_pe: number_field(raw, "forwardPE"),
        peg_ratio: number_field(raw, "pegRatio"),
        price_to_book: number_field(raw, "priceToBook"),
        revenue_growth: number_field(raw, "revenueGrowth"),
        fifty_two_week_high: number_field(raw, "fiftyTwoWeekHigh"),
        fifty_two_week_low: number_field(raw, "fiftyTwoWeekLow"),
        sector: string_field(raw, "sector"),
        industry: string_field(raw, "industry"),
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Defensive numeric extraction
///
/// Accepts a plain JSON number, a numeric string, or Yahoo's
/// `{"raw": <number>}` wrapper. Anything else is the sentinel.
fn number_field(raw: &RawMetrics, key: &str) -> Option<f64> {
    as_number(raw.info.get(key)?)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(obj) => obj.get("raw").and_then(Value::as_f64),
        _ => None,
    }
}

/// Defensive string extraction; empty strings count as absent
fn string_field(raw: &RawMetrics, key: &str) -> Option<String> {
    match raw.info.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_with(fields: Value) -> RawMetrics {
        let Value::Object(info) = fields else {
            panic!("test fields must be a JSON object");
        };
        RawMetrics {
            info,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_all_absent_yields_all_sentinels() {
        let normalized = normalize(&RawMetrics::empty());

        assert_eq!(normalized.current_price, None);
        assert_eq!(normalized.currency, DEFAULT_CURRENCY);
        assert_eq!(normalized.market_cap, None);
        assert_eq!(normalized.trailing_pe, None);
        assert_eq!(normalized.forward_pe, None);
        assert_eq!(normalized.peg_ratio, None);
        assert_eq!(normalized.price_to_book, None);
        assert_eq!(normalized.revenue_growth, None);
        assert_eq!(normalized.fifty_two_week_high, None);
        assert_eq!(normalized.fifty_two_week_low, None);
        assert_eq!(normalized.sector, None);
        assert_eq!(normalized.industry, None);
    }

    #[test]
    fn test_history_close_wins_over_direct_quote_and_is_rounded() {
        let mut raw = raw_with(json!({ "currentPrice": 999.123456 }));
        raw.history = vec![
            ClosingPrice {
                date: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
                close: 181.001,
            },
            ClosingPrice {
                date: NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
                close: 182.4567,
            },
        ];

        let normalized = normalize(&raw);
        assert_eq!(normalized.current_price, Some(182.46));
    }

    #[test]
    fn test_direct_quote_used_unrounded_when_history_empty() {
        let raw = raw_with(json!({ "currentPrice": 187.4299 }));

        let normalized = normalize(&raw);
        assert_eq!(normalized.current_price, Some(187.4299));
    }

    #[test]
    fn test_currency_defaults_to_usd() {
        let with_currency = raw_with(json!({ "currency": "EUR" }));
        assert_eq!(normalize(&with_currency).currency, "EUR");

        let without_currency = raw_with(json!({ "marketCap": 1.0 }));
        assert_eq!(normalize(&without_currency).currency, "USD");
    }

    #[test]
    fn test_numbers_pass_through_unrounded() {
        let raw = raw_with(json!({
            "trailingPE": 63.8912345,
            "revenueGrowth": 0.2237,
        }));

        let normalized = normalize(&raw);
        assert_eq!(normalized.trailing_pe, Some(63.8912345));
        assert_eq!(normalized.revenue_growth, Some(0.2237));
    }

    #[test]
    fn test_wrapped_and_stringly_numbers() {
        let raw = raw_with(json!({
            "marketCap": { "raw": 4.5e12, "fmt": "4.5T" },
            "forwardPE": "31.25",
        }));

        let normalized = normalize(&raw);
        assert_eq!(normalized.market_cap, Some(4.5e12));
        assert_eq!(normalized.forward_pe, Some(31.25));
    }

    #[test]
    fn test_malformed_fields_yield_sentinels() {
        let raw = raw_with(json!({
            "trailingPE": "not a number",
            "pegRatio": null,
            "priceToBook": [1.0, 2.0],
            "sector": 42,
            "industry": "",
        }));

        let normalized = normalize(&raw);
        assert_eq!(normalized.trailing_pe, None);
        assert_eq!(normalized.peg_ratio, None);
        assert_eq!(normalized.price_to_book, None);
        assert_eq!(normalized.sector, None);
        assert_eq!(normalized.industry, None);
    }

    #[test]
    fn test_full_payload() {
        let mut raw = raw_with(json!({
            "currentPrice": 182.30,
            "currency": "USD",
            "marketCap": 4.45e12,
            "trailingPE": 63.2,
            "forwardPE": 31.1,
            "pegRatio": 1.12,
            "priceToBook": 51.7,
            "revenueGrowth": 0.62,
            "fiftyTwoWeekHigh": 212.19,
            "fiftyTwoWeekLow": 86.62,
            "sector": "Technology",
            "industry": "Semiconductors",
        }));
        raw.history = vec![ClosingPrice {
            date: NaiveDate::from_ymd_opt(2025, 11, 21).unwrap(),
            close: 182.4567,
        }];

        let normalized = normalize(&raw);
        assert_eq!(normalized.current_price, Some(182.46));
        assert_eq!(normalized.sector.as_deref(), Some("Technology"));
        assert_eq!(normalized.industry.as_deref(), Some("Semiconductors"));
        assert_eq!(normalized.fifty_two_week_high, Some(212.19));
        assert_eq!(normalized.fifty_two_week_low, Some(86.62));
    }
}
