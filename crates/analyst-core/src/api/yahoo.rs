//! Yahoo Finance market data client

use crate::api::MarketDataProvider;
use crate::error::{ReportError, Result};
use crate::metrics::{ClosingPrice, RawMetrics};
use crate::symbol::TickerSymbol;
use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use yahoo_finance_api as yahoo;

const QUOTE_SUMMARY_BASE: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const QUOTE_SUMMARY_MODULES: &str =
    "price,summaryDetail,defaultKeyStatistics,financialData,assetProfile";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where each tracked field lives in the quoteSummary payload, probed in
/// order until one module has it
const FIELD_SOURCES: &[(&str, &[(&str, &str)])] = &[
    ("currentPrice", &[
        ("financialData", "currentPrice"),
        ("price", "regularMarketPrice"),
    ]),
    ("currency", &[("price", "currency")]),
    ("marketCap", &[("price", "marketCap")]),
    ("trailingPE", &[("summaryDetail", "trailingPE")]),
    ("forwardPE", &[("summaryDetail", "forwardPE")]),
    ("pegRatio", &[("defaultKeyStatistics", "pegRatio")]),
    ("priceToBook", &[("defaultKeyStatistics", "priceToBook")]),
    ("revenueGrowth", &[("financialData", "revenueGrowth")]),
    ("fiftyTwoWeekHigh", &[("summaryDetail", "fiftyTwoWeekHigh")]),
    ("fiftyTwoWeekLow", &[("summaryDetail", "fiftyTwoWeekLow")]),
    ("sector", &[("assetProfile", "sector")]),
    ("industry", &[("assetProfile", "industry")]),
];

/// Yahoo Finance market data client
///
/// Combines the quoteSummary endpoint (fundamentals bag) with the chart API
/// (short price-history series). One of the two halves failing degrades the
/// result to whatever was fetched; only total failure is an error.
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    client: reqwest::Client,
}

impl YahooFinanceClient {
    /// Create a new client with the default request timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Fetch the fundamentals bag from the quoteSummary endpoint
    async fn fetch_summary(&self, symbol: &TickerSymbol) -> Result<serde_json::Map<String, Value>> {
        let url = format!("{QUOTE_SUMMARY_BASE}/{symbol}");
        let response = self
            .client
            .get(&url)
            .query(&[("modules", QUOTE_SUMMARY_MODULES)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReportError::YahooFinanceError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await?;
        flatten_summary(symbol, &payload)
    }

    /// Fetch the short recent-price-history series via the chart API
    async fn fetch_history(&self, symbol: &TickerSymbol) -> Result<Vec<ClosingPrice>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| ReportError::YahooFinanceError(e.to_string()))?;

        let response = provider
            .get_latest_quotes(symbol.as_str(), "1d")
            .await
            .map_err(|e| ReportError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| ReportError::YahooFinanceError(e.to_string()))?;

        Ok(quotes
            .iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|ts| ClosingPrice {
                    date: ts.date_naive(),
                    close: q.close,
                })
            })
            .collect())
    }
}

#[async_trait]
impl MarketDataProvider for YahooFinanceClient {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn lookup(&self, symbol: &TickerSymbol) -> Result<RawMetrics> {
        let info = self.fetch_summary(symbol).await;
        let history = self.fetch_history(symbol).await;

        match (info, history) {
            (Err(info_err), Err(history_err)) => {
                warn!(%info_err, %history_err, "both Yahoo Finance calls failed");
                Err(info_err)
            },
            (info, history) => {
                if let Err(ref e) = info {
                    warn!(error = %e, "quoteSummary fetch failed; continuing with history only");
                }
                if let Err(ref e) = history {
                    warn!(error = %e, "history fetch failed; continuing with fundamentals only");
                }
                let raw = RawMetrics {
                    info: info.unwrap_or_default(),
                    history: history.unwrap_or_default(),
                };
                debug!(
                    fields = raw.info.len(),
                    history_entries = raw.history.len(),
                    "fetched market data"
                );
                Ok(raw)
            },
        }
    }

    fn name(&self) -> &'static str {
        "yahoo-finance"
    }
}

/// Flatten the per-module quoteSummary payload into one flat field bag
///
/// Values are carried over untouched (including Yahoo's `{"raw": ..}`
/// wrappers); typing them is the normalizer's job.
fn flatten_summary(
    symbol: &TickerSymbol,
    payload: &Value,
) -> Result<serde_json::Map<String, Value>> {
    let summary = payload
        .get("quoteSummary")
        .ok_or_else(|| ReportError::YahooFinanceError("missing quoteSummary".to_string()))?;

    if let Some(error) = summary.get("error").filter(|e| !e.is_null()) {
        return Err(ReportError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: error
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("unknown quoteSummary error")
                .to_string(),
        });
    }

    let modules = summary
        .get("result")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .and_then(Value::as_object)
        .ok_or_else(|| {
            ReportError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "empty quoteSummary result".to_string(),
            }
        })?;

    let mut info = serde_json::Map::new();
    for (target, sources) in FIELD_SOURCES {
        for (module, key) in *sources {
            if let Some(value) = modules.get(*module).and_then(|m| m.get(*key)) {
                if !value.is_null() {
                    info.insert((*target).to_string(), value.clone());
                    break;
                }
            }
        }
    }

    Ok(info)
}
