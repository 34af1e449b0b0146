//! Context block construction
//!
//! Renders normalized metrics into the deterministic text block embedded in
//! the prompt. The shape is always complete - every tracked field appears in
//! a fixed order, with absent values rendered as a literal `N/A` - so the
//! downstream prompt is structurally stable across tickers.

use crate::metrics::NormalizedMetrics;
use crate::symbol::TickerSymbol;
use std::fmt;

/// Marker rendered for any absent value
pub const NOT_AVAILABLE: &str = "N/A";

/// An immutable, fully-formatted context text artifact
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextBlock(String);

impl ContextBlock {
    /// Render the context block for a ticker
    ///
    /// `fetch_warning` carries the degraded-data note when the provider call
    /// failed; it is folded into the block so the generation service is told
    /// the figures are unavailable.
    pub fn build(
        ticker: &TickerSymbol,
        metrics: &NormalizedMetrics,
        fetch_warning: Option<&str>,
    ) -> Self {
        let mut text = format!("[Financial Data Context for {ticker}]\n");

        if let Some(reason) = fetch_warning {
            text.push_str(&format!(
                "Warning: could not fetch real-time data ({reason}); the figures below are unavailable.\n"
            ));
        }

        text.push_str(&format!(
            "- Current Price: {} {}\n",
            fmt_number(metrics.current_price),
            metrics.currency
        ));
        text.push_str(&format!("- Market Cap: {}\n", fmt_number(metrics.market_cap)));
        text.push_str(&format!("- Trailing P/E: {}\n", fmt_number(metrics.trailing_pe)));
        text.push_str(&format!("- Forward P/E: {}\n", fmt_number(metrics.forward_pe)));
        text.push_str(&format!("- PEG Ratio: {}\n", fmt_number(metrics.peg_ratio)));
        text.push_str(&format!("- Price/Book: {}\n", fmt_number(metrics.price_to_book)));
        text.push_str(&format!(
            "- Revenue Growth (yoy): {}\n",
            fmt_number(metrics.revenue_growth)
        ));
        text.push_str(&format!(
            "- 52 Week High: {}\n",
            fmt_number(metrics.fifty_two_week_high)
        ));
        text.push_str(&format!(
            "- 52 Week Low: {}\n",
            fmt_number(metrics.fifty_two_week_low)
        ));
        text.push_str(&format!("- Sector: {}\n", fmt_text(metrics.sector.as_deref())));
        text.push_str(&format!(
            "- Industry: {}",
            fmt_text(metrics.industry.as_deref())
        ));

        Self(text)
    }

    /// Get the rendered text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ContextBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render a numeric slot, preserving whatever precision normalization kept
fn fmt_number(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn fmt_text(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
