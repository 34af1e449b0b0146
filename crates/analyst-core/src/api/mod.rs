//! Market data provider interface and clients

pub mod yahoo;

pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::metrics::RawMetrics;
use crate::symbol::TickerSymbol;
use async_trait::async_trait;

/// Trait for market data providers
///
/// The single capability the pipeline needs: look up the quote/fundamentals
/// bag plus the short price-history series for one symbol. Implementations
/// must enforce a transport-level timeout on their network calls; the
/// pipeline issues exactly one attempt per request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Look up raw metrics for a symbol
    ///
    /// Any field of the result may be absent; a returned error means no
    /// usable data at all (network failure, unknown symbol, malformed
    /// payload).
    async fn lookup(&self, symbol: &TickerSymbol) -> Result<RawMetrics>;

    /// Get the provider name (e.g., "yahoo-finance")
    fn name(&self) -> &str;
}
