//! Equity research report pipeline
//!
//! This crate turns a stock ticker symbol into a structured equity-research
//! report. Per request it:
//!
//! - Fetches real-time quote/fundamental metrics from a market data provider
//! - Normalizes the loosely-typed response into a fixed-shape record with
//!   explicit "N/A" sentinels
//! - Renders the metrics into a deterministic context block
//! - Assembles the full analyst prompt (bilingual: English or Chinese)
//! - Invokes a text-generation service and returns the prose report
//!
//! A data-provider failure never blocks a report: the pipeline degrades to an
//! all-sentinel context carrying an explicit warning and generates anyway.
//! Only a generation-service failure is terminal for a request.
//!
//! # Example
//!
//! ```rust,ignore
//! use analyst_core::{ReportConfig, ReportPipeline, ReportRequest, ReportLanguage, YahooFinanceClient};
//! use analyst_llm::providers::GeminiProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pipeline = ReportPipeline::new(
//!         Arc::new(YahooFinanceClient::new()?),
//!         Arc::new(GeminiProvider::from_env()?),
//!         ReportConfig::default(),
//!     );
//!
//!     let request = ReportRequest::new("NVDA", "gemini-2.5-flash", ReportLanguage::English);
//!     let result = pipeline.run(&request).await;
//!     if let Some(text) = result.report_text() {
//!         println!("{text}");
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod language;
pub mod metrics;
pub mod prompts;
pub mod symbol;

// Re-export main types for convenience
pub use api::{MarketDataProvider, YahooFinanceClient};
pub use config::ReportConfig;
pub use context::ContextBlock;
pub use engine::{FailureKind, ReportOutcome, ReportPipeline, ReportRequest, ReportResult};
pub use error::{ReportError, Result};
pub use language::ReportLanguage;
pub use metrics::{ClosingPrice, NormalizedMetrics, RawMetrics, normalize};
pub use symbol::TickerSymbol;
